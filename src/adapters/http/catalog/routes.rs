//! Axum router configuration for catalog endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    admin_list_comics, create_comic, get_comic_by_id, get_comic_detail, get_my_rating,
    list_comics, list_genres, popular_comics, rate_comic,
};

/// Catalog routes, mounted under `/api`.
///
/// Every `/comics/:slug...` route shares the `:slug` segment name; the
/// rating routes read it as a numeric comic id.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/comics", get(list_comics))
        .route("/comics/popular", get(popular_comics))
        .route("/comics/:slug", get(get_comic_detail))
        .route("/comics/:slug/rating", get(get_my_rating).put(rate_comic))
        .route("/books/:id", get(get_comic_by_id))
        .route("/genres", get(list_genres))
        .route("/admin/comics", get(admin_list_comics).post(create_comic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::test_support::test_state;

    #[test]
    fn catalog_routes_build() {
        let _router: Router = catalog_routes().with_state(test_state());
    }
}
