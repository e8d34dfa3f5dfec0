//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{get_profile, login, oauth_url, register, update_profile};

/// Account routes, mounted under `/api`.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/oauth/:provider", get(oauth_url))
        .route("/profile", get(get_profile).put(update_profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::test_support::test_state;

    #[test]
    fn account_routes_build() {
        let _router: Router = account_routes().with_state(test_state());
    }
}
