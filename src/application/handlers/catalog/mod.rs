//! Catalog handlers.
//!
//! ## Queries
//! - Browse, popular strip, comic detail, legacy by-id lookup
//! - Genre list, admin comic table, caller's rating
//!
//! ## Commands
//! - Insert a comic (admin)
//! - Rate a comic

mod admin_list_comics;
mod create_comic;
mod get_comic_by_id;
mod get_comic_detail;
mod list_comics;
mod list_genres;
mod popular_comics;
mod rate_comic;

pub(crate) use get_comic_detail::find_comic;

// Commands
pub use create_comic::{CoverSettings, CreateComicCommand, CreateComicHandler};
pub use rate_comic::{RateComicCommand, RateComicHandler, RateComicResult};

// Queries
pub use admin_list_comics::{AdminListComicsHandler, AdminListComicsQuery};
pub use get_comic_by_id::{GetComicByIdHandler, GetComicByIdQuery};
pub use get_comic_detail::{ComicDetail, GetComicDetailHandler, GetComicDetailQuery};
pub use list_comics::{ListComicsHandler, ListComicsQuery, ListComicsResult};
pub use list_genres::ListGenresHandler;
pub use popular_comics::{PopularComicsHandler, PopularComicsQuery};
pub use rate_comic::{GetMyRatingHandler, GetMyRatingQuery};
