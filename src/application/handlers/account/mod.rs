//! Account handlers.
//!
//! ## Commands
//! - Sign in, sign up
//! - Update profile (display name, bio, avatar)
//!
//! ## Queries
//! - OAuth authorize URL
//! - Profile page
//! - Admin gate

mod admin_gate;
mod get_profile;
mod oauth_url;
mod sign_in;
mod sign_up;
mod update_profile;

pub(crate) use get_profile::load_profile;

// Commands
pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_up::{SignUpCommand, SignUpHandler};
pub use update_profile::{AvatarSettings, UpdateProfileCommand, UpdateProfileHandler};

// Queries
pub use admin_gate::AdminGate;
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use oauth_url::{OAuthUrlHandler, OAuthUrlQuery};
