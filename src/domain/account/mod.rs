//! Account domain - identities, profiles, roles and avatars.

mod avatar;
mod identity;
mod profile;

pub use avatar::{avatar_object_path, cover_object_path, validate_avatar, UploadedFile};
pub use identity::{
    format_provider, AuthSession, Credentials, Identity, IdentityRecord, Metadata, MetadataPatch,
    OAuthProvider,
};
pub use profile::{Profile, ProfileView, Role};
