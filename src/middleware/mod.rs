pub mod auth;
pub mod logger;

pub use auth::{CurrentUser, Identity, MaybeUser, TokenVerifier};
pub use logger::{REQUEST_ID_HEADER, logger};
