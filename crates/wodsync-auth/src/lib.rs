//! Google OAuth2 credential provider for wodsync.
//!
//! The rest of the system only needs one thing from this crate:
//! [`GoogleAuth::access_token`], which yields a usable bearer credential,
//! refreshing or running the interactive authorization flow as needed.

pub mod google;
pub mod storage;

pub use google::{GoogleAuth, GoogleTokenResponse};
pub use storage::{TokenSet, TokenStore};
