//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid session token.
//! - [`auth::MaybeAuthUser`] -- Accepts anonymous callers, rejects bad tokens.

pub mod auth;
