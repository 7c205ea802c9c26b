//! Session token primitives.
//!
//! - [`jwt`] -- validation of the identity provider's HS256 access tokens.

pub mod jwt;
