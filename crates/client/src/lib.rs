//! Client-side flows for Pixmorph.
//!
//! Everything a front end needs between "the user picked some files" and
//! "the generated image is on screen": encoding, dispatching to the proxy,
//! session tracking, history CRUD and the per-page [`studio::Studio`]
//! controller that ties them together.

pub mod config;
pub mod dispatcher;
pub mod download;
pub mod encoder;
pub mod error;
pub mod history;
pub mod session;
pub mod studio;

pub use error::ClientError;
