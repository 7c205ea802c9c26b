//! Domain types and pure logic shared by the Pixmorph server and client.
//!
//! Nothing in this crate performs I/O. Network and file access live in
//! `pixmorph-gateway`, `pixmorph-api` and `pixmorph-client`.

pub mod data_url;
pub mod error;
pub mod generation;
pub mod preset;
pub mod prompt;
pub mod selection;
pub mod types;
