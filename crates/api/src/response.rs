//! Shared response envelope types for API handlers.
//!
//! Collection and entity responses use a `{ "data": ... }` envelope. The
//! generation proxy is the exception: it answers `{ "imageUrl": ... }` to
//! stay wire-compatible with existing clients.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
