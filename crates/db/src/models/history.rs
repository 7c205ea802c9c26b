//! Generation history entity model and DTOs.

use pixmorph_core::types::{RecordId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `image_history` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub original_image_url: Option<String>,
    pub generated_image_url: String,
    pub prompt: String,
    pub created_at: Timestamp,
}

/// DTO for recording a new generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateHistoryRecord {
    #[serde(default)]
    pub original_image_url: Option<String>,
    pub generated_image_url: String,
    pub prompt: String,
}
