//! Repository for the `image_history` table.
//!
//! Every query is scoped by `user_id`, so a caller can only ever see or
//! remove its own rows.

use pixmorph_core::types::{RecordId, UserId};
use sqlx::PgPool;

use crate::models::history::{CreateHistoryRecord, HistoryRecord};

/// Column list for `image_history` queries.
const COLUMNS: &str = "\
    id, user_id, original_image_url, generated_image_url, prompt, created_at";

/// Provides create/list/delete operations for history records.
///
/// There is intentionally no update: a regenerated image is a new row.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Record a generation for `user_id`, returning the full row.
    pub async fn create(
        pool: &PgPool,
        user_id: UserId,
        input: &CreateHistoryRecord,
    ) -> Result<HistoryRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO image_history \
                (user_id, original_image_url, generated_image_url, prompt) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(user_id)
            .bind(&input.original_image_url)
            .bind(&input.generated_image_url)
            .bind(&input.prompt)
            .fetch_one(pool)
            .await
    }

    /// All records owned by `user_id`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM image_history \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a record owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: UserId,
        id: RecordId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM image_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
