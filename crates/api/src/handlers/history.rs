//! Handlers for the per-user generation history.
//!
//! All endpoints require authentication and only ever touch rows owned by
//! the caller.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pixmorph_core::error::CoreError;
use pixmorph_core::generation::is_blank_prompt;
use pixmorph_core::types::RecordId;
use pixmorph_db::models::history::CreateHistoryRecord;
use pixmorph_db::repositories::HistoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /history
// ---------------------------------------------------------------------------

/// List the caller's history, newest first.
pub async fn list_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let records = HistoryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: records }))
}

// ---------------------------------------------------------------------------
// POST /history
// ---------------------------------------------------------------------------

/// Record a successful generation for the caller.
pub async fn create_history(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateHistoryRecord>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if input.generated_image_url.trim().is_empty() {
        return Err(CoreError::Validation("generated_image_url must not be empty".into()).into());
    }
    if is_blank_prompt(&input.prompt) {
        return Err(CoreError::Validation("prompt must not be empty".into()).into());
    }

    let record = HistoryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        history_id = %record.id,
        user_id = %auth.user_id,
        "History record created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

// ---------------------------------------------------------------------------
// DELETE /history/{id}
// ---------------------------------------------------------------------------

/// Delete one of the caller's records. Unknown or foreign ids are 404.
pub async fn delete_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    let deleted = HistoryRepo::delete_for_user(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "HistoryRecord",
            id,
        }
        .into());
    }

    tracing::info!(history_id = %id, user_id = %auth.user_id, "History record deleted");

    Ok(StatusCode::NO_CONTENT)
}
