//! The generation proxy.
//!
//! Validates the client request, forwards it to the AI gateway as one
//! multimodal chat request and unwraps the generated image URL. Stateless:
//! no retry, no caching, nothing persisted.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pixmorph_core::generation::{GenerationRequest, GenerationResponse};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /generate-image
// ---------------------------------------------------------------------------

/// Generate one image from 1-4 input images and a prompt.
///
/// Input problems are reported before any upstream call. A malformed JSON
/// body is reported as a 400 with the standard error envelope.
pub async fn generate_image(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> AppResult<Json<GenerationResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    input.validate()?;

    tracing::info!(
        image_count = input.images.len(),
        prompt_len = input.prompt.len(),
        user_id = ?caller.as_ref().map(|c| c.user_id),
        "Generating image",
    );

    let image_url = state.gateway.generate(&input.images, &input.prompt).await?;

    tracing::info!(image_count = input.images.len(), "Image generated");

    Ok(Json(GenerationResponse { image_url }))
}
