use axum::Json;
use pixmorph_core::preset::{Preset, PRESETS};

use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// GET /presets
// ---------------------------------------------------------------------------

/// List the color-grading preset catalog in display order.
pub async fn list_presets() -> Json<DataResponse<&'static [Preset]>> {
    Json(DataResponse { data: PRESETS })
}
