//! Handlers for the geographic lookup tree and cascading options.

use axum::extract::State;
use axum::Json;
use fiber_survey_core::choice::with_sentinels;
use fiber_survey_core::geo::{select_options, GeoLevel, GeoSelection, GeoTree};
use serde::{Deserialize, Serialize};

use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /geo/options`.
#[derive(Debug, Deserialize)]
pub struct OptionsRequest {
    pub level: GeoLevel,
    #[serde(default)]
    pub selection: GeoSelection,
}

#[derive(Debug, Serialize)]
pub struct LevelOptions {
    pub level: GeoLevel,
    /// Placeholder, the sorted tree options, then the free-text entry.
    pub options: Vec<String>,
}

/// GET /api/v1/geo/tree
pub async fn get_tree(State(state): State<AppState>) -> Json<DataResponse<GeoTree>> {
    let tree = state.geo.tree().await;
    Json(DataResponse {
        data: GeoTree::clone(&tree),
    })
}

/// POST /api/v1/geo/options
///
/// Options for one selector given the choices already made above it.
pub async fn post_options(
    State(state): State<AppState>,
    Json(input): Json<OptionsRequest>,
) -> Json<DataResponse<LevelOptions>> {
    let tree = state.geo.tree().await;
    let options = select_options(input.level, &tree, &input.selection);

    Json(DataResponse {
        data: LevelOptions {
            level: input.level,
            options: with_sentinels(options),
        },
    })
}
