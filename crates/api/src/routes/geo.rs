use axum::routing::{get, post};
use axum::Router;

use crate::handlers::geo;
use crate::state::AppState;

/// Routes mounted at `/geo`.
///
/// ```text
/// GET    /tree          full division -> district -> upazila -> union tree
/// POST   /options       options for one level given the choices above it
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tree", get(geo::get_tree))
        .route("/options", post(geo::post_options))
}
