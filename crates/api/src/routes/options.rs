use axum::routing::get;
use axum::Router;

use crate::handlers::options;
use crate::state::AppState;

/// ```text
/// GET    /options       designations, core types, companies
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/options", get(options::get_options))
}
