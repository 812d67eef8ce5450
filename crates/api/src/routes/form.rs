use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Form session and draft routes.
///
/// ```text
/// POST   /forms/{variant}/session                 start session, set cookie
/// GET    /form                                    current draft
/// POST   /form/unlock                             password gate
/// PUT    /form/officer                            officer fields
/// PUT    /form/geo                                shared geography
/// POST   /form/lines                              add line
/// DELETE /form/lines                              remove last line
/// PUT    /form/lines/{line}                       line fields
/// POST   /form/lines/{line}/points                add point
/// DELETE /form/lines/{line}/points                remove last point
/// PUT    /form/lines/{line}/points/{point}        point fields
/// POST   /form/submit                             submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms/{variant}/session", post(form::start_session))
        .route("/form", get(form::get_form))
        .route("/form/unlock", post(form::unlock))
        .route("/form/officer", put(form::put_officer))
        .route("/form/geo", put(form::put_geo))
        .route("/form/lines", post(form::add_line).delete(form::remove_line))
        .route("/form/lines/{line}", put(form::put_line))
        .route(
            "/form/lines/{line}/points",
            post(form::add_point).delete(form::remove_point),
        )
        .route("/form/lines/{line}/points/{point}", put(form::put_point))
        .route("/form/submit", post(form::submit))
}
