pub mod form;
pub mod geo;
pub mod health;
pub mod options;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /options                                   selector enumerations
///
/// /geo/tree                                  cached geo tree
/// /geo/options                               cascading options (POST)
///
/// /forms/{variant}/session                   start a form session (POST)
///
/// /form                                      current draft
/// /form/unlock                               extended-form password (POST)
/// /form/officer                              officer fields (PUT)
/// /form/geo                                  shared geography (PUT)
/// /form/lines                                add (POST), remove last (DELETE)
/// /form/lines/{line}                         line fields (PUT)
/// /form/lines/{line}/points                  add (POST), remove last (DELETE)
/// /form/lines/{line}/points/{point}          point fields (PUT)
/// /form/submit                               validate + append + reset (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(options::router())
        .nest("/geo", geo::router())
        .merge(form::router())
}
