//! Handler for the static selector enumerations.

use axum::Json;
use fiber_survey_core::choice::with_sentinels;
use fiber_survey_core::labels::{DESIGNATIONS, OTHER, PLACEHOLDER};
use fiber_survey_core::survey::{Company, CoreType};
use serde::Serialize;

use crate::response::DataResponse;

/// Every fixed option list the form renders.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub placeholder: &'static str,
    pub other: &'static str,
    /// Placeholder, designations, then the free-text entry.
    pub designations: Vec<String>,
    pub core_types: Vec<&'static str>,
    pub companies: Vec<&'static str>,
}

/// GET /api/v1/options
pub async fn get_options() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse {
        data: FormOptions {
            placeholder: PLACEHOLDER,
            other: OTHER,
            designations: with_sentinels(DESIGNATIONS.iter().copied()),
            core_types: CoreType::ALL.iter().map(CoreType::as_str).collect(),
            companies: Company::ALL.iter().map(Company::as_str).collect(),
        },
    })
}
