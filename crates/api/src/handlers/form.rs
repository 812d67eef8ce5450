//! Handlers for the per-session survey form: session start, password gate,
//! draft edits, the line/point repeater, and submit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use fiber_survey_core::draft::{LineFields, OfficerDraft, SurveyDraft};
use fiber_survey_core::error::CoreError;
use fiber_survey_core::geo::GeoSelection;
use fiber_survey_core::rows::{column_order, format_timestamp, survey_rows};
use fiber_survey_core::survey::{FormVariant, PointRecord};
use fiber_survey_core::validation::validate_batch;
use fiber_survey_store::SheetRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::session::FormSession;
use crate::response::DataResponse;
use crate::session::{SurveySession, SESSION_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /form/unlock`.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// The draft as the client renders it.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub variant: FormVariant,
    pub unlocked: bool,
    pub line_count: usize,
    /// Point count per line, in line order.
    pub point_counts: Vec<usize>,
    pub draft: SurveyDraft,
}

impl FormView {
    fn of(session: &SurveySession) -> Self {
        Self {
            variant: session.variant,
            unlocked: session.is_editable(),
            line_count: session.draft.line_count(),
            point_counts: session.draft.lines().iter().map(|l| l.points.len()).collect(),
            draft: session.draft.clone(),
        }
    }
}

/// Successful submit response.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// Rows written to the sheet (one per line).
    pub rows_appended: usize,
    pub timestamp: String,
    /// The draft after reset, ready for the next entry.
    pub form: FormView,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/forms/{variant}/session
///
/// Start a blank draft for `simple` or `extended` and hand back its cookie.
pub async fn start_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(variant): Path<String>,
) -> AppResult<impl IntoResponse> {
    let variant: FormVariant = variant.parse()?;
    let id = state.sessions.create(variant).await;

    let session = state.sessions.get(id).await.ok_or_else(session_gone)?;

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(session_id = %id, variant = variant.as_str(), "Form session started");

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(DataResponse {
            data: FormView::of(&session),
        }),
    ))
}

/// GET /api/v1/form
pub async fn get_form(session: FormSession) -> Json<DataResponse<FormView>> {
    Json(DataResponse {
        data: FormView::of(&session.session),
    })
}

/// POST /api/v1/form/unlock
///
/// Check the static password and unlock the extended form for this session.
pub async fn unlock(
    State(state): State<AppState>,
    session: FormSession,
    Json(input): Json<UnlockRequest>,
) -> AppResult<Json<DataResponse<FormView>>> {
    if !session.session.variant.requires_password() {
        return Err(AppError::BadRequest(
            "This form does not need a password".into(),
        ));
    }

    let password = state.config.form_password.as_ref().ok_or_else(|| {
        AppError::Core(CoreError::Forbidden(
            "The extended form is not enabled on this server".into(),
        ))
    })?;

    if !password.matches(&input.password) {
        tracing::warn!(session_id = %session.id, "Extended form unlock rejected");
        return Err(AppError::Core(CoreError::Unauthorized(
            "ভুল পাসওয়ার্ড".into(),
        )));
    }

    let view = state
        .sessions
        .update(session.id, |s| {
            s.unlocked = true;
            FormView::of(s)
        })
        .await
        .ok_or_else(session_gone)?;

    tracing::info!(session_id = %session.id, "Extended form unlocked");
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Draft edits
// ---------------------------------------------------------------------------

/// PUT /api/v1/form/officer
pub async fn put_officer(
    State(state): State<AppState>,
    session: FormSession,
    Json(input): Json<OfficerDraft>,
) -> AppResult<Json<DataResponse<FormView>>> {
    edit(&state, &session, |draft| {
        draft.officer = input;
        Ok(())
    })
    .await
}

/// PUT /api/v1/form/geo
///
/// Shared geography; only the simple form has one.
pub async fn put_geo(
    State(state): State<AppState>,
    session: FormSession,
    Json(input): Json<GeoSelection>,
) -> AppResult<Json<DataResponse<FormView>>> {
    if session.session.variant != FormVariant::Simple {
        return Err(AppError::BadRequest(
            "The extended form has no shared geography; set it per line".into(),
        ));
    }
    edit(&state, &session, |draft| {
        draft.geo = input;
        Ok(())
    })
    .await
}

/// POST /api/v1/form/lines
pub async fn add_line(
    State(state): State<AppState>,
    session: FormSession,
) -> AppResult<Json<DataResponse<FormView>>> {
    edit(&state, &session, |draft| {
        draft.add_line();
        Ok(())
    })
    .await
}

/// DELETE /api/v1/form/lines
///
/// Drops the last line; the first line always stays.
pub async fn remove_line(
    State(state): State<AppState>,
    session: FormSession,
) -> AppResult<Json<DataResponse<FormView>>> {
    edit(&state, &session, |draft| {
        draft.remove_line();
        Ok(())
    })
    .await
}

/// PUT /api/v1/form/lines/{line}
pub async fn put_line(
    State(state): State<AppState>,
    session: FormSession,
    Path(line): Path<usize>,
    Json(input): Json<LineFields>,
) -> AppResult<Json<DataResponse<FormView>>> {
    edit(&state, &session, |draft| draft.update_line(line, input)).await
}

/// POST /api/v1/form/lines/{line}/points
pub async fn add_point(
    State(state): State<AppState>,
    session: FormSession,
    Path(line): Path<usize>,
) -> AppResult<Json<DataResponse<FormView>>> {
    require_points(&session)?;
    edit(&state, &session, |draft| draft.add_point(line).map(|_| ())).await
}

/// DELETE /api/v1/form/lines/{line}/points
pub async fn remove_point(
    State(state): State<AppState>,
    session: FormSession,
    Path(line): Path<usize>,
) -> AppResult<Json<DataResponse<FormView>>> {
    require_points(&session)?;
    edit(&state, &session, |draft| draft.remove_point(line).map(|_| ())).await
}

/// PUT /api/v1/form/lines/{line}/points/{point}
pub async fn put_point(
    State(state): State<AppState>,
    session: FormSession,
    Path((line, point)): Path<(usize, usize)>,
    Json(input): Json<PointRecord>,
) -> AppResult<Json<DataResponse<FormView>>> {
    require_points(&session)?;
    edit(&state, &session, |draft| draft.update_point(line, point, input)).await
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/form/submit
///
/// Validate the whole draft, append one row per line to the variant's sheet,
/// then reset the repeater. On any failure the draft is left as it was.
pub async fn submit(
    State(state): State<AppState>,
    session: FormSession,
) -> AppResult<Json<DataResponse<SubmitResponse>>> {
    session.require_editable()?;

    let variant = session.session.variant;
    let batch = session.session.draft.to_batch(variant);
    validate_batch(&batch)?;

    let timestamp = format_timestamp(chrono::Local::now().naive_local());
    let rows = survey_rows(&batch, &timestamp);

    let target = state.sheets.for_variant(variant);
    let rows_appended = {
        let _guard = target.append_lock.lock().await;
        SheetRepo::append(target.store.as_ref(), &rows, column_order(variant)).await?
    };

    let form = state
        .sessions
        .update(session.id, |s| {
            s.draft.reset_after_submit();
            FormView::of(s)
        })
        .await
        .ok_or_else(session_gone)?;

    tracing::info!(
        session_id = %session.id,
        variant = variant.as_str(),
        rows = rows_appended,
        officer = %batch.officer.name,
        "Survey submitted"
    );

    Ok(Json(DataResponse {
        data: SubmitResponse {
            rows_appended,
            timestamp,
            form,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply `f` to the session's draft and return the updated view. Nothing is
/// changed when `f` fails.
async fn edit<F>(
    state: &AppState,
    session: &FormSession,
    f: F,
) -> AppResult<Json<DataResponse<FormView>>>
where
    F: FnOnce(&mut SurveyDraft) -> Result<(), CoreError>,
{
    session.require_editable()?;

    let view = state
        .sessions
        .update(session.id, |s| f(&mut s.draft).map(|()| FormView::of(s)))
        .await
        .ok_or_else(session_gone)??;

    Ok(Json(DataResponse { data: view }))
}

fn require_points(session: &FormSession) -> Result<(), AppError> {
    if session.session.variant == FormVariant::Extended {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Intermediate points are only recorded on the extended form".into(),
        ))
    }
}

fn session_gone() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Form session expired. Start a new one".into(),
    ))
}
