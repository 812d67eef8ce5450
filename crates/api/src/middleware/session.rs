//! Cookie-based form-session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use fiber_survey_core::error::CoreError;
use uuid::Uuid;

use crate::error::AppError;
use crate::session::{SurveySession, SESSION_COOKIE};
use crate::state::AppState;

/// The caller's live form session, resolved from the `survey_session` cookie.
///
/// ```ignore
/// async fn my_handler(session: FormSession) -> AppResult<Json<()>> {
///     tracing::info!(session_id = %session.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FormSession {
    pub id: Uuid,
    /// Snapshot taken when the request arrived.
    pub session: SurveySession,
}

impl FormSession {
    /// Reject callers that have not passed the password gate.
    pub fn require_editable(&self) -> Result<(), AppError> {
        if self.session.is_editable() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "This form is locked. Unlock it with the password first".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for FormSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let raw = jar.get(SESSION_COOKIE).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("No active form session".into()))
        })?;

        let id = Uuid::parse_str(raw.value()).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid form session".into()))
        })?;

        let session = state.sessions.get(id).await.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Form session expired. Start a new one".into(),
            ))
        })?;

        Ok(FormSession { id, session })
    }
}
