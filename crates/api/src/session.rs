//! In-memory form sessions.
//!
//! Each browser gets one draft per session, identified by a random UUID in
//! the `survey_session` cookie. Sessions expire after a period of
//! inactivity and are swept lazily whenever a new one is created.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use fiber_survey_core::draft::SurveyDraft;
use fiber_survey_core::survey::FormVariant;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "survey_session";

#[derive(Debug, Clone)]
pub struct SurveySession {
    pub variant: FormVariant,
    /// Whether the password gate has been passed (always true for forms
    /// without one).
    pub unlocked: bool,
    pub draft: SurveyDraft,
    expires_at: Instant,
}

impl SurveySession {
    /// Whether draft edits and submits are allowed.
    pub fn is_editable(&self) -> bool {
        self.unlocked || !self.variant.requires_password()
    }
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SurveySession>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a fresh draft for `variant` and return its id.
    pub async fn create(&self, variant: FormVariant) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let session = SurveySession {
            variant,
            unlocked: !variant.requires_password(),
            draft: SurveyDraft::default(),
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        let swept = before - sessions.len();
        sessions.insert(id, session);

        tracing::debug!(session_id = %id, variant = variant.as_str(), swept, "Form session created");
        id
    }

    /// A snapshot of a live session, extending its lifetime.
    pub async fn get(&self, id: Uuid) -> Option<SurveySession> {
        self.update(id, |session| session.clone()).await
    }

    /// Run `f` against a live session, extending its lifetime. Returns
    /// `None` when the session is unknown or expired.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut SurveySession) -> T) -> Option<T> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).filter(|s| s.expires_at > now)?;
        session.expires_at = now + self.ttl;
        Some(f(session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
