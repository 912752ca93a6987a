use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::core::session::Session;

/// Upper bound on live sessions (memory protection)
pub const MAX_SESSIONS: usize = 10_000;

/// Default idle time before a session is dropped
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// Upper bound on pasted text held across all sessions
pub const MAX_RETAINED_TEXT_BYTES: usize = 64 * 1024 * 1024; // 64MB

/// Sessions of all connected operators, keyed by the id in their cookie.
///
/// Each operator's client info, order type and text live in their own
/// [`Session`]; nothing is shared between sessions.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
    gate_enabled: bool,
    text_budget: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(gate_enabled: bool, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            gate_enabled,
            text_budget: MAX_RETAINED_TEXT_BYTES,
        }
    }

    /// Override the total pasted-text budget
    #[must_use]
    pub fn with_text_budget(mut self, bytes: usize) -> Self {
        self.text_budget = bytes;
        self
    }

    #[must_use]
    pub fn gate_enabled(&self) -> bool {
        self.gate_enabled
    }

    // A panic while holding the lock leaves plain data behind; keep serving it
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new session and return its id.
    ///
    /// Expired sessions are dropped first; if the store is still full the
    /// least recently used session is evicted.
    pub fn create(&self) -> Uuid {
        let mut sessions = self.lock();
        drop_expired(&mut sessions, self.ttl);

        if sessions.len() >= MAX_SESSIONS {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_seen())
                .map(|(id, _)| *id);
            if let Some(id) = oldest {
                tracing::warn!("Session limit reached, evicting {}", id);
                sessions.remove(&id);
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::new(self.gate_enabled));
        tracing::debug!("Created session {}", id);
        id
    }

    /// Whether `id` names a live session
    #[must_use]
    pub fn contains(&self, id: &Uuid) -> bool {
        self.with_session(id, |_| ()).is_some()
    }

    /// Run `f` against a live session. Returns `None` for unknown or expired ids.
    pub fn with_session<R>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.lock();

        if sessions.get(id).is_some_and(|s| s.is_expired(self.ttl)) {
            tracing::debug!("Session {} expired", id);
            sessions.remove(id);
            return None;
        }

        let session = sessions.get_mut(id)?;
        session.touch();
        let before = session.text.len();
        let result = f(session);

        if session.text.len() > before {
            enforce_text_budget(&mut sessions, id, self.text_budget);
        }
        Some(result)
    }

    /// End a session (logout)
    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        drop_expired(&mut self.lock(), self.ttl)
    }

    /// Bytes of pasted text currently held across all sessions
    #[must_use]
    pub fn retained_text_bytes(&self) -> usize {
        self.lock().values().map(|s| s.text.len()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn drop_expired(sessions: &mut HashMap<Uuid, Session>, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired(ttl));
    before - sessions.len()
}

/// Clear the stored text of least recently used sessions, never `keep`'s,
/// until the total fits the budget. Sessions and their login state survive.
fn enforce_text_budget(sessions: &mut HashMap<Uuid, Session>, keep: &Uuid, budget: usize) {
    let mut total: usize = sessions.values().map(|s| s.text.len()).sum();
    if total <= budget {
        return;
    }

    let mut candidates: Vec<_> = sessions
        .iter()
        .filter(|(id, s)| *id != keep && !s.text.is_empty())
        .map(|(id, s)| (s.last_seen(), *id))
        .collect();
    candidates.sort_unstable();

    let mut cleared = 0usize;
    for (_, id) in candidates {
        if total <= budget {
            break;
        }
        if let Some(session) = sessions.get_mut(&id) {
            total -= session.text.len();
            session.text = String::new();
            cleared += 1;
        }
    }

    tracing::warn!(
        "Text budget exceeded, cleared stored text of {} sessions",
        cleared
    );
}
