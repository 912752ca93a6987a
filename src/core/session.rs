use std::time::{Duration, Instant};

use crate::core::types::{ClientInfo, OrderType};

/// Per-operator state for one browser (or CLI invocation).
///
/// Created unauthenticated when an access password is configured; dropped by
/// the owner when the operator logs out or the session goes idle.
#[derive(Debug, Clone)]
pub struct Session {
    pub authenticated: bool,
    pub client: ClientInfo,
    pub order_type: OrderType,
    pub text: String,
    last_seen: Instant,
}

impl Session {
    /// Start a session. Without a gate every session is already authenticated.
    #[must_use]
    pub fn new(gate_enabled: bool) -> Self {
        Self {
            authenticated: !gate_enabled,
            client: ClientInfo::default(),
            order_type: OrderType::default(),
            text: String::new(),
            last_seen: Instant::now(),
        }
    }

    /// A ready-to-use session holding one request, as the CLI builds it
    #[must_use]
    pub fn with_request(client: ClientInfo, order_type: OrderType, text: impl Into<String>) -> Self {
        let mut session = Self::new(false);
        session.update(client, order_type, text);
        session
    }

    /// Check a password attempt. Returns the resulting authentication state.
    pub fn authenticate(&mut self, candidate: &str, expected: &str) -> bool {
        if candidate == expected {
            self.authenticated = true;
        }
        self.touch();
        self.authenticated
    }

    /// Replace the form fields with the operator's latest input
    pub fn update(&mut self, client: ClientInfo, order_type: OrderType, text: impl Into<String>) {
        self.client = client;
        self.order_type = order_type;
        self.text = text.into();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    #[must_use]
    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_gate_state() {
        assert!(!Session::new(true).authenticated);
        assert!(Session::new(false).authenticated);

        let session = Session::new(true);
        assert_eq!(session.client, ClientInfo::default());
        assert_eq!(session.order_type, OrderType::DnaPrimer);
        assert!(session.text.is_empty());
    }

    #[test]
    fn test_authenticate() {
        let mut session = Session::new(true);
        assert!(!session.authenticate("wrong", "secret"));
        assert!(session.authenticate("secret", "secret"));
        // a later wrong attempt does not log out
        assert!(session.authenticate("wrong", "secret"));
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut session = Session::new(false);
        session.update(
            ClientInfo::new("Zhang", "ECUST", "Li lab"),
            OrderType::SirnaRna,
            "Sense: GCUAGCUAGCUAG",
        );
        assert_eq!(session.client.name, "Zhang");
        assert_eq!(session.order_type, OrderType::SirnaRna);
        assert_eq!(session.text, "Sense: GCUAGCUAGCUAG");
    }

    #[test]
    fn test_expiry() {
        let session = Session::new(false);
        assert!(!session.is_expired(Duration::from_secs(60)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(session.is_expired(Duration::ZERO));
    }
}
