//! Session state of a client
//!
//! ```text
//! Disconnected --connect--> Connected --disconnect--> Disconnected
//! ```
//!
//! The token exists exactly while the session is connected.

use std::fmt;

/// Connection state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token, transport released
    Disconnected,
    /// Logged in, transport open
    Connected,
}

impl SessionState {
    /// Gauge value reported to metrics
    pub fn as_metric(&self) -> i64 {
        match self {
            SessionState::Disconnected => 0,
            SessionState::Connected => 1,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Disconnected => f.write_str("disconnected"),
            SessionState::Connected => f.write_str("connected"),
        }
    }
}

/// The authentication token and the state it implies
#[derive(Default)]
pub(crate) struct Session {
    token: Option<String>,
}

impl Session {
    pub(crate) fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn connected(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn disconnected(&mut self) {
        self.token = None;
    }
}

// Keep the token out of debug output.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_transitions() {
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.token().is_none());

        session.connected("0424bd59b807674191e7d77572075f33".to_string());
        assert_eq!(session.state(), SessionState::Connected);
        assert!(session.is_connected());

        session.disconnected();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.token().is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let mut session = Session::default();
        session.connected("secret-token".to_string());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("Connected"));
    }

    #[test]
    fn test_metric_values() {
        assert_eq!(SessionState::Disconnected.as_metric(), 0);
        assert_eq!(SessionState::Connected.as_metric(), 1);
        assert_eq!(SessionState::Connected.to_string(), "connected");
    }
}
