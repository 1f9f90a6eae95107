use crate::error::AuthenticationError;
use crate::helpers::join_cookies;
use strum::Display;

/// An authenticated web session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The session ID, sent with form posts.
    pub sessionid: String,
    /// The session cookies.
    pub cookies: Vec<String>,
    /// The cookies joined into the value of a `Cookie` header.
    pub cookie_header: String,
}

impl Session {
    pub fn new(
        sessionid: String,
        cookies: Vec<String>,
    ) -> Self {
        Self {
            cookie_header: join_cookies(&cookies),
            sessionid,
            cookies,
        }
    }
}

/// The state of the login.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing submitted yet.
    Uninitialized,
    /// Credentials (and possibly a Steam Guard code) were submitted.
    LoggingIn,
    /// Steam asked for a Steam Guard code and none is known yet. The code store is being polled.
    AwaitingChallenge,
    /// The web session is ready for use.
    Authenticated(Session),
    /// Logging in failed but may be retried.
    Errored(AuthenticationError),
    /// A known Steam Guard code was rejected. This is terminal.
    Failed(AuthenticationError),
}

impl SessionState {
    /// Whether the session can be used for requests.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
    
    /// The session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
