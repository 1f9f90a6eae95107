//! The boundary with the library that speaks Steam's login protocol. The session never talks to
//! Steam's connection servers itself; it drives a [`SteamConnection`] and reacts to the
//! [`ConnectionEvent`]s it emits.

use crate::enums::PersonaState;
use crate::error::ConnectionError;
use std::fmt;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Sending half of the event channel, held by the [`SteamConnection`] implementation.
pub type ConnectionEventSender = mpsc::UnboundedSender<ConnectionEvent>;
/// Receiving half of the event channel, handed to the session.
pub type ConnectionEvents = mpsc::UnboundedReceiver<ConnectionEvent>;

/// Creates a channel for delivering [`ConnectionEvent`]s to the session.
pub fn event_channel() -> (ConnectionEventSender, ConnectionEvents) {
    mpsc::unbounded_channel()
}

/// Details submitted when logging on.
#[derive(Clone, PartialEq, Eq)]
pub struct LogOnDetails {
    pub account_name: String,
    pub password: String,
    pub two_factor_code: Option<String>,
}

impl fmt::Debug for LogOnDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOnDetails")
            .field("account_name", &self.account_name)
            .field("two_factor_code", &self.two_factor_code.is_some())
            .finish_non_exhaustive()
    }
}

/// Lifecycle signals from the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Logged on to Steam.
    LoggedOn,
    /// A web session was established.
    WebSession {
        sessionid: String,
        cookies: Vec<String>,
    },
    /// Steam wants a Steam Guard code.
    SteamGuard {
        /// The email domain the code was sent to, or `None` for a mobile authenticator code.
        domain: Option<String>,
        /// Whether the previously submitted code was wrong.
        last_code_wrong: bool,
    },
    /// The connection failed or logging on was rejected.
    Error(String),
}

/// A connection to Steam that can log on and accept Steam Guard codes.
#[async_trait]
pub trait SteamConnection: Send + Sync {
    /// Starts logging on. Progress is reported through [`ConnectionEvent`]s.
    async fn log_on(&self, details: LogOnDetails) -> Result<(), ConnectionError>;
    
    /// Answers a [`ConnectionEvent::SteamGuard`] challenge.
    async fn submit_steam_guard_code(&self, code: String) -> Result<(), ConnectionError>;
    
    /// Sets the online status shown to friends.
    async fn set_persona(&self, state: PersonaState) -> Result<(), ConnectionError>;
}
