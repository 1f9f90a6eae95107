//! The login state machine. A [`SessionManager`] logs on through a [`SteamConnection`], answers
//! Steam Guard challenges (polling a [`ChallengeStore`] when no code is known), and gates every
//! authenticated request behind [`SessionManager::ensure_ready`].

mod connection;
mod credentials;
mod driver;
mod state;

pub use connection::{
    event_channel,
    ConnectionEvent,
    ConnectionEventSender,
    ConnectionEvents,
    LogOnDetails,
    SteamConnection,
};
pub use credentials::Credentials;
pub use state::{Session, SessionState};

use driver::SessionDriver;
use crate::challenge_store::ChallengeStore;
use crate::enums::FailurePolicy;
use crate::error::{AuthenticationError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// How often the code store is read while waiting for a Steam Guard code.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Options for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Interval between reads of the code store while waiting for a Steam Guard code. Default is
    /// 10 seconds.
    pub poll_interval: Duration,
    /// What to do when a known Steam Guard code is rejected. Default is
    /// [`FailurePolicy::Exit`].
    pub failure_policy: FailurePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            failure_policy: FailurePolicy::default(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Command {
    LogOn,
}

/// Handle to the login state machine. Cloning is cheap and every clone observes the same
/// session.
#[derive(Debug, Clone)]
pub struct SessionManager {
    state: watch::Receiver<SessionState>,
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionManager {
    /// Starts logging on.
    /// 
    /// The code store is seeded with the supplied Steam Guard code (or left empty) if it does not
    /// exist yet. When no code was supplied, a code already present in the store is used. Events
    /// from `events` are processed by a task spawned on the current tokio runtime.
    pub async fn start(
        credentials: Credentials,
        connection: Arc<dyn SteamConnection>,
        events: ConnectionEvents,
        store: Arc<dyn ChallengeStore>,
        options: SessionOptions,
    ) -> Result<Self> {
        let supplied_code = credentials.supplied_steam_guard_code()
            .map(|code| code.to_string());
        
        store.ensure_exists(supplied_code.as_deref().unwrap_or_default()).await?;
        
        let steam_guard_code = match supplied_code {
            Some(code) => Some(code),
            None => {
                let code = store.read_once().await?;
                
                (!code.is_empty()).then_some(code)
            },
        };
        let (state_tx, state_rx) = watch::channel(SessionState::Uninitialized);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (codes_tx, codes_rx) = mpsc::unbounded_channel();
        let mut driver = SessionDriver {
            credentials,
            steam_guard_code,
            connection,
            store,
            options,
            state: state_tx,
            codes_tx,
            poller: None,
        };
        
        driver.log_on().await?;
        tokio::spawn(driver.run(events, commands_rx, codes_rx));
        
        Ok(Self {
            state: state_rx,
            commands: commands_tx,
        })
    }
    
    /// Waits until the web session is ready and returns it.
    /// 
    /// Returns immediately if already authenticated. Otherwise waits for the next transition to
    /// either an authenticated state or an error. Any number of callers may wait at once; they
    /// are all released by the same transition.
    pub async fn ensure_ready(&self) -> Result<Session> {
        let mut state = self.state.clone();
        
        // An error from before this call does not count; wait for the next outcome.
        if let Some(result) = readiness(&state.borrow_and_update(), false) {
            return result;
        }
        
        loop {
            if state.changed().await.is_err() {
                return Err(AuthenticationError::ConnectionClosed.into());
            }
            
            if let Some(result) = readiness(&state.borrow_and_update(), true) {
                return result;
            }
        }
    }
    
    /// Submits the credentials again after a failed login. Has no effect while authenticated or
    /// after a Steam Guard code was rejected.
    pub fn log_on(&self) -> Result<()> {
        self.commands.send(Command::LogOn)
            .map_err(|_| AuthenticationError::ConnectionClosed)?;
        
        Ok(())
    }
    
    /// The current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }
    
    /// Whether the session can be used for requests.
    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready()
    }
    
    /// A receiver for observing state changes.
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }
}

/// The outcome for a waiter seeing `state`, or `None` to keep waiting.
fn readiness(
    state: &SessionState,
    include_errored: bool,
) -> Option<Result<Session>> {
    match state {
        SessionState::Authenticated(session) => Some(Ok(session.clone())),
        SessionState::Failed(error) => Some(Err(error.clone().into())),
        SessionState::Errored(error) if include_errored => Some(Err(error.clone().into())),
        _ => None,
    }
}
