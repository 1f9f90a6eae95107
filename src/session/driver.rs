use super::{Command, Credentials, LogOnDetails, Session, SessionOptions, SessionState};
use super::connection::{ConnectionEvent, ConnectionEvents, SteamConnection};
use crate::INVALID_STEAM_GUARD_CODE_EXIT_CODE;
use crate::challenge_store::ChallengeStore;
use crate::enums::{FailurePolicy, PersonaState};
use crate::error::AuthenticationError;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Owns the login state machine. Runs as a single task and is the only writer of the session
/// state; everything else observes it through the watch channel.
pub(super) struct SessionDriver {
    pub(super) credentials: Credentials,
    /// The code known to the session, either supplied up front or found in the store when
    /// logging on. Codes picked up while polling are submitted once and never kept here.
    pub(super) steam_guard_code: Option<String>,
    pub(super) connection: Arc<dyn SteamConnection>,
    pub(super) store: Arc<dyn ChallengeStore>,
    pub(super) options: SessionOptions,
    pub(super) state: watch::Sender<SessionState>,
    pub(super) codes_tx: mpsc::UnboundedSender<String>,
    pub(super) poller: Option<JoinHandle<()>>,
}

impl SessionDriver {
    pub(super) async fn run(
        mut self,
        mut events: ConnectionEvents,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut codes: mpsc::UnboundedReceiver<String>,
    ) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        if !self.is_failed() {
                            self.transition(SessionState::Errored(AuthenticationError::ConnectionClosed));
                        }
                        
                        break;
                    },
                },
                Some(code) = codes.recv() => self.submit_polled_code(code).await,
                Some(command) = commands.recv() => self.handle_command(command).await,
            }
        }
        
        self.stop_polling();
        log::debug!("Session driver stopped");
    }
    
    /// Submits the credentials.
    pub(super) async fn log_on(&mut self) -> Result<(), AuthenticationError> {
        let details = LogOnDetails {
            account_name: self.credentials.account_name().to_string(),
            password: self.credentials.password().to_string(),
            two_factor_code: self.steam_guard_code.clone(),
        };
        
        self.transition(SessionState::LoggingIn);
        
        if let Err(error) = self.connection.log_on(details).await {
            let error = AuthenticationError::from(error);
            
            log::error!("Login error: {error}");
            self.transition(SessionState::Errored(error.clone()));
            return Err(error);
        }
        
        Ok(())
    }
    
    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::LogOn => {
                if matches!(*self.state.borrow(), SessionState::Authenticated(_) | SessionState::Failed(_)) {
                    log::debug!("Ignoring log on request");
                    return;
                }
                
                if self.steam_guard_code.is_none() {
                    self.steam_guard_code = self.read_store().await;
                }
                
                // The error is recorded in the state for waiters.
                let _ = self.log_on().await;
            },
        }
    }
    
    async fn handle_event(&mut self, event: ConnectionEvent) {
        if self.is_failed() {
            log::debug!("Ignoring {event:?} after failed login");
            return;
        }
        
        match event {
            ConnectionEvent::LoggedOn => {
                log::info!("Successfully logged into Steam");
                self.clear_store().await;
                
                if let Err(error) = self.connection.set_persona(PersonaState::Online).await {
                    log::warn!("Error setting persona state: {error}");
                }
            },
            ConnectionEvent::WebSession {
                sessionid,
                cookies,
            } => {
                self.stop_polling();
                self.transition(SessionState::Authenticated(Session::new(sessionid, cookies)));
                self.clear_store().await;
            },
            ConnectionEvent::SteamGuard {
                domain,
                last_code_wrong,
            } => {
                match self.steam_guard_code.clone() {
                    // A known code is never retried once rejected.
                    Some(_) if last_code_wrong => {
                        self.fail(AuthenticationError::InvalidSteamGuardCode).await;
                    },
                    Some(code) => self.submit_code(code).await,
                    None => self.await_challenge(domain, last_code_wrong).await,
                }
            },
            ConnectionEvent::Error(message) => {
                log::error!("Login error: {message}");
                
                if self.steam_guard_code.is_some() {
                    self.fail(AuthenticationError::InvalidSteamGuardCode).await;
                } else {
                    self.stop_polling();
                    self.transition(SessionState::Errored(AuthenticationError::Connection(message)));
                }
            },
        }
    }
    
    async fn submit_code(&mut self, code: String) {
        match self.connection.submit_steam_guard_code(code).await {
            Ok(()) => self.transition(SessionState::LoggingIn),
            Err(error) => {
                log::error!("Error submitting Steam Guard code: {error}");
                self.transition(SessionState::Errored(error.into()));
            },
        }
    }
    
    async fn submit_polled_code(&mut self, code: String) {
        if !matches!(*self.state.borrow(), SessionState::AwaitingChallenge) {
            log::debug!("Discarding Steam Guard code read after challenge was resolved");
            return;
        }
        
        self.poller = None;
        self.submit_code(code).await;
    }
    
    async fn await_challenge(&mut self, domain: Option<String>, last_code_wrong: bool) {
        if last_code_wrong {
            log::warn!("Steam Guard code was wrong");
            // The rejected code is still in the store.
            self.clear_store().await;
        }
        
        self.transition(SessionState::AwaitingChallenge);
        
        if self.poller.as_ref().is_some_and(|poller| !poller.is_finished()) {
            return;
        }
        
        match domain {
            Some(domain) => log::info!("Steam Guard code sent to email at {domain}"),
            None => log::info!("Steam Guard code required from mobile authenticator"),
        }
        
        log::info!("Waiting for Steam Guard code...");
        
        let store = Arc::clone(&self.store);
        let codes_tx = self.codes_tx.clone();
        let interval = self.options.poll_interval;
        
        self.poller = Some(tokio::spawn(async move {
            let code = store.poll_until_present(interval).await;
            
            // The driver is gone if this fails.
            let _ = codes_tx.send(code);
        }));
    }
    
    async fn fail(&mut self, error: AuthenticationError) {
        log::error!("{error}.");
        self.stop_polling();
        self.clear_store().await;
        self.transition(SessionState::Failed(error));
        
        if self.options.failure_policy == FailurePolicy::Exit {
            log::error!("Exiting.");
            std::process::exit(INVALID_STEAM_GUARD_CODE_EXIT_CODE);
        }
    }
    
    fn transition(&self, state: SessionState) {
        let previous = self.state.send_replace(state);
        
        log::debug!("Session state changed from {previous} to {}", *self.state.borrow());
    }
    
    fn is_failed(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Failed(_))
    }
    
    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
    
    async fn read_store(&self) -> Option<String> {
        match self.store.read_once().await {
            Ok(code) if !code.is_empty() => Some(code),
            Ok(_) => None,
            Err(error) => {
                log::warn!("Error reading Steam Guard code: {error}");
                None
            },
        }
    }
    
    async fn clear_store(&self) {
        if let Err(error) = self.store.clear().await {
            log::warn!("Error removing Steam Guard code: {error}");
        }
    }
}
