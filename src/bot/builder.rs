use super::SteamTradeBot;
use crate::challenge_store::{ChallengeStore, FileChallengeStore, DEFAULT_STEAM_GUARD_FILE_PATH};
use crate::enums::FailurePolicy;
use crate::error::{ParameterError, Result};
use crate::helpers::{get_default_client, COMMUNITY_URL, USER_AGENT_STRING};
use crate::session::{
    Credentials,
    SessionManager,
    SessionOptions,
    SteamConnection,
    ConnectionEvents,
    DEFAULT_POLL_INTERVAL,
};
use crate::types::HttpClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for constructing a [`SteamTradeBot`].
pub struct SteamTradeBotBuilder {
    /// The login credentials.
    pub credentials: Credentials,
    /// Path to the file Steam Guard codes are read from. Used when no `challenge_store` is
    /// provided. Default is `steam_guard_code.txt`.
    pub steam_guard_file_path: PathBuf,
    /// Where Steam Guard codes are read from. Takes precedence over `steam_guard_file_path`.
    pub challenge_store: Option<Arc<dyn ChallengeStore>>,
    /// Interval between reads of the code store while waiting for a code. Default is 10 seconds.
    pub poll_interval: Duration,
    /// What to do when a known Steam Guard code is rejected. Default is
    /// [`FailurePolicy::Exit`].
    pub failure_policy: FailurePolicy,
    /// Client to use for requests. A client is built using `user_agent` if one isn't provided.
    pub client: Option<HttpClient>,
    /// User agent for requests. Ignored when a `client` is provided.
    pub user_agent: &'static str,
    /// Base URL of the Steam Community. Default is `https://steamcommunity.com`.
    pub community_url: String,
}

impl SteamTradeBotBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            steam_guard_file_path: PathBuf::from(DEFAULT_STEAM_GUARD_FILE_PATH),
            challenge_store: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            failure_policy: FailurePolicy::default(),
            client: None,
            user_agent: USER_AGENT_STRING,
            community_url: COMMUNITY_URL.into(),
        }
    }
    
    /// The path to the file Steam Guard codes are read from.
    pub fn steam_guard_file_path<T>(mut self, steam_guard_file_path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.steam_guard_file_path = steam_guard_file_path.into();
        self
    }
    
    /// Where Steam Guard codes are read from.
    pub fn challenge_store(mut self, challenge_store: Arc<dyn ChallengeStore>) -> Self {
        self.challenge_store = Some(challenge_store);
        self
    }
    
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
    
    pub fn failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
    
    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }
    
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }
    
    pub fn community_url<T>(mut self, community_url: T) -> Self
    where
        T: Into<String>,
    {
        self.community_url = community_url.into();
        self
    }
    
    /// Builds the bot and starts logging on using `connection`. Events emitted by the connection
    /// must be sent to the sender paired with `events`.
    /// 
    /// Returns once the credentials have been submitted. Use
    /// [`SessionManager::ensure_ready`] to wait for the login to complete; requests made through
    /// the bot wait on their own.
    pub async fn build(
        self,
        connection: Arc<dyn SteamConnection>,
        events: ConnectionEvents,
    ) -> Result<SteamTradeBot> {
        let community_url = Url::parse(&self.community_url)
            .map_err(ParameterError::from)?;
        let client = match self.client {
            Some(client) => client,
            None => get_default_client(self.user_agent)?,
        };
        let store = match self.challenge_store {
            Some(store) => store,
            None => Arc::new(FileChallengeStore::new(self.steam_guard_file_path)),
        };
        let options = SessionOptions {
            poll_interval: self.poll_interval,
            failure_policy: self.failure_policy,
        };
        let session = SessionManager::start(
            self.credentials,
            connection,
            events,
            store,
            options,
        ).await?;
        
        Ok(SteamTradeBot::new(client, session, community_url.as_str()))
    }
}
