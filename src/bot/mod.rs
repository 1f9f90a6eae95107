//! The client facade composing the session, inventory and trade offer components.

mod builder;

pub use builder::SteamTradeBotBuilder;

use crate::SteamID;
use crate::error::Result;
use crate::inventory::{InventoryItem, InventoryReader};
use crate::session::{Credentials, SessionManager};
use crate::trade_offer::{NewTradeOfferItem, TradeOfferSubmitter};
use crate::types::{AppId, ContextId, HttpClient};

/// Loads inventories and sends trade offers on behalf of a Steam account.
#[derive(Debug, Clone)]
pub struct SteamTradeBot {
    session: SessionManager,
    inventory: InventoryReader,
    trade_offers: TradeOfferSubmitter,
}

impl SteamTradeBot {
    /// Creates a builder for the bot.
    pub fn builder(credentials: Credentials) -> SteamTradeBotBuilder {
        SteamTradeBotBuilder::new(credentials)
    }
    
    fn new(
        client: HttpClient,
        session: SessionManager,
        community_url: &str,
    ) -> Self {
        Self {
            inventory: InventoryReader::new(client.clone(), session.clone(), community_url),
            trade_offers: TradeOfferSubmitter::new(client, session.clone(), community_url),
            session,
        }
    }
    
    /// The session.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }
    
    /// Gets the tradable items in the inventory of `steamid`. Waits for the session to be ready.
    pub async fn get_inventory(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Result<Vec<InventoryItem>> {
        self.inventory.fetch(steamid, appid, contextid).await
    }
    
    /// Sends an offer giving `items` to `partner`, asking for nothing in return. Waits for the
    /// session to be ready.
    pub async fn send_trade_offer(
        &self,
        partner: SteamID,
        items: &[NewTradeOfferItem],
        message: &str,
    ) -> Result<serde_json::Value> {
        self.trade_offers.submit(partner, items, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ParameterError, FailurePolicy, MemoryChallengeStore};
    use crate::session::{event_channel, LogOnDetails};
    use crate::test_helpers::{self, ConnectionCall, MockServer};
    use std::sync::Arc;
    use std::time::Duration;
    
    fn credentials() -> Credentials {
        Credentials::new("user", "hunter2").unwrap()
    }
    
    #[test]
    fn builder_defaults() {
        let builder = SteamTradeBot::builder(credentials());
        
        assert_eq!(builder.steam_guard_file_path, std::path::PathBuf::from("steam_guard_code.txt"));
        assert_eq!(builder.poll_interval, Duration::from_secs(10));
        assert_eq!(builder.failure_policy, FailurePolicy::Exit);
        assert_eq!(builder.community_url, "https://steamcommunity.com");
        assert!(builder.challenge_store.is_none());
        assert!(builder.client.is_none());
    }
    
    #[tokio::test]
    async fn rejects_invalid_community_url_before_logging_on() {
        let (connection, mut calls) = test_helpers::mock_connection();
        let (_events_tx, events) = event_channel();
        let result = SteamTradeBot::builder(credentials())
            .challenge_store(Arc::new(MemoryChallengeStore::default()))
            .failure_policy(FailurePolicy::Surface)
            .community_url("not a url")
            .build(connection, events)
            .await;
        
        assert!(matches!(result, Err(Error::Parameter(ParameterError::UrlParse(_)))));
        assert!(calls.try_recv().is_err());
    }
    
    #[tokio::test]
    async fn loads_inventory_once_logged_on() {
        let mut server = MockServer::start(200, include_str!("../inventory/fixtures/inventory.json")).await;
        let (connection, mut calls) = test_helpers::mock_connection();
        let (events_tx, events) = event_channel();
        let bot = SteamTradeBot::builder(credentials().steam_guard_code("F4KE2"))
            .challenge_store(Arc::new(MemoryChallengeStore::default()))
            .failure_policy(FailurePolicy::Surface)
            .community_url(server.url.as_str())
            .build(connection, events)
            .await
            .unwrap();
        
        assert_eq!(
            calls.recv().await,
            Some(ConnectionCall::LogOn(LogOnDetails {
                account_name: "user".into(),
                password: "hunter2".into(),
                two_factor_code: Some("F4KE2".into()),
            })),
        );
        
        let fetch = {
            let bot = bot.clone();
            
            tokio::spawn(async move {
                bot.get_inventory(SteamID::from(76561198000000000u64), 570, 2).await
            })
        };
        
        events_tx.send(test_helpers::web_session_event()).unwrap();
        
        let items = fetch.await.unwrap().unwrap();
        
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].assetid.as_deref(), Some("27130917264"));
        assert!(bot.session().is_ready());
        assert_eq!(server.next_request().await.path, "/inventory/76561198000000000/570/2?l=english&count=5000");
    }
    
    #[tokio::test]
    async fn sends_trade_offer_through_session() {
        let mut server = MockServer::start(200, r#"{"tradeofferid":"6394539312"}"#).await;
        let (connection, _calls) = test_helpers::mock_connection();
        let (events_tx, events) = event_channel();
        let bot = SteamTradeBot::builder(credentials())
            .challenge_store(Arc::new(MemoryChallengeStore::default()))
            .failure_policy(FailurePolicy::Surface)
            .community_url(server.url.as_str())
            .build(connection, events)
            .await
            .unwrap();
        
        events_tx.send(test_helpers::web_session_event()).unwrap();
        
        let response = bot.send_trade_offer(
            SteamID::from(76561198000000001u64),
            &[NewTradeOfferItem::new(730, 2, 31180915432)],
            "",
        ).await.unwrap();
        
        assert_eq!(response["tradeofferid"], "6394539312");
        
        let request = server.next_request().await;
        
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/tradeoffer/new/send");
        assert_eq!(request.form_value("partner").as_deref(), Some("76561198000000001"));
    }
}
