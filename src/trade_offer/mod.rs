//! Sending one-sided trade offers.

mod item;

pub use item::NewTradeOfferItem;

use crate::SteamID;
use crate::serialize;
use crate::session::{Session, SessionManager};
use crate::error::{Error, ParameterError, RequestError};
use crate::helpers::parses_response;
use crate::types::{AppId, AssetId, ContextId, HttpClient};
use std::sync::Arc;
use reqwest::header::{COOKIE, REFERER};
use serde::Serialize;

/// Version of the offer format.
const OFFER_VERSION: u32 = 4;

#[derive(Serialize, Debug)]
struct OfferAsset {
    appid: AppId,
    #[serde(with = "serialize::string")]
    contextid: ContextId,
    amount: &'static str,
    #[serde(with = "serialize::string")]
    assetid: AssetId,
}

impl From<&NewTradeOfferItem> for OfferAsset {
    fn from(item: &NewTradeOfferItem) -> Self {
        Self {
            appid: item.appid,
            contextid: item.contextid,
            // Only whole, non-stackable items are sent.
            amount: "1",
            assetid: item.assetid,
        }
    }
}

#[derive(Serialize, Debug)]
struct OfferFormUser {
    assets: Vec<OfferAsset>,
    currency: Vec<()>,
    ready: bool,
}

#[derive(Serialize, Debug)]
struct OfferForm {
    newversion: bool,
    version: u32,
    me: OfferFormUser,
    them: OfferFormUser,
}

#[derive(Serialize, Debug)]
struct SendOfferParams<'a> {
    sessionid: &'a str,
    serverid: &'static str,
    partner: String,
    tradeoffermessage: &'a str,
    json_tradeoffer: String,
    captcha: &'static str,
    trade_offer_create_params: &'static str,
}

/// Builds the form for an offer giving `items` to `partner` and asking for nothing back.
fn send_offer_params<'a>(
    session: &'a Session,
    partner: u64,
    items: &[NewTradeOfferItem],
    message: &'a str,
) -> Result<SendOfferParams<'a>, serde_json::Error> {
    let json_tradeoffer = serde_json::to_string(&OfferForm {
        newversion: true,
        version: OFFER_VERSION,
        me: OfferFormUser {
            assets: items.iter().map(OfferAsset::from).collect(),
            currency: Vec::new(),
            ready: false,
        },
        them: OfferFormUser {
            assets: Vec::new(),
            currency: Vec::new(),
            ready: false,
        },
    })?;
    
    Ok(SendOfferParams {
        sessionid: &session.sessionid,
        serverid: "1",
        partner: partner.to_string(),
        tradeoffermessage: message,
        json_tradeoffer,
        captcha: "",
        trade_offer_create_params: "",
    })
}

/// Sends trade offers using the session's cookies.
#[derive(Debug, Clone)]
pub struct TradeOfferSubmitter {
    client: HttpClient,
    session: SessionManager,
    community_url: Arc<str>,
}

impl TradeOfferSubmitter {
    pub fn new(
        client: HttpClient,
        session: SessionManager,
        community_url: &str,
    ) -> Self {
        Self {
            client,
            session,
            community_url: community_url.trim_end_matches('/').into(),
        }
    }
    
    /// Sends an offer giving `items` to `partner`. Nothing is asked for in return.
    /// 
    /// Waits for the session to be ready. Fails without making a request if `partner` is zero or
    /// `items` is empty. On success the decoded response body is returned as-is; it is not
    /// checked for whether the offer was created. Request failures are returned as
    /// [`Error::TradeOffer`].
    pub async fn submit(
        &self,
        partner: SteamID,
        items: &[NewTradeOfferItem],
        message: &str,
    ) -> Result<serde_json::Value, Error> {
        let partner = u64::from(partner);
        
        if partner == 0 {
            return Err(ParameterError::MissingSteamId.into());
        }
        
        if items.is_empty() {
            return Err(ParameterError::NoItems.into());
        }
        
        let session = self.session.ensure_ready().await?;
        
        self.send_offer_request(&session, partner, items, message).await
            .map_err(Error::TradeOffer)
    }
    
    async fn send_offer_request(
        &self,
        session: &Session,
        partner: u64,
        items: &[NewTradeOfferItem],
        message: &str,
    ) -> Result<serde_json::Value, RequestError> {
        let params = send_offer_params(session, partner, items, message)?;
        let referer = format!("{}/tradeoffer/new/?partner={partner}", self.community_url);
        let uri = format!("{}/tradeoffer/new/send", self.community_url);
        
        log::debug!("Sending offer with {} items to {partner}", items.len());
        
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .header(COOKIE, &session.cookie_header)
            .form(&params)
            .send()
            .await?;
        let body: serde_json::Value = parses_response(response).await?;
        
        Ok(body)
    }
}
