//! Loading a user's tradable items.

mod apps;
mod response;

pub use apps::app_name;

use response::GetInventoryResponse;
use crate::SteamID;
use crate::serialize;
use crate::session::{Session, SessionManager};
use crate::error::{Error, ParameterError, RequestError};
use crate::helpers::parses_response;
use crate::types::{AppId, ClassInstance, ContextId, HttpClient};
use std::collections::HashMap;
use std::sync::Arc;
use reqwest::header::COOKIE;
use serde::Serialize;

/// The context most games keep tradable items in.
pub const DEFAULT_CONTEXT_ID: ContextId = 2;
/// The number of items requested from the inventory endpoint.
const INVENTORY_COUNT: u32 = 5000;

/// A tradable item in an inventory.
/// 
/// When serialized, a missing `assetid` or `appname` is written as `"Unknown"`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// The asset ID as sent by Steam. `None` if the inventory response had no asset for the
    /// item's description.
    #[serde(serialize_with = "serialize::string_or_unknown")]
    pub assetid: Option<String>,
    /// The app ID.
    pub appid: AppId,
    /// The name of the game. `None` if the app is not known.
    #[serde(serialize_with = "serialize::string_or_unknown")]
    pub appname: Option<&'static str>,
    /// The instance ID.
    pub instanceid: String,
    /// The name of the item on the Steam Community Market.
    pub market_name: String,
}

/// Loads inventories using the session's cookies.
#[derive(Debug, Clone)]
pub struct InventoryReader {
    client: HttpClient,
    session: SessionManager,
    community_url: Arc<str>,
}

impl InventoryReader {
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
    
    /// Gets the tradable items in the inventory of `steamid` for `appid` and `contextid`.
    /// 
    /// Waits for the session to be ready. Fails without making a request if `steamid` or `appid`
    /// is zero. Request failures are returned as [`Error::Inventory`].
    pub async fn fetch(
        &self,
        steamid: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Result<Vec<InventoryItem>, Error> {
        let steamid = u64::from(steamid);
        
        if steamid == 0 {
            return Err(ParameterError::MissingSteamId.into());
        }
        
        if appid == 0 {
            return Err(ParameterError::MissingAppId.into());
        }
        
        let session = self.session.ensure_ready().await?;
        
        self.get_inventory_request(&session, steamid, appid, contextid).await
            .map_err(Error::Inventory)
    }
    
    async fn get_inventory_request(
        &self,
        session: &Session,
        steamid: u64,
        appid: AppId,
        contextid: ContextId,
    ) -> Result<Vec<InventoryItem>, RequestError> {
        #[derive(Serialize)]
        struct Query<'a> {
            l: &'a str,
            count: u32,
        }
        
        let uri = format!("{}/inventory/{steamid}/{appid}/{contextid}", self.community_url);
        
        log::debug!("Fetching inventory {uri}");
        
        let response = self.client.get(&uri)
            .header(COOKIE, &session.cookie_header)
            .query(&Query {
                l: "english",
                count: INVENTORY_COUNT,
            })
            .send()
            .await?;
        let body: GetInventoryResponse = parses_response(response).await?;
        
        if !body.success {
            return Err(RequestError::ResponseUnsuccessful);
        }
        
        Ok(tradable_items(body))
    }
}

/// Joins descriptions with their assets, keeping only tradable items. Items follow the order of
/// the descriptions and each description is paired with the first asset of its class.
fn tradable_items(body: GetInventoryResponse) -> Vec<InventoryItem> {
    let mut assets: HashMap<ClassInstance, String> = HashMap::with_capacity(body.assets.len());
    
    for asset in body.assets {
        assets.entry((asset.classid, asset.instanceid)).or_insert(asset.assetid);
    }
    
    body.descriptions
        .into_iter()
        .filter(|description| description.tradable)
        .map(|description| InventoryItem {
            assetid: assets.get(&(description.classid, description.instanceid.clone())).cloned(),
            appid: description.appid,
            appname: app_name(description.appid),
            instanceid: description.instanceid,
            market_name: description.market_name,
        })
        .collect()
}
