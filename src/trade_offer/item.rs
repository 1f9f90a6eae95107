use crate::serialize;
use crate::types::{AppId, ContextId, AssetId, Amount};
use serde::{Serialize, Deserialize};

/// An item to send in a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct NewTradeOfferItem {
    /// The app ID e.g. `570` for Dota 2 or `730` for Counter-Strike 2.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "serialize::string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "serialize::string")]
    pub assetid: AssetId,
    /// The amount. Offers are always sent with an amount of `1` regardless of this value.
    #[serde(default = "default_amount")]
    pub amount: Amount,
}

fn default_amount() -> Amount {
    1
}

impl NewTradeOfferItem {
    /// Creates an item with an amount of `1`.
    pub fn new(
        appid: AppId,
        contextid: ContextId,
        assetid: AssetId,
    ) -> Self {
        Self {
            appid,
            contextid,
            assetid,
            amount: 1,
        }
    }
}

impl From<(AppId, ContextId, AssetId)> for NewTradeOfferItem {
    fn from((appid, contextid, assetid): (AppId, ContextId, AssetId)) -> Self {
        Self::new(appid, contextid, assetid)
    }
}
