use crate::serialize;
use crate::types::AppId;
use serde::Deserialize;

fn default_success() -> bool {
    true
}

/// Items without instance data have an instance ID of `0`.
fn default_instanceid() -> String {
    "0".into()
}

#[derive(Deserialize, Debug)]
pub struct GetInventoryResponse {
    #[serde(default = "default_success")]
    #[serde(deserialize_with = "serialize::truthy")]
    pub success: bool,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
    #[serde(default)]
    pub descriptions: Vec<RawDescription>,
}

/// The instance half of an inventory entry. IDs are kept as sent and only compared.
#[derive(Deserialize, Debug)]
pub struct RawAsset {
    #[serde(deserialize_with = "serialize::id_string")]
    pub assetid: String,
    #[serde(deserialize_with = "serialize::id_string")]
    pub classid: String,
    #[serde(default = "default_instanceid")]
    #[serde(deserialize_with = "serialize::id_string")]
    pub instanceid: String,
}

/// The shared half of an inventory entry.
#[derive(Deserialize, Debug)]
pub struct RawDescription {
    #[serde(with = "serialize::string")]
    pub appid: AppId,
    #[serde(deserialize_with = "serialize::id_string")]
    pub classid: String,
    #[serde(default = "default_instanceid")]
    #[serde(deserialize_with = "serialize::id_string")]
    pub instanceid: String,
    #[serde(default)]
    #[serde(deserialize_with = "serialize::truthy")]
    pub tradable: bool,
    #[serde(default)]
    pub market_name: String,
}
