//! Logs a Steam account in (answering Steam Guard challenges from a code file when needed), reads
//! tradable inventory items and sends one-sided trade offers.

mod bot;
mod enums;
mod helpers;
mod serialize;
mod types;
pub mod challenge_store;
pub mod error;
pub mod inventory;
pub mod session;
pub mod trade_offer;

#[cfg(test)]
mod test_helpers;

pub use steamid_ng::SteamID;
pub use bot::{SteamTradeBot, SteamTradeBotBuilder};
pub use challenge_store::{ChallengeStore, FileChallengeStore, MemoryChallengeStore};
pub use enums::{FailurePolicy, PersonaState};
pub use error::{Error, ParameterError, AuthenticationError, ConnectionError, RequestError};
pub use inventory::InventoryItem;
pub use session::{
    event_channel,
    ConnectionEvent,
    ConnectionEventSender,
    ConnectionEvents,
    Credentials,
    LogOnDetails,
    Session,
    SessionManager,
    SessionOptions,
    SessionState,
    SteamConnection,
};
pub use trade_offer::NewTradeOfferItem;
pub use types::{AppId, ContextId, AssetId, Amount, ClassId, InstanceId};

/// Exit status used when a known Steam Guard code is rejected under [`FailurePolicy::Exit`].
pub const INVALID_STEAM_GUARD_CODE_EXIT_CODE: i32 = 1;
