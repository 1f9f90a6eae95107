//! Types for common values in Steam responses.

/// Uniquely identifies an application on Steam. For example: 570 for Dota 2.
pub type AppId = u32;
/// A context ID belonging to an [`AppId`]. Most games keep tradable items in context `2`.
pub type ContextId = u64;
/// An asset ID unique to an [`AppId`] + [`ContextId`] combination.
pub type AssetId = u64;
/// An amount for stackable items. For non-stackable items this is simply `1`.
pub type Amount = u32;
/// An ID for a class of item, shared by every copy of that item.
pub type ClassId = u64;
/// A more specific instance of a class, for example a painted item. `0` when the item has no
/// special instance data.
pub type InstanceId = u64;

// Types internally used by the crate.
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;
/// A class ID and instance ID pair, compared as sent.
pub(crate) type ClassInstance = (String, String);
