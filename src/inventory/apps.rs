use crate::types::AppId;

/// Gets the display name of a game by its app ID. Only a handful of games with tradable items
/// are known.
pub fn app_name(appid: AppId) -> Option<&'static str> {
    match appid {
        440 => Some("Team Fortress 2"),
        570 => Some("Dota 2"),
        730 => Some("Counter-Strike 2"),
        753 => Some("Steam"),
        252490 => Some("Rust"),
        _ => None,
    }
}
