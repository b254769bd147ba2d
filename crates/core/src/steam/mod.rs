pub mod accounts;
pub mod client;

pub use accounts::{find_steam_path, load_accounts, parse_login_users};
pub use client::{SteamClient, SteamClientConfig};

use crate::error::Result;
use crate::models::{GameRecord, PlayerSummary};

/// Where library and profile data comes from. Implemented by
/// [`SteamClient`]; tests substitute canned data.
pub trait PlaytimeSource {
    fn owned_games(&self, steam_id: &str) -> Result<Vec<GameRecord>>;
    fn recently_played_games(&self, steam_id: &str) -> Result<Vec<GameRecord>>;
    fn player_summary(&self, steam_id: &str) -> Result<PlayerSummary>;
}
