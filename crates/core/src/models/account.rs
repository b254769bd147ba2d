use chrono::{DateTime, Utc};
use serde::Serialize;

/// Steam account remembered by the local client (`loginusers.vdf`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SteamAccount {
    pub steam_id: String,
    pub account_name: String,
    pub persona_name: String,
    pub most_recent: bool,
    pub timestamp: DateTime<Utc>,
}

impl std::fmt::Display for SteamAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.persona_name, self.account_name)?;

        if self.most_recent {
            write!(f, " (Most Recent)")?;
        }

        Ok(())
    }
}

/// Public profile data returned by `GetPlayerSummaries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub steam_id: String,
    pub persona_name: String,
    pub profile_url: Option<String>,
    pub avatar_url: Option<String>,
    /// 1 = private, 3 = public
    pub visibility: u8,
}

impl PlayerSummary {
    pub fn is_public(&self) -> bool {
        self.visibility == 3
    }
}
