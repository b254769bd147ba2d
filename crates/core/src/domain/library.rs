use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::statistics::merge;
use crate::error::Result;
use crate::models::{GameRecord, PlayerSummary, SteamAccount};
use crate::steam::PlaytimeSource;

/// Merged library of one player, with the sizes of the two source lists
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySnapshot {
    pub games: Vec<GameRecord>,
    pub owned_count: usize,
    pub recent_count: usize,
    /// Set when the recent-activity request failed and the library was
    /// merged without it
    pub recent_error: Option<String>,
}

/// Outcome of checking a local account against its public profile
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerVerification {
    pub summary: PlayerSummary,
    /// Profile name differs from the name cached in the local config
    pub renamed_from: Option<String>,
}

pub struct LibraryService<S> {
    source: Arc<S>,
}

impl<S> Clone for LibraryService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: PlaytimeSource> LibraryService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Confirm the account's profile is reachable with the current key
    pub fn verify_player(&self, account: &SteamAccount) -> Result<PlayerVerification> {
        let summary = self.source.player_summary(&account.steam_id)?;

        let renamed_from = (summary.persona_name != account.persona_name)
            .then(|| account.persona_name.clone());

        if let Some(old_name) = &renamed_from {
            info!(old_name, new_name = %summary.persona_name, "Steam profile name has changed");
        }

        Ok(PlayerVerification {
            summary,
            renamed_from,
        })
    }

    /// Fetch owned and recent games and merge them. Recent activity is
    /// optional: if it cannot be fetched the owned list is used as is.
    pub fn fetch_library(&self, steam_id: &str) -> Result<LibrarySnapshot> {
        let owned = self.source.owned_games(steam_id)?;

        let (recent, recent_error) = match self.source.recently_played_games(steam_id) {
            Ok(recent) => (recent, None),
            Err(e) => {
                warn!(steam_id, error = %e, "Continuing without recent activity");
                (Vec::new(), Some(e.to_string()))
            }
        };

        Ok(LibrarySnapshot {
            games: merge(&owned, &recent),
            owned_count: owned.len(),
            recent_count: recent.len(),
            recent_error,
        })
    }
}
