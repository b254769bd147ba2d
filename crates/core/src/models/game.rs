use serde::{Deserialize, Serialize};

/// Playtime record for one game in a Steam library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u32,
    pub name: String,
    pub total_minutes: u32,
    /// Minutes played in the trailing two-week window
    pub recent_minutes: u32,
    pub icon_ref: String,
    pub logo_ref: String,
}

impl GameRecord {
    pub fn new(id: u32, name: impl Into<String>, total_minutes: u32) -> Self {
        Self {
            id,
            name: name.into(),
            total_minutes,
            recent_minutes: 0,
            icon_ref: String::new(),
            logo_ref: String::new(),
        }
    }

    pub fn with_recent(mut self, recent_minutes: u32) -> Self {
        self.recent_minutes = recent_minutes;

        self
    }

    pub fn with_images(mut self, icon_ref: impl Into<String>, logo_ref: impl Into<String>) -> Self {
        self.icon_ref = icon_ref.into();
        self.logo_ref = logo_ref.into();

        self
    }

    pub fn is_played(&self) -> bool {
        self.total_minutes > 0
    }
}
