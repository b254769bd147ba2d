use crate::models::GameRecord;

/// Criteria for picking games out of a library. Unset criteria match
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
    pub name_contains: Option<String>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_hours(mut self, hours: f64) -> Self {
        self.min_hours = Some(hours);

        self
    }

    pub fn max_hours(mut self, hours: f64) -> Self {
        self.max_hours = Some(hours);

        self
    }

    pub fn name_contains(mut self, text: impl Into<String>) -> Self {
        self.name_contains = Some(text.into());

        self
    }

    pub fn is_empty(&self) -> bool {
        self.min_hours.is_none() && self.max_hours.is_none() && self.name_contains.is_none()
    }

    /// Games matching every set criterion, in input order
    pub fn apply(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let min_minutes = self.min_hours.map(whole_minutes);
        let max_minutes = self.max_hours.map(whole_minutes);
        let needle = self.name_contains.as_ref().map(|text| text.to_lowercase());

        games
            .iter()
            .filter(|game| min_minutes.is_none_or(|min| i64::from(game.total_minutes) >= min))
            .filter(|game| max_minutes.is_none_or(|max| i64::from(game.total_minutes) <= max))
            .filter(|game| {
                needle
                    .as_deref()
                    .is_none_or(|needle| game.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect()
    }
}

/// Hours to minutes, truncating toward zero. Negative bounds stay negative
/// so that a negative maximum matches nothing.
fn whole_minutes(hours: f64) -> i64 {
    (hours * 60.0) as i64
}
