use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::GameRecord;

/// Game name and its playtime in hours, as shown in a top-N list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGame {
    pub name: String,
    pub hours: f64,
}

impl RankedGame {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub total_hours: f64,
    pub total_games: usize,
    pub games_with_playtime: usize,
    pub top_alltime: Vec<RankedGame>,
    pub top_recent: Vec<RankedGame>,
    #[serde(skip)]
    pub source_records: Vec<GameRecord>,
}

/// Playtime bucket a single game falls into, upper bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourRange {
    Zero,
    UpToOne,
    OneToTen,
    TenToFifty,
    FiftyToHundred,
    HundredPlus,
}

impl HourRange {
    pub const ALL: [HourRange; 6] = [
        Self::Zero,
        Self::UpToOne,
        Self::OneToTen,
        Self::TenToFifty,
        Self::FiftyToHundred,
        Self::HundredPlus,
    ];

    /// Classify an hour value expressed in tenths of an hour
    pub fn classify(tenths: u64) -> Self {
        match tenths {
            0 => Self::Zero,
            1..=10 => Self::UpToOne,
            11..=100 => Self::OneToTen,
            101..=500 => Self::TenToFifty,
            501..=1000 => Self::FiftyToHundred,
            _ => Self::HundredPlus,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Zero => "0_hours",
            Self::UpToOne => "0_to_1_hours",
            Self::OneToTen => "1_to_10_hours",
            Self::TenToFifty => "10_to_50_hours",
            Self::FiftyToHundred => "50_to_100_hours",
            Self::HundredPlus => "100_plus_hours",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "0 Hours",
            Self::UpToOne => "0 - 1 Hours",
            Self::OneToTen => "1 - 10 Hours",
            Self::TenToFifty => "10 - 50 Hours",
            Self::FiftyToHundred => "50 - 100 Hours",
            Self::HundredPlus => "100+ Hours",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.key() == key)
    }
}

/// Game counts per `HourRange`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamesByRange {
    counts: [usize; 6],
}

impl GamesByRange {
    pub fn get(&self, range: HourRange) -> usize {
        self.counts[range.index()]
    }

    pub fn add(&mut self, range: HourRange) {
        self.counts[range.index()] += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (HourRange, usize)> + '_ {
        HourRange::ALL
            .into_iter()
            .map(|range| (range, self.get(range)))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Count for a serialized range key such as `"10_to_50_hours"`
    pub fn get_by_key(&self, key: &str) -> Option<usize> {
        HourRange::from_key(key).map(|range| self.get(range))
    }
}

impl Serialize for GamesByRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (range, count) in self.iter() {
            map.serialize_entry(range.key(), &count)?;
        }
        map.end()
    }
}

/// Detailed library breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaytimeBreakdown {
    pub total_games: usize,
    pub played_games: usize,
    pub unplayed_games: usize,
    pub total_hours: f64,
    pub average_hours_per_played_game: f64,
    pub median_hours: f64,
    pub games_by_range: GamesByRange,
}
