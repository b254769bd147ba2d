pub mod account;
pub mod game;
pub mod statistics;

pub use account::{PlayerSummary, SteamAccount};
pub use game::GameRecord;
pub use statistics::{GamesByRange, HourRange, PlaytimeBreakdown, RankedGame, StatisticsSummary};
