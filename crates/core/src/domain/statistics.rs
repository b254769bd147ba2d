//! Playtime aggregation over merged Steam library records.
//!
//! Every function here is pure: inputs are borrowed and never mutated, and
//! results are freshly built values.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    GameRecord, GamesByRange, HourRange, PlaytimeBreakdown, RankedGame, StatisticsSummary,
};
use crate::utils::{minutes_to_hours, ratio_to_hours, tenths_of_hour};

/// Length of the top-N lists in a summary
pub const TOP_GAMES: usize = 3;

/// Merge the owned library with the recently played subset.
///
/// `owned` decides which games appear and in which order. For games also
/// present in `recent`, the two-week figure comes from `recent` and the
/// lifetime figure is the larger of the two reports, since the recent
/// endpoint can be ahead of the library endpoint. Images fall back to the
/// recent record when the owned one has none.
pub fn merge(owned: &[GameRecord], recent: &[GameRecord]) -> Vec<GameRecord> {
    let recent_by_id: HashMap<u32, &GameRecord> =
        recent.iter().map(|game| (game.id, game)).collect();

    let merged: Vec<GameRecord> = owned
        .iter()
        .map(|game| match recent_by_id.get(&game.id) {
            Some(recent_game) => GameRecord {
                id: game.id,
                name: game.name.clone(),
                total_minutes: game.total_minutes.max(recent_game.total_minutes),
                recent_minutes: recent_game.recent_minutes,
                icon_ref: non_empty_or(&game.icon_ref, &recent_game.icon_ref),
                logo_ref: non_empty_or(&game.logo_ref, &recent_game.logo_ref),
            },
            None => game.clone(),
        })
        .collect();

    debug!(
        owned = owned.len(),
        recent = recent.len(),
        updated = owned
            .iter()
            .filter(|game| recent_by_id.contains_key(&game.id))
            .count(),
        "Merged library records"
    );

    merged
}

fn non_empty_or(primary: &str, fallback: &str) -> String {
    if primary.is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

/// Compute totals and top-N lists for a merged library
pub fn summarize(games: &[GameRecord]) -> StatisticsSummary {
    if games.is_empty() {
        return StatisticsSummary::default();
    }

    let total_minutes = total_minutes(games);
    let games_with_playtime = games.iter().filter(|game| game.is_played()).count();

    let summary = StatisticsSummary {
        total_hours: minutes_to_hours(total_minutes),
        total_games: games.len(),
        games_with_playtime,
        top_alltime: top_by(games, |game| game.total_minutes),
        top_recent: top_by(games, |game| game.recent_minutes),
        source_records: games.to_vec(),
    };

    debug!(
        total_games = summary.total_games,
        played = summary.games_with_playtime,
        total_hours = summary.total_hours,
        "Summarized playtime"
    );

    summary
}

fn total_minutes(games: &[GameRecord]) -> u64 {
    games.iter().map(|game| u64::from(game.total_minutes)).sum()
}

/// Highest `TOP_GAMES` records by `key`, zero values excluded.
/// `sort_by` is stable, so ties keep input order.
fn top_by<F>(games: &[GameRecord], key: F) -> Vec<RankedGame>
where
    F: Fn(&GameRecord) -> u32,
{
    let mut ranked: Vec<&GameRecord> = games.iter().filter(|game| key(game) > 0).collect();
    ranked.sort_by(|a, b| key(b).cmp(&key(a)));

    ranked
        .into_iter()
        .take(TOP_GAMES)
        .map(|game| {
            RankedGame::new(game.name.clone(), minutes_to_hours(u64::from(key(game))))
        })
        .collect()
}

/// Detailed breakdown: counts, mean and median over played games, and a
/// histogram of per-game hours
pub fn breakdown(games: &[GameRecord]) -> PlaytimeBreakdown {
    if games.is_empty() {
        return PlaytimeBreakdown::default();
    }

    let total_minutes = total_minutes(games);

    let mut played: Vec<u64> = games
        .iter()
        .filter(|game| game.is_played())
        .map(|game| u64::from(game.total_minutes))
        .collect();
    played.sort_unstable();

    let played_count = played.len();
    let average_hours = ratio_to_hours(total_minutes, played_count as u64);

    let median_hours = if played.is_empty() {
        0.0
    } else {
        let mid = played_count / 2;
        if played_count % 2 == 0 {
            ratio_to_hours(played[mid - 1] + played[mid], 2)
        } else {
            minutes_to_hours(played[mid])
        }
    };

    let mut games_by_range = GamesByRange::default();
    for game in games {
        games_by_range.add(HourRange::classify(tenths_of_hour(u64::from(game.total_minutes))));
    }

    PlaytimeBreakdown {
        total_games: games.len(),
        played_games: played_count,
        unplayed_games: games.len() - played_count,
        total_hours: minutes_to_hours(total_minutes),
        average_hours_per_played_game: average_hours,
        median_hours,
        games_by_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> Vec<GameRecord> {
        vec![
            GameRecord::new(730, "Counter-Strike 2", 50730).with_recent(180),
            GameRecord::new(570, "Dota 2", 37422),
            GameRecord::new(440, "Team Fortress 2", 14046).with_recent(45),
            GameRecord::new(1086940, "Baldur's Gate 3", 1710).with_recent(1710),
            GameRecord::new(1091500, "Cyberpunk 2077", 738).with_recent(738),
            GameRecord::new(1245620, "ELDEN RING", 522),
            GameRecord::new(271590, "Grand Theft Auto V", 0),
        ]
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.games_with_playtime, 0);
        assert!(summary.top_alltime.is_empty());
        assert!(summary.top_recent.is_empty());
        assert!(summary.source_records.is_empty());
    }

    #[test]
    fn test_summarize_sample_library() {
        let games = sample_library();
        let summary = summarize(&games);

        // 105168 minutes
        assert_eq!(summary.total_hours, 1752.8);
        assert_eq!(summary.total_games, 7);
        assert_eq!(summary.games_with_playtime, 6);
        assert_eq!(
            summary.top_alltime,
            vec![
                RankedGame::new("Counter-Strike 2", 845.5),
                RankedGame::new("Dota 2", 623.7),
                RankedGame::new("Team Fortress 2", 234.1),
            ]
        );
        assert_eq!(
            summary.top_recent,
            vec![
                RankedGame::new("Baldur's Gate 3", 28.5),
                RankedGame::new("Cyberpunk 2077", 12.3),
                RankedGame::new("Counter-Strike 2", 3.0),
            ]
        );
        assert_eq!(summary.source_records, games);
    }

    #[test]
    fn test_top_lists_skip_zero_and_cap_at_three() {
        let games = vec![
            GameRecord::new(1, "A", 0).with_recent(0),
            GameRecord::new(2, "B", 10).with_recent(0),
            GameRecord::new(3, "C", 20),
            GameRecord::new(4, "D", 30),
            GameRecord::new(5, "E", 40).with_recent(5),
        ];
        let summary = summarize(&games);

        assert_eq!(summary.top_alltime.len(), 3);
        assert!(summary.top_alltime.iter().all(|game| game.name != "A"));
        assert_eq!(summary.top_recent, vec![RankedGame::new("E", 0.1)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let games = vec![
            GameRecord::new(1, "Low", 60),
            GameRecord::new(2, "First", 600).with_recent(30),
            GameRecord::new(3, "Second", 600).with_recent(30),
            GameRecord::new(4, "Third", 600).with_recent(30),
            GameRecord::new(5, "Fourth", 600).with_recent(30),
        ];
        let summary = summarize(&games);

        let alltime: Vec<&str> = summary.top_alltime.iter().map(|g| g.name.as_str()).collect();
        let recent: Vec<&str> = summary.top_recent.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(alltime, ["First", "Second", "Third"]);
        assert_eq!(recent, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_total_hours_rounds_sum_not_parts() {
        // Each game alone is 0.0h, together 0.1h
        let games = vec![
            GameRecord::new(1, "A", 2),
            GameRecord::new(2, "B", 2),
            GameRecord::new(3, "C", 2),
        ];
        let summary = summarize(&games);

        assert_eq!(summary.total_hours, 0.1);
        assert_eq!(summary.top_alltime[0].hours, 0.0);
    }

    #[test]
    fn test_merge_takes_max_total_and_recent_window() {
        let owned = vec![GameRecord::new(1, "One", 100), GameRecord::new(2, "Two", 50)];
        let recent = vec![GameRecord::new(1, "One", 90).with_recent(30)];

        let merged = merge(&owned, &recent);

        assert_eq!(
            merged,
            vec![
                GameRecord::new(1, "One", 100).with_recent(30),
                GameRecord::new(2, "Two", 50),
            ]
        );
    }

    #[test]
    fn test_merge_prefers_newer_recent_total() {
        let owned = vec![GameRecord::new(1, "One", 100).with_recent(5)];
        let recent = vec![GameRecord::new(1, "Renamed", 130).with_recent(35)];

        let merged = merge(&owned, &recent);

        assert_eq!(merged[0].name, "One");
        assert_eq!(merged[0].total_minutes, 130);
        assert_eq!(merged[0].recent_minutes, 35);
    }

    #[test]
    fn test_merge_with_empty_recent_is_copy() {
        let owned = sample_library();

        let merged = merge(&owned, &[]);

        assert_eq!(merged, owned);
    }

    #[test]
    fn test_merge_ignores_recent_only_games() {
        let owned = vec![GameRecord::new(1, "One", 100)];
        let recent = vec![
            GameRecord::new(2, "Borrowed", 40).with_recent(40),
            GameRecord::new(3, "Family Shared", 10).with_recent(10),
        ];

        let merged = merge(&owned, &recent);

        assert_eq!(merged.len(), owned.len());
        assert_eq!(merged[0], owned[0]);
        assert!(merge(&[], &recent).is_empty());
    }

    #[test]
    fn test_merge_image_fallback() {
        let owned = vec![
            GameRecord::new(1, "One", 10).with_images("", "logo_owned"),
            GameRecord::new(2, "Two", 10).with_images("icon_owned", ""),
        ];
        let recent = vec![
            GameRecord::new(1, "One", 10).with_images("icon_recent", "logo_recent"),
            GameRecord::new(2, "Two", 10).with_images("icon_recent", "logo_recent"),
        ];

        let merged = merge(&owned, &recent);

        assert_eq!(merged[0].icon_ref, "icon_recent");
        assert_eq!(merged[0].logo_ref, "logo_owned");
        assert_eq!(merged[1].icon_ref, "icon_owned");
        assert_eq!(merged[1].logo_ref, "logo_recent");
    }

    #[test]
    fn test_merge_keeps_duplicate_owned_entries() {
        let owned = vec![GameRecord::new(1, "One", 10), GameRecord::new(1, "One", 20)];
        let recent = vec![GameRecord::new(1, "One", 15).with_recent(15)];

        let merged = merge(&owned, &recent);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].total_minutes, 15);
        assert_eq!(merged[1].total_minutes, 20);
    }

    #[test]
    fn test_breakdown_sample_library() {
        let result = breakdown(&sample_library());

        assert_eq!(result.total_games, 7);
        assert_eq!(result.played_games, 6);
        assert_eq!(result.unplayed_games, 1);
        assert_eq!(result.total_hours, 1752.8);
        // 105168 / 6 = 17528 minutes
        assert_eq!(result.average_hours_per_played_game, 292.1);
        // (1710 + 14046) / 2 = 7878 minutes
        assert_eq!(result.median_hours, 131.3);

        let ranges = result.games_by_range;
        assert_eq!(ranges.get_by_key("0_hours"), Some(1));
        assert_eq!(ranges.get_by_key("0_to_1_hours"), Some(0));
        assert_eq!(ranges.get_by_key("1_to_10_hours"), Some(1));
        assert_eq!(ranges.get_by_key("10_to_50_hours"), Some(2));
        assert_eq!(ranges.get_by_key("50_to_100_hours"), Some(0));
        assert_eq!(ranges.get_by_key("100_plus_hours"), Some(3));
    }

    #[test]
    fn test_breakdown_all_unplayed() {
        let games = vec![GameRecord::new(1, "A", 0), GameRecord::new(2, "B", 0)];
        let result = breakdown(&games);

        assert_eq!(result.played_games, 0);
        assert_eq!(result.unplayed_games, 2);
        assert_eq!(result.median_hours, 0.0);
        assert_eq!(result.average_hours_per_played_game, 0.0);
        assert_eq!(
            result.games_by_range.get_by_key("0_hours"),
            Some(result.total_games)
        );
    }

    #[test]
    fn test_breakdown_odd_median_and_bucket_edges() {
        let games = vec![
            GameRecord::new(1, "Two minutes", 2),
            GameRecord::new(2, "One hour", 60),
            GameRecord::new(3, "Ten hours", 600),
            GameRecord::new(4, "Just over ten", 606),
            GameRecord::new(5, "Hundred", 6000),
        ];
        let result = breakdown(&games);

        assert_eq!(result.played_games, 5);
        assert_eq!(result.median_hours, 10.0);

        let ranges = result.games_by_range;
        // rounds to 0.0h even though it was played
        assert_eq!(ranges.get(HourRange::Zero), 1);
        assert_eq!(ranges.get(HourRange::UpToOne), 1);
        assert_eq!(ranges.get(HourRange::OneToTen), 1);
        assert_eq!(ranges.get(HourRange::TenToFifty), 1);
        assert_eq!(ranges.get(HourRange::FiftyToHundred), 1);
        assert_eq!(ranges.get(HourRange::HundredPlus), 0);
    }

    #[test]
    fn test_breakdown_empty() {
        let result = breakdown(&[]);

        assert_eq!(result, PlaytimeBreakdown::default());
        assert_eq!(result.games_by_range.total(), 0);
    }
}
