//! Terminal rendering of accounts and statistics. Hour values arrive
//! already rounded and are printed as given.

use std::io::{self, Write};

use serde::Serialize;
use steamhours_core::models::{
    GameRecord, PlaytimeBreakdown, RankedGame, StatisticsSummary, SteamAccount,
};
use steamhours_core::utils::minutes_to_hours;

use crate::style::Palette;

const RULE: &str = "──────────────────────────────────────────────────";
const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Insert `,` between groups of three digits in the integer part
fn group_thousands(number: &str) -> String {
    let (int_part, rest) = number.split_at(number.find('.').unwrap_or(number.len()));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}{rest}")
}

/// `"845.5 hours"`, with thousands separators from 1,000 hours up
pub fn format_hours(hours: f64) -> String {
    format!("{} hours", group_thousands(&format!("{hours:.1}")))
}

fn print_heading<W: Write>(out: &mut W, palette: Palette, title: &str) -> io::Result<()> {
    writeln!(out, "{}", palette.heading(title))?;
    writeln!(out, "{}", palette.dim(RULE))
}

pub fn print_banner<W: Write>(
    out: &mut W,
    palette: Palette,
    account: &SteamAccount,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "╔{}╗", "═".repeat(68))?;
    writeln!(out, "║{}║", palette.title(&format!("{:^68}", "STEAM HOURS ANALYZER")))?;
    writeln!(out, "╚{}╝", "═".repeat(68))?;
    writeln!(out)?;
    print_heading(out, palette, "Account Analysis")?;
    writeln!(out, "Player: {}", account.persona_name)?;
    writeln!(out, "Account: {}", account.account_name)?;
    writeln!(out, "Steam ID: {}", account.steam_id)?;
    writeln!(out, "Last login: {}", account.timestamp.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(out)
}

fn print_ranking<W: Write>(
    out: &mut W,
    palette: Palette,
    title: &str,
    games: &[RankedGame],
) -> io::Result<()> {
    print_heading(out, palette, title)?;
    for (game, medal) in games.iter().zip(MEDALS) {
        writeln!(out, "  {medal} {}: {}", game.name, palette.hours(&format_hours(game.hours)))?;
    }
    writeln!(out)
}

pub fn print_statistics<W: Write>(
    out: &mut W,
    palette: Palette,
    summary: &StatisticsSummary,
) -> io::Result<()> {
    print_heading(out, palette, "Overall Statistics")?;
    writeln!(
        out,
        "Total Games in Library: {}",
        group_thousands(&summary.total_games.to_string())
    )?;
    writeln!(out, "Games Played: {}", group_thousands(&summary.games_with_playtime.to_string()))?;
    writeln!(out, "Total Hours Played: {}", palette.hours(&format_hours(summary.total_hours)))?;
    writeln!(out)?;

    if !summary.top_alltime.is_empty() {
        print_ranking(out, palette, "Top 3 Games (All-Time)", &summary.top_alltime)?;
    }

    if summary.top_recent.is_empty() {
        print_heading(out, palette, "Recent Activity (Past 2 Weeks)")?;
        writeln!(out, "  No games played in the past 2 weeks")?;
        writeln!(out)?;
    } else {
        print_ranking(out, palette, "Top 3 Games (Past 2 Weeks)", &summary.top_recent)?;
    }

    if summary.total_hours == 0.0 {
        writeln!(out, "{}", palette.warning("No playtime data found. This might indicate:"))?;
        writeln!(out, "  • Private Steam profile")?;
        writeln!(out, "  • No games have been played")?;
        writeln!(out, "  • API access restrictions")?;
        writeln!(out)?;
    }

    Ok(())
}

pub fn print_breakdown<W: Write>(
    out: &mut W,
    palette: Palette,
    breakdown: &PlaytimeBreakdown,
) -> io::Result<()> {
    print_heading(out, palette, "Playtime Breakdown")?;
    writeln!(out, "Played games: {}/{}", breakdown.played_games, breakdown.total_games)?;
    writeln!(out, "Unplayed games: {}", breakdown.unplayed_games)?;
    writeln!(
        out,
        "Average per played game: {}",
        palette.hours(&format_hours(breakdown.average_hours_per_played_game))
    )?;
    writeln!(
        out,
        "Median per played game: {}",
        palette.hours(&format_hours(breakdown.median_hours))
    )?;
    writeln!(out)?;
    writeln!(out, "Games by playtime range:")?;
    for (range, count) in breakdown.games_by_range.iter() {
        writeln!(out, "  {:<16} {count} games", format!("{}:", range.label()))?;
    }
    writeln!(out)
}

pub fn print_matches<W: Write>(
    out: &mut W,
    palette: Palette,
    games: &[GameRecord],
) -> io::Result<()> {
    print_heading(out, palette, &format!("Matching Games ({})", games.len()))?;
    if games.is_empty() {
        writeln!(out, "  {}", palette.warning("No games match the given criteria"))?;
    }
    for game in games {
        writeln!(
            out,
            "  {} [{}]: {}",
            game.name,
            game.id,
            palette.hours(&format_hours(minutes_to_hours(u64::from(game.total_minutes))))
        )?;
    }
    writeln!(out)
}

/// Everything the run produced, for `--json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub account: &'a SteamAccount,
    pub summary: &'a StatisticsSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<&'a PlaytimeBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<&'a [GameRecord]>,
}

pub fn print_json<W: Write>(out: &mut W, report: &Report<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
