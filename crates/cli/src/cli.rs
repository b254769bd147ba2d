use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use steamhours_core::domain::GameFilter;

const AFTER_HELP: &str = "\
Examples:
  steam-hours                         Interactive account selection
  steam-hours --account 1             Use the first listed account
  steam-hours -b --search portal      Add a breakdown and list matching games
  STEAM_API_KEY=xyz steam-hours       Take the API key from the environment

Account numbers follow the order shown when running interactively.
The most recent account is usually #1.";

fn non_negative_hours(value: &str) -> Result<f64, String> {
    let hours: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number of hours"))?;

    if !hours.is_finite() || hours < 0.0 {
        return Err(format!("hours must be zero or more, got `{value}`"));
    }

    Ok(hours)
}

#[derive(Debug, Parser)]
#[command(
    name = "steam-hours",
    version,
    about = "Analyze Steam playtime statistics for your game library",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Select account by number (1-based), skipping the prompt
    #[arg(short, long, value_name = "N")]
    pub account: Option<usize>,

    /// Steam Web API key
    #[arg(
        short = 'k',
        long,
        env = "STEAM_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub api_key: Option<String>,

    /// Steam installation directory (detected when omitted)
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub steam_path: Option<PathBuf>,

    /// Show a detailed playtime breakdown
    #[arg(short, long)]
    pub breakdown: bool,

    /// List games whose name contains TEXT
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// List games with at least this many hours
    #[arg(long, value_name = "HOURS", value_parser = non_negative_hours)]
    pub min_hours: Option<f64>,

    /// List games with at most this many hours
    #[arg(long, value_name = "HOURS", value_parser = non_negative_hours)]
    pub max_hours: Option<f64>,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Search criteria given on the command line, if any
    pub fn filter(&self) -> Option<GameFilter> {
        let filter = GameFilter {
            min_hours: self.min_hours,
            max_hours: self.max_hours,
            name_contains: self.search.clone(),
        };

        (!filter.is_empty()).then_some(filter)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
