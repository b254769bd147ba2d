//! `steam-hours`: playtime statistics for a Steam account found on this
//! machine.

mod cli;
mod display;
mod key_store;
mod prompt;
mod style;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use steamhours_core::domain::{LibraryService, breakdown, summarize};
use steamhours_core::steam::{SteamClient, find_steam_path, load_accounts};
use steamhours_core::{Error, Result};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::display::Report;
use crate::key_store::{KeyStore, get_or_resolve_api_key};
use crate::style::Palette;

/// Exit code when the user closes the prompt
const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(io::stderr)
        .init();

    let err_palette = Palette::detect(&io::stderr());

    match run(&cli, err_palette) {
        Ok(code) => code,
        Err(e) => {
            error!("Run failed: {e:?}");
            eprintln!("{}", err_palette.error(&format!("Error: {e}")));
            if matches!(e, Error::Fetch { .. } | Error::NotFound(_)) {
                eprintln!("This might indicate a private profile or an invalid API key");
            }
            ExitCode::FAILURE
        }
    }
}

/// Progress messages go to stderr so `--json` output stays clean
fn status(message: impl std::fmt::Display) {
    eprintln!("{message}");
}

fn warn_status(palette: Palette, message: &str) {
    status(palette.warning(&format!("Warning: {message}")));
}

fn run(cli: &Cli, err_palette: Palette) -> Result<ExitCode> {
    status("Scanning for Steam accounts...");
    let steam_dir = match &cli.steam_path {
        Some(path) => path.clone(),
        None => find_steam_path().ok_or_else(|| {
            Error::NotFound(
                "Could not locate the Steam installation. Make sure Steam is installed and has \
                 been run at least once, or pass --steam-path"
                    .into(),
            )
        })?,
    };
    debug!(steam_dir = %steam_dir.display(), "Using Steam directory");

    let accounts = load_accounts(&steam_dir)?;
    if accounts.is_empty() {
        return Err(Error::NotFound(
            "No Steam accounts found in configuration. Log into Steam at least once".into(),
        ));
    }

    let stdin = io::stdin();
    let mut stderr = io::stderr();

    let Some(account) = prompt::choose_account(
        &accounts,
        cli.account,
        &mut stdin.lock(),
        &mut stderr,
        err_palette,
    )?
    else {
        status("Operation cancelled by user");
        return Ok(ExitCode::from(EXIT_CANCELLED));
    };

    status("Setting up Steam Web API access...");
    let store = KeyStore::default_location();
    let Some((api_key, key_source)) =
        get_or_resolve_api_key(cli.api_key.as_deref(), store.as_ref(), || {
            prompt::read_api_key(&mut stdin.lock(), &mut io::stderr(), err_palette)
        })?
    else {
        status("Operation cancelled by user");
        return Ok(ExitCode::from(EXIT_CANCELLED));
    };
    debug!(?key_source, "Resolved API key");

    let service = LibraryService::new(Arc::new(SteamClient::new(api_key)?));

    let out_palette = if cli.json {
        Palette::plain()
    } else {
        Palette::detect(&io::stdout())
    };
    let mut stdout = io::stdout().lock();
    if !cli.json {
        display::print_banner(&mut stdout, out_palette, account)?;
    }

    status("Verifying account access...");
    let verification = service.verify_player(account)?;
    if let Some(old_name) = &verification.renamed_from {
        warn_status(
            err_palette,
            &format!(
                "Steam profile name has changed: '{}' -> '{}'",
                old_name, verification.summary.persona_name
            ),
        );
    }

    status("Fetching game library...");
    let snapshot = service.fetch_library(&account.steam_id)?;
    if snapshot.owned_count == 0 {
        warn_status(
            err_palette,
            "No games found in library. This might indicate a private profile.",
        );
        return Ok(ExitCode::SUCCESS);
    }
    status(format!("Found {} games in library", snapshot.owned_count));

    match (&snapshot.recent_error, snapshot.recent_count) {
        (Some(e), _) => {
            warn_status(err_palette, &format!("Failed to fetch recent activity: {e}"))
        }
        (None, 0) => status("No recent activity found (past 2 weeks)"),
        (None, n) => status(format!("Found {n} recently played games (past 2 weeks)")),
    }

    let summary = summarize(&snapshot.games);
    let details = cli.breakdown.then(|| breakdown(&summary.source_records));
    let matches = cli.filter().map(|filter| filter.apply(&summary.source_records));

    if cli.json {
        display::print_json(
            &mut stdout,
            &Report {
                account,
                summary: &summary,
                breakdown: details.as_ref(),
                matches: matches.as_deref(),
            },
        )?;
    } else {
        display::print_statistics(&mut stdout, out_palette, &summary)?;
        if let Some(details) = &details {
            display::print_breakdown(&mut stdout, out_palette, details)?;
        }
        if let Some(matches) = &matches {
            display::print_matches(&mut stdout, out_palette, matches)?;
        }
    }
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
