use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use keyvalues_parser::{Obj, Value, Vdf};
use tracing::{debug, warn};

use crate::domain::accounts::sort_accounts;
use crate::error::{Error, Result};
use crate::models::SteamAccount;

const CONFIG_SUBDIR: &str = "config";
const LOGIN_USERS_FILENAME: &str = "loginusers.vdf";
const USERS_KEY: &str = "users";
const UNKNOWN: &str = "Unknown";

/// Usual Steam install locations for the current platform
fn candidate_steam_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if cfg!(windows) {
        paths.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        paths.push(PathBuf::from(r"C:\Program Files\Steam"));
        if let Some(local) = dirs::data_local_dir() {
            paths.push(local.join("Steam"));
        }
    } else if cfg!(target_os = "macos") {
        if let Some(data) = dirs::data_dir() {
            paths.push(data.join("Steam"));
        }
    } else if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".steam").join("steam"));
        paths.push(home.join(".local").join("share").join("Steam"));
        paths.push(
            home.join(".var")
                .join("app")
                .join("com.valvesoftware.Steam")
                .join(".local")
                .join("share")
                .join("Steam"),
        );
    }

    paths
}

/// Install directory recorded by the Steam installer
#[cfg(windows)]
fn registry_steam_path() -> Option<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    let lookups = [
        (HKEY_LOCAL_MACHINE, r"SOFTWARE\WOW6432Node\Valve\Steam", "InstallPath"),
        (HKEY_LOCAL_MACHINE, r"SOFTWARE\Valve\Steam", "InstallPath"),
        (HKEY_CURRENT_USER, r"Software\Valve\Steam", "SteamPath"),
    ];

    lookups.into_iter().find_map(|(hive, subkey, value)| {
        let key = RegKey::predef(hive).open_subkey(subkey).ok()?;
        let path: String = key.get_value(value).ok()?;
        debug!(subkey, value, path = %path, "Steam registry entry");
        Some(PathBuf::from(path))
    })
}

#[cfg(not(windows))]
fn registry_steam_path() -> Option<PathBuf> {
    None
}

fn first_existing_dir(
    registry: Option<PathBuf>,
    candidates: impl IntoIterator<Item = PathBuf>,
) -> Option<PathBuf> {
    registry
        .into_iter()
        .chain(candidates)
        .find(|path| path.is_dir())
}

/// Find the Steam installation directory
pub fn find_steam_path() -> Option<PathBuf> {
    let found = first_existing_dir(registry_steam_path(), candidate_steam_paths());
    debug!(path = ?found, "Steam install lookup");
    found
}

pub fn login_users_path(steam_dir: &Path) -> PathBuf {
    steam_dir.join(CONFIG_SUBDIR).join(LOGIN_USERS_FILENAME)
}

/// Read the accounts remembered by the Steam client installed at `steam_dir`
pub fn load_accounts(steam_dir: &Path) -> Result<Vec<SteamAccount>> {
    let path = login_users_path(steam_dir);

    if !path.is_file() {
        return Err(Error::NotFound(format!(
            "Steam loginusers.vdf not found at: {}",
            path.display()
        )));
    }

    let text = fs::read_to_string(&path)?;
    let accounts = parse_login_users(&text)?;

    debug!(path = %path.display(), count = accounts.len(), "Loaded Steam accounts");

    Ok(accounts)
}

/// Parse the contents of `loginusers.vdf`, most recent account first
pub fn parse_login_users(text: &str) -> Result<Vec<SteamAccount>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root = Vdf::parse(text).map_err(|e| Error::Vdf(e.to_string()))?;

    let users = match &root.value {
        Value::Obj(users) if root.key == USERS_KEY => users,
        _ => {
            return Err(Error::InvalidInput(
                "VDF file doesn't contain 'users' section".into(),
            ));
        }
    };

    let mut accounts: Vec<SteamAccount> = users
        .iter()
        .filter_map(|(steam_id, values)| match values.last() {
            Some(Value::Obj(user)) => account_from_entry(steam_id, user),
            _ => {
                warn!(steam_id = %steam_id, "Skipping account entry that is not a block");
                None
            }
        })
        .collect();

    sort_accounts(&mut accounts);

    Ok(accounts)
}

/// Last string value stored under `key`; repeated keys keep the last one
fn get_str<'o>(obj: &'o Obj<'_>, key: &str) -> Option<&'o str> {
    match obj.get(key)?.last()? {
        Value::Str(value) => Some(value.as_ref()),
        _ => None,
    }
}

fn account_from_entry(steam_id: &str, user: &Obj<'_>) -> Option<SteamAccount> {
    let raw_timestamp = get_str(user, "Timestamp").unwrap_or("0");

    let Some(timestamp) = raw_timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    else {
        warn!(steam_id, timestamp = raw_timestamp, "Skipping account with invalid timestamp");
        return None;
    };

    Some(SteamAccount {
        steam_id: steam_id.to_string(),
        account_name: get_str(user, "AccountName").unwrap_or(UNKNOWN).to_string(),
        persona_name: get_str(user, "PersonaName").unwrap_or(UNKNOWN).to_string(),
        most_recent: get_str(user, "MostRecent") == Some("1"),
        timestamp,
    })
}
