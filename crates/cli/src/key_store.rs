//! Steam Web API key lookup and storage.
//!
//! Order: `--api-key` / `STEAM_API_KEY`, then the key file in the user's
//! config directory, then an interactive prompt (whose answer is stored).
//! The resolved key is cached for the rest of the process.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use parking_lot::Mutex;
use steamhours_core::{Error, Result};
use tracing::{debug, warn};

const APP_SUBDIR: &str = "steam-hours";
const API_KEY_FILENAME: &str = "apikey.txt";

pub static API_KEY_CACHE: LazyLock<Mutex<Option<String>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Provided,
    Stored,
    Prompted,
    Cached,
}

#[derive(Debug, Clone)]
pub struct KeyStore {
    config_dir: PathBuf,
}

impl KeyStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Store under the platform config directory, e.g. `~/.config/steam-hours`
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(APP_SUBDIR)))
    }

    pub fn key_path(&self) -> PathBuf {
        self.config_dir.join(API_KEY_FILENAME)
    }

    /// Stored key, or `None` when there is no file or it is blank
    pub fn load(&self) -> Result<Option<String>> {
        let path = self.key_path();

        if !path.is_file() {
            return Ok(None);
        }

        let key = fs::read_to_string(&path)?.trim().to_string();

        Ok((!key.is_empty()).then_some(key))
    }

    pub fn store(&self, key: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.config_dir)?;

        let path = self.key_path();
        fs::write(&path, key.trim())?;

        Ok(path)
    }
}

/// Find an API key without touching the process cache. `Ok(None)` means
/// the prompt was closed without an answer.
pub fn resolve_api_key<F>(
    provided: Option<&str>,
    store: Option<&KeyStore>,
    prompt: F,
) -> Result<Option<(String, KeySource)>>
where
    F: FnOnce() -> Result<Option<String>>,
{
    if let Some(key) = provided.map(str::trim).filter(|key| !key.is_empty()) {
        return Ok(Some((key.to_string(), KeySource::Provided)));
    }

    if let Some(store) = store {
        match store.load() {
            Ok(Some(key)) => return Ok(Some((key, KeySource::Stored))),
            Ok(None) => {}
            Err(e) => warn!(
                path = %store.key_path().display(),
                error = %e,
                "Could not read stored API key"
            ),
        }
    }

    let Some(answer) = prompt()? else {
        return Ok(None);
    };

    let key = answer.trim().to_string();
    if key.is_empty() {
        return Err(Error::InvalidInput("No API key provided".into()));
    }

    if let Some(store) = store {
        match store.store(&key) {
            Ok(path) => debug!(path = %path.display(), "Stored API key"),
            Err(e) => warn!(error = %e, "Could not store API key"),
        }
    }

    Ok(Some((key, KeySource::Prompted)))
}

/// Get the API key, reusing the one resolved earlier in this process
pub fn get_or_resolve_api_key<F>(
    provided: Option<&str>,
    store: Option<&KeyStore>,
    prompt: F,
) -> Result<Option<(String, KeySource)>>
where
    F: FnOnce() -> Result<Option<String>>,
{
    let mut cache = API_KEY_CACHE.lock();

    if let Some(key) = cache.as_ref() {
        return Ok(Some((key.clone(), KeySource::Cached)));
    }

    let resolved = resolve_api_key(provided, store, prompt)?;
    if let Some((key, _)) = &resolved {
        *cache = Some(key.clone());
    }

    Ok(resolved)
}

/// Forget the cached key
#[cfg(test)]
pub fn clear_cache() {
    API_KEY_CACHE.lock().take();
}
