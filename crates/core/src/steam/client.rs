//! Blocking client for the Steam Web API endpoints this tool needs.

use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{GameRecord, PlayerSummary};
use crate::steam::PlaytimeSource;

pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

const OWNED_GAMES_ENDPOINT: &str = "IPlayerService/GetOwnedGames/v0001/";
const RECENT_GAMES_ENDPOINT: &str = "IPlayerService/GetRecentlyPlayedGames/v0001/";
const PLAYER_SUMMARIES_ENDPOINT: &str = "ISteamUser/GetPlayerSummaries/v0002/";

#[derive(Debug, Clone)]
pub struct SteamClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Minimum spacing between two requests
    pub min_request_interval: Duration,
    pub max_retries: u32,
    /// First retry waits this long, doubling on each further retry
    pub backoff_base: Duration,
}

impl Default for SteamClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            min_request_interval: Duration::from_millis(200),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until `min_interval` has passed since the previous request.
    /// The lock is held while sleeping so concurrent callers queue up.
    fn wait(&self) {
        let mut last = self.last_request.lock();

        let delay = remaining_delay(self.min_interval, last.map(|at| at.elapsed()));
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        *last = Some(Instant::now());
    }
}

fn remaining_delay(min_interval: Duration, since_last: Option<Duration>) -> Duration {
    match since_last {
        Some(elapsed) => min_interval.saturating_sub(elapsed),
        None => Duration::ZERO,
    }
}

fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Transport errors print the request URL, which carries the API key
fn without_url(err: reqwest::Error) -> Error {
    Error::Http(err.without_url())
}

fn classify_status(status: StatusCode) -> Option<Error> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized,
        StatusCode::FORBIDDEN => Error::Forbidden,
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        other => Error::Status(other.as_u16()),
    })
}

/// Unwrap the `{"response": {...}}` envelope every endpoint uses
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let mut value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("invalid JSON: {e}")))?;

    let Some(response) = value.get_mut("response").map(serde_json::Value::take) else {
        let snippet: String = body.chars().take(120).collect();
        return Err(Error::InvalidResponse(format!(
            "missing 'response' field in {snippet}"
        )));
    };

    Ok(serde_json::from_value(response)?)
}

#[derive(Debug, Default, Deserialize)]
struct GamesPayload {
    #[serde(default)]
    games: Vec<ApiGame>,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    #[serde(default)]
    appid: u32,
    #[serde(default = "unknown_game")]
    name: String,
    #[serde(default)]
    playtime_forever: u32,
    #[serde(default)]
    playtime_2weeks: u32,
    #[serde(default)]
    img_icon_url: String,
    #[serde(default)]
    img_logo_url: String,
}

fn unknown_game() -> String {
    "Unknown Game".to_string()
}

impl From<ApiGame> for GameRecord {
    fn from(game: ApiGame) -> Self {
        GameRecord::new(game.appid, game.name, game.playtime_forever)
            .with_recent(game.playtime_2weeks)
            .with_images(game.img_icon_url, game.img_logo_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PlayersPayload {
    #[serde(default)]
    players: Vec<ApiPlayer>,
}

#[derive(Debug, Deserialize)]
struct ApiPlayer {
    steamid: String,
    #[serde(default)]
    personaname: String,
    profileurl: Option<String>,
    avatarfull: Option<String>,
    #[serde(default)]
    communityvisibilitystate: u8,
}

impl From<ApiPlayer> for PlayerSummary {
    fn from(player: ApiPlayer) -> Self {
        Self {
            steam_id: player.steamid,
            persona_name: player.personaname,
            profile_url: player.profileurl,
            avatar_url: player.avatarfull,
            visibility: player.communityvisibilitystate,
        }
    }
}

pub struct SteamClient {
    http: Client,
    api_key: String,
    config: SteamClientConfig,
    limiter: RateLimiter,
}

impl SteamClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, SteamClientConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: SteamClientConfig) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();

        if api_key.is_empty() {
            return Err(Error::InvalidInput("Steam Web API key is empty".into()));
        }

        let http = Client::builder()
            .user_agent(concat!("steam-hours/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            limiter: RateLimiter::new(config.min_request_interval),
            config,
        })
    }

    /// Every game in the library, including free games that were played
    pub fn get_owned_games(&self, steam_id: &str) -> Result<Vec<GameRecord>> {
        let payload: GamesPayload = self
            .request(
                OWNED_GAMES_ENDPOINT,
                &[
                    ("steamid", steam_id),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                    ("format", "json"),
                ],
            )
            .map_err(Error::fetching("owned games"))?;

        let games: Vec<GameRecord> = payload.games.into_iter().map(GameRecord::from).collect();
        info!(steam_id, count = games.len(), "Fetched owned games");

        Ok(games)
    }

    /// Games played in the last two weeks
    pub fn get_recently_played_games(&self, steam_id: &str) -> Result<Vec<GameRecord>> {
        let payload: GamesPayload = self
            .request(
                RECENT_GAMES_ENDPOINT,
                &[("steamid", steam_id), ("count", "0"), ("format", "json")],
            )
            .map_err(Error::fetching("recently played games"))?;

        let games: Vec<GameRecord> = payload.games.into_iter().map(GameRecord::from).collect();
        info!(steam_id, count = games.len(), "Fetched recently played games");

        Ok(games)
    }

    pub fn get_player_summary(&self, steam_id: &str) -> Result<PlayerSummary> {
        let payload: PlayersPayload = self
            .request(
                PLAYER_SUMMARIES_ENDPOINT,
                &[("steamids", steam_id), ("format", "json")],
            )
            .map_err(Error::fetching("player summary"))?;

        payload
            .players
            .into_iter()
            .next()
            .map(PlayerSummary::from)
            .ok_or_else(|| Error::NotFound("Player not found or profile is private".into()))
    }

    fn request<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut attempt = 0;

        loop {
            self.limiter.wait();
            debug!(endpoint, attempt, "Steam API request");

            match self.send_once(&url, params) {
                Ok(body) => return decode_envelope(&body),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let wait = backoff(self.config.backoff_base, attempt);
                    warn!(
                        endpoint,
                        error = %err,
                        wait_secs = wait.as_secs_f64(),
                        "Steam API request failed, retrying"
                    );
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn send_once(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .map_err(without_url)?;

        if let Some(err) = classify_status(response.status()) {
            return Err(err);
        }

        response.text().map_err(without_url)
    }
}

impl PlaytimeSource for SteamClient {
    fn owned_games(&self, steam_id: &str) -> Result<Vec<GameRecord>> {
        self.get_owned_games(steam_id)
    }

    fn recently_played_games(&self, steam_id: &str) -> Result<Vec<GameRecord>> {
        self.get_recently_played_games(steam_id)
    }

    fn player_summary(&self, steam_id: &str) -> Result<PlayerSummary> {
        self.get_player_summary(steam_id)
    }
}

impl std::fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
