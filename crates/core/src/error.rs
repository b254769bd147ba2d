use thiserror::Error;

/// Main error type for Steam Hours operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid API key. Please check your Steam Web API key.")]
    Unauthorized,

    #[error("Access forbidden. Check API key permissions or account privacy settings.")]
    Forbidden,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("VDF parse error: {0}")]
    Vdf(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if error is a not-found error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Fetch { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Whether the request that produced this error may succeed if repeated
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => !e.is_builder(),
            Error::RateLimited => true,
            _ => false,
        }
    }

    pub(crate) fn fetching(what: &'static str) -> impl FnOnce(Error) -> Error {
        move |source| Error::Fetch {
            what,
            source: Box::new(source),
        }
    }
}
