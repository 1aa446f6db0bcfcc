//! Error types for the movie search client.
//!
//! # Design
//! API errors (a well-formed response whose `Response` field is `"False"`)
//! are kept apart from network errors (transport failure, non-2xx status,
//! undecodable body) because they produce different banner messages. Each
//! family knows how to phrase itself for the user; `Display` stays terse and
//! is meant for logs.

use thiserror::Error;

/// Exact provider text for an empty search.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Provider text fragment for a rejected credential.
pub const INVALID_KEY_FRAGMENT: &str = "Invalid API key";

/// Why a raw query was refused before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a movie title to search")]
    Empty,

    #[error("Please enter at least 2 characters")]
    TooShort,
}

/// A well-formed response in which the provider reported a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The search matched nothing.
    #[error("movie not found")]
    NotFound,

    /// The provider rejected the access credential.
    #[error("invalid API key")]
    InvalidApiKey,

    /// Any other provider message, kept verbatim.
    #[error("provider error: {0}")]
    Other(String),
}

impl ApiError {
    /// Banner text for a failed search of `query`.
    pub fn search_message(&self, query: &str) -> String {
        match self {
            ApiError::NotFound => {
                format!("No movies found for \"{query}\". Try a different search term.")
            }
            ApiError::InvalidApiKey => {
                "Invalid API key. Please check your OMDb API key configuration.".to_string()
            }
            ApiError::Other(message) => format!("Search error: {message}"),
        }
    }
}

/// Map a provider error string to an [`ApiError`].
///
/// Only the two strings the provider is known to send are recognised; every
/// other message falls through to [`ApiError::Other`].
pub fn classify_api_error(message: &str) -> ApiError {
    if message == NOT_FOUND_MESSAGE {
        ApiError::NotFound
    } else if message.contains(INVALID_KEY_FRAGMENT) {
        ApiError::InvalidApiKey
    } else {
        ApiError::Other(message.to_string())
    }
}

/// The request did not yield a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The host has no connectivity (name resolution failed).
    #[error("offline: {0}")]
    Offline(String),

    /// The request could not be sent or the connection dropped.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The body was not the JSON shape the provider documents.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Anything else the transport reported, e.g. a timeout.
    #[error("transport error: {0}")]
    Other(String),
}

impl NetworkError {
    /// Banner text for a search that failed below the API level.
    pub fn search_message(&self) -> String {
        let hint = match self {
            NetworkError::Offline(_) => "Please check your internet connection.",
            NetworkError::FetchFailed(_) => "Network error. Please try again.",
            _ => "Please try again later.",
        };
        format!("Unable to search movies. {hint}")
    }
}

/// Errors returned by `OmdbClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Configuration problems detected once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("API key is still the placeholder value")]
    PlaceholderApiKey,

    #[error("no base URL configured")]
    MissingBaseUrl,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Persistent setup message shown instead of the interactive page.
    pub fn setup_message(&self) -> String {
        match self {
            ConfigError::MissingApiKey | ConfigError::PlaceholderApiKey => {
                "Please configure your OMDb API key. Get your free key at http://www.omdbapi.com/apikey.aspx"
                    .to_string()
            }
            ConfigError::MissingBaseUrl | ConfigError::InvalidBaseUrl { .. } => {
                "Please configure a valid OMDb base URL.".to_string()
            }
            ConfigError::Read(_) | ConfigError::Parse(_) => {
                "The configuration file could not be loaded. Please check its contents.".to_string()
            }
        }
    }
}
