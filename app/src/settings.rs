//! Configuration loading and tracing setup for the binary.

use std::path::PathBuf;

use movie_search_core::{Config, ConfigError};
use tracing_subscriber::EnvFilter;

pub const CONFIG_PATH_ENV: &str = "MOVIE_SEARCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "movie-search.toml";

/// Config file location: `MOVIE_SEARCH_CONFIG`, else `./movie-search.toml`.
pub fn config_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(CONFIG_PATH_ENV)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load the config file and apply environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let env = |name: &str| std::env::var(name).ok();
    let mut config = Config::load(&config_path(env))?;
    config.apply_overrides(env);
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Logs go to stderr so they never mix with the page printed on stdout.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
