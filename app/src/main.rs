//! Interactive movie search over the OMDb API.
//!
//! Reads commands from stdin and prints the page after every step.
//! Configuration comes from `movie-search.toml` (or `MOVIE_SEARCH_CONFIG`)
//! with `OMDB_API_KEY` / `OMDB_BASE_URL` overrides.

use anyhow::Context;
use movie_search::{settings, terminal, ReqwestTransport};
use movie_search_core::Controller;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = settings::load_config();
    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    settings::init_tracing(&level);

    let timeout = config.as_ref().ok().and_then(|c| c.request_timeout());
    let mut controller = Controller::bootstrap(config);
    let transport = ReqwestTransport::new(timeout).context("building HTTP client")?;

    info!(interactive = controller.is_interactive(), "ready, type :help for commands");
    terminal::run(
        &mut controller,
        &transport,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
    .context("terminal session failed")?;
    Ok(())
}
