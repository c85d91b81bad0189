//! Block puzzle host (default binary).
//!
//! Owns one [`Session`] and serves it over the TCP adapter. Commands are
//! applied one at a time on this thread; the adapter runs on its own runtime.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use block_puzzle::adapter::{Adapter, Host, ServerConfig};
use block_puzzle::core::{JsonFileStore, Session, SimpleRng};

const DEFAULT_HIGH_SCORE_PATH: &str = "block-puzzle-highscore.json";

/// Host settings read from `BLOCK_PUZZLE_*` environment variables
#[derive(Debug, Clone)]
struct HostConfig {
    server: ServerConfig,
    seed: u32,
    high_score_path: PathBuf,
}

impl HostConfig {
    fn from_env() -> Self {
        let seed = std::env::var("BLOCK_PUZZLE_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);
        let high_score_path = std::env::var("BLOCK_PUZZLE_HIGH_SCORE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_PATH));

        Self {
            server: ServerConfig::from_env(),
            seed,
            high_score_path,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HostConfig::from_env();
    info!(
        seed = config.seed,
        high_score_path = %config.high_score_path.display(),
        "starting block puzzle host"
    );

    let session = Session::with_parts(
        SimpleRng::new(config.seed),
        JsonFileStore::new(&config.high_score_path),
    );
    info!(high_score = session.high_score(), "session ready");

    let mut adapter = Adapter::start(config.server)?;
    let mut host = Host::new(session);
    host.run(&mut adapter);

    Ok(())
}
