use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_HISTORY_LIMIT: usize = 15;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Saved feed page to serve instead of the bundled sample draws.
    pub feed_path: Option<PathBuf>,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub fn load() -> Result<Config> {
    let feed_path = env::var("LOTTERY_FEED_PATH")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    let history_limit = match env::var("LOTTERY_HISTORY_LIMIT") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid LOTTERY_HISTORY_LIMIT: {}", value))?,
        Err(_) => DEFAULT_HISTORY_LIMIT,
    };

    Ok(Config {
        feed_path,
        history_limit,
    })
}
