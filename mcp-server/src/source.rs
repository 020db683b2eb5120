use anyhow::Result;
use lotto_check::SeedProvider;
use tracing::info;

use crate::config::Config;

pub fn open(config: &Config) -> Result<SeedProvider> {
    let provider = match &config.feed_path {
        Some(path) => SeedProvider::from_feed_file(path)?,
        None => {
            info!("🎟️ No feed file configured, serving the bundled sample draws");
            SeedProvider::builtin()?
        }
    };

    Ok(provider)
}
