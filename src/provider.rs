use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::feed::parse_history;
use crate::types::Draw;

const BUILTIN_SEED: &str = include_str!("../data/seed_draws.json");

/// Source of published draws.
///
/// Implementations own any fetching or memoization. The ticket engine only
/// ever sees the [`Draw`] values they hand out.
pub trait DrawProvider: Send + Sync {
    fn get_draw_by_date(&self, date: NaiveDate) -> Result<Option<Draw>>;

    /// Most recent first.
    fn list_draws(&self, limit: usize, offset: usize) -> Result<Vec<Draw>>;

    fn get_draw_by_id(&self, id: &str) -> Result<Option<Draw>>;

    fn latest_draw(&self) -> Result<Option<Draw>> {
        Ok(self.list_draws(1, 0)?.into_iter().next())
    }
}

/// Fixed, in-memory set of draws.
#[derive(Debug, Clone)]
pub struct SeedProvider {
    draws: Vec<Draw>,
}

impl SeedProvider {
    pub fn from_draws(mut draws: Vec<Draw>) -> Self {
        draws.sort_by(|a, b| b.date.cmp(&a.date));
        Self { draws }
    }

    /// The sample draws bundled with the crate.
    pub fn builtin() -> Result<Self> {
        let draws: Vec<Draw> =
            serde_json::from_str(BUILTIN_SEED).context("Invalid builtin seed draws")?;
        Ok(Self::from_draws(draws))
    }

    /// Loads a saved `{ "items": [...] }` history page.
    pub fn from_feed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw_json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read feed file {}", path.display()))?;
        let draws = parse_history(&raw_json)
            .with_context(|| format!("Failed to parse feed file {}", path.display()))?;
        info!("📂 Loaded {} draws from {}", draws.len(), path.display());
        Ok(Self::from_draws(draws))
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

impl DrawProvider for SeedProvider {
    fn get_draw_by_date(&self, date: NaiveDate) -> Result<Option<Draw>> {
        let draw = self.draws.iter().find(|d| d.date == date).cloned();
        if draw.is_none() {
            debug!("No draw published on {}", date);
        }
        Ok(draw)
    }

    fn list_draws(&self, limit: usize, offset: usize) -> Result<Vec<Draw>> {
        Ok(self
            .draws
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn get_draw_by_id(&self, id: &str) -> Result<Option<Draw>> {
        Ok(self.draws.iter().find(|d| d.id == id).cloned())
    }
}
