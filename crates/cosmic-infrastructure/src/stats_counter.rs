//! Stats counter over the stats namespace.

use cosmic_core::error::Result;
use cosmic_core::stats::{Stats, StatsCounter};

use crate::json_storage::{JsonStorage, Namespace};

/// Visit/interaction counters backed by the stats blob.
#[derive(Debug, Clone)]
pub struct LocalStatsCounter {
    storage: JsonStorage,
}

impl LocalStatsCounter {
    /// Creates a counter over the given storage.
    pub fn new(storage: JsonStorage) -> Self {
        Self { storage }
    }
}

impl StatsCounter for LocalStatsCounter {
    fn stats(&self) -> Stats {
        self.storage.read_or_default(Namespace::Stats)
    }

    fn increment_visits(&self) -> Result<u64> {
        let mut stats = self.stats();
        stats.visits += 1;
        self.storage.write(Namespace::Stats, &stats)?;
        Ok(stats.visits)
    }

    fn increment_interactions(&self) -> Result<()> {
        let mut stats = self.stats();
        stats.interactions += 1;
        self.storage.write(Namespace::Stats, &stats)
    }
}
