//! Aggregate usage statistics.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Storage-wide usage counters. Both fields only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub visits: u64,
    #[serde(default)]
    pub interactions: u64,
}

/// Monotonic visit/interaction counters.
///
/// Each increment is a read-increment-write of the whole record; safe only
/// under the single-writer assumption of one interactive session.
pub trait StatsCounter {
    /// Returns the current counters, zeros when nothing was recorded yet.
    fn stats(&self) -> Stats;

    /// Counts a visit and returns the new visit total.
    fn increment_visits(&self) -> Result<u64>;

    /// Counts one interaction (post, like or comment).
    fn increment_interactions(&self) -> Result<()>;
}
