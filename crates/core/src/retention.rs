//! Keep-N retention

use crate::error::ValidationError;
use crate::sort::sort_by_start_time;
use crate::taskrun::TaskRun;

/// Retention policy configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Number of most recent TaskRuns to keep (0 = delete everything selected)
    keep: usize,
}

impl RetentionPolicy {
    /// Policy keeping the `keep` most recent runs
    pub fn keep(keep: usize) -> Self {
        Self { keep }
    }

    /// Build a policy from a raw, possibly negative, count
    pub fn from_count(count: i64) -> Result<Self, ValidationError> {
        usize::try_from(count)
            .map(Self::keep)
            .map_err(|_| ValidationError::NegativeKeep)
    }

    /// Number of runs retained
    pub fn count(&self) -> usize {
        self.keep
    }

    /// Whether any run is retained
    pub fn is_active(&self) -> bool {
        self.keep > 0
    }

    /// Names of the runs eligible for deletion.
    ///
    /// With `keep == 0` every name is returned and the order is unspecified
    /// (no sort is performed). Otherwise the runs are sorted newest first,
    /// the first `keep` are skipped and the rest are returned in that sorted
    /// order.
    pub fn select(&self, mut runs: Vec<TaskRun>) -> Vec<String> {
        if !self.is_active() {
            return runs.into_iter().map(|r| r.name).collect();
        }

        sort_by_start_time(&mut runs);
        runs.into_iter().skip(self.keep).map(|r| r.name).collect()
    }
}
