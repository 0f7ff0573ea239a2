//! Recency ordering of TaskRuns

use crate::taskrun::TaskRun;
use std::cmp::Ordering;

/// Sort TaskRuns by start time, most recent first.
///
/// Runs without a start time are still pending and sort ahead of every
/// started run. The sort is stable: equal start times keep input order.
pub fn sort_by_start_time(runs: &mut [TaskRun]) {
    runs.sort_by(|a, b| match (a.start_time, b.start_time) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(&a),
    });
}
