//! Configuration for flush ordering.

use serde::{Deserialize, Serialize};

/// Reaction to a structural error reported by the fast path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Silently re-run the baseline sort over the same batch.
    FallbackToBaseline,
    /// Propagate the error to the caller.
    RaiseFatal,
}

/// Scheduling configuration, fixed for the lifetime of a service instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlushConfig {
    /// Master toggle for the dependency-graph path.
    pub use_fast_path: bool,
    /// Minimum batch size at which graph building pays for itself; smaller
    /// batches always take the baseline sort.
    pub size_threshold: usize,
    /// What to do when the fast path reports a duplicate entity or a cycle.
    pub on_fast_path_failure: FailurePolicy,
}

impl Default for FlushConfig {
    fn default() -> Self {
        Self {
            use_fast_path: true,
            size_threshold: 64,
            on_fast_path_failure: FailurePolicy::RaiseFatal,
        }
    }
}
