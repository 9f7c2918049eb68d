//! Flush ordering service.
//!
//! Main service implementing [`BatchScheduler`]. Orchestrates the ordering
//! pipeline:
//! 1. Dispatch on configuration and batch size
//! 2. Fast path: build dependency graph, run Kahn's sort
//! 3. On fast-path failure, apply the configured policy
//! 4. Apply the computed order to the owned batch

use crate::algorithms::{build_dependency_graph, kahns_topological_sort, sort_by_references};
use crate::config::{FailurePolicy, FlushConfig};
use crate::domain::entities::PendingOperation;
use crate::domain::errors::OrderingError;
use crate::ports::inbound::BatchScheduler;

use tracing::{debug, info, warn};

/// Dependency-aware batch scheduler with a policy-controlled fallback.
///
/// Holds nothing but its configuration; every call builds, consumes, and
/// discards its own graph, so independent batches may be scheduled from
/// separate threads concurrently.
pub struct FlushOrderingService {
    config: FlushConfig,
}

impl FlushOrderingService {
    /// Create a new service with default config
    pub fn new() -> Self {
        Self {
            config: FlushConfig::default(),
        }
    }

    /// Create a new service with custom config
    pub fn with_config(config: FlushConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlushConfig {
        &self.config
    }

    fn takes_fast_path(&self, batch_size: usize) -> bool {
        self.config.use_fast_path && batch_size >= self.config.size_threshold
    }
}

impl Default for FlushOrderingService {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> BatchScheduler<P> for FlushOrderingService {
    fn schedule_batch(
        &self,
        batch: Vec<PendingOperation<P>>,
    ) -> Result<Vec<PendingOperation<P>>, OrderingError> {
        if batch.is_empty() {
            return Ok(batch);
        }

        info!(
            batch_size = batch.len(),
            fast_path = self.takes_fast_path(batch.len()),
            "ordering flush batch"
        );

        let order = if self.takes_fast_path(batch.len()) {
            match fast_path_order(&batch) {
                Ok(order) => order,
                Err(error) => match self.config.on_fast_path_failure {
                    FailurePolicy::FallbackToBaseline => {
                        warn!(
                            %error,
                            batch_size = batch.len(),
                            "fast path failed, re-running baseline sort"
                        );
                        sort_by_references(&batch)?
                    }
                    FailurePolicy::RaiseFatal => return Err(error),
                },
            }
        } else {
            sort_by_references(&batch)?
        };

        debug!(order_len = order.len(), "flush batch ordering complete");

        Ok(apply_order(batch, &order))
    }
}

fn fast_path_order<P>(batch: &[PendingOperation<P>]) -> Result<Vec<usize>, OrderingError> {
    let mut graph = build_dependency_graph(batch)?;
    debug!(
        nodes = graph.node_count(),
        operations = graph.operation_count(),
        edges = graph.edge_count(),
        "dependency graph built"
    );
    kahns_topological_sort(&mut graph)
}

/// Permute the owned batch into the computed order without cloning payloads.
fn apply_order<P>(batch: Vec<PendingOperation<P>>, order: &[usize]) -> Vec<PendingOperation<P>> {
    let mut slots: Vec<Option<PendingOperation<P>>> = batch.into_iter().map(Some).collect();
    let ordered: Vec<_> = order
        .iter()
        .filter_map(|&position| slots[position].take())
        .collect();
    // Both paths return a permutation of 0..len.
    debug_assert_eq!(ordered.len(), order.len());
    ordered
}
