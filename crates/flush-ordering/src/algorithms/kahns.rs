//! Kahn's topological sort over the prerequisite graph.
//!
//! The traversal proceeds level by level: every node whose prerequisite
//! count is zero forms the current level; emitting a node releases one
//! prerequisite of each of its dependents, and dependents reaching zero are
//! queued for the next level. O(V + E) overall.

use crate::domain::entities::{DependencyGraph, NodeIndex};
use crate::domain::errors::OrderingError;

/// Produce an execution order as positions into the source batch.
///
/// Within one level, nodes are processed in ascending intern order (the
/// order their ids first appeared in the batch), so identical input always
/// yields identical output. Anchor nodes traverse like any other node but
/// emit nothing.
///
/// Fails with [`OrderingError::CycleDetected`] when the traversal exhausts
/// the ready set with operations still waiting.
pub fn kahns_topological_sort(graph: &mut DependencyGraph<'_>) -> Result<Vec<usize>, OrderingError> {
    let expected = graph.operation_count();
    let mut order = Vec::with_capacity(expected);

    let mut ready: Vec<NodeIndex> = graph.ready_nodes();

    while !ready.is_empty() {
        let level = std::mem::take(&mut ready);
        for node in level {
            if let Some(position) = graph.take_batch_position(node) {
                order.push(position);
            }
            for dependent in graph.take_dependents(node) {
                if graph.release_prerequisite(dependent) {
                    ready.push(dependent);
                }
            }
        }
        // Dependents become ready in edge order; restore intern order before
        // the next level runs.
        ready.sort_unstable();
    }

    if order.len() != expected {
        return Err(OrderingError::CycleDetected {
            unscheduled: expected - order.len(),
        });
    }

    Ok(order)
}
