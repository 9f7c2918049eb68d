//! Dependency graph builder.
//!
//! Scans a batch once and prepares, for every entity id, the set of
//! dependents and the number of prerequisites that must complete before the
//! id's own operation becomes eligible.

use crate::domain::entities::{DependencyGraph, PendingOperation};
use crate::domain::errors::OrderingError;

/// Build the prerequisite graph for one batch.
///
/// Edge direction depends on the operation kind: an insert referencing `r`
/// waits for `r`, while an update or delete referencing `r` makes `r` wait
/// instead. Self-references are ignored. Ids that appear only as references
/// are interned as anchor nodes: they take part in the traversal but are
/// never emitted, so a reference pointing outside the batch is effectively
/// already satisfied.
///
/// Fails with [`OrderingError::DuplicateEntityOperation`] if two operations
/// target the same entity.
pub fn build_dependency_graph<'a, P>(
    batch: &'a [PendingOperation<P>],
) -> Result<DependencyGraph<'a>, OrderingError> {
    let mut graph = DependencyGraph::with_capacity(batch.len());

    for (position, operation) in batch.iter().enumerate() {
        let current = graph.intern(operation.id());

        if !graph.record_operation(current, position) {
            return Err(OrderingError::DuplicateEntityOperation {
                id: operation.id().clone(),
            });
        }

        for reference in operation.references() {
            if reference == operation.id() {
                continue;
            }
            let anchor = graph.intern(reference);
            if operation.kind().is_insert() {
                // The referenced entity must exist before we point at it.
                graph.add_edge(anchor, current);
            } else {
                // Cascade order: our change runs before the referenced
                // entity's own operation.
                graph.add_edge(current, anchor);
            }
        }
    }

    Ok(graph)
}
