//! Baseline reference-respecting sort.
//!
//! The slow path: quadratic pairwise comparisons instead of a prerequisite
//! graph. Used below the size threshold, where graph building does not pay
//! for itself, and as the fallback when the fast path is rejected by policy.

use crate::domain::entities::PendingOperation;
use crate::domain::errors::OrderingError;

/// Order a batch by repeatedly emitting the first operation, in input order,
/// that no remaining operation forces to wait.
///
/// Stable: unrelated operations keep their relative batch order. Returns
/// positions into the source batch, like the fast path, so the two are
/// interchangeable at the dispatch site.
///
/// A batch where no candidate can be emitted is cyclic; that is reported as
/// [`OrderingError::CycleDetected`] and treated as fatal by the caller, no
/// policy applies past this point.
pub fn sort_by_references<P>(batch: &[PendingOperation<P>]) -> Result<Vec<usize>, OrderingError> {
    let mut remaining: Vec<usize> = (0..batch.len()).collect();
    let mut order = Vec::with_capacity(batch.len());

    while !remaining.is_empty() {
        let picked = remaining.iter().position(|&candidate| {
            remaining
                .iter()
                .all(|&other| other == candidate || !must_wait_for(&batch[candidate], &batch[other]))
        });

        match picked {
            Some(slot) => order.push(remaining.remove(slot)),
            None => {
                return Err(OrderingError::CycleDetected {
                    unscheduled: remaining.len(),
                })
            }
        }
    }

    Ok(order)
}

/// Whether `candidate` must run strictly after `other`.
///
/// True when the candidate is an insert referencing the other entity, or the
/// other operation is an update or delete referencing the candidate's
/// entity. Pairs sharing an id never block each other; a reference to one's
/// own id is meaningless.
fn must_wait_for<P>(candidate: &PendingOperation<P>, other: &PendingOperation<P>) -> bool {
    if candidate.id() == other.id() {
        return false;
    }
    if candidate.kind().is_insert() && candidate.references().contains(other.id()) {
        return true;
    }
    !other.kind().is_insert() && other.references().contains(candidate.id())
}
