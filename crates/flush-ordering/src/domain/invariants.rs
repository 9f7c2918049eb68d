//! Ordering invariants checked by the test suites.

use super::entities::{EntityId, PendingOperation};
use std::collections::{HashMap, HashSet};

/// Every reference constraint holds in `ordered`.
///
/// For an insert referencing `r`, the operation on `r` (if any) comes
/// earlier; for an update or delete referencing `r`, it comes later.
/// References to ids with no operation in the sequence constrain nothing.
pub fn order_respects_references<P>(ordered: &[PendingOperation<P>]) -> bool {
    let position: HashMap<&EntityId, usize> = ordered
        .iter()
        .enumerate()
        .map(|(index, op)| (op.id(), index))
        .collect();

    for (index, op) in ordered.iter().enumerate() {
        for reference in op.references() {
            if reference == op.id() {
                continue;
            }
            let Some(&other) = position.get(reference) else {
                continue;
            };
            let holds = if op.kind().is_insert() {
                other < index
            } else {
                index < other
            };
            if !holds {
                return false;
            }
        }
    }

    true
}

/// `ordered` contains exactly the operations of `batch`, each id once.
pub fn order_is_complete<P>(batch: &[PendingOperation<P>], ordered: &[PendingOperation<P>]) -> bool {
    if batch.len() != ordered.len() {
        return false;
    }

    let mut expected: HashSet<&EntityId> = batch.iter().map(|op| op.id()).collect();
    ordered.iter().all(|op| expected.remove(op.id())) && expected.is_empty()
}
