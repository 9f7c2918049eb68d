//! Error types for flush ordering.

use super::entities::{EntityId, OperationKind};
use thiserror::Error;

/// All errors the ordering paths can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// Two operations in one batch target the same entity.
    #[error("multiple operations found for entity {id}")]
    DuplicateEntityOperation { id: EntityId },

    /// Traversal exhausted with operations still waiting on prerequisites.
    #[error("reference cycle detected: {unscheduled} operation(s) never became eligible")]
    CycleDetected { unscheduled: usize },
}

/// Error reported by a flush executor for a single operation.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement rejected by backend: {0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Error surface of a full schedule-then-execute flush.
#[derive(Debug, Error)]
pub enum FlushError {
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("executing {kind} for entity {id} failed")]
    Execution {
        id: EntityId,
        kind: OperationKind,
        #[source]
        source: ExecutionError,
    },
}
