//! Inbound ports (driving ports / API).

use crate::domain::entities::PendingOperation;
use crate::domain::errors::OrderingError;

/// Primary batch scheduling API.
///
/// The upstream operation collection stage hands over one batch per flush;
/// the implementation returns the same operations in a valid execution
/// order. Payloads pass through untouched.
pub trait BatchScheduler<P>: Send + Sync {
    /// Compute a valid execution order for one batch of pending operations.
    ///
    /// Never returns a partial or unordered result: the output is either the
    /// complete batch, reordered, or an error.
    fn schedule_batch(
        &self,
        batch: Vec<PendingOperation<P>>,
    ) -> Result<Vec<PendingOperation<P>>, OrderingError>;
}
