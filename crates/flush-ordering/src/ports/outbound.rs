//! Outbound ports (driven ports / SPI).

use crate::domain::entities::PendingOperation;
use crate::domain::errors::ExecutionError;

/// Downstream collaborator that applies ordered operations to the storage
/// backend.
///
/// The executor receives operations strictly in scheduled order and does not
/// re-validate the ordering. A failed operation aborts the flush; rolling
/// back the surrounding transaction is the host's concern.
pub trait FlushExecutor<P> {
    fn execute(&mut self, operation: &PendingOperation<P>) -> Result<(), ExecutionError>;
}
