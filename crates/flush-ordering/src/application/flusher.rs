//! Flush driver.
//!
//! Bridges the scheduling API to the outbound executor port: one call
//! schedules a batch and applies it, strictly in order.

use crate::domain::entities::PendingOperation;
use crate::domain::errors::FlushError;
use crate::ports::inbound::BatchScheduler;
use crate::ports::outbound::FlushExecutor;

use tracing::info;

/// Schedule `batch` and hand every operation to `executor` in the computed
/// order. Stops at the first executor failure; the host decides what to do
/// with the surrounding transaction.
///
/// Returns the number of executed operations.
pub fn flush_batch<P, S, E>(
    scheduler: &S,
    executor: &mut E,
    batch: Vec<PendingOperation<P>>,
) -> Result<usize, FlushError>
where
    S: BatchScheduler<P> + ?Sized,
    E: FlushExecutor<P> + ?Sized,
{
    let ordered = scheduler.schedule_batch(batch)?;

    for operation in &ordered {
        executor
            .execute(operation)
            .map_err(|source| FlushError::Execution {
                id: operation.id().clone(),
                kind: operation.kind(),
                source,
            })?;
    }

    info!(executed = ordered.len(), "flush complete");
    Ok(ordered.len())
}
