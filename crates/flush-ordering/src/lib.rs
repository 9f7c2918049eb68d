//! # Flush Ordering
//!
//! Dependency-aware execution ordering for batched storage writes.
//!
//! A unit of work accumulates pending operations (inserts, updates,
//! deletes), each carrying flush-relevant references to other entities in
//! the same batch. Before the batch is applied, related operations must be
//! sequenced: an entity exists before anything inserted points at it, and
//! changes or removals referencing an entity run ahead of that entity's own
//! operation. For large batches this crate computes the order in O(V + E)
//! over a prerequisite graph; small batches take a quadratic baseline sort
//! whose correctness does not depend on graph bookkeeping.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (`PendingOperation`, `DependencyGraph`),
//!   errors, and ordering invariants
//! - **Algorithms**: Graph builder, Kahn's topological sort, baseline sort
//! - **Ports**: Inbound (`BatchScheduler`) and outbound (`FlushExecutor`)
//! - **Application**: Service orchestration and the flush driver
//!
//! ## Example
//!
//! ```
//! use flush_ordering::{BatchScheduler, FlushOrderingService, PendingOperation};
//!
//! let service = FlushOrderingService::new();
//! let batch = vec![
//!     PendingOperation::insert("execution-1", ()).with_references(["process-1"]),
//!     PendingOperation::insert("process-1", ()),
//! ];
//!
//! let ordered = service.schedule_batch(batch)?;
//! assert_eq!(ordered[0].id().as_str(), "process-1");
//! # Ok::<(), flush_ordering::OrderingError>(())
//! ```

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::flusher::flush_batch;
pub use application::service::FlushOrderingService;
pub use config::{FailurePolicy, FlushConfig};
pub use domain::entities::*;
pub use domain::errors::{ExecutionError, FlushError, OrderingError};
pub use ports::inbound::BatchScheduler;
pub use ports::outbound::FlushExecutor;
