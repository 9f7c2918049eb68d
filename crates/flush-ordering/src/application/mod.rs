//! Application module for flush ordering.
//!
//! Service orchestration and the schedule-then-execute flush driver.

pub mod flusher;
pub mod service;

pub use flusher::flush_batch;
pub use service::FlushOrderingService;
