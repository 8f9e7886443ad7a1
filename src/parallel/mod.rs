//! Parallel chunk processing for strainer
//!
//! The file is read sequentially on the calling thread while the filtering
//! of each chunk is spread across a pool of worker threads. Output order
//! never depends on which worker finishes first.
//!
//! # Module Structure
//!
//! - `types`: Work items, configuration and run outcome
//! - `worker`: Worker thread applying the filter pipeline
//! - `sink`: Sequence-keyed result table and ordered output
//! - `processor`: Main ParallelProcessor orchestration

mod processor;
mod sink;
mod types;
mod worker;

// Re-export public types
pub use processor::{ParallelProcessor, FILE_ABSENT_NOTICE};
pub use types::{ParallelConfig, ProcessOutcome, ProcessReport, LINE_ENDING};
