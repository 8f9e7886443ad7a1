//! Type definitions for parallel processing
//!
//! Contains the work item passed to filter workers, the processor
//! configuration and the outcome reported back to the caller.

use crate::error::StrainerError;
use crate::readers::DEFAULT_CHUNK_SIZE;
use crate::stats::ProcessingStats;

/// Line terminator used to join lines within a chunk and to end each chunk
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Worker threads; 0 means one per CPU
    pub num_workers: usize,
    /// Lines per chunk
    pub chunk_size: usize,
    /// Bound of the work queue; `None` sizes it from the worker count
    pub buffer_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_size: None,
        }
    }
}

impl ParallelConfig {
    pub fn effective_workers(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.num_workers
        }
    }

    pub fn effective_buffer_size(&self) -> usize {
        self.buffer_size
            .unwrap_or_else(|| self.effective_workers() * 4)
            .max(1)
    }
}

/// One chunk's joined text, tagged with its position in the file
#[derive(Debug, Clone)]
pub(crate) struct ChunkJob {
    pub seq: u64,
    pub text: String,
}

/// How a single `process_file` run ended
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Every chunk was filtered and written
    Completed { chunks: u64 },
    /// The file had no lines; nothing was written
    Empty,
    /// The input file does not exist; nothing was read
    FileAbsent,
    /// Reading or filtering failed or was canceled; nothing was written
    Aborted(StrainerError),
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Completed { .. } | ProcessOutcome::Empty)
    }
}

/// Outcome plus the statistics gathered on the way
#[derive(Debug)]
pub struct ProcessReport {
    pub outcome: ProcessOutcome,
    pub stats: ProcessingStats,
}
