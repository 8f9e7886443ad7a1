use std::io;
use thiserror::Error;

/// Failures raised while chunking and filtering a file.
///
/// `InvalidChunkSize` and `Output` are the only variants that escape
/// [`ParallelProcessor::process_file`](crate::parallel::ParallelProcessor::process_file);
/// the rest are turned into a single notice by the processor.
#[derive(Debug, Error)]
pub enum StrainerError {
    #[error("Chunk size must be greater than 0. (got {0})")]
    InvalidChunkSize(i64),

    #[error("Operation was canceled.")]
    Canceled,

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Unexpected(String),

    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl StrainerError {
    /// The one-line notice printed when a run is aborted by this error.
    pub fn notice(&self) -> String {
        match self {
            StrainerError::Canceled => "Operation was canceled.".to_string(),
            StrainerError::Io(e) => {
                format!("An I/O error occurred while reading the file: {}", e)
            }
            StrainerError::Unexpected(msg) => {
                format!("An unexpected error occurred while reading the file: {}", msg)
            }
            other => other.to_string(),
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, StrainerError::Canceled)
    }
}

pub type Result<T> = std::result::Result<T, StrainerError>;
