// Core library for the strainer text filtering tool

pub mod args;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod error;
pub mod filters;
pub mod parallel;
pub mod pipeline;
pub mod platform;
pub mod readers;
pub mod stats;
pub mod tty;

pub use cli::Cli;
pub use config::StrainerConfig;
pub use error::{Result, StrainerError};
pub use filters::{Filter, FilterKind, TextFilter};
pub use parallel::{ParallelConfig, ParallelProcessor, ProcessOutcome, ProcessReport};
pub use pipeline::{FilterPipeline, PipelineBuilder};
pub use platform::CancellationToken;
pub use readers::{chunks, ChunkReader, ChunkSize};
pub use stats::ProcessingStats;
