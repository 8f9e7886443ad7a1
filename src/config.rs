use crate::cli::Cli;
use crate::error::Result;
use crate::filters::FilterKind;
use crate::parallel::ParallelConfig;
use crate::pipeline::{FilterPipeline, PipelineBuilder};
use crate::readers::ChunkSize;
use crate::tty;

/// Main configuration struct for strainer
#[derive(Debug, Clone)]
pub struct StrainerConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub file: Option<String>,
    /// As given by the user; validated by [`StrainerConfig::chunk_size`]
    pub chunk_size: i64,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub stats: bool,
    pub verbose: bool,
    pub no_emoji: bool,
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Enabled filters in application order
    pub filters: Vec<FilterKind>,
    pub min_length: usize,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub threads: usize,
}

impl StrainerConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            input: InputConfig {
                file: cli.file.clone(),
                chunk_size: cli.chunk_size,
            },
            output: OutputConfig {
                stats: cli.stats,
                verbose: cli.verbose,
                no_emoji: cli.no_emoji,
            },
            processing: ProcessingConfig {
                filters: cli.filters.clone(),
                min_length: cli.min_length,
            },
            performance: PerformanceConfig {
                threads: cli.threads,
            },
        }
    }

    /// Fill in the input file from the configuration file when the
    /// command line did not name one
    pub fn with_fallback_file(mut self, file: Option<&str>) -> Self {
        if self.input.file.is_none() {
            self.input.file = file.map(str::to_string);
        }
        self
    }

    pub fn chunk_size(&self) -> Result<ChunkSize> {
        ChunkSize::try_from(self.input.chunk_size)
    }

    pub fn to_parallel_config(&self) -> Result<ParallelConfig> {
        Ok(ParallelConfig {
            num_workers: self.performance.threads,
            chunk_size: self.chunk_size()?.get(),
            buffer_size: None,
        })
    }

    pub fn build_pipeline(&self) -> FilterPipeline {
        PipelineBuilder::new()
            .with_filters(self.processing.filters.iter().copied())
            .with_min_length(self.processing.min_length)
            .build()
    }

    /// Human readable list of the enabled filters
    pub fn describe_filters(&self) -> String {
        let pipeline = self.build_pipeline();
        if pipeline.is_empty() {
            return "none".to_string();
        }
        pipeline
            .filters()
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn format_error_message(&self, message: &str) -> String {
        format_error_message(message, self.output.no_emoji)
    }

    pub fn format_info_message(&self, message: &str) -> String {
        format_info_message(message, self.output.no_emoji)
    }
}

impl Default for StrainerConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                file: None,
                chunk_size: crate::readers::DEFAULT_CHUNK_SIZE as i64,
            },
            output: OutputConfig {
                stats: false,
                verbose: false,
                no_emoji: false,
            },
            processing: ProcessingConfig {
                filters: Vec::new(),
                min_length: crate::filters::DEFAULT_MIN_LENGTH,
            },
            performance: PerformanceConfig { threads: 0 },
        }
    }
}

/// Prefix an error line for stderr
pub fn format_error_message(message: &str, no_emoji: bool) -> String {
    if tty::should_use_emoji_for_stderr(no_emoji) {
        format!("⚠️  {}", message)
    } else {
        format!("strainer: Error: {}", message)
    }
}

/// Prefix an informational line for stderr
pub fn format_info_message(message: &str, no_emoji: bool) -> String {
    if tty::should_use_emoji_for_stderr(no_emoji) {
        format!("🔹 {}", message)
    } else {
        format!("strainer: {}", message)
    }
}
