// Command-line interface definitions

use clap::Parser;

use crate::filters::{FilterKind, DEFAULT_MIN_LENGTH};
use crate::readers::DEFAULT_CHUNK_SIZE;

#[derive(Parser, Debug)]
#[command(name = "strainer")]
#[command(about = "Filter the words of a text file chunk by chunk")]
#[command(
    long_about = "Filter the words of a text file chunk by chunk\n\nThe file is read in chunks of N lines. Each chunk runs through the enabled\nfilters in the order given and is printed followed by a newline. Chunks are\nfiltered in parallel but always printed in file order.\n\nFILTERS:\n  contains-t    drop words containing the letter t\n  min-length    drop words shorter than --min-length characters\n  vowel-middle  drop words whose middle character is a vowel\n\nEXAMPLES:\n  strainer notes.txt --filter contains-t\n  strainer notes.txt -c 10 -f min-length,vowel-middle --min-length 4"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Input file (falls back to `file` from the configuration file)
    pub file: Option<String>,

    /// Number of lines per chunk
    #[arg(
        short = 'c',
        long = "chunk-size",
        default_value_t = DEFAULT_CHUNK_SIZE as i64,
        allow_negative_numbers = true,
        help_heading = "Input Options"
    )]
    pub chunk_size: i64,

    /// Filters to apply, in order. Repeat or separate with commas.
    #[arg(
        short = 'f',
        long = "filter",
        value_enum,
        value_delimiter = ',',
        help_heading = "Filter Options"
    )]
    pub filters: Vec<FilterKind>,

    /// Minimum word length kept by the min-length filter
    #[arg(
        long = "min-length",
        default_value_t = DEFAULT_MIN_LENGTH,
        help_heading = "Filter Options"
    )]
    pub min_length: usize,

    /// Number of worker threads (0 = number of CPUs)
    #[arg(
        long = "threads",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Print processing statistics to stderr when done
    #[arg(short = 's', long = "stats", help_heading = "Metrics and Stats")]
    pub stats: bool,

    /// Print diagnostics to stderr
    #[arg(short = 'v', long = "verbose", help_heading = "Display Options")]
    pub verbose: bool,

    /// Disable emoji prefixes
    #[arg(long = "no-emoji", help_heading = "Display Options")]
    pub no_emoji: bool,

    /// Specify custom configuration file path
    #[arg(long = "config-file", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Ignore configuration file
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Use alias from configuration file
    #[arg(short = 'a', long = "alias", help_heading = "Configuration Options")]
    pub alias: Vec<String>,

    /// Show configuration file and exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,
}
