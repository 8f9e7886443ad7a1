//! CLI argument processing
//!
//! Applies configuration file defaults and aliases to the raw command line
//! before clap sees it, then validates the parsed result.

use anyhow::{anyhow, Result};
use clap::{CommandFactory, FromArgMatches};

use crate::cli::Cli;
use crate::config_file::ConfigFile;
use crate::platform::{ExitCode, SafeStderr};

const MAX_THREADS: usize = 1000;

/// Command line after configuration file processing
pub struct ProcessedArgs {
    pub cli: Cli,
    /// `file` from the configuration file, if any was loaded
    pub config_file_input: Option<String>,
}

/// Validate CLI arguments for early error detection
pub fn validate_cli_args(cli: &Cli) -> Result<()> {
    if cli.threads > MAX_THREADS {
        return Err(anyhow!("Thread count too high (max {})", MAX_THREADS));
    }

    if !cli.alias.is_empty() && cli.ignore_config {
        return Err(anyhow!("--alias cannot be used with --ignore-config"));
    }

    Ok(())
}

/// Find `--config-file PATH` or `--config-file=PATH` in raw arguments
pub fn extract_config_file_arg(args: &[String]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config-file" {
            return iter.next().cloned();
        }
        if let Some(path) = arg.strip_prefix("--config-file=") {
            return Some(path.to_string());
        }
    }
    None
}

/// Parse the process arguments with config file support.
///
/// Handles `--show-config` and exits on configuration or usage errors.
pub fn process_args_with_config(stderr: &mut SafeStderr) -> ProcessedArgs {
    let raw_args: Vec<String> = std::env::args().collect();
    let config_file_path = extract_config_file_arg(&raw_args);

    if raw_args.iter().any(|arg| arg == "--show-config") {
        ConfigFile::show_config();
        ExitCode::Success.exit();
    }

    let ignore_config = raw_args.iter().any(|arg| arg == "--ignore-config");
    let (processed_args, config_file_input) = if ignore_config {
        (raw_args, None)
    } else {
        let config_file = match ConfigFile::load_with_custom_path(config_file_path.as_deref()) {
            Ok(config_file) => config_file,
            Err(e) => {
                stderr.writeln(&format!("strainer: Config file error: {:#}", e));
                ExitCode::GeneralError.exit();
            }
        };
        match config_file.process_args(raw_args) {
            Ok(processed) => (processed, config_file.file),
            Err(e) => {
                stderr.writeln(&format!("strainer: Config error: {:#}", e));
                ExitCode::GeneralError.exit();
            }
        }
    };

    // clap prints its own usage errors and exits with status 2
    let matches = Cli::command().get_matches_from(processed_args);
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            stderr.writeln(&format!("strainer: Error: {}", e));
            ExitCode::InvalidUsage.exit();
        }
    };

    if let Err(e) = validate_cli_args(&cli) {
        stderr.writeln(&format!("strainer: Error: {}", e));
        ExitCode::InvalidUsage.exit();
    }

    ProcessedArgs {
        cli,
        config_file_input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extract_config_file_both_spellings() {
        assert_eq!(
            extract_config_file_arg(&args(&["strainer", "--config-file", "a.ini", "x"])),
            Some("a.ini".to_string())
        );
        assert_eq!(
            extract_config_file_arg(&args(&["strainer", "--config-file=b.ini"])),
            Some("b.ini".to_string())
        );
        assert_eq!(extract_config_file_arg(&args(&["strainer", "--config-file"])), None);
        assert_eq!(extract_config_file_arg(&args(&["strainer", "x"])), None);
    }

    #[test]
    fn validate_rejects_excessive_threads() {
        let cli = Cli::parse_from(["strainer", "--threads", "5000"]);
        let err = validate_cli_args(&cli).unwrap_err();
        assert!(err.to_string().contains("Thread count too high"));
    }

    #[test]
    fn validate_rejects_alias_without_config() {
        let cli = Cli::parse_from(["strainer", "--ignore-config", "-a", "strict"]);
        assert!(validate_cli_args(&cli).is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        let cli = Cli::parse_from(["strainer", "in.txt"]);
        assert!(validate_cli_args(&cli).is_ok());
    }
}
