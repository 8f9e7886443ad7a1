use strainer::args::{process_args_with_config, ProcessedArgs};
use strainer::config::StrainerConfig;
use strainer::parallel::{ParallelProcessor, ProcessOutcome};
use strainer::platform::{CancellationToken, ExitCode, SafeStderr, SafeStdout, SignalHandler};
use strainer::StrainerError;

fn main() {
    // Shared with the signal handler, the chunk reader and the workers
    let cancel = CancellationToken::new();

    let _signal_handler = match SignalHandler::new(cancel.clone()) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Failed to initialize signal handling: {}", e);
            ExitCode::GeneralError.exit();
        }
    };

    let mut stderr = SafeStderr::new();

    let ProcessedArgs {
        cli,
        config_file_input,
    } = process_args_with_config(&mut stderr);

    let config =
        StrainerConfig::from_cli(&cli).with_fallback_file(config_file_input.as_deref());

    let parallel_config = match config.to_parallel_config() {
        Ok(parallel_config) => parallel_config,
        Err(e) => {
            stderr.writeln(&config.format_error_message(&e.to_string()));
            ExitCode::InvalidUsage.exit();
        }
    };

    let Some(file) = config.input.file.clone() else {
        stderr.writeln(&config.format_error_message(
            "No input file given. Pass FILE or set `file` in the configuration file.",
        ));
        ExitCode::InvalidUsage.exit();
    };

    if config.output.verbose {
        stderr.writeln(&config.format_info_message(&format!(
            "Reading {} in chunks of {} lines",
            file, parallel_config.chunk_size
        )));
        stderr.writeln(
            &config.format_info_message(&format!("Filters: {}", config.describe_filters())),
        );
        stderr.writeln(&config.format_info_message(&format!(
            "Workers: {}",
            parallel_config.effective_workers()
        )));
    }

    let processor = ParallelProcessor::new(parallel_config, config.build_pipeline());
    let mut stdout = SafeStdout::new();

    let report = match processor.process_file(&file, &cancel, &mut stdout, &mut stderr) {
        Ok(report) => report,
        Err(e) => {
            stderr.writeln(&config.format_error_message(&e.to_string()));
            match e {
                StrainerError::InvalidChunkSize(_) => ExitCode::InvalidUsage.exit(),
                _ => ExitCode::GeneralError.exit(),
            }
        }
    };

    if config.output.stats {
        stderr.writeln(&config.format_info_message(&report.stats.format_stats()));
    }

    let exit_code = match &report.outcome {
        ProcessOutcome::Completed { .. } | ProcessOutcome::Empty => ExitCode::Success,
        ProcessOutcome::Aborted(e) if e.is_canceled() => ExitCode::for_cancellation(),
        ProcessOutcome::FileAbsent | ProcessOutcome::Aborted(_) => ExitCode::GeneralError,
    };
    exit_code.exit();
}
