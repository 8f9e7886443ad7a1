//! Main parallel processor
//!
//! Reads chunks on the calling thread, fans filtering out to a pool of
//! worker threads and writes the results back in file order once every
//! chunk has been filtered.

use crossbeam_channel::{bounded, Sender};
use std::io::Write;
use std::path::Path;
use std::thread;

use crate::error::{Result, StrainerError};
use crate::filters::{Filter, TextFilter};
use crate::pipeline::FilterPipeline;
use crate::platform::CancellationToken;
use crate::readers::{self, ChunkSize};
use crate::stats::ProcessingStats;

use super::sink::{write_ordered, ResultTable};
use super::types::{ChunkJob, ParallelConfig, ProcessOutcome, ProcessReport, LINE_ENDING};
use super::worker::{panic_message, worker_thread, WorkerContext};

/// Notice printed when the input path does not exist
pub const FILE_ABSENT_NOTICE: &str = "File does not exist.";

/// Main parallel processor
pub struct ParallelProcessor<F = Filter> {
    config: ParallelConfig,
    pipeline: FilterPipeline<F>,
}

impl<F: TextFilter> ParallelProcessor<F> {
    pub fn new(config: ParallelConfig, pipeline: FilterPipeline<F>) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &FilterPipeline<F> {
        &self.pipeline
    }

    /// Filter the file at `path` and write the result to `output`.
    ///
    /// Expected failures (missing file, cancellation, read errors, failing
    /// filters) are reported as one line on `notices` and come back as the
    /// outcome. Only an invalid chunk size or a failure to write `output`
    /// is returned as `Err`.
    pub fn process_file<W: Write, N: Write>(
        &self,
        path: impl AsRef<Path>,
        cancel: &CancellationToken,
        output: &mut W,
        notices: &mut N,
    ) -> Result<ProcessReport> {
        let chunk_size = ChunkSize::new(self.config.chunk_size)?;
        let path = path.as_ref();

        if !path.is_file() {
            writeln!(notices, "{}", FILE_ABSENT_NOTICE).unwrap_or(());
            return Ok(ProcessReport {
                outcome: ProcessOutcome::FileAbsent,
                stats: ProcessingStats::default(),
            });
        }

        let chunks = readers::chunks(path, chunk_size.get(), cancel)?;
        self.process_chunks(chunks, cancel, output, notices)
    }

    /// Filter an already opened chunk stream; see [`Self::process_file`]
    pub fn process_chunks<I, W, N>(
        &self,
        chunks: I,
        cancel: &CancellationToken,
        output: &mut W,
        notices: &mut N,
    ) -> Result<ProcessReport>
    where
        I: Iterator<Item = Result<Vec<String>>>,
        W: Write,
        N: Write,
    {
        let mut stats = ProcessingStats::new();
        stats.workers = self.config.effective_workers();

        let results = ResultTable::new();
        let filtered = self.filter_all(chunks, cancel, &results, &mut stats);
        stats.chunks_filtered = results.len() as u64;

        let outcome = match filtered {
            Err(e) => {
                writeln!(notices, "{}", e.notice()).unwrap_or(());
                ProcessOutcome::Aborted(e)
            }
            Ok(0) => ProcessOutcome::Empty,
            Ok(dispatched) => match results.into_ordered(dispatched) {
                Ok(texts) => {
                    stats.bytes_output = write_ordered(output, &texts)?;
                    ProcessOutcome::Completed { chunks: dispatched }
                }
                Err(e) => {
                    writeln!(notices, "{}", e.notice()).unwrap_or(());
                    ProcessOutcome::Aborted(e)
                }
            },
        };

        stats.finish_processing();
        Ok(ProcessReport { outcome, stats })
    }

    /// Read every chunk, filter it on the worker pool and wait for all
    /// workers. Returns the number of chunks dispatched.
    fn filter_all<I>(
        &self,
        chunks: I,
        cancel: &CancellationToken,
        results: &ResultTable,
        stats: &mut ProcessingStats,
    ) -> Result<u64>
    where
        I: Iterator<Item = Result<Vec<String>>>,
    {
        let halt = CancellationToken::new();
        let (work_sender, work_receiver) = bounded(self.config.effective_buffer_size());

        let (dispatched, worker_failure) = thread::scope(|scope| {
            let handles: Vec<_> = (0..stats.workers)
                .map(|worker_id| {
                    let work_receiver = work_receiver.clone();
                    let ctx = WorkerContext {
                        pipeline: &self.pipeline,
                        results,
                        cancel,
                        halt: &halt,
                    };
                    scope.spawn(move || worker_thread(worker_id, work_receiver, ctx))
                })
                .collect();
            drop(work_receiver);

            // The chunk stream (and its file handle) is consumed and dropped here
            let dispatched = dispatch_chunks(chunks, work_sender, cancel, &halt, stats);

            let mut worker_failure = None;
            for handle in handles {
                let failure = match handle.join() {
                    Ok(Ok(())) => continue,
                    Ok(Err(e)) => e,
                    Err(payload) => StrainerError::Unexpected(panic_message(payload.as_ref())),
                };
                worker_failure.get_or_insert(failure);
            }
            (dispatched, worker_failure)
        });

        match (dispatched, worker_failure) {
            (_, Some(failure)) if halt.is_canceled() => Err(failure),
            (Err(e), _) => Err(e),
            (Ok(_), Some(failure)) => Err(failure),
            // Workers drop queued chunks once canceled, so the table may be short
            (Ok(_), None) if cancel.is_canceled() => Err(StrainerError::Canceled),
            (Ok(count), None) => Ok(count),
        }
    }
}

/// Number chunks in arrival order and queue them for the workers
fn dispatch_chunks<I>(
    chunks: I,
    work_sender: Sender<ChunkJob>,
    cancel: &CancellationToken,
    halt: &CancellationToken,
    stats: &mut ProcessingStats,
) -> Result<u64>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    let mut seq = 0u64;
    for chunk in chunks {
        let lines = chunk?;
        cancel.check()?;
        if halt.is_canceled() {
            break;
        }

        stats.add_chunk(lines.len());
        let job = ChunkJob {
            seq,
            text: lines.join(LINE_ENDING),
        };
        if work_sender.send(job).is_err() {
            return Err(StrainerError::Unexpected(
                "filter workers stopped before all chunks were queued".into(),
            ));
        }
        seq += 1;
    }
    Ok(seq)
}
