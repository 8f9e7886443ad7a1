//! Worker thread for parallel processing
//!
//! Each worker pulls chunk jobs off the shared queue, runs them through the
//! filter pipeline and stores the result under the chunk's sequence number.

use crossbeam_channel::Receiver;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Result, StrainerError};
use crate::filters::TextFilter;
use crate::pipeline::FilterPipeline;
use crate::platform::CancellationToken;

use super::sink::ResultTable;
use super::types::ChunkJob;

/// Shared state a worker needs besides its queue
pub(crate) struct WorkerContext<'a, F> {
    pub pipeline: &'a FilterPipeline<F>,
    pub results: &'a ResultTable,
    pub cancel: &'a CancellationToken,
    /// Raised by a failing worker so the reader stops dispatching
    pub halt: &'a CancellationToken,
}

/// Worker thread: filters chunks until the queue closes
pub(crate) fn worker_thread<F: TextFilter>(
    _worker_id: usize,
    work_receiver: Receiver<ChunkJob>,
    ctx: WorkerContext<'_, F>,
) -> Result<()> {
    while let Ok(job) = work_receiver.recv() {
        // Queued work is abandoned once cancellation was requested
        if ctx.cancel.is_canceled() || ctx.halt.is_canceled() {
            continue;
        }

        let filtered = panic::catch_unwind(AssertUnwindSafe(|| ctx.pipeline.apply(Some(&job.text))));
        let stored = match filtered {
            Ok(text) => ctx.results.insert(job.seq, text.unwrap_or_default()),
            Err(payload) => Err(StrainerError::Unexpected(format!(
                "filter failed on chunk {}: {}",
                job.seq,
                panic_message(payload.as_ref())
            ))),
        };

        if let Err(e) = stored {
            ctx.halt.cancel();
            return Err(e);
        }
    }
    Ok(())
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
