use std::time::{Duration, Instant};

/// Statistics collected while processing one file
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub chunks_read: u64,
    pub chunks_filtered: u64,
    pub bytes_output: usize,
    pub workers: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn add_chunk(&mut self, lines: usize) {
        self.chunks_read += 1;
        self.lines_read += lines;
    }

    pub fn finish_processing(&mut self) {
        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} chunks read, {} chunks filtered",
            self.lines_read, self.chunks_read, self.chunks_filtered
        );

        if self.bytes_output > 0 {
            output.push_str(&format!(", {} bytes output", self.bytes_output));
        }

        if self.workers > 0 {
            output.push_str(&format!(", {} workers", self.workers));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}
