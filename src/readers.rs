//! Chunked line reader
//!
//! Turns a file (or any buffered reader) into a lazy sequence of line groups.
//! Lines are pulled one at a time only when the consumer asks for the next
//! chunk, so at most `chunk_size` lines are buffered at once.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, StrainerError};
use crate::platform::CancellationToken;

/// Read buffer used for input files
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Lines per chunk when nothing else is configured
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Validated number of lines per chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(StrainerError::InvalidChunkSize(0));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for ChunkSize {
    type Error = StrainerError;

    fn try_from(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(StrainerError::InvalidChunkSize(value));
        }
        usize::try_from(value)
            .map(Self)
            .map_err(|_| StrainerError::InvalidChunkSize(value))
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(DEFAULT_CHUNK_SIZE)
    }
}

/// Open `path` and return its lines grouped into chunks of `chunk_size`.
///
/// A zero chunk size fails before the file is touched. A missing file, or a
/// path that is not a regular file, yields no chunks at all; callers wanting
/// to tell the user should check first.
pub fn chunks(
    path: impl AsRef<Path>,
    chunk_size: usize,
    cancel: &CancellationToken,
) -> Result<ChunkReader<BufReader<File>>> {
    let chunk_size = ChunkSize::new(chunk_size)?;
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(ChunkReader::empty(chunk_size));
    }

    match File::open(path) {
        Ok(file) => Ok(ChunkReader::new(
            BufReader::with_capacity(READ_BUFFER_SIZE, file),
            chunk_size,
            cancel.clone(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ChunkReader::empty(chunk_size)),
        Err(e) => Ok(ChunkReader::failed(e, chunk_size)),
    }
}

/// Iterator over line chunks from a buffered source.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid UTF-8
/// are decoded as U+FFFD rather than failing the read.
///
/// Yields `Err` at most once; iteration ends after an error or cancellation
/// and the underlying reader is dropped immediately.
pub struct ChunkReader<R> {
    source: Option<R>,
    pending_error: Option<io::Error>,
    chunk_size: usize,
    cancel: CancellationToken,
    line_buf: Vec<u8>,
    lines: Vec<String>,
    lines_read: usize,
}

impl<R: BufRead> ChunkReader<R> {
    pub fn new(source: R, chunk_size: ChunkSize, cancel: CancellationToken) -> Self {
        Self {
            source: Some(source),
            pending_error: None,
            chunk_size: chunk_size.get(),
            cancel,
            line_buf: Vec::new(),
            lines: Vec::with_capacity(chunk_size.get()),
            lines_read: 0,
        }
    }

    fn empty(chunk_size: ChunkSize) -> Self {
        Self {
            source: None,
            pending_error: None,
            chunk_size: chunk_size.get(),
            cancel: CancellationToken::new(),
            line_buf: Vec::new(),
            lines: Vec::new(),
            lines_read: 0,
        }
    }

    fn failed(error: io::Error, chunk_size: ChunkSize) -> Self {
        Self {
            pending_error: Some(error),
            ..Self::empty(chunk_size)
        }
    }

    /// Total lines consumed from the source so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Drop the source and any partial chunk
    fn finish(&mut self) {
        self.source = None;
        self.lines.clear();
    }

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };

        self.line_buf.clear();
        let mut consumed_any = false;
        loop {
            let available = match source.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                if !consumed_any {
                    return Ok(None);
                }
                break;
            }
            consumed_any = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let terminator = available[end];
                    self.line_buf.extend_from_slice(&available[..end]);
                    source.consume(end + 1);
                    if terminator == b'\r' && next_byte(source)? == Some(b'\n') {
                        source.consume(1);
                    }
                    break;
                }
                None => {
                    let len = available.len();
                    self.line_buf.extend_from_slice(available);
                    source.consume(len);
                }
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.line_buf).into_owned()))
    }
}

/// Peek at the next byte without consuming it
fn next_byte<R: BufRead>(source: &mut R) -> io::Result<Option<u8>> {
    loop {
        match source.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending_error.take() {
            self.finish();
            return Some(Err(StrainerError::Io(error)));
        }

        self.source.as_ref()?;

        loop {
            if let Err(e) = self.cancel.check() {
                self.finish();
                return Some(Err(e));
            }

            match self.read_line() {
                Ok(Some(line)) => {
                    self.lines_read += 1;
                    self.lines.push(line);
                    if self.lines.len() == self.chunk_size {
                        let chunk = std::mem::replace(
                            &mut self.lines,
                            Vec::with_capacity(self.chunk_size),
                        );
                        return Some(Ok(chunk));
                    }
                }
                Ok(None) => {
                    // End of input: release the handle before the last chunk goes out
                    self.source = None;
                    if self.lines.is_empty() {
                        return None;
                    }
                    return Some(Ok(std::mem::take(&mut self.lines)));
                }
                Err(e) => {
                    self.finish();
                    return Some(Err(StrainerError::Io(e)));
                }
            }
        }
    }
}
