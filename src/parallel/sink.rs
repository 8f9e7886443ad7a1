//! Result table and ordered output
//!
//! Workers insert filtered chunks under their sequence number in whatever
//! order they finish. Nothing is read back until every worker has been
//! joined, at which point the table is drained in ascending key order.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Mutex;

use crate::error::{Result, StrainerError};

use super::types::LINE_ENDING;

/// Filtered chunk text keyed by sequence number
#[derive(Debug, Default)]
pub(crate) struct ResultTable {
    entries: Mutex<BTreeMap<u64, String>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a chunk's result. A key is only ever written once.
    pub fn insert(&self, seq: u64, text: String) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StrainerError::Unexpected("result table lock poisoned".into()))?;

        if entries.contains_key(&seq) {
            return Err(StrainerError::Unexpected(format!(
                "chunk {} was filtered twice",
                seq
            )));
        }
        entries.insert(seq, text);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Consume the table, returning texts for chunks `0..expected` in order
    pub fn into_ordered(self, expected: u64) -> Result<Vec<String>> {
        let entries = self
            .entries
            .into_inner()
            .map_err(|_| StrainerError::Unexpected("result table lock poisoned".into()))?;

        let mut texts = Vec::with_capacity(entries.len());
        for (next_expected, (seq, text)) in (0..).zip(entries) {
            if seq != next_expected {
                return Err(StrainerError::Unexpected(format!(
                    "missing result for chunk {}",
                    next_expected
                )));
            }
            texts.push(text);
        }

        if texts.len() as u64 != expected {
            return Err(StrainerError::Unexpected(format!(
                "missing result for chunk {}",
                texts.len()
            )));
        }
        Ok(texts)
    }
}

/// Write each text followed by a line terminator; returns bytes written
pub(crate) fn write_ordered<W: Write>(output: &mut W, texts: &[String]) -> Result<usize> {
    let mut written = 0;
    for text in texts {
        output
            .write_all(text.as_bytes())
            .and_then(|_| output.write_all(LINE_ENDING.as_bytes()))
            .map_err(StrainerError::Output)?;
        written += text.len() + LINE_ENDING.len();
    }
    output.flush().map_err(StrainerError::Output)?;
    Ok(written)
}
