use once_cell::sync::Lazy;
use regex::Regex;

use super::{TextFilter, DEFAULT_MIN_LENGTH};

/// Words (group 1), single whitespace characters (group 2) or single
/// punctuation characters (group 3)
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)|(\s)|([^\w\s])").expect("valid token regex"));

/// Removes words shorter than `min_len` characters.
///
/// The output spacing is rebuilt rather than copied: kept words are separated
/// by a single space, punctuation sticks to whatever precedes it, a space
/// directly after a comma is dropped, and whitespace other than a plain space
/// (tabs, newlines) never reaches the output.
#[derive(Debug, Clone, Copy)]
pub struct MinLengthFilter {
    min_len: usize,
}

impl MinLengthFilter {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

impl Default for MinLengthFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl TextFilter for MinLengthFilter {
    fn filter_text(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());

        for caps in TOKEN_RE.captures_iter(input) {
            if let Some(word) = caps.get(1) {
                let word = word.as_str();
                if word.chars().count() >= self.min_len {
                    if !result.is_empty() && !result.ends_with(' ') {
                        result.push(' ');
                    }
                    result.push_str(word);
                }
            } else if let Some(punct) = caps.get(3) {
                result.push_str(punct.as_str());
            } else if caps.get(2).is_some_and(|space| space.as_str() == " ")
                && !result.is_empty()
                && !result.ends_with([' ', ','])
            {
                result.push(' ');
            }
        }

        result.trim().to_string()
    }
}
