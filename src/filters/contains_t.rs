use once_cell::sync::Lazy;
use regex::Regex;

use super::TextFilter;

/// Alternating runs of word (group 1) and non-word (group 2) characters
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)|(\W+)").expect("valid token regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

/// Removes every word containing `t` or `T`. Punctuation between words is
/// kept, so dropping a word can leave its neighbouring punctuation behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainsTFilter;

impl TextFilter for ContainsTFilter {
    fn filter_text(&self, input: &str) -> String {
        let kept: String = TOKEN_RE
            .captures_iter(input)
            .filter_map(|caps| match (caps.get(1), caps.get(2)) {
                (Some(word), _) if word.as_str().contains(['t', 'T']) => None,
                (Some(word), _) => Some(word.as_str()),
                (None, other) => other.map(|m| m.as_str()),
            })
            .collect();

        WHITESPACE_RE.replace_all(&kept, " ").trim().to_string()
    }
}
