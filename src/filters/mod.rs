//! Word-level text filters
//!
//! Each filter is a pure function from text to text. Absence is part of the
//! contract: `apply(None)` is always `None`, so a chain of filters can carry a
//! missing value through without any filter special-casing it.

pub mod contains_t;
pub mod min_length;
pub mod vowel_middle;

pub use contains_t::ContainsTFilter;
pub use min_length::MinLengthFilter;
pub use vowel_middle::VowelMiddleFilter;

use std::fmt;

/// Default minimum word length kept by [`MinLengthFilter`]
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A stateless text transformation.
pub trait TextFilter: Send + Sync {
    /// Transform present text
    fn filter_text(&self, input: &str) -> String;

    /// Transform text, propagating absence unchanged
    fn apply(&self, input: Option<&str>) -> Option<String> {
        input.map(|text| self.filter_text(text))
    }
}

/// Built-in filters, resolved once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    ContainsT,
    MinLength { min_len: usize },
    VowelMiddle,
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::ContainsT => "contains-t",
            Filter::MinLength { .. } => "min-length",
            Filter::VowelMiddle => "vowel-middle",
        }
    }
}

impl TextFilter for Filter {
    fn filter_text(&self, input: &str) -> String {
        match *self {
            Filter::ContainsT => ContainsTFilter.filter_text(input),
            Filter::MinLength { min_len } => MinLengthFilter::new(min_len).filter_text(input),
            Filter::VowelMiddle => VowelMiddleFilter.filter_text(input),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::MinLength { min_len } => write!(f, "{}({})", self.name(), min_len),
            _ => f.write_str(self.name()),
        }
    }
}

/// Filter names accepted on the command line and in config files
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Remove words containing the letter t
    ContainsT,
    /// Remove words shorter than --min-length
    MinLength,
    /// Remove words with a vowel in the middle
    VowelMiddle,
}

impl FilterKind {
    pub fn build(self, min_len: usize) -> Filter {
        match self {
            FilterKind::ContainsT => Filter::ContainsT,
            FilterKind::MinLength => Filter::MinLength { min_len },
            FilterKind::VowelMiddle => Filter::VowelMiddle,
        }
    }
}
