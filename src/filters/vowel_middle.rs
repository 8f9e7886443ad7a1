use super::TextFilter;

/// Removes words whose middle letter is a vowel. Even-length words have two
/// middle letters and are removed if either one is a vowel.
///
/// Words are whitespace separated only, so attached punctuation counts
/// towards the length and shifts the middle.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelMiddleFilter;

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn has_vowel_in_middle(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let mid = chars.len() / 2;
    match chars.len() {
        0 => false,
        n if n % 2 == 0 => is_vowel(chars[mid - 1]) || is_vowel(chars[mid]),
        _ => is_vowel(chars[mid]),
    }
}

impl TextFilter for VowelMiddleFilter {
    fn filter_text(&self, input: &str) -> String {
        input
            .split_whitespace()
            .filter(|word| !has_vowel_in_middle(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
