// End-to-end tests driving the strainer binary

mod common;
use common::*;

use tempfile::TempDir;

fn lines(list: &[&str]) -> String {
    list.iter().map(|l| format!("{}{}", l, NL)).collect()
}

#[test]
fn test_no_filters_reproduces_input() {
    let (stdout, stderr, exit_code) =
        run_strainer_with_file(&["-c", "2"], "Line 1\nLine 2\nLine 3\nLine 4\nLine 5\n");

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout,
        lines(&["Line 1", "Line 2", "Line 3", "Line 4", "Line 5"])
    );
    assert!(stderr.is_empty());
}

#[test]
fn test_chunk_larger_than_file() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(&["-c", "100"], &numbered_lines(21));
    assert_eq!(exit_code, 0);

    let expected: Vec<String> = (1..=21).map(|i| format!("Line {}", i)).collect();
    let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
    assert_eq!(stdout, lines(&expected));
}

#[test]
fn test_order_preserved_with_many_workers() {
    let input = numbered_lines(1000);
    let (single, _, code_single) =
        run_strainer_with_file(&["-c", "7", "--threads", "1"], &input);
    let (many, _, code_many) = run_strainer_with_file(&["-c", "7", "--threads", "8"], &input);

    assert_eq!(code_single, 0);
    assert_eq!(code_many, 0);
    assert_eq!(single, many);
    assert!(single.starts_with(&format!("Line 1{}", NL)));
    assert!(single.ends_with(&format!("Line 1000{}", NL)));
}

#[test]
fn test_contains_t_filter_per_line() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(
        &["-c", "1", "-f", "contains-t"],
        "hello world\nkeep this test but not that\ntest text totally\n",
    );
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, lines(&["hello world", "keep", ""]));
}

#[test]
fn test_contains_t_collapses_line_breaks_inside_chunk() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(
        &["-c", "2", "--filter", "contains-t"],
        "hello world\nkeep this test\n",
    );
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, lines(&["hello world keep"]));
}

#[test]
fn test_min_length_filter() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(
        &["-f", "min-length"],
        "An apple a day keeps the doctor away\n",
    );
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, lines(&["apple day keeps the doctor away"]));
}

#[test]
fn test_min_length_option() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(
        &["-f", "min-length", "--min-length", "6"],
        "An apple a day keeps the doctor away\n",
    );
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, lines(&["doctor"]));
}

#[test]
fn test_vowel_middle_filter() {
    let (stdout, _stderr, exit_code) =
        run_strainer_with_file(&["-f", "vowel-middle"], "cat dog text Laptop\nthe rather\n");
    assert_eq!(exit_code, 0);
    // Both lines share one chunk and are joined by whitespace splitting
    assert_eq!(stdout, lines(&["Laptop the rather"]));
}

#[test]
fn test_filter_order_matters() {
    let (forward, _, _) = run_strainer_with_file(&["-f", "contains-t,vowel-middle"], "tan, sky\n");
    let (reverse, _, _) = run_strainer_with_file(&["-f", "vowel-middle,contains-t"], "tan, sky\n");

    assert_eq!(forward, lines(&[", sky"]));
    assert_eq!(reverse, lines(&["sky"]));
}

#[test]
fn test_all_filters_combined() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(
        &["-f", "contains-t", "-f", "min-length", "-f", "vowel-middle"],
        "An apple a day keeps the doctor away\n",
    );
    assert_eq!(exit_code, 0);
    // contains-t leaves "An apple a day keeps away", min-length "apple day keeps away"
    assert_eq!(stdout, lines(&["apple"]));
}

#[test]
fn test_crlf_input() {
    let (stdout, _stderr, exit_code) = run_strainer_with_file(&["-c", "5"], "a\r\nb\r\nc");
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, format!("a{0}b{0}c{0}", NL));
}

#[test]
fn test_empty_file_produces_nothing() {
    let (stdout, stderr, exit_code) = run_strainer_with_file(&["-f", "contains-t"], "");
    assert_eq!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.is_empty());
}

#[test]
fn test_missing_file_notice() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) = run_strainer_in_dir(dir.path(), &["nonexistent.txt"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim_end(), "File does not exist.");
}

#[test]
fn test_zero_chunk_size_is_usage_error() {
    let (stdout, stderr, exit_code) = run_strainer_with_file(&["-c", "0"], "a\nb\n");

    assert_eq!(exit_code, 2);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("Chunk size must be greater than 0."),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_negative_chunk_size_checked_before_file() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) =
        run_strainer_in_dir(dir.path(), &["--chunk-size", "-5", "nonexistent.txt"]);

    assert_eq!(exit_code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Chunk size must be greater than 0."));
    assert!(!stderr.contains("File does not exist."));
}

#[test]
fn test_no_input_file_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_strainer_in_dir(dir.path(), &[]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("No input file given"));
}

#[test]
fn test_unknown_filter_rejected() {
    let (stdout, stderr, exit_code) = run_strainer_with_file(&["-f", "shout"], "a\n");
    assert_eq!(exit_code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("shout"));
}

#[test]
fn test_stats_reported_on_stderr() {
    let (stdout, stderr, exit_code) =
        run_strainer_with_file(&["-c", "2", "-s", "--threads", "2"], &numbered_lines(5));

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.lines().count(), 5);
    assert!(
        stderr.contains("Lines processed: 5 total, 3 chunks read, 3 chunks filtered"),
        "stderr: {}",
        stderr
    );
    assert!(stderr.contains("2 workers"));
}

#[test]
fn test_verbose_diagnostics_use_plain_prefix() {
    let (_stdout, stderr, exit_code) = run_strainer_with_file(
        &["-v", "--no-emoji", "-c", "10", "-f", "min-length", "--min-length", "4"],
        "words\n",
    );

    assert_eq!(exit_code, 0);
    assert!(stderr.contains("strainer: Filters: min-length(4)"), "stderr: {}", stderr);
    assert!(stderr.contains("in chunks of 10 lines"));
}

#[test]
fn test_directory_input_treated_as_missing() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) = run_strainer_in_dir(dir.path(), &["."]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim_end(), "File does not exist.");
}

#[test]
fn test_non_utf8_input_is_decoded_lossily() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin1.txt");
    std::fs::write(&input, b"hello\ncaf\xe9 au lait\nworld\n").unwrap();

    let (stdout, stderr, exit_code) =
        run_strainer_in_dir(dir.path(), &["-c", "1", input.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout,
        format!("hello{0}caf{1} au lait{0}world{0}", NL, '\u{FFFD}')
    );
}
