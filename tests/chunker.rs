mod helpers;

use studyai::application::services::token_windows;

use helpers::word_chunker;

#[test]
fn given_overlap_when_computing_windows_then_advances_by_stride() {
    assert_eq!(token_windows(10, 4, 1), vec![0..4, 3..7, 6..10]);
}

#[test]
fn given_total_within_budget_when_computing_windows_then_single_window() {
    assert_eq!(token_windows(3, 4, 1), vec![0..3]);
}

#[test]
fn given_no_tokens_when_computing_windows_then_empty() {
    assert!(token_windows(0, 4, 1).is_empty());
}

#[test]
fn given_overlap_not_below_budget_when_computing_windows_then_steps_by_budget() {
    assert_eq!(token_windows(5, 2, 2), vec![0..2, 2..4, 4..5]);
}

#[test]
fn given_text_within_budget_when_chunking_then_returns_text_untouched() {
    let chunker = word_chunker(10, 2);
    let text = "short text\nwith a newline";

    let chunks = chunker.chunk(text).unwrap();

    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn given_long_text_when_chunking_then_windows_overlap_by_one_token() {
    let chunker = word_chunker(4, 1);

    let chunks = chunker.chunk("a b c d e f g h i j").unwrap();

    assert_eq!(chunks, vec!["a b c d", "d e f g", "g h i j"]);
}

#[test]
fn given_zero_budget_when_creating_chunker_then_budget_is_at_least_one() {
    assert_eq!(word_chunker(0, 0).max_tokens(), 1);
}
