use super::*;
use tempfile::tempdir;

fn hello_hell_corpus() -> (tempfile::TempDir, PatternIndex) {
    let dir = tempdir().unwrap();
    let mut idx = PatternIndex::open(dir.path()).unwrap();
    idx.add_document(0, "hello world").unwrap();
    idx.add_document(1, "hell world").unwrap();
    (dir, idx)
}

#[test]
fn leading_and_trailing_glob_matches_both_docs() {
    let (_dir, idx) = hello_hell_corpus();
    assert_eq!(
        idx.find_docs_by_pattern("*hell*worl*").unwrap().ids(),
        vec![0, 1]
    );
}

#[test]
fn anchored_start_still_matches_both_docs() {
    let (_dir, idx) = hello_hell_corpus();
    assert_eq!(
        idx.find_docs_by_pattern("hell*worl*").unwrap().ids(),
        vec![0, 1]
    );
}

#[test]
fn prefix_hell_matches_both() {
    let (_dir, idx) = hello_hell_corpus();
    assert_eq!(idx.find_docs_by_prefix("hell").unwrap().ids(), vec![0, 1]);
}

#[test]
fn prefix_hello_matches_only_the_longer_word() {
    let (_dir, idx) = hello_hell_corpus();
    assert_eq!(idx.find_docs_by_prefix("hello").unwrap().ids(), vec![0]);
}

#[test]
fn unanchored_mid_word_segment_fails_the_word_boundary_check() {
    let (_dir, idx) = hello_hell_corpus();
    assert!(idx
        .find_docs_by_pattern("ell*worl*")
        .unwrap()
        .ids()
        .is_empty());
}

#[test]
fn prefix_ell_is_rejected_because_ell_is_not_a_word_start() {
    let (_dir, idx) = hello_hell_corpus();
    assert!(idx.find_docs_by_prefix("ell").unwrap().ids().is_empty());
}

#[test]
fn pattern_with_no_stars_requires_exact_word_boundaries_both_ends() {
    let (_dir, idx) = hello_hell_corpus();
    assert_eq!(idx.find_docs_by_pattern("hell").unwrap().ids(), vec![1]);
    assert_eq!(idx.find_docs_by_pattern("hello").unwrap().ids(), vec![0]);
}

#[test]
fn repeated_segment_needs_a_third_occurrence_after_the_forced_skip() {
    let dir = tempdir().unwrap();
    let mut idx = PatternIndex::open(dir.path()).unwrap();
    idx.add_document(0, "ababab").unwrap();
    // "ab" occurs at 0, 2, 4 -- the forced one-char skip between two
    // equal consecutive segments lands on the third occurrence.
    assert_eq!(idx.find_docs_by_pattern("*ab*ab*").unwrap().ids(), vec![0]);
}

#[test]
fn repeated_segment_with_only_two_occurrences_misses_after_the_forced_skip() {
    let dir = tempdir().unwrap();
    let mut idx = PatternIndex::open(dir.path()).unwrap();
    idx.add_document(0, "abab").unwrap();
    // "ab" occurs only at 0 and 2; the forced one-char skip after the
    // first match lands on position 3, where no further "ab" starts.
    assert!(idx
        .find_docs_by_pattern("*ab*ab*")
        .unwrap()
        .ids()
        .is_empty());
}

#[test]
fn unmatched_pattern_returns_empty() {
    let (_dir, idx) = hello_hell_corpus();
    assert!(idx.find_docs_by_pattern("*xyz*").unwrap().ids().is_empty());
}
