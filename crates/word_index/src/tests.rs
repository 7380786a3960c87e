use super::*;
use query::{and, or, Node};
use tempfile::tempdir;

fn sample_corpus(idx: &mut WordIndex) {
    let docs = [
        (0, "Podnebesny russia"),
        (1, "Putin russia europe"),
        (2, "russia"),
        (3, "russia europe"),
        (4, "europe"),
    ];
    for (id, text) in docs {
        idx.add_document(&Document {
            id,
            text: text.to_string(),
        })
        .unwrap();
    }
}

#[test]
fn five_document_word_corpus_matches_known_postings() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    sample_corpus(&mut idx);

    assert_eq!(idx.find_docs_by_word("Putin").unwrap().ids(), vec![1]);
    assert_eq!(
        idx.find_docs_by_word("eUroPe").unwrap().ids(),
        vec![1, 3, 4]
    );
    assert_eq!(idx.find_docs_by_word("Podnebesny").unwrap().ids(), vec![0]);
    assert_eq!(
        idx.find_docs_by_word("russia").unwrap().ids(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn or_expression_unions_two_words() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    sample_corpus(&mut idx);

    let expr = or(["Podnebesny", "eUroPe"]);
    assert_eq!(idx.find_docs_by_expr(&expr).ids(), vec![0, 1, 3, 4]);
}

#[test]
fn and_of_word_and_nested_or_intersects() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    sample_corpus(&mut idx);

    let nested = or(["Putin", "Podnebesny"]);
    let expr = Node::And(vec![Some(Node::lit("russia")), Some(nested)]);
    assert_eq!(idx.find_docs_by_expr(&expr).ids(), vec![0, 1]);
}

#[test]
fn word_never_indexed_returns_empty() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    sample_corpus(&mut idx);

    assert!(idx.find_docs_by_word("atlantis").unwrap().ids().is_empty());
}

#[test]
fn query_that_normalises_to_no_tokens_is_empty_not_an_error() {
    let dir = tempdir().unwrap();
    let idx = WordIndex::open(dir.path()).unwrap();
    // "the" is a stop word, so it normalises away entirely
    assert!(idx.find_docs_by_word("the").unwrap().ids().is_empty());
}

#[test]
fn reinserting_a_document_is_idempotent() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    let doc = Document {
        id: 7,
        text: "hello world".to_string(),
    };
    idx.add_document(&doc).unwrap();
    idx.add_document(&doc).unwrap();
    assert_eq!(idx.find_docs_by_word("hello").unwrap().ids(), vec![7]);
}

#[test]
fn and_and_or_tests_use_the_and_helper_too() {
    let dir = tempdir().unwrap();
    let mut idx = WordIndex::open(dir.path()).unwrap();
    sample_corpus(&mut idx);

    // every doc mentions russia, so AND(russia) is just russia's posting set
    let expr = and(["russia"]);
    assert_eq!(idx.find_docs_by_expr(&expr).ids(), vec![0, 1, 2, 3]);
}
