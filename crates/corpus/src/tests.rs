use super::*;
use query::or;
use tempfile::tempdir;

#[test]
fn word_and_pattern_layers_both_see_the_same_document() {
    let dir = tempdir().unwrap();
    let mut corpus = Corpus::open(dir.path()).unwrap();

    corpus
        .add_document(&Document {
            id: 0,
            text: "hello world".to_string(),
        })
        .unwrap();
    corpus
        .add_document(&Document {
            id: 1,
            text: "hell world".to_string(),
        })
        .unwrap();

    assert_eq!(corpus.find_docs_by_word("hello").unwrap().ids(), vec![0]);
    assert_eq!(
        corpus.find_docs_by_prefix("hell").unwrap().ids(),
        vec![0, 1]
    );
}

#[test]
fn interval_layer_is_independent_of_word_and_pattern_layers() {
    let dir = tempdir().unwrap();
    let mut corpus = Corpus::open(dir.path()).unwrap();

    corpus
        .add_document_with_interval(
            &Document {
                id: 0,
                text: "alpha event".to_string(),
            },
            10,
            20,
        )
        .unwrap();
    corpus
        .add_document_with_interval(
            &Document {
                id: 1,
                text: "beta event".to_string(),
            },
            100,
            200,
        )
        .unwrap();

    assert_eq!(corpus.find_docs_by_word("alpha").unwrap().ids(), vec![0]);
    assert_eq!(corpus.find_docs_by_time_point(150).ids(), vec![1]);
    assert_eq!(corpus.find_docs_by_interval(0, 50).ids(), vec![0]);
}

#[test]
fn or_expression_over_the_word_layer_works_through_the_facade() {
    let dir = tempdir().unwrap();
    let mut corpus = Corpus::open(dir.path()).unwrap();
    for (id, text) in [(0, "Podnebesny russia"), (1, "Putin russia europe")] {
        corpus
            .add_document(&Document {
                id,
                text: text.to_string(),
            })
            .unwrap();
    }

    let expr = or(["Podnebesny", "eUroPe"]);
    assert_eq!(corpus.find_docs_by_expr(&expr).ids(), vec![0, 1]);
}

#[test]
fn stats_aggregate_both_lsm_backed_layers() {
    let dir = tempdir().unwrap();
    let mut corpus = Corpus::open(dir.path()).unwrap();
    corpus
        .add_document(&Document {
            id: 0,
            text: "hello world".to_string(),
        })
        .unwrap();

    let _ = corpus.find_docs_by_word("hello").unwrap();
    let _ = corpus.find_docs_by_pattern("hell*").unwrap();

    let stats = corpus.stats();
    assert!(stats.words.lookup_count > 0);
    assert!(stats.patterns.lookup_count > 0);
}

#[test]
fn save_round_trips_both_layers_metadata() {
    let dir = tempdir().unwrap();
    {
        let mut corpus = Corpus::open(dir.path()).unwrap();
        corpus
            .add_document(&Document {
                id: 0,
                text: "persisted document".to_string(),
            })
            .unwrap();
        corpus.save().unwrap();
    }

    let reopened = Corpus::open(dir.path()).unwrap();
    assert_eq!(
        reopened.find_docs_by_word("persisted").unwrap().ids(),
        vec![0]
    );
}
