use super::*;

#[test]
fn lowercases_and_strips_punctuation() {
    let tokens = process("Hello, World!!", Opts { stopwords: false, stemming: false, kgrams: false });
    assert_eq!(tokens, vec!["hello", "world"]);
}

#[test]
fn removes_stop_words() {
    let tokens = process(
        "the cat and a dog",
        Opts { stopwords: true, stemming: false, kgrams: false },
    );
    assert_eq!(tokens, vec!["cat", "dog"]);
}

#[test]
fn proper_nouns_survive_stemming_untouched() {
    for word in ["russia", "putin", "europe", "podnebesny"] {
        assert_eq!(stem(word), word);
    }
}

#[test]
fn stemmer_strips_common_suffixes() {
    assert_eq!(stem("running"), "runn");
    assert_eq!(stem("walked"), "walk");
    assert_eq!(stem("organization"), "organize");
}

#[test]
fn stemmer_leaves_short_stems_alone() {
    // "ing" suffix would leave a 2-char stem, too short to conflate safely.
    assert_eq!(stem("king"), "king");
}

#[test]
fn kgrams_are_true_contiguous_substrings() {
    let grams = kgrams("abc");
    assert_eq!(
        grams,
        vec!["a", "b", "c", "ab", "bc", "abc"]
    );
}

#[test]
fn kgram_mode_ignores_stemming_and_uses_stopword_filtered_tokens() {
    let tokens = process(
        "the cats",
        Opts { stopwords: true, stemming: true, kgrams: true },
    );
    assert!(tokens.contains(&"cats".to_string()));
    assert!(!tokens.iter().any(|t| t == "the"));
}

#[test]
fn case_insensitive_normalisation() {
    assert_eq!(
        process("eUroPe", Opts { stopwords: false, stemming: false, kgrams: false }),
        vec!["europe"]
    );
}
