//! # Text normalisation
//!
//! The text-processing pipeline consumed by the word and pattern
//! indices: lowercasing, punctuation stripping, whitespace tokenisation,
//! stop-word removal, a light suffix-stripping stemmer, and k-gram
//! expansion.
//!
//! This crate is deliberately simple — text normalisation is treated as
//! an external collaborator by the indexing core, not a subject of this
//! workspace's hard engineering. `process` is a pure function: same
//! input and options always produce the same token list.

/// Options controlling [`process`]'s behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opts {
    /// Drop tokens found in the fixed stop-word list.
    pub stopwords: bool,
    /// Apply the light suffix-stripping stemmer to each token.
    pub stemming: bool,
    /// Replace the token list with every k-gram (`k = 1..=len`) of each
    /// stop-word-filtered token, ignoring `stemming` for this pass.
    pub kgrams: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            stopwords: true,
            stemming: true,
            kgrams: false,
        }
    }
}

const STOP_WORDS: &[&str] = &["the", "and", "is", "in", "at", "of", "a", "on"];

/// Normalises `text` into a list of tokens per `opts`.
///
/// Pipeline: lowercase -> strip everything that isn't alphanumeric or
/// whitespace -> whitespace-split -> (optionally) drop stop words ->
/// (optionally) stem -> (optionally) replace with k-grams of the
/// stop-word-filtered tokens.
#[must_use]
pub fn process(text: &str, opts: Opts) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut tokens: Vec<String> = cleaned.split_whitespace().map(String::from).collect();

    if opts.stopwords {
        tokens.retain(|t| !STOP_WORDS.contains(&t.as_str()));
    }

    if opts.kgrams {
        let mut grams = Vec::new();
        for token in &tokens {
            grams.extend(kgrams(token));
        }
        return grams;
    }

    if opts.stemming {
        tokens.iter_mut().for_each(|t| *t = stem(t));
    }

    tokens
}

/// Returns every true k-gram (`k = 1..=token.len()`) of `token`, i.e. all
/// contiguous substrings, not just prefixes.
#[must_use]
pub fn kgrams(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    for k in 1..=n {
        for i in 0..=(n - k) {
            out.push(chars[i..i + k].iter().collect());
        }
    }
    out
}

/// A light suffix-stripping stemmer.
///
/// Strips a small set of common English suffixes when the remaining
/// stem is long enough to still be meaningful (>= 3 characters). This is
/// not a Porter stemmer — just enough conflation to merge obvious
/// morphological variants for the word index.
#[must_use]
pub fn stem(token: &str) -> String {
    const SUFFIXES: &[(&str, &str)] = &[
        ("ational", "ate"),
        ("ization", "ize"),
        ("ation", "ate"),
        ("ingly", ""),
        ("edly", ""),
        ("ing", ""),
        ("ed", ""),
    ];

    for (suffix, replacement) in SUFFIXES {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() >= 3 {
                return format!("{stem}{replacement}");
            }
        }
    }
    token.to_string()
}

#[cfg(test)]
mod tests;
