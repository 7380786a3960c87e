//! # Pattern inverted index
//!
//! Accelerates `*`-glob and prefix matching with a k-gram index over the
//! same generic LSM tree the word index uses, then verifies every
//! candidate against the document's stored raw text.
//!
//! Indexing stores **true k-grams** `text[i..i+k]` for every token and
//! every `k` in `1..=token.len()` -- not just the token's prefixes.
//! Because every k-gram is indexed, a prefix lookup is just a k-gram
//! lookup with `k` equal to the prefix's length.

use anyhow::{Context, Result};

use docset::DocSet;
use key::FixedKey;
use lsm::LsmTree;
use query::{Node, Resolver};
use textproc::Opts;

/// Fixed key width, shared with `word_index`.
pub const KEY_WIDTH: usize = 128;
/// Maximum number of distinct document ids a posting set can hold.
pub const MAX_DOCS: usize = 128;

type Key = FixedKey<KEY_WIDTH>;
type Docs = DocSet<MAX_DOCS>;

/// Tokeniser options used to build the k-gram index: stop words
/// dropped, k-grams on (stemming is ignored whenever k-grams are
/// requested, per `textproc::process`'s contract).
fn kgram_opts() -> Opts {
    Opts {
        stopwords: true,
        stemming: false,
        kgrams: true,
    }
}

/// A k-gram accelerated pattern/prefix index backed by an [`LsmTree`],
/// paired with the raw document text needed to verify candidates.
pub struct PatternIndex {
    lsm: LsmTree<Key, Docs>,
    /// Stored verbatim by id, for pattern-verification against the raw
    /// text. Not persisted -- lives only in process memory for this
    /// index's lifetime.
    docs: Vec<String>,
}

impl PatternIndex {
    /// Opens (or creates) a pattern index rooted at `root`.
    pub fn open<P: AsRef<std::path::Path>>(root: P) -> Result<Self> {
        Ok(Self {
            lsm: LsmTree::open(root)?,
            docs: Vec::new(),
        })
    }

    /// Indexes every k-gram of every token of `text`, and stores `text`
    /// verbatim at `id` for later verification.
    ///
    /// # Errors
    ///
    /// Returns an error if `id >= MAX_DOCS` or a k-gram exceeds
    /// `KEY_WIDTH` bytes (only possible for absurdly long single tokens).
    pub fn add_document(&mut self, id: usize, text: &str) -> Result<()> {
        if self.docs.len() <= id {
            self.docs.resize(id + 1, String::new());
        }
        self.docs[id] = text.to_string();

        for gram in textproc::process(text, kgram_opts()) {
            self.add_gram(&gram, id)?;
        }
        Ok(())
    }

    fn add_gram(&mut self, gram: &str, doc_id: usize) -> Result<()> {
        let key = Key::new(gram)
            .with_context(|| format!("k-gram {gram:?} too long for a pattern index key"))?;
        let mut docs = self
            .lsm
            .read_point(&key)?
            .map(|(_, v)| v)
            .unwrap_or_default();
        docs.add(doc_id)
            .with_context(|| format!("doc id {doc_id} out of range for pattern index"))?;
        self.lsm.insert(key, docs)?;
        Ok(())
    }

    /// Finds documents matching a `*`-glob pattern.
    ///
    /// Splits `pattern` on `*` into ordered literal segments, ANDs their
    /// k-gram postings to get a candidate set, then verifies each
    /// candidate's stored text: segments must occur in order and
    /// non-overlapping, and (unless the pattern starts/ends with `*`)
    /// the first/last segment must be anchored at a word boundary.
    pub fn find_docs_by_pattern(&self, pattern: &str) -> Result<Docs> {
        let starts_with_star = pattern.starts_with('*');
        let ends_with_star = pattern.ends_with('*');
        let segments: Vec<String> = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect();

        let ast = Node::And(
            segments
                .iter()
                .map(|s| Some(Node::lit(s.clone())))
                .collect(),
        );
        let candidates = ast.eval(&PatternResolver { index: self });

        let mut out = Docs::new();
        for id in candidates.ids() {
            let Some(text) = self.docs.get(id) else {
                continue;
            };
            if verify(text, &segments, starts_with_star, ends_with_star) {
                out.add(id)
                    .with_context(|| format!("doc id {id} out of range for pattern index"))?;
            }
        }
        Ok(out)
    }

    /// `find_docs_by_pattern(prefix + "*")`.
    pub fn find_docs_by_prefix(&self, prefix: &str) -> Result<Docs> {
        self.find_docs_by_pattern(&format!("{prefix}*"))
    }

    fn read_literal(&self, literal: &str) -> Result<Docs> {
        let Ok(key) = Key::new(literal) else {
            return Ok(Docs::new());
        };
        Ok(self
            .lsm
            .read_point(&key)?
            .map(|(_, v)| v)
            .unwrap_or_default())
    }

    /// Persists the underlying LSM tree's metadata.
    pub fn save(&self) -> Result<()> {
        self.lsm.save()
    }

    /// Returns the underlying LSM tree's lookup/insert statistics.
    #[must_use]
    pub fn stats(&self) -> lsm::Stats {
        self.lsm.stats()
    }
}

/// Resolves a pattern segment by direct k-gram lookup, bypassing the
/// word tokeniser entirely -- a segment is an arbitrary substring, not
/// necessarily a whole normalised word.
struct PatternResolver<'a> {
    index: &'a PatternIndex,
}

impl Resolver<MAX_DOCS> for PatternResolver<'_> {
    fn resolve(&self, word: &str) -> Docs {
        self.index.read_literal(word).unwrap_or_else(|e| {
            log::warn!("pattern index resolve({word:?}) failed: {e:#}");
            Docs::new()
        })
    }
}

/// Walks `segments` through `text` in order, non-overlapping, recording
/// the actual match positions found during the walk (rather than
/// re-searching with `find(first)`/`find(last)` afterward, which can
/// pick the wrong occurrence when a segment repeats). Then checks the
/// word-boundary anchors implied by whether `pattern` started/ended
/// with `*`.
fn verify(text: &str, segments: &[String], starts_with_star: bool, ends_with_star: bool) -> bool {
    let text_lower = text.to_lowercase();
    let mut cursor = 0usize;
    let mut prev: Option<&str> = None;
    let mut first_pos: Option<usize> = None;
    let mut last_match: Option<(usize, usize)> = None; // (start, end)

    for seg in segments {
        let mut start = cursor;
        if prev == Some(seg.as_str()) {
            start += 1;
        }
        if start > text_lower.len() {
            return false;
        }
        match text_lower[start..].find(seg.as_str()) {
            None => return false,
            Some(offset) => {
                let pos = start + offset;
                if first_pos.is_none() {
                    first_pos = Some(pos);
                }
                cursor = pos + seg.len();
                last_match = Some((pos, cursor));
                prev = Some(seg.as_str());
            }
        }
    }

    if !starts_with_star {
        if let Some(pos) = first_pos {
            if pos != 0 && text_lower.as_bytes()[pos - 1] != b' ' {
                return false;
            }
        }
    }

    if !ends_with_star {
        if let Some((_, end)) = last_match {
            if end < text_lower.len() && text_lower.as_bytes()[end] != b' ' {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests;
