//! # Corpus façade
//!
//! An orchestrator that ties the word, pattern, and interval index
//! layers to one `Document` ingestion surface, without adding any
//! engineering of its own. Every index crate underneath is
//! independently complete and independently testable; this crate exists
//! purely so a caller with one corpus of documents doesn't have to wire
//! the three layers together by hand.

use std::path::Path;

use anyhow::Result;

use docset::DocSet;
use query::Node;

use interval_index::IntervalIndex;
use pattern_index::PatternIndex;
use word_index::WordIndex;

/// Document-id set capacity shared by every index layer in this corpus.
pub const MAX_DOCS: usize = word_index::MAX_DOCS;

type Docs = DocSet<MAX_DOCS>;

/// A document to ingest: a dense id (`0..MAX_DOCS`) and its raw text.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: usize,
    pub text: String,
}

/// An aggregate lookup/insert snapshot pulled from the underlying LSM
/// trees. The interval index keeps no LSM of its own, so it contributes
/// no counters here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub words: lsm::Stats,
    pub patterns: lsm::Stats,
}

/// Ties a [`WordIndex`], a [`PatternIndex`], and an [`IntervalIndex`]
/// together under one `Document` ingestion surface.
pub struct Corpus {
    words: WordIndex,
    patterns: PatternIndex,
    intervals: IntervalIndex,
}

impl Corpus {
    /// Opens (or creates) a corpus rooted at `root`: the word and
    /// pattern indices each get their own subdirectory, since each owns
    /// an independent LSM tree on disk; the interval index is pure
    /// in-memory state with nothing to open.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        Ok(Self {
            words: WordIndex::open(root.join("words"))?,
            patterns: PatternIndex::open(root.join("patterns"))?,
            intervals: IntervalIndex::new(),
        })
    }

    /// Indexes `doc` into the word and pattern layers. Does not touch
    /// the interval index -- use [`Corpus::add_document_with_interval`]
    /// for documents that carry a `[begin, end]` timestamp.
    pub fn add_document(&mut self, doc: &Document) -> Result<()> {
        self.words.add_document(&word_index::Document {
            id: doc.id,
            text: doc.text.clone(),
        })?;
        self.patterns.add_document(doc.id, &doc.text)?;
        Ok(())
    }

    /// [`Corpus::add_document`], plus recording `doc`'s `[begin, end]`
    /// interval in the bit-sliced index.
    pub fn add_document_with_interval(
        &mut self,
        doc: &Document,
        begin: u32,
        end: u32,
    ) -> Result<()> {
        self.add_document(doc)?;
        self.intervals.add_document(doc.id, begin, end)?;
        Ok(())
    }

    /// Looks up the documents containing `word` (word index path).
    pub fn find_docs_by_word(&self, word: &str) -> Result<Docs> {
        self.words.find_docs_by_word(word)
    }

    /// Evaluates a boolean query tree over the word index.
    #[must_use]
    pub fn find_docs_by_expr(&self, expr: &Node) -> Docs {
        self.words.find_docs_by_expr(expr)
    }

    /// Finds documents matching a `*`-glob pattern (pattern index path).
    pub fn find_docs_by_pattern(&self, pattern: &str) -> Result<Docs> {
        self.patterns.find_docs_by_pattern(pattern)
    }

    /// `find_docs_by_pattern(prefix + "*")`.
    pub fn find_docs_by_prefix(&self, prefix: &str) -> Result<Docs> {
        self.patterns.find_docs_by_prefix(prefix)
    }

    /// Documents whose stored `[begin, end]` interval overlaps `[l, r]`.
    #[must_use]
    pub fn find_docs_by_interval(&self, l: u32, r: u32) -> Docs {
        self.intervals.find_docs_by_interval(l, r)
    }

    /// `find_docs_by_interval(t, t)`.
    #[must_use]
    pub fn find_docs_by_time_point(&self, t: u32) -> Docs {
        self.intervals.find_docs_by_time_point(t)
    }

    /// Persists both LSM-backed layers' metadata.
    pub fn save(&self) -> Result<()> {
        self.words.save()?;
        self.patterns.save()?;
        Ok(())
    }

    /// Returns an aggregate lookup/insert snapshot across both
    /// LSM-backed layers.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            words: self.words.stats(),
            patterns: self.patterns.stats(),
        }
    }
}

#[cfg(test)]
mod tests;
