//! # Word inverted index
//!
//! Maps normalised tokens to document-id sets through the generic LSM
//! tree, and answers boolean queries over those tokens via `query::Node`.
//!
//! Every document insert is `N` independent LSM read-modify-write cycles
//! (one per distinct token), never an in-place update -- the LSM's
//! last-writer-wins semantics make the final write for a given token the
//! one that sticks, so re-adding a document with the same id is safe to
//! repeat.

use anyhow::{Context, Result};

use docset::DocSet;
use key::FixedKey;
use lsm::LsmTree;
use query::{Node, Resolver};
use textproc::Opts;

/// Fixed key width shared by the word and pattern indices (128 bytes is
/// comfortably larger than any realistic stemmed token).
pub const KEY_WIDTH: usize = 128;
/// Maximum number of distinct document ids a posting set can hold.
pub const MAX_DOCS: usize = 128;

type Key = FixedKey<KEY_WIDTH>;
type Docs = DocSet<MAX_DOCS>;

/// A document to be ingested: an id (dense, `0..MAX_DOCS`) and its text.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: usize,
    pub text: String,
}

/// Tokeniser options used when indexing and querying the word index:
/// stop words dropped, stemming on, no k-gram expansion.
fn word_opts() -> Opts {
    Opts {
        stopwords: true,
        stemming: true,
        kgrams: false,
    }
}

/// A token → doc-set inverted index backed by an [`LsmTree`].
pub struct WordIndex {
    lsm: LsmTree<Key, Docs>,
}

impl WordIndex {
    /// Opens (or creates) a word index rooted at `root`.
    pub fn open<P: AsRef<std::path::Path>>(root: P) -> Result<Self> {
        Ok(Self {
            lsm: LsmTree::open(root)?,
        })
    }

    /// Indexes every token of `doc.text`, adding `doc.id` to each token's
    /// posting set. Read-modify-write per token: read the current set
    /// (empty if absent), set the bit, write back.
    ///
    /// # Errors
    ///
    /// Returns an error if `doc.id >= MAX_DOCS` or a token's stemmed form
    /// exceeds `KEY_WIDTH` bytes.
    pub fn add_document(&mut self, doc: &Document) -> Result<()> {
        for token in textproc::process(&doc.text, word_opts()) {
            self.add_token(&token, doc.id)?;
        }
        Ok(())
    }

    fn add_token(&mut self, token: &str, doc_id: usize) -> Result<()> {
        let key = Key::new(token)
            .with_context(|| format!("token {token:?} too long for a word index key"))?;
        let mut docs = self
            .lsm
            .read_point(&key)?
            .map(|(_, v)| v)
            .unwrap_or_default();
        docs.add(doc_id)
            .with_context(|| format!("doc id {doc_id} out of range for word index"))?;
        self.lsm.insert(key, docs)?;
        Ok(())
    }

    /// Looks up the documents containing `word`, after normalising it
    /// with the same tokeniser options used at ingestion time. A query
    /// that normalises to no tokens (e.g. a pure stop word) returns the
    /// empty set, not an error.
    pub fn find_docs_by_word(&self, word: &str) -> Result<Docs> {
        let tokens = textproc::process(word, word_opts());
        let Some(first) = tokens.first() else {
            return Ok(Docs::new());
        };
        let key = Key::new(first)
            .with_context(|| format!("token {first:?} too long for a word index key"))?;
        Ok(self
            .lsm
            .read_point(&key)?
            .map(|(_, v)| v)
            .unwrap_or_default())
    }

    /// Evaluates a boolean query tree against this index.
    pub fn find_docs_by_expr(&self, expr: &Node) -> Docs {
        expr.eval(&WordIndexResolver { index: self })
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

/// Bridges [`WordIndex::find_docs_by_word`] into the `query::Resolver`
/// contract expected by `Node::eval` -- the "dynamic dispatch via
/// context callback" hook, here an explicit struct rather than a
/// closure so it can borrow `index` for the duration of one evaluation.
struct WordIndexResolver<'a> {
    index: &'a WordIndex,
}

impl Resolver<MAX_DOCS> for WordIndexResolver<'_> {
    fn resolve(&self, word: &str) -> Docs {
        self.index.find_docs_by_word(word).unwrap_or_else(|e| {
            log::warn!("word index resolve({word:?}) failed: {e:#}");
            Docs::new()
        })
    }
}

#[cfg(test)]
mod tests;
