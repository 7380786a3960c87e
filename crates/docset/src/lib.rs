//! # Document-id bitset
//!
//! A fixed-capacity set of document identifiers supporting boolean
//! algebra (`and`/`or`/`not`), used as the posting-list value stored by
//! the word, pattern, and interval indices.
//!
//! `DocSet<N>` holds up to `N` document ids (`0..N`), backed by a packed
//! array of `u64` words. `N` is fixed at the call site — the word and
//! pattern indices use `DocSet<128>`.

use std::fmt;
use thiserror::Error;

/// Errors raised by [`DocSet`] operations.
#[derive(Debug, Error)]
pub enum DocSetError {
    /// The document id is not smaller than the set's capacity.
    #[error("doc id {id} is out of range for a set of capacity {capacity}")]
    IdOutOfRange {
        /// The rejected document id.
        id: usize,
        /// The set's fixed capacity.
        capacity: usize,
    },
}

const fn words_for(n: usize) -> usize {
    (n + 63) / 64
}

/// A fixed-capacity, `N`-bit document-id set.
#[derive(Clone, PartialEq, Eq)]
pub struct DocSet<const N: usize> {
    words: Vec<u64>,
}

impl<const N: usize> DocSet<N> {
    /// Number of `u64` words backing a set of this capacity.
    pub const WORD_COUNT: usize = words_for(N);

    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: vec![0u64; Self::WORD_COUNT],
        }
    }

    /// Rebuilds a set from its packed word representation.
    ///
    /// Used by the LSM tree's raw (de)serialisation; `words` must have
    /// exactly [`DocSet::WORD_COUNT`] entries.
    #[must_use]
    pub fn from_words(words: Vec<u64>) -> Self {
        debug_assert_eq!(words.len(), Self::WORD_COUNT);
        Self { words }
    }

    /// Returns the packed `u64` words backing this set.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Adds document `id` to the set.
    ///
    /// # Errors
    ///
    /// Returns [`DocSetError::IdOutOfRange`] if `id >= N`.
    pub fn add(&mut self, id: usize) -> Result<(), DocSetError> {
        if id >= N {
            return Err(DocSetError::IdOutOfRange { id, capacity: N });
        }
        self.words[id / 64] |= 1u64 << (id % 64);
        Ok(())
    }

    /// Returns `true` if `id` is a member. Ids `>= N` are simply absent.
    #[must_use]
    pub fn has_doc(&self, id: usize) -> bool {
        id < N && (self.words[id / 64] >> (id % 64)) & 1 == 1
    }

    /// Returns the set's members as an ascending list of ids.
    #[must_use]
    pub fn ids(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for i in 0..N {
            if self.has_doc(i) {
                out.push(i);
            }
        }
        out
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Self { words }
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a | b)
            .collect();
        Self { words }
    }

    /// Returns the complement of `self`, masked to the set's `N`-bit capacity.
    #[must_use]
    pub fn not(&self) -> Self {
        let mut words: Vec<u64> = self.words.iter().map(|w| !w).collect();
        let used_bits_in_last = N % 64;
        if used_bits_in_last != 0 {
            if let Some(last) = words.last_mut() {
                *last &= (1u64 << used_bits_in_last) - 1;
            }
        }
        Self { words }
    }

    /// Sets every bit up to `N` (the "universe" set — identity for `And`).
    pub fn set_all(&mut self) {
        for w in &mut self.words {
            *w = u64::MAX;
        }
        let used_bits_in_last = N % 64;
        if used_bits_in_last != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used_bits_in_last) - 1;
            }
        }
    }
}

impl<const N: usize> Default for DocSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for DocSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DocSet").field(&self.ids()).finish()
    }
}
