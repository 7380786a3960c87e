//! # Bit-sliced interval index
//!
//! Decomposes an arbitrary closed range `[l, r] ⊆ [0, 2^32)` into a small
//! set of disjoint predicates over a perfect binary segment tree, then
//! answers interval-containment queries by ANDing/ORing whole document
//! sets -- no per-document scan.
//!
//! Unlike the word and pattern indices, this layer keeps no LSM-backed
//! storage: it is a pure in-memory structure over two arrays of 32
//! doc-sets (one per bit of `begin`, one per bit of `end`).

use anyhow::Result;

use docset::DocSet;

/// Maximum number of distinct document ids this index can hold,
/// matching `word_index`/`pattern_index` for consistency within a
/// corpus.
pub const MAX_DOCS: usize = 128;

/// Number of bits in the stored `begin`/`end` timestamps.
const BITS: usize = 32;

type Docs = DocSet<MAX_DOCS>;

/// A bit-sliced index over per-document `[begin, end]` intervals.
pub struct IntervalIndex {
    added: Docs,
    by_bit_begin: [Docs; BITS],
    by_bit_end: [Docs; BITS],
}

impl IntervalIndex {
    /// Creates an empty interval index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            added: Docs::new(),
            by_bit_begin: std::array::from_fn(|_| Docs::new()),
            by_bit_end: std::array::from_fn(|_| Docs::new()),
        }
    }

    /// Records document `id`'s interval `[begin, end]`. Slot `i` of each
    /// bit-sliced array gates on bit `(31 - i)` of the value -- MSB-first,
    /// matching the segment-tree recursion's path orientation exactly
    /// (see [`predicates`]).
    ///
    /// # Errors
    ///
    /// Returns an error if `id >= MAX_DOCS`.
    pub fn add_document(&mut self, id: usize, begin: u32, end: u32) -> Result<()> {
        self.added.add(id)?;
        for i in 0..BITS {
            if bit_at(begin, i) {
                self.by_bit_begin[i].add(id)?;
            }
            if bit_at(end, i) {
                self.by_bit_end[i].add(id)?;
            }
        }
        Ok(())
    }

    /// Documents whose stored interval `[b, e]` satisfies `b <= r && e >=
    /// l` -- i.e. overlaps `[l, r]`.
    #[must_use]
    pub fn find_docs_by_interval(&self, l: u32, r: u32) -> Docs {
        let low_enough = self.range_match(&self.by_bit_begin, 0, r);
        let high_enough = self.range_match(&self.by_bit_end, l, u32::MAX);
        low_enough.and(&high_enough)
    }

    /// Degenerate interval query `find_docs_by_interval(t, t)`.
    #[must_use]
    pub fn find_docs_by_time_point(&self, t: u32) -> Docs {
        self.find_docs_by_interval(t, t)
    }

    /// For each disjoint predicate emitted by [`predicates`] over `[l,
    /// r]`, ANDs `self.added` with `bit_slice[i]` (or its complement)
    /// per the predicate's bits, then unions the per-predicate results.
    fn range_match(&self, bit_slice: &[Docs; BITS], l: u32, r: u32) -> Docs {
        let mut out = Docs::new();
        for predicate in predicates(l, r) {
            let mut cur = self.added.clone();
            for (i, bit) in predicate.iter().enumerate() {
                cur = if *bit {
                    cur.and(&bit_slice[i])
                } else {
                    cur.and(&bit_slice[i].not())
                };
            }
            out = out.or(&cur);
        }
        out
    }
}

impl Default for IntervalIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn bit_at(value: u32, slot: usize) -> bool {
    (value >> (BITS - 1 - slot)) & 1 == 1
}

/// Decomposes the closed range `[l, r] ⊆ [0, 2^32)` into a set of
/// mutually disjoint predicates (msb-first bit-path vectors) whose union
/// covers `[l, r]` exactly.
///
/// Recurses over a perfect binary segment tree rooted at `[0, 2^32 - 1]`:
/// whenever the current node's coverage exactly equals the (clipped)
/// request range, its path is emitted; otherwise the node splits at its
/// midpoint, recursing left with path-bit `false` and right with
/// path-bit `true`, each with the request clipped to that half.
#[must_use]
pub fn predicates(l: u32, r: u32) -> Vec<Vec<bool>> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    recurse(0, u32::MAX as u64, l as u64, r as u64, &mut path, &mut out);
    out
}

fn recurse(cl: u64, cr: u64, reql: u64, reqr: u64, path: &mut Vec<bool>, out: &mut Vec<Vec<bool>>) {
    if reql > reqr {
        return;
    }
    if cl == reql && cr == reqr {
        out.push(path.clone());
        return;
    }
    let mid = cl + (cr - cl) / 2;

    path.push(false);
    recurse(cl, mid, reql, reqr.min(mid), path, out);
    path.pop();

    path.push(true);
    recurse(mid + 1, cr, reql.max(mid + 1), reqr, path, out);
    path.pop();
}

#[cfg(test)]
mod tests;
