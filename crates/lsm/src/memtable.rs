//! The in-memory, insertion-ordered write buffer.
//!
//! Stays an append-only `Vec` rather than a sorted map: an entry is
//! never replaced in place, only appended; duplicates are resolved by
//! last occurrence at flush time. A companion bloom filter is built
//! incrementally across every insert, including duplicates — the
//! over-approximation is harmless since a bloom filter never produces
//! false negatives.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bloom::BloomFilter;

use crate::fixed_width::FixedWidth;
use crate::sstable::SstMeta;

/// A memtable flushes to a sorted SSTable once it holds this many entries.
pub const MEMTABLE_MAX: usize = 10_240;

/// Bloom filter size multiplier applied to a live memtable, in bits per
/// expected entry.
const MEMTABLE_BLOOM_BITS_PER_ENTRY: u64 = 4;

pub struct Memtable<K, V> {
    entries: Vec<(K, V)>,
    bloom: BloomFilter,
}

impl<K, V> Memtable<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            bloom: fresh_bloom(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `(key, value)` and counts `key` into the bloom filter.
    /// Never replaces an existing entry in place — duplicates are
    /// resolved at flush time.
    pub fn insert(&mut self, key: K, value: V) {
        let mut buf = vec![0u8; K::WIDTH];
        key.write_bytes(&mut buf);
        self.bloom.count(&buf);
        self.entries.push((key, value));
    }

    /// Probes the bloom filter, then scans newest-to-oldest for the
    /// first match.
    #[must_use]
    pub fn read_point(&self, key: &K) -> Option<(K, V)> {
        let mut buf = vec![0u8; K::WIDTH];
        key.write_bytes(&mut buf);
        if !self.bloom.probe(&buf) {
            return None;
        }
        self.entries.iter().rev().find(|(k, _)| k == key).cloned()
    }

    /// Dedups by last occurrence, writes the sorted run to `path` as raw
    /// `(K, V)` bytes, clears `self`, and returns the flushed run's
    /// metadata. The returned bloom filter is the one accumulated across
    /// every insert this memtable ever saw, not rebuilt post-dedup.
    pub fn flush<P: AsRef<Path>>(&mut self, path: P) -> io::Result<SstMeta> {
        let mut dedup: BTreeMap<K, V> = BTreeMap::new();
        for (k, v) in self.entries.drain(..) {
            dedup.insert(k, v);
        }

        let entry_size = K::WIDTH + V::WIDTH;
        let mut writer = BufWriter::new(File::create(path)?);
        let mut buf = vec![0u8; entry_size];
        for (k, v) in &dedup {
            k.write_bytes(&mut buf[..K::WIDTH]);
            v.write_bytes(&mut buf[K::WIDTH..]);
            writer.write_all(&buf)?;
        }
        writer.flush()?;

        let meta = SstMeta {
            size: dedup.len(),
            bloom: std::mem::replace(&mut self.bloom, fresh_bloom()),
        };
        Ok(meta)
    }
}

fn fresh_bloom() -> BloomFilter {
    BloomFilter::new(
        MEMTABLE_BLOOM_BITS_PER_ENTRY * MEMTABLE_MAX as u64,
        bloom::DEFAULT_HASHES,
    )
}

impl<K, V> Default for Memtable<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
