//! Point and range reads.
//!
//! `read_point` is logically a read but still counts lookups, memtable
//! hits, bloom probes and bloom false positives, so [`LsmTree`] keeps
//! its `Stats` counters in `Cell`s and exposes `read_point` /
//! `read_points` / `read_range` by shared reference.
//!
//! The two on-disk searches in `sstable` are a lower bound (`left_search`,
//! smallest index with `key >= target`) and an upper bound (`right_search`,
//! count of entries with `key <= target`). A point lookup wants the
//! *largest* index with `key <= target` -- that's `right_search(..) - 1`,
//! re-read and compared for equality (the post-search key comparison is
//! what turns a bloom false positive into a miss rather than wrong data).

use std::fs::File;

use anyhow::{Context, Result};

use crate::fixed_width::FixedWidth;
use crate::sstable::{left_search, read_entry_at, right_search};
use crate::LsmTree;

impl<K, V> LsmTree<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    /// Returns the entry for `key`, checking the memtable first and then
    /// every SSTable from newest to oldest. `None` if `key` was never
    /// inserted.
    pub fn read_point(&self, key: &K) -> Result<Option<(K, V)>> {
        self.stats.lookup_count.set(self.stats.lookup_count.get() + 1);

        if let Some(entry) = self.memtable.read_point(key) {
            self.stats.memtable_hits.set(self.stats.memtable_hits.get() + 1);
            return Ok(Some(entry));
        }

        let entry_size = K::WIDTH + V::WIDTH;
        let mut key_buf = vec![0u8; K::WIDTH];
        key.write_bytes(&mut key_buf);

        for i in (0..self.meta.ssts.len()).rev() {
            if !self.meta.ssts[i].bloom.probe(&key_buf) {
                continue;
            }
            self.stats
                .bloom_probe_count
                .set(self.stats.bloom_probe_count.get() + 1);

            let path = self.sst_path(i);
            let mut file =
                File::open(&path).with_context(|| format!("opening sstable at {}", path.display()))?;
            let count = self.meta.ssts[i].size;

            // Largest index with `entry.key <= key`, or none.
            let upper = right_search::<K, V>(&mut file, count, entry_size, key)
                .with_context(|| format!("searching sstable at {}", path.display()))?;
            if upper == 0 {
                continue;
            }
            let (found_key, value) = read_entry_at::<K, V>(&mut file, upper - 1, entry_size)
                .with_context(|| format!("reading entry from sstable at {}", path.display()))?;
            if &found_key == key {
                return Ok(Some((found_key, value)));
            }
            self.stats
                .bloom_false_positives
                .set(self.stats.bloom_false_positives.get() + 1);
        }

        Ok(None)
    }

    /// Convenience wrapper: looks up every key in `keys`, silently dropping
    /// misses.
    pub fn read_points(&self, keys: &[K]) -> Result<Vec<(K, V)>> {
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(entry) = self.read_point(key)? {
                out.push(entry);
            }
        }
        Ok(out)
    }

    /// Returns every entry across every SSTable whose key falls in
    /// `[lo, hi]`. Duplicates across SSTables are returned as-is -- this is
    /// a known limitation (see module docs): range reads do not consult the
    /// memtable, so a very recent write may be invisible to `read_range`
    /// until its SSTable is flushed.
    pub fn read_range(&self, lo: &K, hi: &K) -> Result<Vec<(K, V)>> {
        let entry_size = K::WIDTH + V::WIDTH;
        let mut out = Vec::new();

        for i in 0..self.meta.ssts.len() {
            let count = self.meta.ssts[i].size;
            if count == 0 {
                continue;
            }
            let path = self.sst_path(i);
            let mut file =
                File::open(&path).with_context(|| format!("opening sstable at {}", path.display()))?;

            let lo_pos = left_search::<K, V>(&mut file, count, entry_size, lo)
                .with_context(|| format!("searching sstable at {}", path.display()))?;
            if lo_pos >= count {
                continue;
            }
            let upper = right_search::<K, V>(&mut file, count, entry_size, hi)
                .with_context(|| format!("searching sstable at {}", path.display()))?;
            if upper == 0 {
                continue;
            }
            let hi_pos = upper - 1;
            if lo_pos > hi_pos {
                continue;
            }

            for pos in lo_pos..=hi_pos {
                out.push(read_entry_at::<K, V>(&mut file, pos, entry_size).with_context(|| {
                    format!("scanning sstable at {}", path.display())
                })?);
            }
        }

        Ok(out)
    }
}
