//! Size-tiered compaction: a single right-to-left pass per flush, and the
//! two-way streaming merge it drives.
//!
//! This bounds the work done per flush, not the steady-state number of
//! SSTables -- a deliberate simplification. What it does guarantee is
//! that every adjacent pair that survives a pass satisfies `ratio *
//! size(i+1) <= size(i)`, or was merged (and thus freshly sized) this
//! same pass.

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use bloom::BloomFilter;

use crate::fixed_width::FixedWidth;
use crate::sstable::{read_entry_at, SstMeta};
use crate::LsmTree;

impl<K, V> LsmTree<K, V>
where
    K: FixedWidth + Ord + Clone,
    V: FixedWidth + Clone,
{
    /// Walks `ssts` from the newest index down to 1, merging `ssts[i]` into
    /// `ssts[i-1]` whenever the tier-size invariant is violated. Each merge
    /// drops the newest (now-consumed) slot from the meta list, so the loop
    /// keeps decrementing `i` against the *current* (shrinking) list.
    pub(crate) fn compact(&mut self) -> Result<()> {
        let ratio = self.meta.compaction_ratio;
        let mut i = self.meta.ssts.len();
        while i >= 2 {
            i -= 1;
            let newer_size = self.meta.ssts[i].size as u64;
            let older_size = self.meta.ssts[i - 1].size as u64;
            if ratio.saturating_mul(newer_size) > older_size {
                self.merge(i, i - 1)?;
            }
        }
        Ok(())
    }

    /// Streams `ssts[hi_idx]` and `ssts[lo_idx]` (`hi_idx > lo_idx`) into
    /// `root/tmp`, keeping the newer (higher-index) side on a key tie and
    /// dropping the older side, preserving SSTable key-uniqueness. The
    /// merged run is renamed over `C<lo_idx>` and `C<hi_idx>` is deleted.
    fn merge(&mut self, hi_idx: usize, lo_idx: usize) -> Result<()> {
        debug_assert!(hi_idx > lo_idx);

        let entry_size = K::WIDTH + V::WIDTH;
        let hi_path = self.sst_path(hi_idx);
        let lo_path = self.sst_path(lo_idx);
        let tmp_path = self.root.join("tmp");

        log::debug!(
            "merging sstable {} (newer) into {} (older)",
            hi_path.display(),
            lo_path.display()
        );

        let mut hi_file =
            File::open(&hi_path).with_context(|| format!("opening sstable at {}", hi_path.display()))?;
        let mut lo_file =
            File::open(&lo_path).with_context(|| format!("opening sstable at {}", lo_path.display()))?;
        let mut out = BufWriter::new(
            File::create(&tmp_path)
                .with_context(|| format!("creating merge tmp file at {}", tmp_path.display()))?,
        );

        let hi_count = self.meta.ssts[hi_idx].size;
        let lo_count = self.meta.ssts[lo_idx].size;
        let bloom_bits = 5 * (hi_count + lo_count).max(1) as u64;
        let mut bloom = BloomFilter::new(bloom_bits, bloom::DEFAULT_HASHES);

        let mut hi_pos = 0usize;
        let mut lo_pos = 0usize;
        let mut written = 0usize;

        let mut hi_cur = read_if_present::<K, V>(&mut hi_file, hi_pos, hi_count, entry_size)?;
        let mut lo_cur = read_if_present::<K, V>(&mut lo_file, lo_pos, lo_count, entry_size)?;

        while let (Some((hk, hv)), Some((lk, lv))) = (&hi_cur, &lo_cur) {
            match hk.cmp(lk) {
                Ordering::Less => {
                    write_entry(&mut out, hk, hv)?;
                    bloom.count(&key_bytes(hk));
                    written += 1;
                    hi_pos += 1;
                    hi_cur = read_if_present::<K, V>(&mut hi_file, hi_pos, hi_count, entry_size)?;
                }
                Ordering::Greater => {
                    write_entry(&mut out, lk, lv)?;
                    bloom.count(&key_bytes(lk));
                    written += 1;
                    lo_pos += 1;
                    lo_cur = read_if_present::<K, V>(&mut lo_file, lo_pos, lo_count, entry_size)?;
                }
                Ordering::Equal => {
                    // Newer (hi) side wins; the older duplicate is dropped.
                    write_entry(&mut out, hk, hv)?;
                    bloom.count(&key_bytes(hk));
                    written += 1;
                    hi_pos += 1;
                    lo_pos += 1;
                    hi_cur = read_if_present::<K, V>(&mut hi_file, hi_pos, hi_count, entry_size)?;
                    lo_cur = read_if_present::<K, V>(&mut lo_file, lo_pos, lo_count, entry_size)?;
                }
            }
        }

        while let Some((k, v)) = hi_cur {
            write_entry(&mut out, &k, &v)?;
            bloom.count(&key_bytes(&k));
            written += 1;
            hi_pos += 1;
            hi_cur = read_if_present::<K, V>(&mut hi_file, hi_pos, hi_count, entry_size)?;
        }
        while let Some((k, v)) = lo_cur {
            write_entry(&mut out, &k, &v)?;
            bloom.count(&key_bytes(&k));
            written += 1;
            lo_pos += 1;
            lo_cur = read_if_present::<K, V>(&mut lo_file, lo_pos, lo_count, entry_size)?;
        }

        out.flush()?;
        drop(out);
        drop(hi_file);
        drop(lo_file);

        fs::rename(&tmp_path, &lo_path)
            .with_context(|| format!("renaming merged run over {}", lo_path.display()))?;
        fs::remove_file(&hi_path)
            .with_context(|| format!("removing consumed sstable at {}", hi_path.display()))?;

        self.meta.ssts[lo_idx] = SstMeta {
            size: written,
            bloom,
        };
        self.meta.ssts.pop();

        Ok(())
    }
}

fn read_if_present<K, V>(
    file: &mut File,
    pos: usize,
    count: usize,
    entry_size: usize,
) -> Result<Option<(K, V)>>
where
    K: FixedWidth,
    V: FixedWidth,
{
    if pos >= count {
        return Ok(None);
    }
    Ok(Some(read_entry_at::<K, V>(file, pos, entry_size)?))
}

fn key_bytes<K: FixedWidth>(key: &K) -> Vec<u8> {
    let mut buf = vec![0u8; K::WIDTH];
    key.write_bytes(&mut buf);
    buf
}

fn write_entry<K: FixedWidth, V: FixedWidth>(out: &mut impl Write, key: &K, value: &V) -> Result<()> {
    let mut buf = vec![0u8; K::WIDTH + V::WIDTH];
    key.write_bytes(&mut buf[..K::WIDTH]);
    value.write_bytes(&mut buf[K::WIDTH..]);
    out.write_all(&buf).context("writing merged entry")
}
