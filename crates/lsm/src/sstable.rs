//! On-disk SSTable records and external-memory binary search.
//!
//! Each `C<i>` file is a sorted, deduplicated concatenation of raw
//! `(K, V)` records, every record exactly `K::WIDTH + V::WIDTH` bytes.
//! Lookups never load a whole file into memory — every read is a single
//! seek + fixed-size read against an open file handle.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use bloom::BloomFilter;

use crate::fixed_width::FixedWidth;

/// Per-run metadata: entry count plus the bloom filter built over its keys.
pub struct SstMeta {
    pub size: usize,
    pub bloom: BloomFilter,
}

pub(crate) fn read_entry_at<K, V>(
    file: &mut File,
    index: usize,
    entry_size: usize,
) -> io::Result<(K, V)>
where
    K: FixedWidth,
    V: FixedWidth,
{
    let mut buf = vec![0u8; entry_size];
    file.seek(SeekFrom::Start((index * entry_size) as u64))?;
    file.read_exact(&mut buf)?;
    let key = K::read_bytes(&buf[..K::WIDTH]);
    let value = V::read_bytes(&buf[K::WIDTH..]);
    Ok((key, value))
}

/// Returns the index of the leftmost record whose key is `>= target`, or
/// `count` if every record's key is smaller (lower bound).
pub(crate) fn left_search<K, V>(
    file: &mut File,
    count: usize,
    entry_size: usize,
    target: &K,
) -> io::Result<usize>
where
    K: FixedWidth + Ord,
    V: FixedWidth,
{
    let mut lo = 0usize;
    let mut hi = count;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let (k, _): (K, V) = read_entry_at(file, mid, entry_size)?;
        if &k < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// Returns the index just past the rightmost record whose key is
/// `<= target` (upper bound), or `count` if none qualify.
pub(crate) fn right_search<K, V>(
    file: &mut File,
    count: usize,
    entry_size: usize,
    target: &K,
) -> io::Result<usize>
where
    K: FixedWidth + Ord,
    V: FixedWidth,
{
    let mut lo = 0usize;
    let mut hi = count;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let (k, _): (K, V) = read_entry_at(file, mid, entry_size)?;
        if &k <= target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}
