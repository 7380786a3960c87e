//! # Bloom filter
//!
//! A space-efficient probabilistic set-membership structure: `h`
//! independent probes against an `m`-bit array. A bloom filter can tell
//! you with certainty that a key is **not** in the set (no false
//! negatives), but may occasionally report that a key **is** in the set
//! when it isn't.
//!
//! Unlike a double-hashing scheme, every probe here is derived from a
//! single 64-bit hash of the item's raw bytes, strided by the golden
//! ratio constant `0x9E3779B9`:
//!
//! ```text
//! index(x, i) = (hash(x) + i * 0x9E3779B9) mod m
//! ```
//!
//! ## Usage
//!
//! Each SSTable (and each live memtable) carries one of these. During
//! point lookups the tree probes the filter first -- if it says "not
//! present", the run is skipped entirely, avoiding a binary search
//! against the file.
//!
//! ```rust,no_run
//! use bloom::BloomFilter;
//!
//! let mut bf = BloomFilter::new(1024, 3);
//! bf.count(b"hello");
//! assert!(bf.probe(b"hello"));
//! ```
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Write};

/// Golden-ratio stride between successive probes.
const STRIDE: u64 = 0x9E3779B9;

/// Default number of hash probes when the caller doesn't size one
/// explicitly.
pub const DEFAULT_HASHES: u32 = 3;

/// A bloom filter backed by a flat bit array, sized explicitly by the
/// caller rather than derived from a target false-positive rate.
pub struct BloomFilter {
    bits: Vec<u8>,
    num_bits: u64,
    num_hashes: u32,
}

impl BloomFilter {
    /// Creates an empty filter with `num_bits` slots and `num_hashes`
    /// probes per item.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` or `num_hashes` is zero.
    #[must_use]
    pub fn new(num_bits: u64, num_hashes: u32) -> Self {
        assert!(num_bits > 0, "num_bits must be > 0");
        assert!(num_hashes > 0, "num_hashes must be > 0");
        let byte_len = ((num_bits + 7) / 8) as usize;
        Self {
            bits: vec![0u8; byte_len],
            num_bits,
            num_hashes,
        }
    }

    fn from_raw(bits: Vec<u8>, num_bits: u64, num_hashes: u32) -> Self {
        Self {
            bits,
            num_bits,
            num_hashes,
        }
    }

    /// Counts `item` into the filter, setting each of its `h` bits.
    pub fn count(&mut self, item: &[u8]) {
        let h = Self::hash(item);
        for i in 0..self.num_hashes {
            let idx = self.index(h, i);
            self.set_bit(idx);
        }
    }

    /// Returns `true` if `item` **might** be in the set, `false` if it
    /// is **definitely not**.
    #[must_use]
    pub fn probe(&self, item: &[u8]) -> bool {
        let h = Self::hash(item);
        for i in 0..self.num_hashes {
            let idx = self.index(h, i);
            if !self.get_bit(idx) {
                return false;
            }
        }
        true
    }

    /// Clears every bit, turning the filter back into the empty set.
    pub fn reset(&mut self) {
        self.bits.iter_mut().for_each(|b| *b = 0);
    }

    #[must_use]
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    #[must_use]
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Size of the serialized filter in bytes.
    ///
    /// Layout: `num_bits(u64) + num_hashes(u32) + bits_len(u32) + bits`.
    #[must_use]
    pub fn serialized_size(&self) -> usize {
        8 + 4 + 4 + self.bits.len()
    }

    /// Serializes the filter: `[num_bits: u64][num_hashes: u32][bits_len: u32][bits]`, little-endian.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.num_bits.to_le_bytes())?;
        w.write_all(&self.num_hashes.to_le_bytes())?;
        w.write_all(&(self.bits.len() as u32).to_le_bytes())?;
        w.write_all(&self.bits)?;
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf8 = [0u8; 8];
        let mut buf4 = [0u8; 4];

        r.read_exact(&mut buf8)?;
        let num_bits = u64::from_le_bytes(buf8);

        r.read_exact(&mut buf4)?;
        let num_hashes = u32::from_le_bytes(buf4);

        r.read_exact(&mut buf4)?;
        let bits_len = u32::from_le_bytes(buf4) as usize;

        const MAX_BLOOM_BYTES: usize = 128 * 1024 * 1024;
        if bits_len > MAX_BLOOM_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("bloom filter too large: {bits_len} bytes"),
            ));
        }

        let mut bits = vec![0u8; bits_len];
        r.read_exact(&mut bits)?;

        Ok(Self::from_raw(bits, num_bits, num_hashes))
    }

    fn hash(item: &[u8]) -> u64 {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }

    fn index(&self, h: u64, i: u32) -> u64 {
        h.wrapping_add((i as u64).wrapping_mul(STRIDE)) % self.num_bits
    }

    fn set_bit(&mut self, idx: u64) {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        self.bits[byte_idx] |= 1 << bit_offset;
    }

    fn get_bit(&self, idx: u64) -> bool {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        (self.bits[byte_idx] >> bit_offset) & 1 == 1
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("num_bits", &self.num_bits)
            .field("num_hashes", &self.num_hashes)
            .field("bytes", &self.bits.len())
            .finish()
    }
}
