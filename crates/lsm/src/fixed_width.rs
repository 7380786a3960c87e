//! Raw fixed-width (de)serialisation for LSM tree entries.
//!
//! Defined locally in this crate, rather than in a shared base crate, so
//! it can be implemented for the foreign types `key::FixedKey<N>` and
//! `docset::DocSet<N>` without violating the orphan rule.

use byteorder::{ByteOrder, LittleEndian};

/// A value with a statically known, constant on-disk byte width.
///
/// The LSM tree never serialises through `serde` — every record is a raw
/// concatenation of `K::WIDTH` and `V::WIDTH` bytes, read and written via
/// seek + fixed-size slice, an explicit byte-level codec rather than a
/// derive-based one.
pub trait FixedWidth: Sized {
    /// Number of bytes this type occupies in a raw record.
    const WIDTH: usize;

    /// Writes `self` into `out`, which is exactly `WIDTH` bytes long.
    fn write_bytes(&self, out: &mut [u8]);

    /// Reconstructs `self` from `bytes`, which is exactly `WIDTH` bytes long.
    fn read_bytes(bytes: &[u8]) -> Self;
}

impl<const N: usize> FixedWidth for key::FixedKey<N> {
    const WIDTH: usize = N;

    fn write_bytes(&self, out: &mut [u8]) {
        out.copy_from_slice(self.as_bytes());
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        key::FixedKey::from_raw(arr)
    }
}

impl<const N: usize> FixedWidth for docset::DocSet<N> {
    const WIDTH: usize = docset::DocSet::<N>::WORD_COUNT * 8;

    fn write_bytes(&self, out: &mut [u8]) {
        for (i, word) in self.words().iter().enumerate() {
            LittleEndian::write_u64(&mut out[i * 8..i * 8 + 8], *word);
        }
    }

    fn read_bytes(bytes: &[u8]) -> Self {
        let words = bytes.chunks_exact(8).map(LittleEndian::read_u64).collect();
        docset::DocSet::from_words(words)
    }
}

macro_rules! impl_fixed_width_int {
    ($ty:ty, $width:expr, $write:ident, $read:ident) => {
        impl FixedWidth for $ty {
            const WIDTH: usize = $width;

            fn write_bytes(&self, out: &mut [u8]) {
                LittleEndian::$write(out, *self);
            }

            fn read_bytes(bytes: &[u8]) -> Self {
                LittleEndian::$read(bytes)
            }
        }
    };
}

impl_fixed_width_int!(u64, 8, write_u64, read_u64);
impl_fixed_width_int!(i64, 8, write_i64, read_i64);
impl_fixed_width_int!(u32, 4, write_u32, read_u32);
impl_fixed_width_int!(i32, 4, write_i32, read_i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_key_round_trips() {
        let k: key::FixedKey<16> = key::FixedKey::new("hello").unwrap();
        let mut buf = vec![0u8; <key::FixedKey<16> as FixedWidth>::WIDTH];
        k.write_bytes(&mut buf);
        let back = <key::FixedKey<16> as FixedWidth>::read_bytes(&buf);
        assert_eq!(k, back);
    }

    #[test]
    fn docset_round_trips() {
        let mut s: docset::DocSet<128> = docset::DocSet::new();
        s.add(3).unwrap();
        s.add(127).unwrap();
        let mut buf = vec![0u8; <docset::DocSet<128> as FixedWidth>::WIDTH];
        s.write_bytes(&mut buf);
        let back = <docset::DocSet<128> as FixedWidth>::read_bytes(&buf);
        assert_eq!(s, back);
    }

    #[test]
    fn u64_round_trips() {
        let mut buf = vec![0u8; u64::WIDTH];
        42u64.write_bytes(&mut buf);
        assert_eq!(u64::read_bytes(&buf), 42);
    }

    #[test]
    fn i32_round_trips_negative_values() {
        let mut buf = vec![0u8; i32::WIDTH];
        (-7i32).write_bytes(&mut buf);
        assert_eq!(i32::read_bytes(&buf), -7);
    }
}
