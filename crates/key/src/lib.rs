//! # Fixed-width key
//!
//! A lexicographically ordered, fixed-byte-width string usable as a POD
//! record field in the LSM tree.
//!
//! [`FixedKey`] stores exactly `N` bytes, zero-padded on construction.
//! Comparison and hashing operate on the raw byte array, **not** on the
//! logical C-string it may represent: two keys differing only in trailing
//! zero bytes compare equal, but a non-trailing embedded zero byte is
//! significant.
//!
//! ## Example
//! ```rust
//! use key::FixedKey;
//!
//! let a: FixedKey<16> = FixedKey::new("hello").unwrap();
//! let b: FixedKey<16> = FixedKey::new("hello\0\0").unwrap();
//! assert_eq!(a, b);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Errors raised when constructing a [`FixedKey`].
#[derive(Debug, Error)]
pub enum KeyError {
    /// The input was longer than the key's fixed capacity.
    #[error("key of {input_len} bytes exceeds capacity of {capacity}")]
    TooLong {
        /// Length of the rejected input, in bytes.
        input_len: usize,
        /// Fixed capacity of the key type.
        capacity: usize,
    },
}

/// A fixed-byte-width, zero-padded key of `N` bytes.
///
/// `N` is chosen at instantiation (the word and pattern indices use
/// `FixedKey<128>`). All `N` bytes participate in `Ord`/`Eq`/`Hash` — the
/// key is compared and hashed as a raw byte array.
#[derive(Clone, Copy)]
pub struct FixedKey<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedKey<N> {
    /// Builds a key from a string, zero-padding the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TooLong`] if `s` is longer than `N` bytes.
    pub fn new(s: &str) -> Result<Self, KeyError> {
        Self::from_bytes(s.as_bytes())
    }

    /// Builds a key from raw bytes, zero-padding the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TooLong`] if `bytes` is longer than `N`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() > N {
            return Err(KeyError::TooLong {
                input_len: bytes.len(),
                capacity: N,
            });
        }
        let mut arr = [0u8; N];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Builds a key directly from an already zero-padded `N`-byte array.
    ///
    /// Used by the LSM tree when decoding a record read back off disk —
    /// any byte layout is accepted, padded or not, since the array is
    /// already exactly `N` bytes.
    #[must_use]
    pub fn from_raw(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Returns the raw `N`-byte array backing this key.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Returns the logical string value, stopping at the first NUL byte.
    ///
    /// This is a display convenience only — equality and ordering always
    /// use the full `N`-byte array, not this trimmed view.
    #[must_use]
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(N);
        String::from_utf8_lossy(&self.bytes[..end])
    }
}

impl<const N: usize> Default for FixedKey<N> {
    fn default() -> Self {
        Self { bytes: [0u8; N] }
    }
}

impl<const N: usize> PartialEq for FixedKey<N> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<const N: usize> Eq for FixedKey<N> {}

impl<const N: usize> PartialOrd for FixedKey<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for FixedKey<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl<const N: usize> Hash for FixedKey<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl<const N: usize> fmt::Debug for FixedKey<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedKey").field(&self.as_str_lossy()).finish()
    }
}

#[cfg(test)]
mod tests;
