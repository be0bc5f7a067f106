//! Bitpacked binary vectors.
//!
//! Variable-length bit vectors stored as `u64` words, with POPCNT-based
//! Hamming distance. Hard-location addresses and packed query addresses
//! both use this representation.

use rand::Rng;

/// A fixed-length binary vector packed into `u64` words.
///
/// The final word is masked so that unused high bits are always zero,
/// which keeps Hamming distances exact.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Create a zero vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0u64; Self::words_for(len)],
            len,
        }
    }

    /// Draw a uniformly random vector of `len` bits from the given RNG.
    pub fn random<R: Rng>(rng: &mut R, len: usize) -> Self {
        let mut words: Vec<u64> = (0..Self::words_for(len)).map(|_| rng.gen()).collect();
        Self::mask_last_word(&mut words, len);
        Self { words, len }
    }

    /// Pack a slice of bit values.
    ///
    /// Any nonzero byte sets the bit. Callers that require strict {0,1}
    /// content must validate before packing; the store does so on every
    /// input vector.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut v = Self::zeros(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            if bit != 0 {
                v.words[i / 64] |= 1u64 << (i % 64);
            }
        }
        v
    }

    /// Unpack into a `Vec<u8>` of 0/1 values.
    pub fn to_bits(&self) -> Vec<u8> {
        (0..self.len).map(|i| self.get_bit(i) as u8).collect()
    }

    /// Number of bits in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if a specific bit is set.
    #[inline]
    pub fn get_bit(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Set a specific bit.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }
        let word_idx = index / 64;
        let bit_idx = index % 64;
        if value {
            self.words[word_idx] |= 1u64 << bit_idx;
        } else {
            self.words[word_idx] &= !(1u64 << bit_idx);
        }
    }

    /// Hamming distance to another vector of the same length.
    ///
    /// Uses POPCNT over XORed words.
    #[inline]
    pub fn distance(&self, other: &Self) -> u32 {
        debug_assert_eq!(self.len, other.len);
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Count the number of set bits.
    #[inline]
    pub fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    fn words_for(len: usize) -> usize {
        (len + 63) / 64
    }

    fn mask_last_word(words: &mut [u64], len: usize) {
        let valid_bits_in_last_word = len % 64;
        if valid_bits_in_last_word > 0 {
            if let Some(last) = words.last_mut() {
                *last &= (1u64 << valid_bits_in_last_word) - 1;
            }
        }
    }
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitVector(len={}, popcount={})", self.len, self.popcount())
    }
}
