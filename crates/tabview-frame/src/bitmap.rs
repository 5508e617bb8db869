#![forbid(unsafe_code)]

/// A compact bit vector used for column validity and boolean storage.
///
/// Bits are stored little-endian within each `u64` word:
/// - bit 0 is the LSB of word 0
/// - bit 63 is the MSB of word 0
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVec {
    words: Vec<u64>,
    len: usize,
    ones: usize,
}

impl BitVec {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            ones: 0,
        }
    }

    pub fn with_capacity_bits(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(64)),
            len: 0,
            ones: 0,
        }
    }

    pub fn with_len_all_true(bits: usize) -> Self {
        if bits == 0 {
            return Self::new();
        }

        let mut words = vec![u64::MAX; bits.div_ceil(64)];
        let rem = bits % 64;
        if rem != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << rem) - 1;
            }
        }

        Self {
            words,
            len: bits,
            ones: bits,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, value: bool) {
        let bit = self.len % 64;
        if bit == 0 {
            self.words.push(0);
        }

        if value {
            let word = self.len / 64;
            self.words[word] |= 1u64 << bit;
            self.ones += 1;
        }

        self.len += 1;
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "BitVec index out of bounds");
        let word = self.words[index / 64];
        ((word >> (index % 64)) & 1) == 1
    }

    pub fn count_ones(&self) -> usize {
        self.ones
    }

    pub fn count_zeros(&self) -> usize {
        self.len - self.ones
    }

    pub fn all_true(&self) -> bool {
        self.ones == self.len
    }

    /// Bytes needed to store `len` bits in a packed (Arrow-style) buffer.
    pub fn packed_size_bytes(&self) -> usize {
        self.len.div_ceil(8)
    }

    /// Build a new bit vector from the bits at `indices`, in order.
    ///
    /// Callers validate the indices; out-of-range positions trip a debug assertion.
    pub fn gather(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity_bits(indices.len());
        for &idx in indices {
            out.push(self.get(idx));
        }
        out
    }
}

impl Default for BitVec {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity_bits(iter.size_hint().0);
        for bit in iter {
            out.push(bit);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::BitVec;

    #[test]
    fn all_true_masks_the_trailing_word() {
        let bits = BitVec::with_len_all_true(70);
        assert_eq!(bits.len(), 70);
        assert_eq!(bits.count_ones(), 70);
        assert!(bits.get(69));
        assert_eq!(bits.packed_size_bytes(), 9);
    }

    #[test]
    fn gather_keeps_order_and_counts() {
        let bits: BitVec = [true, false, true, true, false].into_iter().collect();
        let picked = bits.gather(&[4, 0, 1, 3]);
        assert_eq!(picked.len(), 4);
        assert_eq!(picked.count_ones(), 2);
        assert!(!picked.get(0));
        assert!(picked.get(1));
        assert!(!picked.get(2));
        assert!(picked.get(3));
    }
}
