//! Prefix-free codewords: a bit pattern tagged with its length.

use std::fmt;

/// Storage register for code bits.
pub type CodeBits = u32;

/// One prefix-free codeword.
///
/// Bits are ordered most-significant-first: reading `bits` from bit
/// `bit_len - 1` down to bit 0 yields the code in the order it appears on
/// the wire, which is also the root-to-leaf descent order in the decode
/// trie (0 = left, 1 = right).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bit_len: u32,
    bits: CodeBits,
}

impl Code {
    /// Widest representable code.
    pub const MAX_BITS: u32 = CodeBits::BITS;

    /// Build a code from an explicit length and bit pattern.
    ///
    /// Panics if `bit_len` exceeds the storage width or `bits` has set
    /// bits above `bit_len`; both are programming errors, not inputs.
    pub fn new(bit_len: u32, bits: CodeBits) -> Self {
        assert!(bit_len <= Self::MAX_BITS, "code length {bit_len} exceeds storage width");
        if bit_len < Self::MAX_BITS {
            assert!(bits >> bit_len == 0, "code bits extend past declared length {bit_len}");
        }
        Self { bit_len, bits }
    }

    /// The empty code (zero bits). Builder recursions start here.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> u32 {
        self.bit_len
    }

    pub fn bits(&self) -> CodeBits {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Append one bit at the low end, extending the code by one.
    pub fn push(&mut self, bit: bool) {
        assert!(self.bit_len < Self::MAX_BITS, "code overflow: more than {} bits", Self::MAX_BITS);
        self.bits = (self.bits << 1) | CodeBits::from(bit);
        self.bit_len += 1;
    }

    /// Copy of this code with one more bit appended.
    pub fn with_bit(self, bit: bool) -> Self {
        let mut c = self;
        c.push(bit);
        c
    }

    /// Iterate the bits most-significant-first.
    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len).rev().map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// Whether this code's bit sequence is a proper prefix of `other`'s.
    ///
    /// Diagnostics only; the builders guarantee prefix-freedom and the hot
    /// paths never need to ask.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.bit_len >= other.bit_len {
            return false;
        }
        other.bits >> (other.bit_len - self.bit_len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code() {
        let c = Code::empty();
        assert_eq!(c.bit_len(), 0);
        assert_eq!(c.bits(), 0);
        assert!(c.is_empty());
        assert_eq!(c.to_string(), "");
    }

    #[test]
    fn test_push_orders_msb_first() {
        let mut c = Code::empty();
        c.push(true);
        c.push(false);
        c.push(true);
        assert_eq!(c.bit_len(), 3);
        assert_eq!(c.bits(), 0b101);
        assert_eq!(c.to_string(), "101");
    }

    #[test]
    fn test_with_bit_leaves_original() {
        let c = Code::new(2, 0b10);
        let d = c.with_bit(true);
        assert_eq!(c.to_string(), "10");
        assert_eq!(d.to_string(), "101");
    }

    #[test]
    fn test_iter_bits() {
        let c = Code::new(4, 0b0110);
        let bits: Vec<bool> = c.iter_bits().collect();
        assert_eq!(bits, vec![false, true, true, false]);
    }

    #[test]
    fn test_prefix_detection() {
        let a = Code::new(1, 0b0);
        let b = Code::new(3, 0b010);
        let c = Code::new(3, 0b110);
        assert!(a.is_prefix_of(&b));
        assert!(!a.is_prefix_of(&c));
        assert!(!b.is_prefix_of(&a));
        assert!(!b.is_prefix_of(&b));
    }

    #[test]
    #[should_panic]
    fn test_push_past_width_panics() {
        let mut c = Code::new(Code::MAX_BITS, CodeBits::MAX);
        c.push(false);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_stray_high_bits() {
        let _ = Code::new(2, 0b100);
    }
}
