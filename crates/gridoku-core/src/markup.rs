//! Fixed-width bit-set over the values `1..=width`.
//!
//! Bit `i` represents value `i + 1`. The same type serves as a cell's
//! candidate set and as a constraint's occupied-value set, so constraint
//! algebra is plain bit arithmetic.

/// Bit-set over integer values `1..=width` (width at most 16 in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkUp {
    width: u8,
    bits: u32,
}

impl MarkUp {
    /// Empty set over `1..=width`.
    pub fn empty(width: u8) -> Self {
        Self { width, bits: 0 }
    }

    /// Full set over `1..=width`.
    pub fn all_set(width: u8) -> Self {
        Self {
            width,
            bits: (1u32 << width) - 1,
        }
    }

    /// Width of the value domain.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Mark `value` as present. Precondition: `1 <= value <= width`.
    pub fn set(&mut self, value: u8) {
        debug_assert!(value >= 1 && value <= self.width, "value {} out of range", value);
        self.bits |= 1 << (value - 1);
    }

    /// Mark `value` as absent. Precondition: `1 <= value <= width`.
    pub fn unset(&mut self, value: u8) {
        debug_assert!(value >= 1 && value <= self.width, "value {} out of range", value);
        self.bits &= !(1 << (value - 1));
    }

    /// Is `value` present? Precondition: `1 <= value <= width`.
    pub fn get(&self, value: u8) -> bool {
        debug_assert!(value >= 1 && value <= self.width, "value {} out of range", value);
        self.bits & (1 << (value - 1)) != 0
    }

    /// Number of present values.
    pub fn cardinality(&self) -> u32 {
        self.bits.count_ones()
    }

    /// True if no value is present.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Union, as a new set.
    pub fn or(&self, other: &MarkUp) -> MarkUp {
        debug_assert_eq!(self.width, other.width);
        MarkUp {
            width: self.width,
            bits: self.bits | other.bits,
        }
    }

    /// Intersection, as a new set.
    pub fn and(&self, other: &MarkUp) -> MarkUp {
        debug_assert_eq!(self.width, other.width);
        MarkUp {
            width: self.width,
            bits: self.bits & other.bits,
        }
    }

    /// Symmetric difference, as a new set.
    pub fn xor(&self, other: &MarkUp) -> MarkUp {
        debug_assert_eq!(self.width, other.width);
        MarkUp {
            width: self.width,
            bits: self.bits ^ other.bits,
        }
    }

    /// Complement over `1..=width`, as a new set.
    pub fn complement(&self) -> MarkUp {
        MarkUp {
            width: self.width,
            bits: !self.bits & ((1u32 << self.width) - 1),
        }
    }

    /// Smallest present value, if any.
    pub fn lowest(&self) -> Option<u8> {
        if self.bits == 0 {
            None
        } else {
            Some(self.bits.trailing_zeros() as u8 + 1)
        }
    }

    /// Ascending iterator over present values.
    pub fn iter(&self) -> MarkUpIter {
        MarkUpIter { bits: self.bits }
    }
}

/// Ascending value iterator, see [`MarkUp::iter`].
pub struct MarkUpIter {
    bits: u32,
}

impl Iterator for MarkUpIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        let value = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Some(value)
    }
}

impl IntoIterator for &MarkUp {
    type Item = u8;
    type IntoIter = MarkUpIter;

    fn into_iter(self) -> MarkUpIter {
        self.iter()
    }
}
