use core::fmt::{Binary, Debug};
use core::hash::Hash;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned machine word used as a storage block.
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and `u128`. Shift amounts passed
/// to the `Shl`/`Shr` operators must stay below [`Word::BITS`].
pub trait Word:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Binary
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + ShlAssign<u32>
    + ShrAssign<u32>
{
    /// Width of the word in bits.
    const BITS: u32;
    /// All bits unset.
    const ZERO: Self;
    /// Only bit 0 set.
    const ONE: Self;
    /// All bits set.
    const ONES: Self;

    /// Number of trailing zeros via the integer intrinsic.
    fn intrinsic_trailing_zeros(self) -> u32;

    /// Number of leading zeros via the integer intrinsic.
    fn intrinsic_leading_zeros(self) -> u32;

    /// Number of set bits via the integer intrinsic.
    fn intrinsic_count_ones(self) -> u32;

    /// Returns byte `idx` of the word, byte 0 being the least significant.
    fn byte(self, idx: u32) -> u8;

    /// Returns a word with only bit `idx` set.
    #[inline]
    fn bit(idx: u32) -> Self {
        debug_assert!(idx < Self::BITS);
        Self::ONE << idx
    }

    /// Returns `true` if bit `idx` is set.
    #[inline]
    fn test(self, idx: u32) -> bool {
        self & Self::bit(idx) != Self::ZERO
    }

    /// Returns a word with the lowest `width` bits set.
    ///
    /// `width` may be anything in `0..=BITS`.
    #[inline]
    fn low_mask(width: u32) -> Self {
        if width >= Self::BITS {
            Self::ONES
        } else {
            !(Self::ONES << width)
        }
    }
}

macro_rules! impl_word {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Word for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const ONES: Self = <$ty>::MAX;

                #[inline(always)]
                fn intrinsic_trailing_zeros(self) -> u32 {
                    self.trailing_zeros()
                }

                #[inline(always)]
                fn intrinsic_leading_zeros(self) -> u32 {
                    self.leading_zeros()
                }

                #[inline(always)]
                fn intrinsic_count_ones(self) -> u32 {
                    self.count_ones()
                }

                #[inline(always)]
                fn byte(self, idx: u32) -> u8 {
                    debug_assert!(idx < Self::BITS / 8);
                    (self >> (idx * 8)) as u8
                }
            }
        )+
    };
}

impl_word!(u8, u16, u32, u64, u128);

/// Splits a bit index into its block index and the offset inside that block.
#[inline(always)]
pub(crate) const fn split_index<W: Word>(idx: usize) -> (usize, u32) {
    let bits = W::BITS as usize;
    (idx / bits, (idx % bits) as u32)
}

/// Number of `W` blocks needed to hold `bit_count` bits.
///
/// # Examples
/// ```
/// use tiered_bitset::block_count_for;
///
/// assert_eq!(block_count_for::<u8>(9), 2);
/// assert_eq!(block_count_for::<u64>(200), 4);
/// ```
pub const fn block_count_for<W: Word>(bit_count: usize) -> usize {
    bit_count.div_ceil(W::BITS as usize)
}

/// Number of `u64` blocks needed to hold `bit_count` bits.
///
/// Meant for the block parameter of [`Multi`](crate::Multi) storage.
///
/// # Examples
/// ```
/// use tiered_bitset::block_count;
///
/// assert_eq!(block_count(64), 1);
/// assert_eq!(block_count(65), 2);
/// assert_eq!(block_count(200), 4);
/// ```
pub const fn block_count(bit_count: usize) -> usize {
    block_count_for::<u64>(bit_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_mask() {
        assert_eq!(u8::low_mask(0), 0);
        assert_eq!(u8::low_mask(3), 0b111);
        assert_eq!(u8::low_mask(8), 0xff);
        assert_eq!(u64::low_mask(63), u64::MAX >> 1);
        assert_eq!(u64::low_mask(64), u64::MAX);
        assert_eq!(u128::low_mask(100), (1u128 << 100) - 1);
    }

    #[test]
    fn test_byte() {
        let w: u32 = 0x1234_5678;
        assert_eq!(w.byte(0), 0x78);
        assert_eq!(w.byte(1), 0x56);
        assert_eq!(w.byte(3), 0x12);
        assert_eq!(u128::MAX.byte(15), 0xff);
    }

    #[test]
    fn test_bit_and_test() {
        assert_eq!(<u16 as Word>::bit(15), 0x8000);
        assert!(0b1010u8.test(1));
        assert!(!0b1010u8.test(2));
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index::<u8>(0), (0, 0));
        assert_eq!(split_index::<u8>(17), (2, 1));
        assert_eq!(split_index::<u64>(128), (2, 0));
        assert_eq!(split_index::<u64>(199), (3, 7));
    }

    #[test]
    fn test_block_count() {
        assert_eq!(block_count(0), 0);
        assert_eq!(block_count(1), 1);
        assert_eq!(block_count(128), 2);
        assert_eq!(block_count(129), 3);
        assert_eq!(block_count_for::<u8>(17), 3);
        assert_eq!(block_count_for::<u128>(129), 2);
    }
}
