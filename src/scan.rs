//! Bit-scan primitives: trailing/leading zero counts and population count.
//!
//! Three strategies implement [`BitScan`] and must agree on every input:
//!
//! - [`Intrinsic`] uses the integer intrinsics (`TZCNT`, `LZCNT`, `POPCNT`
//!   where the target has them).
//! - [`Lookup`] walks the word a byte at a time through 256-entry tables.
//! - [`BruteForce`] tests one bit at a time and serves as the reference.
//!
//! [`Native`] is the strategy the rest of the crate uses. It is picked at
//! compile time with the `scan-lookup` and `scan-brute-force` features.

use crate::word::Word;

/// A bit-scan strategy.
///
/// Implementors provide the two nonzero counts and popcount. The total
/// variants and the bit-scan aliases are derived from them.
pub trait BitScan {
    /// Index of the lowest set bit.
    ///
    /// `x` must be nonzero. This is checked in debug builds only.
    fn count_trailing_zeros_nonzero<W: Word>(x: W) -> u32;

    /// Number of zero bits above the highest set bit.
    ///
    /// `x` must be nonzero. This is checked in debug builds only.
    fn count_leading_zeros_nonzero<W: Word>(x: W) -> u32;

    /// Number of set bits.
    fn population_count<W: Word>(x: W) -> u32;

    /// Like [`count_trailing_zeros_nonzero`], but returns `W::BITS` for zero.
    ///
    /// [`count_trailing_zeros_nonzero`]: BitScan::count_trailing_zeros_nonzero
    #[inline]
    fn count_trailing_zeros<W: Word>(x: W) -> u32 {
        if x == W::ZERO {
            W::BITS
        } else {
            Self::count_trailing_zeros_nonzero(x)
        }
    }

    /// Like [`count_leading_zeros_nonzero`], but returns `W::BITS` for zero.
    ///
    /// [`count_leading_zeros_nonzero`]: BitScan::count_leading_zeros_nonzero
    #[inline]
    fn count_leading_zeros<W: Word>(x: W) -> u32 {
        if x == W::ZERO {
            W::BITS
        } else {
            Self::count_leading_zeros_nonzero(x)
        }
    }

    /// Index of the lowest set bit. `x` must be nonzero.
    #[inline]
    fn bit_scan_forward<W: Word>(x: W) -> u32 {
        Self::count_trailing_zeros_nonzero(x)
    }

    /// Index of the highest set bit. `x` must be nonzero.
    #[inline]
    fn bit_scan_reverse<W: Word>(x: W) -> u32 {
        W::BITS - 1 - Self::count_leading_zeros_nonzero(x)
    }
}

/// Integer intrinsics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intrinsic;

impl BitScan for Intrinsic {
    #[inline(always)]
    fn count_trailing_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        x.intrinsic_trailing_zeros()
    }

    #[inline(always)]
    fn count_leading_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        x.intrinsic_leading_zeros()
    }

    #[inline(always)]
    fn population_count<W: Word>(x: W) -> u32 {
        x.intrinsic_count_ones()
    }
}

const fn byte_trailing_zeros_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[0] = 8;
    let mut byte = 1;
    while byte < 256 {
        let mut tz = 0;
        while byte & (1 << tz) == 0 {
            tz += 1;
        }
        table[byte] = tz as u8;
        byte += 1;
    }
    table
}

const fn byte_leading_zeros_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[0] = 8;
    let mut byte = 1;
    while byte < 256 {
        let mut lz = 0;
        while byte & (0x80 >> lz) == 0 {
            lz += 1;
        }
        table[byte] = lz as u8;
        byte += 1;
    }
    table
}

const fn byte_popcount_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut byte = 1;
    while byte < 256 {
        // popcount(b) = popcount(b / 2) + lowest bit
        table[byte] = table[byte >> 1] + (byte & 1) as u8;
        byte += 1;
    }
    table
}

static TRAILING_ZEROS: [u8; 256] = byte_trailing_zeros_table();
static LEADING_ZEROS: [u8; 256] = byte_leading_zeros_table();
static POPCOUNT: [u8; 256] = byte_popcount_table();

/// Byte-at-a-time table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookup;

impl BitScan for Lookup {
    #[inline]
    fn count_trailing_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        let bytes = W::BITS / 8;
        let mut idx = 0;
        while idx < bytes {
            let byte = x.byte(idx);
            if byte != 0 {
                return idx * 8 + TRAILING_ZEROS[byte as usize] as u32;
            }
            idx += 1;
        }
        W::BITS
    }

    #[inline]
    fn count_leading_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        let bytes = W::BITS / 8;
        let mut skipped = 0;
        while skipped < bytes {
            let byte = x.byte(bytes - 1 - skipped);
            if byte != 0 {
                return skipped * 8 + LEADING_ZEROS[byte as usize] as u32;
            }
            skipped += 1;
        }
        W::BITS
    }

    #[inline]
    fn population_count<W: Word>(x: W) -> u32 {
        (0..W::BITS / 8)
            .map(|idx| POPCOUNT[x.byte(idx) as usize] as u32)
            .sum()
    }
}

/// Bit-by-bit loops. Slow and obviously correct.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BitScan for BruteForce {
    fn count_trailing_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        (0..W::BITS).find(|&idx| x.test(idx)).unwrap_or(W::BITS)
    }

    fn count_leading_zeros_nonzero<W: Word>(x: W) -> u32 {
        debug_assert!(x != W::ZERO, "bit scan of a zero word");
        (0..W::BITS)
            .rev()
            .find(|&idx| x.test(idx))
            .map_or(W::BITS, |idx| W::BITS - 1 - idx)
    }

    fn population_count<W: Word>(x: W) -> u32 {
        (0..W::BITS).filter(|&idx| x.test(idx)).count() as u32
    }
}

/// The strategy selected for this build.
#[cfg(feature = "scan-brute-force")]
pub type Native = BruteForce;

/// The strategy selected for this build.
#[cfg(all(feature = "scan-lookup", not(feature = "scan-brute-force")))]
pub type Native = Lookup;

/// The strategy selected for this build.
#[cfg(not(any(feature = "scan-lookup", feature = "scan-brute-force")))]
pub type Native = Intrinsic;
