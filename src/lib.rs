//! Fixed-size bitsets over tiered block storage, written in pure Rust.
//! `no_std`, no heap / `alloc`, no `unsafe`, just `core`.
//!
//! [`Bitset`] is the main struct in this library. It stores `N` bits in a
//! block storage tier picked by the number of words the bits need, so a set
//! that fits one machine word compiles down to plain scalar operations while
//! larger sets loop over a fixed array of words.
//!
//! # Examples
//! ```
//! use tiered_bitset::{LargeBitset, SmallBitset, block_count};
//!
//! let mut small = SmallBitset::<10>::new();
//! assert_eq!(small.count(), 0);
//! assert!(!small.test(3));
//! small.set(3);
//! assert!(small.test(3));
//! assert_eq!(small.count(), 1);
//!
//! const BITS: usize = 200;
//! let large = LargeBitset::<BITS, { block_count(BITS) }>::from([0, 64, 128, 199]);
//! assert_eq!(large.iter().rev().next(), Some(199));
//! ```
//!
//! # Storage tiers
//!
//! | Blocks | Storage              | Alias                          |
//! |--------|----------------------|--------------------------------|
//! | 0      | [`Empty<W>`]         | [`EmptyBitset<W>`]             |
//! | 1      | [`Single<W>`]        | [`SmallBitset<N, W>`]          |
//! | `B>=2` | [`Multi<W, B>`]      | [`LargeBitset<N, B, W>`]       |
//!
//! `W` is any of `u8`, `u16`, `u32`, `u64` (the default) and `u128`. The block
//! count has to match `N`; a mismatch is a compile error.
//!
//! # Features
//!
//! - `#![no_std]` compatible
//! - No heap allocations (stack-only)
//! - Const-generic API: `Bitset<const N, S>`
//! - Set-bit iteration in both directions that jumps from one set bit to the
//!   next: `iter()`, `iter().rev()`, `cursor()`, `for_each_set_bit()`
//! - Support for bitwise ops:
//!   - `&`, `|`, `^`, `-`, `!`
//!   - `<<`, `>>`
//!   - `&=`, `|=`, `^=`, `-=`, `<<=`, `>>=`
//! - Set relations: `is_subset_of`, `is_superset_of`, `intersects`, ...
//! - Colexicographic `Ord`: sets compare like the numbers their bits spell
//! - Range operations: `set_range`, `reset_range`
//! - Rotation support: `rotate_left`, `rotate_right`
//! - Binary text form via `Display` / `FromStr`
//!
//! # Cargo features
//!
//! Bit scanning goes through [`scan::Native`]. By default it uses the integer
//! intrinsics. `scan-lookup` switches to byte lookup tables for targets
//! without fast bit-scan instructions and `scan-brute-force` to the bit-by-bit
//! reference loops.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

mod bitset;
mod blocks;
mod error;
mod iter;
pub mod scan;
mod word;

pub use bitset::Bitset;
pub use blocks::{BlockStorage, Empty, Multi, Single};
pub use error::ParseBitsetError;
pub use iter::{Cursor, Iter};
pub use word::{Word, block_count, block_count_for};

/// A bitset of size zero.
pub type EmptyBitset<W = u64> = Bitset<0, Empty<W>>;

/// A bitset of `1..=W::BITS` bits, stored in a single word.
pub type SmallBitset<const N: usize, W = u64> = Bitset<N, Single<W>>;

/// A bitset stored in `B >= 2` words. `B` must be `ceil(N / W::BITS)`, see
/// [`block_count`] and [`block_count_for`].
pub type LargeBitset<const N: usize, const B: usize, W = u64> = Bitset<N, Multi<W, B>>;
