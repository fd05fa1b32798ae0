//! Block storage tiers.
//!
//! A tier is an array of `B` words holding the bits of a set. There is one
//! tier per block count class so the common cases compile down to the least
//! code possible:
//!
//! - [`Empty`]: `B == 0`, every operation is a constant or a no-op.
//! - [`Single`]: `B == 1`, scalar code without loops.
//! - [`Multi`]: `B >= 2`, loops over `[W; B]`.
//!
//! Tiers know nothing about the logical size of the set. Keeping the bits
//! above it cleared is the job of [`Bitset`](crate::Bitset).

use crate::scan::{BitScan, Native};
use crate::word::{Word, split_index};
use core::marker::PhantomData;

/// Returns the expected value of a completely set last block with `tail_bits`
/// significant bits. `0` means all bits of the block are significant.
#[inline(always)]
fn full_block<W: Word>(tail_bits: u32) -> W {
    if tail_bits == 0 {
        W::ONES
    } else {
        W::low_mask(tail_bits)
    }
}

/// Calls `f` with `base + offset` for every set bit of `block`, ascending.
#[inline(always)]
fn visit_block<W: Word, F: FnMut(usize)>(block: W, base: usize, f: &mut F) {
    let mut rest = block;
    while rest != W::ZERO {
        let offset = Native::bit_scan_forward(rest);
        f(base + offset as usize);
        rest ^= W::bit(offset);
    }
}

/// Calls `f` with `base + offset` for every set bit of `block`, descending.
#[inline(always)]
fn reverse_visit_block<W: Word, F: FnMut(usize)>(block: W, base: usize, f: &mut F) {
    let mut rest = block;
    while rest != W::ZERO {
        let offset = Native::bit_scan_reverse(rest);
        f(base + offset as usize);
        rest ^= W::bit(offset);
    }
}

/// The operations every storage tier provides.
///
/// Bit indices given to a tier are relative to its full capacity
/// ([`CAPACITY`](BlockStorage::CAPACITY) bits).
pub trait BlockStorage: Copy + Default {
    /// The block type.
    type Word: Word;

    /// Number of blocks.
    const BLOCKS: usize;

    /// Number of bits the blocks hold.
    const CAPACITY: usize = Self::BLOCKS * <Self::Word as Word>::BITS as usize;

    /// Storage with every block zero.
    const ZEROED: Self;

    /// All blocks, lowest bits first.
    fn blocks(&self) -> &[Self::Word];

    /// All blocks, mutable.
    fn blocks_mut(&mut self) -> &mut [Self::Word];

    /// The block containing bit `n`.
    ///
    /// # Panics
    /// Panics if `n >= CAPACITY`.
    fn block_at(&self, n: usize) -> Self::Word;

    /// The block containing bit `n`, mutable.
    ///
    /// # Panics
    /// Panics if `n >= CAPACITY`.
    fn block_at_mut(&mut self, n: usize) -> &mut Self::Word;

    /// The last block, or `None` for the empty tier.
    fn block_back(&self) -> Option<Self::Word>;

    /// The last block, mutable.
    fn block_back_mut(&mut self) -> Option<&mut Self::Word>;

    /// Sets every bit, including the ones above the logical size.
    fn set_all(&mut self);

    /// Clears every bit.
    fn reset_all(&mut self);

    /// Inverts every bit, including the ones above the logical size.
    fn flip_all(&mut self);

    /// `self &= other`
    fn and_with(&mut self, other: &Self);

    /// `self |= other`
    fn or_with(&mut self, other: &Self);

    /// `self ^= other`
    fn xor_with(&mut self, other: &Self);

    /// `self &= !other`
    fn subtract(&mut self, other: &Self);

    /// Moves every bit `n` positions towards higher indices.
    ///
    /// `n` must be below `CAPACITY`.
    fn shift_left(&mut self, n: usize);

    /// Moves every bit `n` positions towards lower indices.
    ///
    /// `n` must be below `CAPACITY`.
    fn shift_right(&mut self, n: usize);

    /// Block-wise equality.
    fn equal(&self, other: &Self) -> bool;

    /// Colexicographic less-than: the highest differing block decides.
    fn less(&self, other: &Self) -> bool;

    /// Returns `true` if both share at least one set bit.
    fn intersects(&self, other: &Self) -> bool;

    /// Returns `true` if every bit set in `self` is set in `other`.
    fn is_subset_of(&self, other: &Self) -> bool;

    /// Returns `true` if all significant bits are set.
    ///
    /// `tail_bits` is the number of significant bits in the last block, with
    /// `0` meaning the whole block.
    fn all(&self, tail_bits: u32) -> bool;

    /// Returns `true` if any bit is set.
    fn any(&self) -> bool;

    /// Returns `true` if no bit is set.
    #[inline]
    fn none(&self) -> bool {
        !self.any()
    }

    /// Number of set bits.
    fn count(&self) -> usize;

    /// Calls `f` with the index of every set bit in ascending order.
    fn for_each_set_bit<F: FnMut(usize)>(&self, f: F);

    /// Calls `f` with the index of every set bit in descending order.
    fn reverse_for_each_set_bit<F: FnMut(usize)>(&self, f: F);
}

/// Storage without any block, for sets of size zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Empty<W: Word>(PhantomData<W>);

impl<W: Word> BlockStorage for Empty<W> {
    type Word = W;
    const BLOCKS: usize = 0;
    const ZEROED: Self = Empty(PhantomData);

    #[inline]
    fn blocks(&self) -> &[W] {
        &[]
    }

    #[inline]
    fn blocks_mut(&mut self) -> &mut [W] {
        &mut []
    }

    fn block_at(&self, n: usize) -> W {
        panic!("Bit index {n} out of bounds")
    }

    fn block_at_mut(&mut self, n: usize) -> &mut W {
        panic!("Bit index {n} out of bounds")
    }

    #[inline]
    fn block_back(&self) -> Option<W> {
        None
    }

    #[inline]
    fn block_back_mut(&mut self) -> Option<&mut W> {
        None
    }

    #[inline]
    fn set_all(&mut self) {}

    #[inline]
    fn reset_all(&mut self) {}

    #[inline]
    fn flip_all(&mut self) {}

    #[inline]
    fn and_with(&mut self, _other: &Self) {}

    #[inline]
    fn or_with(&mut self, _other: &Self) {}

    #[inline]
    fn xor_with(&mut self, _other: &Self) {}

    #[inline]
    fn subtract(&mut self, _other: &Self) {}

    #[inline]
    fn shift_left(&mut self, _n: usize) {}

    #[inline]
    fn shift_right(&mut self, _n: usize) {}

    #[inline]
    fn equal(&self, _other: &Self) -> bool {
        true
    }

    #[inline]
    fn less(&self, _other: &Self) -> bool {
        false
    }

    #[inline]
    fn intersects(&self, _other: &Self) -> bool {
        false
    }

    #[inline]
    fn is_subset_of(&self, _other: &Self) -> bool {
        true
    }

    #[inline]
    fn all(&self, _tail_bits: u32) -> bool {
        true
    }

    #[inline]
    fn any(&self) -> bool {
        false
    }

    #[inline]
    fn count(&self) -> usize {
        0
    }

    #[inline]
    fn for_each_set_bit<F: FnMut(usize)>(&self, _f: F) {}

    #[inline]
    fn reverse_for_each_set_bit<F: FnMut(usize)>(&self, _f: F) {}
}

/// Storage in a single block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Single<W: Word>(W);

impl<W: Word> BlockStorage for Single<W> {
    type Word = W;
    const BLOCKS: usize = 1;
    const ZEROED: Self = Single(W::ZERO);

    #[inline]
    fn blocks(&self) -> &[W] {
        core::slice::from_ref(&self.0)
    }

    #[inline]
    fn blocks_mut(&mut self) -> &mut [W] {
        core::slice::from_mut(&mut self.0)
    }

    #[inline]
    fn block_at(&self, n: usize) -> W {
        assert!(n < Self::CAPACITY, "Bit index {n} out of bounds");
        self.0
    }

    #[inline]
    fn block_at_mut(&mut self, n: usize) -> &mut W {
        assert!(n < Self::CAPACITY, "Bit index {n} out of bounds");
        &mut self.0
    }

    #[inline]
    fn block_back(&self) -> Option<W> {
        Some(self.0)
    }

    #[inline]
    fn block_back_mut(&mut self) -> Option<&mut W> {
        Some(&mut self.0)
    }

    #[inline]
    fn set_all(&mut self) {
        self.0 = W::ONES;
    }

    #[inline]
    fn reset_all(&mut self) {
        self.0 = W::ZERO;
    }

    #[inline]
    fn flip_all(&mut self) {
        self.0 = !self.0;
    }

    #[inline]
    fn and_with(&mut self, other: &Self) {
        self.0 &= other.0;
    }

    #[inline]
    fn or_with(&mut self, other: &Self) {
        self.0 |= other.0;
    }

    #[inline]
    fn xor_with(&mut self, other: &Self) {
        self.0 ^= other.0;
    }

    #[inline]
    fn subtract(&mut self, other: &Self) {
        self.0 &= !other.0;
    }

    #[inline]
    fn shift_left(&mut self, n: usize) {
        debug_assert!(n < Self::CAPACITY, "Shift by {n} out of range");
        self.0 <<= n as u32;
    }

    #[inline]
    fn shift_right(&mut self, n: usize) {
        debug_assert!(n < Self::CAPACITY, "Shift by {n} out of range");
        self.0 >>= n as u32;
    }

    #[inline]
    fn equal(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    #[inline]
    fn less(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != W::ZERO
    }

    #[inline]
    fn is_subset_of(&self, other: &Self) -> bool {
        self.0 & !other.0 == W::ZERO
    }

    #[inline]
    fn all(&self, tail_bits: u32) -> bool {
        self.0 == full_block(tail_bits)
    }

    #[inline]
    fn any(&self) -> bool {
        self.0 != W::ZERO
    }

    #[inline]
    fn count(&self) -> usize {
        Native::population_count(self.0) as usize
    }

    #[inline]
    fn for_each_set_bit<F: FnMut(usize)>(&self, mut f: F) {
        visit_block(self.0, 0, &mut f);
    }

    #[inline]
    fn reverse_for_each_set_bit<F: FnMut(usize)>(&self, mut f: F) {
        reverse_visit_block(self.0, 0, &mut f);
    }
}

/// Storage in `B >= 2` blocks.
///
/// Instantiating it with fewer blocks fails to compile; use [`Single`] or
/// [`Empty`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multi<W: Word, const B: usize>([W; B]);

impl<W: Word, const B: usize> Default for Multi<W, B> {
    fn default() -> Self {
        Self::ZEROED
    }
}

impl<W: Word, const B: usize> BlockStorage for Multi<W, B> {
    type Word = W;
    const BLOCKS: usize = {
        assert!(B >= 2, "Multi storage needs at least two blocks.");
        B
    };
    const ZEROED: Self = Multi([W::ZERO; B]);

    #[inline]
    fn blocks(&self) -> &[W] {
        &self.0
    }

    #[inline]
    fn blocks_mut(&mut self) -> &mut [W] {
        &mut self.0
    }

    #[inline]
    fn block_at(&self, n: usize) -> W {
        assert!(n < Self::CAPACITY, "Bit index {n} out of bounds");
        self.0[split_index::<W>(n).0]
    }

    #[inline]
    fn block_at_mut(&mut self, n: usize) -> &mut W {
        assert!(n < Self::CAPACITY, "Bit index {n} out of bounds");
        &mut self.0[split_index::<W>(n).0]
    }

    #[inline]
    fn block_back(&self) -> Option<W> {
        self.0.last().copied()
    }

    #[inline]
    fn block_back_mut(&mut self) -> Option<&mut W> {
        self.0.last_mut()
    }

    #[inline]
    fn set_all(&mut self) {
        self.0.fill(W::ONES);
    }

    #[inline]
    fn reset_all(&mut self) {
        self.0.fill(W::ZERO);
    }

    #[inline]
    fn flip_all(&mut self) {
        for block in &mut self.0 {
            *block = !*block;
        }
    }

    #[inline]
    fn and_with(&mut self, other: &Self) {
        for (block, other) in self.0.iter_mut().zip(&other.0) {
            *block &= *other;
        }
    }

    #[inline]
    fn or_with(&mut self, other: &Self) {
        for (block, other) in self.0.iter_mut().zip(&other.0) {
            *block |= *other;
        }
    }

    #[inline]
    fn xor_with(&mut self, other: &Self) {
        for (block, other) in self.0.iter_mut().zip(&other.0) {
            *block ^= *other;
        }
    }

    #[inline]
    fn subtract(&mut self, other: &Self) {
        for (block, other) in self.0.iter_mut().zip(&other.0) {
            *block &= !*other;
        }
    }

    fn shift_left(&mut self, n: usize) {
        debug_assert!(n < Self::CAPACITY, "Shift by {n} out of range");
        let (block_shift, bit_shift) = split_index::<W>(n);

        if block_shift > 0 {
            self.0.copy_within(..B - block_shift, block_shift);
            self.0[..block_shift].fill(W::ZERO);
        }

        // blocks below `block_shift` are zero now, nothing to carry out of them
        if bit_shift > 0 {
            let carry_shift = W::BITS - bit_shift;
            for i in (block_shift + 1..B).rev() {
                self.0[i] = (self.0[i] << bit_shift) | (self.0[i - 1] >> carry_shift);
            }
            self.0[block_shift] <<= bit_shift;
        }
    }

    fn shift_right(&mut self, n: usize) {
        debug_assert!(n < Self::CAPACITY, "Shift by {n} out of range");
        let (block_shift, bit_shift) = split_index::<W>(n);

        if block_shift > 0 {
            self.0.copy_within(block_shift.., 0);
            self.0[B - block_shift..].fill(W::ZERO);
        }

        if bit_shift > 0 {
            let carry_shift = W::BITS - bit_shift;
            let live = B - block_shift;
            for i in 0..live - 1 {
                self.0[i] = (self.0[i] >> bit_shift) | (self.0[i + 1] << carry_shift);
            }
            self.0[live - 1] >>= bit_shift;
        }
    }

    #[inline]
    fn equal(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn less(&self, other: &Self) -> bool {
        for (block, other) in self.0.iter().rev().zip(other.0.iter().rev()) {
            if block != other {
                return block < other;
            }
        }
        false
    }

    #[inline]
    fn intersects(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .any(|(&block, &other)| block & other != W::ZERO)
    }

    #[inline]
    fn is_subset_of(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(&block, &other)| block & !other == W::ZERO)
    }

    fn all(&self, tail_bits: u32) -> bool {
        match self.0.split_last() {
            Some((&last, rest)) => {
                rest.iter().all(|&block| block == W::ONES) && last == full_block(tail_bits)
            }
            None => true,
        }
    }

    #[inline]
    fn any(&self) -> bool {
        self.0.iter().any(|&block| block != W::ZERO)
    }

    #[inline]
    fn count(&self) -> usize {
        self.0
            .iter()
            .map(|&block| Native::population_count(block) as usize)
            .sum()
    }

    fn for_each_set_bit<F: FnMut(usize)>(&self, mut f: F) {
        let bits = W::BITS as usize;
        for (idx, &block) in self.0.iter().enumerate() {
            visit_block(block, idx * bits, &mut f);
        }
    }

    fn reverse_for_each_set_bit<F: FnMut(usize)>(&self, mut f: F) {
        let bits = W::BITS as usize;
        for (idx, &block) in self.0.iter().enumerate().rev() {
            reverse_visit_block(block, idx * bits, &mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn set_bits<S: BlockStorage>(storage: &S) -> Vec<usize> {
        let mut out = Vec::new();
        storage.for_each_set_bit(|idx| out.push(idx));
        out
    }

    fn with_bits<S: BlockStorage>(bits: &[usize]) -> S {
        let mut storage = S::ZEROED;
        for &idx in bits {
            let (_, offset) = split_index::<S::Word>(idx);
            *storage.block_at_mut(idx) |= <S::Word as Word>::bit(offset);
        }
        storage
    }

    #[test]
    fn test_empty_tier_is_constant() {
        let mut a = Empty::<u64>::ZEROED;
        a.set_all();
        a.flip_all();
        a.shift_left(0);
        assert!(a.blocks().is_empty());
        assert!(a.none());
        assert!(a.all(0));
        assert_eq!(a.count(), 0);
        assert_eq!(a.block_back(), None);
        assert!(a.equal(&Empty::default()));
        assert!(!a.less(&Empty::default()));
        assert!(set_bits(&a).is_empty());
    }

    #[test]
    #[should_panic(expected = "Bit index 0 out of bounds")]
    fn test_empty_tier_block_at() {
        let _ = Empty::<u8>::ZEROED.block_at(0);
    }

    #[test]
    fn test_single_tier() {
        let a: Single<u8> = with_bits(&[0, 3, 7]);
        assert_eq!(a.blocks(), &[0b1000_1001]);
        assert_eq!(a.count(), 3);
        assert_eq!(set_bits(&a), [0, 3, 7]);

        let mut rev = Vec::new();
        a.reverse_for_each_set_bit(|idx| rev.push(idx));
        assert_eq!(rev, [7, 3, 0]);

        let mut shifted = a;
        shifted.shift_left(1);
        assert_eq!(shifted.blocks(), &[0b0001_0010]);
        shifted.shift_right(4);
        assert_eq!(shifted.blocks(), &[0b0000_0001]);

        let b: Single<u8> = with_bits(&[3]);
        assert!(b.is_subset_of(&a));
        assert!(!a.is_subset_of(&b));
        assert!(a.intersects(&b));
        assert!(b.less(&a));

        let mut c = a;
        c.subtract(&b);
        assert_eq!(set_bits(&c), [0, 7]);
    }

    #[test]
    fn test_single_tier_all() {
        let mut a = Single::<u16>::ZEROED;
        *a.block_at_mut(0) = 0b11_1111;
        assert!(a.all(6));
        assert!(!a.all(7));
        assert!(!a.all(0));
        a.set_all();
        assert!(a.all(0));
    }

    #[test]
    fn test_multi_tier_shift_left_across_blocks() {
        let mut a: Multi<u8, 3> = with_bits(&[0, 7, 9]);
        a.shift_left(10);
        assert_eq!(set_bits(&a), [10, 17, 19]);

        let mut b: Multi<u8, 3> = with_bits(&[0, 7, 9]);
        b.shift_left(16);
        assert_eq!(set_bits(&b), [16, 23]);

        let mut c: Multi<u8, 3> = with_bits(&[0, 7, 9]);
        c.shift_left(1);
        assert_eq!(set_bits(&c), [1, 8, 10]);
    }

    #[test]
    fn test_multi_tier_shift_right_across_blocks() {
        let mut a: Multi<u8, 3> = with_bits(&[8, 15, 23]);
        a.shift_right(9);
        assert_eq!(set_bits(&a), [6, 14]);

        let mut b: Multi<u8, 3> = with_bits(&[8, 15, 23]);
        b.shift_right(16);
        assert_eq!(set_bits(&b), [7]);

        let mut c: Multi<u8, 3> = with_bits(&[0, 8, 15, 23]);
        c.shift_right(1);
        assert_eq!(set_bits(&c), [7, 14, 22]);
    }

    #[test]
    fn test_multi_tier_colexicographic_less() {
        // lexicographic order on the block array would rank these the other way round
        let low_heavy: Multi<u8, 2> = with_bits(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let high_light: Multi<u8, 2> = with_bits(&[8]);
        assert!(low_heavy.less(&high_light));
        assert!(!high_light.less(&low_heavy));
        assert!(!low_heavy.less(&low_heavy));
    }

    #[test]
    fn test_multi_tier_all() {
        let mut a = Multi::<u64, 4>::ZEROED;
        a.set_all();
        assert!(a.all(0));
        assert!(!a.all(8));

        *a.block_back_mut().unwrap() = u64::low_mask(8);
        assert!(a.all(8));
        assert!(!a.all(0));
    }

    #[test]
    fn test_multi_tier_block_at() {
        let a: Multi<u64, 4> = with_bits(&[0, 64, 128, 199]);
        assert_eq!(a.block_at(128), 1);
        assert_eq!(a.block_at(130), 1);
        assert_eq!(a.block_at(199), 1 << 7);
        assert_eq!(a.count(), 4);

        let mut rev = Vec::new();
        a.reverse_for_each_set_bit(|idx| rev.push(idx));
        assert_eq!(rev, [199, 128, 64, 0]);
    }

    #[test]
    #[should_panic(expected = "Bit index 256 out of bounds")]
    fn test_multi_tier_block_at_out_of_bounds() {
        let _ = Multi::<u64, 4>::ZEROED.block_at(256);
    }
}
