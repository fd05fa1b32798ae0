use crate::blocks::BlockStorage;
use crate::error::ParseBitsetError;
use crate::iter::{Cursor, Iter, next_set_in, prev_set_in};
use crate::word::{Word, block_count_for, split_index};
use core::cmp::Ordering;
use core::fmt::{Binary, Debug, Display, Formatter, Write};
use core::hash::{Hash, Hasher};
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Range, Shl, ShlAssign,
    Shr, ShrAssign, Sub, SubAssign,
};
use core::str::FromStr;

/// A set of `N` bits stored in the block tier `S`.
///
/// `S` must hold exactly `ceil(N / S::Word::BITS)` blocks, which is checked
/// when the type is first constructed. The aliases [`SmallBitset`],
/// [`LargeBitset`] and [`EmptyBitset`] pick the tier for you.
///
/// Bits at positions `>= N` inside the last block are always zero, so raw
/// block access, counting, hashing and comparison never see phantom bits.
///
/// Sets of different sizes are different types and cannot be mixed:
/// ```compile_fail
/// use tiered_bitset::SmallBitset;
///
/// let a = SmallBitset::<8>::new();
/// let b = SmallBitset::<9>::new();
/// let _ = a == b;
/// ```
///
/// A storage that does not fit `N` is rejected at compile time:
/// ```compile_fail
/// use tiered_bitset::LargeBitset;
///
/// let _ = LargeBitset::<200, 3>::new();
/// ```
///
/// [`SmallBitset`]: crate::SmallBitset
/// [`LargeBitset`]: crate::LargeBitset
/// [`EmptyBitset`]: crate::EmptyBitset
#[derive(Clone, Copy)]
pub struct Bitset<const N: usize, S: BlockStorage> {
    blocks: S,
}

impl<const N: usize, S: BlockStorage> Bitset<N, S> {
    /// Number of bits in the set.
    pub const SIZE: usize = N;

    /// Significant bits in the last block, `0` if the last block is full.
    const TAIL_BITS: u32 = (N % <S::Word as Word>::BITS as usize) as u32;

    const VALID: () = assert!(
        S::BLOCKS == block_count_for::<S::Word>(N),
        "Block storage must hold exactly ceil(N / word width) blocks."
    );

    /// Creates a new bitset with all bits unset.
    ///
    /// Callable in const contexts.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// const EMPTY: SmallBitset<16> = SmallBitset::new();
    /// assert_eq!(EMPTY.count(), 0);
    /// ```
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self { blocks: S::ZEROED }
    }

    /// Creates a new bitset with all bits set.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let bs = SmallBitset::<10>::full();
    /// assert_eq!(bs.count(), 10);
    /// assert!(bs.all());
    /// ```
    #[inline]
    pub fn full() -> Self {
        let mut bs = Self::new();
        bs.set_all();
        bs
    }

    /// Constructs a bitset by setting only the given positions.
    ///
    /// # Panics
    /// Panics if any position is out of bounds (i.e., `>= N`).
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::LargeBitset;
    ///
    /// let bs = LargeBitset::<100, 2>::from_positions([0, 50, 99]);
    /// assert!(bs.test(50));
    /// assert!(!bs.test(51));
    /// assert_eq!(bs.count(), 3);
    /// ```
    pub fn from_positions<I: IntoIterator<Item = usize>>(positions: I) -> Self {
        let mut bs = Self::new();
        for pos in positions {
            bs.set(pos);
        }
        bs
    }

    /// Constructs a bitset from a boolean slice, where `true` means set.
    ///
    /// # Panics
    /// Panics if the slice length doesn't match `N`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let bs = SmallBitset::<4>::from_bools(&[true, false, true, false]);
    /// assert_eq!(bs.count(), 2);
    /// ```
    pub fn from_bools(bits: &[bool]) -> Self {
        assert_eq!(bits.len(), N);
        let mut bs = Self::new();
        for (pos, bit) in bits.iter().enumerate() {
            if *bit {
                bs.set(pos);
            }
        }
        bs
    }

    /// Constructs a bitset from raw blocks, lowest bits first.
    ///
    /// Bits at positions `>= N` in the last block are dropped.
    ///
    /// # Panics
    /// Panics if `blocks.len()` is not the block count of the storage.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::LargeBitset;
    ///
    /// let bs = LargeBitset::<70, 2>::from_blocks(&[1, u64::MAX]);
    /// assert_eq!(bs.count(), 7);
    /// assert_eq!(bs.as_blocks(), &[1, 0b11_1111]);
    /// ```
    pub fn from_blocks(blocks: &[S::Word]) -> Self {
        let mut bs = Self::new();
        bs.blocks.blocks_mut().copy_from_slice(blocks);
        bs.sanitize();
        bs
    }

    /// Constructs a bitset whose first block is `value`.
    ///
    /// Bits of `value` at positions `>= N` are dropped.
    #[deprecated(note = "use `from_blocks` or `from_positions` instead")]
    pub fn from_word(value: S::Word) -> Self {
        let mut bs = Self::new();
        if let Some(first) = bs.blocks.blocks_mut().first_mut() {
            *first = value;
        }
        bs.sanitize();
        bs
    }

    /// Clears the bits of the last block that lie at positions `>= N`.
    #[inline]
    fn sanitize(&mut self) {
        if Self::TAIL_BITS == 0 {
            return;
        }
        if let Some(last) = self.blocks.block_back_mut() {
            *last &= S::Word::low_mask(Self::TAIL_BITS);
        }
    }

    /// Number of bits in the set, `N`.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    /// Sets the bit at the given position.
    ///
    /// # Panics
    /// Panics if the position is out of bounds (i.e., `>= N`).
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<8, u8>::new();
    /// assert!(!bs.test(3));
    /// bs.set(3);
    /// assert!(bs.test(3));
    /// ```
    #[inline]
    pub fn set(&mut self, pos: usize) {
        assert!(pos < N, "Bit index {pos} out of bounds");
        let (_, offset) = split_index::<S::Word>(pos);
        *self.blocks.block_at_mut(pos) |= S::Word::bit(offset);
    }

    /// Sets every bit.
    #[inline]
    pub fn set_all(&mut self) {
        self.blocks.set_all();
        self.sanitize();
    }

    /// Sets all bits in the given range.
    ///
    /// # Panics
    /// Panics if `range.end > N`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::LargeBitset;
    ///
    /// let mut bs = LargeBitset::<200, 4>::new();
    /// bs.set_range(60..130);
    /// assert!(!bs.test(59));
    /// assert!(bs.test(60));
    /// assert!(bs.test(129));
    /// assert!(!bs.test(130));
    /// assert_eq!(bs.count(), 70);
    /// ```
    pub fn set_range(&mut self, range: Range<usize>) {
        assert!(range.end <= N, "Range end {} out of bounds", range.end);
        if range.start >= range.end {
            return;
        }

        let (start_block, start_bit) = split_index::<S::Word>(range.start);
        let (end_block, end_bit) = split_index::<S::Word>(range.end - 1);
        let blocks = self.blocks.blocks_mut();

        // all within one block
        if start_block == end_block {
            blocks[start_block] |= S::Word::low_mask(end_bit - start_bit + 1) << start_bit;
            return;
        }

        blocks[start_block] |= S::Word::ONES << start_bit;
        blocks[start_block + 1..end_block].fill(S::Word::ONES);
        blocks[end_block] |= S::Word::low_mask(end_bit + 1);
    }

    /// Unsets the bit at the given position.
    ///
    /// # Panics
    /// Panics if `pos >= N`.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        assert!(pos < N, "Bit index {pos} out of bounds");
        let (_, offset) = split_index::<S::Word>(pos);
        *self.blocks.block_at_mut(pos) &= !S::Word::bit(offset);
    }

    /// Unsets every bit.
    #[inline]
    pub fn reset_all(&mut self) {
        self.blocks.reset_all();
    }

    /// Unsets all bits in the given range.
    ///
    /// # Panics
    /// Panics if `range.end > N`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<8, u8>::full();
    /// bs.reset_range(2..6);
    /// assert!(!bs.test(2));
    /// assert!(!bs.test(5));
    /// assert!(bs.test(6));
    /// ```
    pub fn reset_range(&mut self, range: Range<usize>) {
        assert!(range.end <= N, "Range end {} out of bounds", range.end);
        if range.start >= range.end {
            return;
        }

        let (start_block, start_bit) = split_index::<S::Word>(range.start);
        let (end_block, end_bit) = split_index::<S::Word>(range.end - 1);
        let blocks = self.blocks.blocks_mut();

        if start_block == end_block {
            blocks[start_block] &= !(S::Word::low_mask(end_bit - start_bit + 1) << start_bit);
            return;
        }

        blocks[start_block] &= S::Word::low_mask(start_bit);
        blocks[start_block + 1..end_block].fill(S::Word::ZERO);
        blocks[end_block] &= !S::Word::low_mask(end_bit + 1);
    }

    /// Toggles the bit at the given position.
    ///
    /// Returns the previous value of the bit (before the toggle).
    ///
    /// # Panics
    /// Panics if `pos >= N`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<8>::new();
    /// assert_eq!(bs.flip(4), false); // flipped from false to true
    /// assert_eq!(bs.flip(4), true);  // flipped from true to false
    /// ```
    #[inline]
    pub fn flip(&mut self, pos: usize) -> bool {
        assert!(pos < N, "Bit index {pos} out of bounds");
        let (_, offset) = split_index::<S::Word>(pos);
        let block = self.blocks.block_at_mut(pos);
        let bit = block.test(offset);
        *block ^= S::Word::bit(offset);
        bit
    }

    /// Inverts every bit.
    #[inline]
    pub fn flip_all(&mut self) {
        self.blocks.flip_all();
        self.sanitize();
    }

    /// Returns `true` if the bit at the given position is set.
    ///
    /// # Panics
    /// Panics if `pos >= N`.
    #[inline]
    pub fn test(&self, pos: usize) -> bool {
        assert!(pos < N, "Bit index {pos} out of bounds");
        let (_, offset) = split_index::<S::Word>(pos);
        self.blocks.block_at(pos).test(offset)
    }

    /// Returns the number of set bits.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let bs = SmallBitset::<64>::from([0, 1, 62, 63]);
    /// assert_eq!(bs.count(), 4);
    /// ```
    #[inline]
    pub fn count(&self) -> usize {
        self.blocks.count()
    }

    /// Returns `true` if all `N` bits are set. Vacuously `true` for `N == 0`.
    #[inline]
    pub fn all(&self) -> bool {
        self.blocks.all(Self::TAIL_BITS)
    }

    /// Returns `true` if at least one bit is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.blocks.any()
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn none(&self) -> bool {
        self.blocks.none()
    }

    /// Returns `true` if every bit set in `self` is also set in `other`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let small = SmallBitset::<10>::from([1, 4]);
    /// let big = SmallBitset::<10>::from([1, 4, 7]);
    /// assert!(small.is_subset_of(&big));
    /// assert!(small.is_proper_subset_of(&big));
    /// assert!(big.is_superset_of(&small));
    /// assert!(!big.is_subset_of(&small));
    /// ```
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.blocks.is_subset_of(&other.blocks)
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    #[inline]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// Returns `true` if `self` is a subset of `other` and not equal to it.
    #[inline]
    pub fn is_proper_subset_of(&self, other: &Self) -> bool {
        self.is_subset_of(other) && !self.blocks.equal(&other.blocks)
    }

    /// Returns `true` if `self` is a superset of `other` and not equal to it.
    #[inline]
    pub fn is_proper_superset_of(&self, other: &Self) -> bool {
        other.is_proper_subset_of(self)
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.blocks.intersects(&other.blocks)
    }

    /// Returns `true` if `self` and `other` share no set bit.
    #[inline]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.intersects(other)
    }

    /// Returns the index of the lowest set bit or `None` if all bits are
    /// unset.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let empty = SmallBitset::<4>::new();
    /// assert_eq!(empty.first(), None);
    ///
    /// let bs = SmallBitset::<4>::from([2, 3]);
    /// assert_eq!(bs.first(), Some(2));
    /// assert_eq!(bs.last(), Some(3));
    /// ```
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.cursor().current()
    }

    /// Returns the index of the highest set bit or `None` if all bits are
    /// unset.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        prev_set_in(self.blocks.blocks(), N)
    }

    /// Returns the lowest set bit at or after `from`, if any.
    ///
    /// `from` may be anything, positions at or past `N` yield `None`.
    #[inline]
    pub fn next_set(&self, from: usize) -> Option<usize> {
        let idx = next_set_in(self.blocks.blocks(), from, N);
        (idx < N).then_some(idx)
    }

    /// Returns the highest set bit strictly before `before`, if any.
    ///
    /// `before` is clamped to `N`.
    #[inline]
    pub fn prev_set(&self, before: usize) -> Option<usize> {
        prev_set_in(self.blocks.blocks(), before.min(N))
    }

    /// Returns an iterator over the indices of set bits, in ascending order.
    ///
    /// The iterator is double-ended: `.rev()` yields descending indices.
    /// Walking the whole set costs O(k + b) where k is the number of set bits
    /// and b is the number of blocks.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    /// use core::array::from_fn;
    ///
    /// let bs = SmallBitset::<64>::from([0, 1, 62, 63]);
    /// let mut ones = bs.iter();
    /// assert_eq!(from_fn(|_| ones.next().unwrap()), [0, 1, 62, 63]);
    /// assert_eq!(ones.next(), None);
    ///
    /// let mut reversed = bs.iter().rev();
    /// assert_eq!(from_fn(|_| reversed.next().unwrap()), [63, 62, 1, 0]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, S::Word> {
        Iter::new(self.blocks.blocks(), N)
    }

    /// Returns a cursor on the lowest set bit, or the end cursor if the set is
    /// empty.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, S::Word> {
        Cursor::front(self.blocks.blocks(), N)
    }

    /// Returns the end cursor. Moving it backwards visits the set bits from the
    /// highest one down.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, S::Word> {
        Cursor::end(self.blocks.blocks(), N)
    }

    /// Calls `f` with the index of every set bit, in ascending order.
    #[inline]
    pub fn for_each_set_bit<F: FnMut(usize)>(&self, f: F) {
        self.blocks.for_each_set_bit(f);
    }

    /// Calls `f` with the index of every set bit, in descending order.
    #[inline]
    pub fn reverse_for_each_set_bit<F: FnMut(usize)>(&self, f: F) {
        self.blocks.reverse_for_each_set_bit(f);
    }

    /// The underlying blocks, lowest bits first.
    ///
    /// Block `i` holds bits `i * W::BITS .. (i + 1) * W::BITS`, bit 0 of a
    /// block being its least significant bit.
    #[inline]
    pub fn as_blocks(&self) -> &[S::Word] {
        self.blocks.blocks()
    }

    /// The block that holds bit `pos`.
    ///
    /// # Panics
    /// Panics if `pos >= N`.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::LargeBitset;
    ///
    /// let bs = LargeBitset::<200, 4>::from([0, 64, 128, 199]);
    /// assert_eq!(bs.block_at(128), 1);
    /// assert_eq!(bs.block_at(199), 1 << 7);
    /// ```
    #[inline]
    pub fn block_at(&self, pos: usize) -> S::Word {
        assert!(pos < N, "Bit index {pos} out of bounds");
        self.blocks.block_at(pos)
    }

    /// The storage tier.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.blocks
    }

    /// Does a left shift by `n` positions, filling with unset bits. This means
    /// bits are shifted towards higher bit indices.
    ///
    /// Bits that are shifted beyond `N` are lost.
    /// If `n >= N`, the bitset is cleared.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<64>::from([0, 1, 62, 63]);
    /// bs.shift_left(2);
    /// assert_eq!(bs, SmallBitset::<64>::from([2, 3]));
    /// ```
    pub fn shift_left(&mut self, n: usize) {
        if n >= N {
            self.blocks.reset_all();
            return;
        }
        self.blocks.shift_left(n);
        self.sanitize();
    }

    /// Does a right shift by `n` positions, filling with unset bits. This means
    /// bits are shifted towards lower bit indices.
    ///
    /// Bits that are shifted below index 0 are lost.
    /// If `n >= N`, the bitset is cleared.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<4>::from([0, 2]);
    /// bs.shift_right(1);
    /// assert_eq!(bs, SmallBitset::<4>::from([1]));
    /// ```
    pub fn shift_right(&mut self, n: usize) {
        if n >= N {
            self.blocks.reset_all();
            return;
        }
        // nothing above `N - 1` to move down, no sanitize needed
        self.blocks.shift_right(n);
    }

    /// Rotates all bits in direction of higher bit indices by `n` positions.
    /// Bits shifted out are reinserted on the other side.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<4>::from([0, 3]);
    /// bs.rotate_left(1);
    /// assert_eq!(bs, SmallBitset::<4>::from([0, 1]));
    /// ```
    pub fn rotate_left(&mut self, n: usize) {
        if N == 0 || n % N == 0 {
            return;
        }
        let n = n % N;
        let mut wrapped = *self;
        wrapped.shift_right(N - n);
        self.shift_left(n);
        self.blocks.or_with(&wrapped.blocks);
    }

    /// Rotates all bits in direction of lower bit indices by `n` positions.
    /// Bits shifted out are reinserted on the other side.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let mut bs = SmallBitset::<4>::from([0, 3]);
    /// bs.rotate_right(1);
    /// assert_eq!(bs, SmallBitset::<4>::from([2, 3]));
    /// ```
    pub fn rotate_right(&mut self, n: usize) {
        if N == 0 {
            return;
        }
        self.rotate_left(N - n % N);
    }
}

impl<const N: usize, S: BlockStorage> Default for Bitset<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, S: BlockStorage> PartialEq for Bitset<N, S> {
    fn eq(&self, other: &Self) -> bool {
        self.blocks.equal(&other.blocks)
    }
}

impl<const N: usize, S: BlockStorage> Eq for Bitset<N, S> {}

impl<const N: usize, S: BlockStorage> PartialOrd for Bitset<N, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Colexicographic order: the highest block is compared first, so a set
/// compares like the unsigned number its bits spell out.
impl<const N: usize, S: BlockStorage> Ord for Bitset<N, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.blocks.equal(&other.blocks) {
            Ordering::Equal
        } else if self.blocks.less(&other.blocks) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl<const N: usize, S: BlockStorage> Hash for Bitset<N, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.blocks.blocks().hash(state);
    }
}

impl<'bitset, const N: usize, S: BlockStorage> IntoIterator for &'bitset Bitset<N, S> {
    type Item = usize;
    type IntoIter = Iter<'bitset, S::Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Constructs a bitset from an iterator over the positions to set.
///
/// # Panics
/// Panics if any position is `>= N`.
impl<const N: usize, S: BlockStorage> FromIterator<usize> for Bitset<N, S> {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_positions(iter)
    }
}

/// Constructs a bitset from a list of positions to set.
///
/// # Panics
/// Panics if any position is `>= N`.
impl<const N: usize, S: BlockStorage, const K: usize> From<[usize; K]> for Bitset<N, S> {
    fn from(positions: [usize; K]) -> Self {
        Self::from_positions(positions)
    }
}

impl<const N: usize, S: BlockStorage> Debug for Bitset<N, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        for i in 0..N {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            write!(f, "{}", if self.test(i) { '1' } else { '0' })?;
            if i % 8 == 7 && i + 1 < N {
                write!(f, " ")?;
            }
        }
        write!(f, " <- MSB")?;
        Ok(())
    }
}

/// Formats all `N` bits, most significant first. `{:#b}` prefixes `0b`.
impl<const N: usize, S: BlockStorage> Binary for Bitset<N, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        for i in (0..N).rev() {
            f.write_char(if self.test(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl<const N: usize, S: BlockStorage> Display for Bitset<N, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Binary::fmt(self, f)
    }
}

impl<const N: usize, S: BlockStorage> FromStr for Bitset<N, S> {
    type Err = ParseBitsetError;

    /// Parses a binary string, least significant bit on the right.
    ///
    /// The string may start with `0b` and may contain `_` separators. Fewer
    /// than `N` digits leave the high bits unset.
    ///
    /// # Errors
    /// Returns a [`ParseBitsetError`] if the string has no digits, contains a
    /// character other than `0`, `1` or `_`, or has more than `N` digits.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let bs: SmallBitset<8> = "0b1000_0101".parse()?;
    /// assert_eq!(bs, SmallBitset::<8>::from([0, 2, 7]));
    /// assert_eq!(bs.to_string(), "10000101");
    /// # Ok::<(), tiered_bitset::ParseBitsetError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0b").unwrap_or(s);
        let mut bs = Self::new();
        let mut idx = 0;
        for (pos, ch) in digits.char_indices().rev() {
            let bit = match ch {
                '1' => true,
                '0' => false,
                '_' => continue,
                _ => return Err(ParseBitsetError::InvalidChar { ch, pos }),
            };
            if idx >= N {
                return Err(ParseBitsetError::TooLong { capacity: N });
            }
            if bit {
                bs.set(idx);
            }
            idx += 1;
        }
        if idx == 0 {
            return Err(ParseBitsetError::Empty);
        }
        Ok(bs)
    }
}

impl<const N: usize, S: BlockStorage> BitAnd for Bitset<N, S> {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}

impl<const N: usize, S: BlockStorage> BitAndAssign for Bitset<N, S> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.blocks.and_with(&rhs.blocks);
    }
}

impl<const N: usize, S: BlockStorage> BitOr for Bitset<N, S> {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl<const N: usize, S: BlockStorage> BitOrAssign for Bitset<N, S> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.blocks.or_with(&rhs.blocks);
    }
}

impl<const N: usize, S: BlockStorage> BitXor for Bitset<N, S> {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl<const N: usize, S: BlockStorage> BitXorAssign for Bitset<N, S> {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.blocks.xor_with(&rhs.blocks);
    }
}

/// Set difference: the bits of `self` that are not set in `rhs`.
impl<const N: usize, S: BlockStorage> Sub for Bitset<N, S> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<const N: usize, S: BlockStorage> SubAssign for Bitset<N, S> {
    fn sub_assign(&mut self, rhs: Self) {
        self.blocks.subtract(&rhs.blocks);
    }
}

impl<const N: usize, S: BlockStorage> Not for Bitset<N, S> {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.flip_all();
        self
    }
}

impl<const N: usize, S: BlockStorage> Shl<usize> for Bitset<N, S> {
    type Output = Self;

    fn shl(mut self, rhs: usize) -> Self::Output {
        self.shift_left(rhs);
        self
    }
}

impl<const N: usize, S: BlockStorage> ShlAssign<usize> for Bitset<N, S> {
    fn shl_assign(&mut self, rhs: usize) {
        self.shift_left(rhs);
    }
}

impl<const N: usize, S: BlockStorage> Shr<usize> for Bitset<N, S> {
    type Output = Self;

    fn shr(mut self, rhs: usize) -> Self::Output {
        self.shift_right(rhs);
        self
    }
}

impl<const N: usize, S: BlockStorage> ShrAssign<usize> for Bitset<N, S> {
    fn shr_assign(&mut self, rhs: usize) {
        self.shift_right(rhs);
    }
}
