use crate::scan::{BitScan, Native};
use crate::word::{Word, split_index};
use core::iter::FusedIterator;

/// Index of the first set bit at or after `from`, or `len` if there is none.
pub(crate) fn next_set_in<W: Word>(blocks: &[W], from: usize, len: usize) -> usize {
    if from >= len {
        return len;
    }
    let bits = W::BITS as usize;
    let (mut block_idx, offset) = split_index::<W>(from);
    // drop the bits below `from` in the first block
    let mut rest = blocks[block_idx] & (W::ONES << offset);
    loop {
        if rest != W::ZERO {
            let idx = block_idx * bits + Native::bit_scan_forward(rest) as usize;
            return idx.min(len);
        }
        block_idx += 1;
        match blocks.get(block_idx) {
            Some(&block) if block_idx * bits < len => rest = block,
            _ => return len,
        }
    }
}

/// Index of the last set bit strictly before `before`.
pub(crate) fn prev_set_in<W: Word>(blocks: &[W], before: usize) -> Option<usize> {
    let last = before.checked_sub(1)?;
    let bits = W::BITS as usize;
    let (mut block_idx, offset) = split_index::<W>(last);
    let mut rest = blocks[block_idx] & W::low_mask(offset + 1);
    loop {
        if rest != W::ZERO {
            return Some(block_idx * bits + Native::bit_scan_reverse(rest) as usize);
        }
        block_idx = block_idx.checked_sub(1)?;
        rest = blocks[block_idx];
    }
}

/// A bidirectional position over the set bits of a bitset.
///
/// A cursor either rests on a set bit or on the end position, which equals
/// the size of the set. Moving forward past the last set bit reaches the end.
/// Two cursors are equal if they point into the same bitset at the same
/// position.
///
/// Returned by [`Bitset::cursor`] and [`Bitset::cursor_end`].
///
/// [`Bitset::cursor`]: crate::Bitset::cursor
/// [`Bitset::cursor_end`]: crate::Bitset::cursor_end
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'bitset, W: Word> {
    blocks: &'bitset [W],
    len: usize,
    index: usize,
}

impl<'bitset, W: Word> Cursor<'bitset, W> {
    /// Cursor on the lowest set bit, or the end if no bit is set.
    pub(crate) fn front(blocks: &'bitset [W], len: usize) -> Self {
        debug_assert!(len <= blocks.len() * W::BITS as usize);
        Self {
            blocks,
            len,
            index: next_set_in(blocks, 0, len),
        }
    }

    pub(crate) fn end(blocks: &'bitset [W], len: usize) -> Self {
        debug_assert!(len <= blocks.len() * W::BITS as usize);
        Self {
            blocks,
            len,
            index: len,
        }
    }

    /// The raw position: a set bit index, or the size of the set at the end.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The set bit the cursor rests on, `None` at the end.
    ///
    /// # Examples
    /// ```
    /// use tiered_bitset::SmallBitset;
    ///
    /// let bs = SmallBitset::<16>::from([3, 9]);
    /// let mut cursor = bs.cursor();
    /// assert_eq!(cursor.current(), Some(3));
    /// cursor.move_next();
    /// assert_eq!(cursor.current(), Some(9));
    /// cursor.move_next();
    /// assert_eq!(cursor.current(), None);
    /// assert!(cursor.move_prev());
    /// assert_eq!(cursor.current(), Some(9));
    /// ```
    #[inline]
    pub fn current(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.len
    }

    /// Moves to the next higher set bit, or to the end. Does nothing at the
    /// end.
    pub fn move_next(&mut self) {
        if !self.is_end() {
            self.index = next_set_in(self.blocks, self.index + 1, self.len);
        }
    }

    /// Moves to the next lower set bit.
    ///
    /// Returns `false` and stays put if there is no lower set bit.
    pub fn move_prev(&mut self) -> bool {
        match prev_set_in(self.blocks, self.index) {
            Some(idx) => {
                self.index = idx;
                true
            }
            None => false,
        }
    }
}

impl<W: Word> PartialEq for Cursor<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.blocks, other.blocks) && self.index == other.index
    }
}

impl<W: Word> Eq for Cursor<'_, W> {}

/// Iterator over the indices of set bits in a bitset.
///
/// Yields ascending indices from the front and descending indices from the
/// back, so `.rev()` walks the set from its highest bit down. Every step
/// jumps straight to the next set bit.
///
/// Returned by [`Bitset::iter()`](crate::Bitset::iter).
#[derive(Debug, Clone)]
pub struct Iter<'bitset, W: Word> {
    front: Cursor<'bitset, W>,
    back: Cursor<'bitset, W>,
}

impl<'bitset, W: Word> Iter<'bitset, W> {
    pub(crate) fn new(blocks: &'bitset [W], len: usize) -> Self {
        Self {
            front: Cursor::front(blocks, len),
            back: Cursor::end(blocks, len),
        }
    }
}

impl<W: Word> Iterator for Iter<'_, W> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front.index >= self.back.index {
            return None;
        }
        let idx = self.front.index;
        self.front.move_next();
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.index.saturating_sub(self.front.index);
        ((remaining > 0) as usize, Some(remaining))
    }
}

impl<W: Word> DoubleEndedIterator for Iter<'_, W> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.index >= self.back.index {
            return None;
        }
        // the front cursor rests on a set bit below `back`, so this always moves
        self.back.move_prev();
        Some(self.back.index)
    }
}

impl<W: Word> FusedIterator for Iter<'_, W> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_set_in() {
        let blocks: [u8; 3] = [0b0000_0100, 0, 0b1000_0001];
        assert_eq!(next_set_in(&blocks, 0, 24), 2);
        assert_eq!(next_set_in(&blocks, 2, 24), 2);
        assert_eq!(next_set_in(&blocks, 3, 24), 16);
        assert_eq!(next_set_in(&blocks, 17, 24), 23);
        assert_eq!(next_set_in(&blocks, 24, 24), 24);
        // bits at or above `len` do not count
        assert_eq!(next_set_in(&blocks, 17, 20), 20);
        assert_eq!(next_set_in(&blocks, 3, 16), 16);
    }

    #[test]
    fn test_prev_set_in() {
        let blocks: [u8; 3] = [0b0000_0100, 0, 0b1000_0001];
        assert_eq!(prev_set_in(&blocks, 24), Some(23));
        assert_eq!(prev_set_in(&blocks, 23), Some(16));
        assert_eq!(prev_set_in(&blocks, 16), Some(2));
        assert_eq!(prev_set_in(&blocks, 2), None);
        assert_eq!(prev_set_in(&blocks, 0), None);
    }

    #[test]
    fn test_cursor_walk() {
        let blocks: [u64; 2] = [1 << 63, 1];
        let mut cursor = Cursor::front(&blocks, 128);
        assert_eq!(cursor.current(), Some(63));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(64));
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor, Cursor::end(&blocks, 128));
        cursor.move_next();
        assert!(cursor.is_end());

        assert!(cursor.move_prev());
        assert_eq!(cursor.current(), Some(64));
        assert!(cursor.move_prev());
        assert_eq!(cursor.current(), Some(63));
        assert!(!cursor.move_prev());
        assert_eq!(cursor.current(), Some(63));
        assert_eq!(cursor, Cursor::front(&blocks, 128));
    }

    #[test]
    fn test_cursor_over_empty() {
        let blocks: [u32; 1] = [0];
        let cursor = Cursor::front(&blocks, 20);
        assert!(cursor.is_end());
        assert_eq!(cursor, Cursor::end(&blocks, 20));

        let other: [u32; 1] = [0];
        assert_ne!(cursor, Cursor::end(&other, 20));
    }

    #[test]
    fn test_iter_meets_in_the_middle() {
        let blocks: [u16; 2] = [0b1001, 0b0110];
        let mut iter = Iter::new(&blocks, 32);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(18));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next_back(), Some(17));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }
}
