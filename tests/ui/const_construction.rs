use tiered_bitset::{EmptyBitset, LargeBitset, SmallBitset, block_count};

const NOTHING: EmptyBitset = EmptyBitset::new();
const FLAGS: SmallBitset<12, u16> = SmallBitset::new();
const BITS: usize = 1000;
const TABLE: LargeBitset<BITS, { block_count(BITS) }> = LargeBitset::new();

fn main() {
    assert_eq!(NOTHING.size(), 0);
    assert_eq!(FLAGS.size(), 12);
    assert_eq!(TABLE.as_blocks().len(), 16);
    assert!(TABLE.none());
}
