use tiered_bitset::{LargeBitset, SmallBitset, block_count_for};

fn main() {
    let mut a = SmallBitset::<8, u8>::new();
    let mut b = SmallBitset::<16, u16>::new();
    let mut c = SmallBitset::<32, u32>::new();
    let mut d = SmallBitset::<64, u64>::new();
    let mut e = SmallBitset::<128, u128>::new();
    a.set(7);
    b.set(15);
    c.set(31);
    d.set(63);
    e.set(127);
    assert_eq!(a.count() + b.count() + c.count() + d.count() + e.count(), 5);

    let mut wide = LargeBitset::<300, { block_count_for::<u128>(300) }, u128>::new();
    wide.set_range(100..300);
    assert_eq!(wide.count(), 200);
    assert_eq!(wide.as_blocks().len(), 3);
}
