use tiered_bitset::{Bitset, EmptyBitset, LargeBitset, Multi, Single, SmallBitset};

fn count_any<const N: usize, S: tiered_bitset::BlockStorage>(bs: &Bitset<N, S>) -> usize {
    bs.iter().count()
}

fn main() {
    let empty = EmptyBitset::<u32>::new();
    let small: Bitset<10, Single<u64>> = SmallBitset::<10>::from([1, 9]);
    let large: Bitset<200, Multi<u64, 4>> = LargeBitset::<200, 4>::from([0, 199]);
    assert_eq!(count_any(&empty), 0);
    assert_eq!(count_any(&small), 2);
    assert_eq!(count_any(&large), 2);
}
