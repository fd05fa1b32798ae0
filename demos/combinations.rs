use tiered_bitset::{LargeBitset, block_count};

fn combinations<const BIT_COUNT: usize, const BLOCK_COUNT: usize>(
    idx: usize,
    picked: &mut LargeBitset<BIT_COUNT, BLOCK_COUNT>,
) {
    if idx == BIT_COUNT {
        println!("{picked} {:?}", picked.iter().collect::<Vec<_>>());
        return;
    }
    if !picked.test(idx) {
        picked.set(idx);
        combinations(idx + 1, picked);
        picked.reset(idx);
    }
    combinations(idx + 1, picked)
}

fn main() {
    const BIT_COUNT: usize = 66;
    let mut picked = LargeBitset::<BIT_COUNT, { block_count(BIT_COUNT) }>::new();
    // pin all but the top four bits so the walk stays short
    picked.set_range(0..BIT_COUNT - 4);
    combinations(BIT_COUNT - 4, &mut picked);
}
