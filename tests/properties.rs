use proptest::prelude::*;
use std::collections::BTreeSet;
use tiered_bitset::scan::{BitScan, BruteForce, Intrinsic, Lookup};
use tiered_bitset::{LargeBitset, SmallBitset};

const BITS: usize = 200;
type Large = LargeBitset<BITS, 4>;
type Small = SmallBitset<50>;

fn large_positions() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..BITS, 0..80)
}

fn small_positions() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..50usize, 0..50)
}

fn model(bs: &Large) -> BTreeSet<usize> {
    (0..BITS).filter(|&i| bs.test(i)).collect()
}

proptest! {
    #[test]
    fn test_iteration_matches_model(positions in large_positions()) {
        let bs = Large::from_positions(positions.iter().copied());

        prop_assert_eq!(bs.count(), positions.len());
        prop_assert_eq!(bs.iter().collect::<Vec<_>>(), positions.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(
            bs.iter().rev().collect::<Vec<_>>(),
            positions.iter().rev().copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(bs.first(), positions.first().copied());
        prop_assert_eq!(bs.last(), positions.last().copied());
    }

    #[test]
    fn test_set_ops_match_model(a in large_positions(), b in large_positions()) {
        let x = Large::from_positions(a.iter().copied());
        let y = Large::from_positions(b.iter().copied());

        prop_assert_eq!(model(&(x & y)), &a & &b);
        prop_assert_eq!(model(&(x | y)), &a | &b);
        prop_assert_eq!(model(&(x ^ y)), &a ^ &b);
        prop_assert_eq!(model(&(x - y)), &a - &b);
        prop_assert_eq!((!x).count(), BITS - a.len());
        prop_assert_eq!(x.is_subset_of(&y), a.is_subset(&b));
        prop_assert_eq!(x.intersects(&y), !a.is_disjoint(&b));
    }

    #[test]
    fn test_shifts_match_model(positions in large_positions(), n in 0..BITS + 10) {
        let bs = Large::from_positions(positions.iter().copied());

        let left: BTreeSet<usize> = positions.iter().map(|p| p + n).filter(|&p| p < BITS).collect();
        let right: BTreeSet<usize> = positions.iter().filter_map(|p| p.checked_sub(n)).collect();
        prop_assert_eq!(model(&(bs << n)), left);
        prop_assert_eq!(model(&(bs >> n)), right);

        let rotated: BTreeSet<usize> = positions.iter().map(|p| (p + n) % BITS).collect();
        let mut rot = bs;
        rot.rotate_left(n);
        prop_assert_eq!(model(&rot), rotated);
        rot.rotate_right(n);
        prop_assert_eq!(rot, bs);
    }

    #[test]
    fn test_shift_laws(positions in large_positions(), n in 0..BITS) {
        let bs = Large::from_positions(positions.iter().copied());
        // shifting up then down keeps exactly the bits that did not fall off the top
        let mut kept = bs;
        if n > 0 {
            kept.reset_range(BITS - n..BITS);
        }
        prop_assert_eq!((bs << n) >> n, kept);
        prop_assert!(((bs >> n) << n).is_subset_of(&bs));
    }

    #[test]
    fn test_order_matches_numeric_value(a in small_positions(), b in small_positions()) {
        let value = |s: &BTreeSet<usize>| s.iter().map(|&i| 1u64 << i).sum::<u64>();
        let x = Small::from_positions(a.iter().copied());
        let y = Small::from_positions(b.iter().copied());

        prop_assert_eq!(x.cmp(&y), value(&a).cmp(&value(&b)));
        prop_assert_eq!(x == y, a == b);
    }

    #[test]
    fn test_next_and_prev_set(positions in large_positions(), from in 0..BITS + 5) {
        let bs = Large::from_positions(positions.iter().copied());
        prop_assert_eq!(bs.next_set(from), positions.range(from..).next().copied());
        prop_assert_eq!(bs.prev_set(from), positions.range(..from).next_back().copied());
    }

    #[test]
    fn test_text_round_trip(positions in large_positions()) {
        let bs = Large::from_positions(positions.iter().copied());
        let text = bs.to_string();
        prop_assert_eq!(text.len(), BITS);
        prop_assert_eq!(text.parse::<Large>(), Ok(bs));
    }

    #[test]
    fn test_scan_strategies_agree_u32(x in any::<u32>()) {
        prop_assert_eq!(Lookup::count_trailing_zeros(x), Intrinsic::count_trailing_zeros(x));
        prop_assert_eq!(BruteForce::count_trailing_zeros(x), Intrinsic::count_trailing_zeros(x));
        prop_assert_eq!(Lookup::count_leading_zeros(x), Intrinsic::count_leading_zeros(x));
        prop_assert_eq!(BruteForce::count_leading_zeros(x), Intrinsic::count_leading_zeros(x));
        prop_assert_eq!(Lookup::population_count(x), x.count_ones());
        prop_assert_eq!(BruteForce::population_count(x), x.count_ones());
    }

    #[test]
    fn test_scan_strategies_agree_u64(x in any::<u64>()) {
        prop_assert_eq!(Lookup::count_trailing_zeros(x), x.trailing_zeros());
        prop_assert_eq!(BruteForce::count_trailing_zeros(x), x.trailing_zeros());
        prop_assert_eq!(Lookup::count_leading_zeros(x), x.leading_zeros());
        prop_assert_eq!(BruteForce::count_leading_zeros(x), x.leading_zeros());
        prop_assert_eq!(Lookup::population_count(x), Intrinsic::population_count(x));
        prop_assert_eq!(BruteForce::population_count(x), Intrinsic::population_count(x));
    }

    #[test]
    fn test_scan_strategies_agree_u128(x in any::<u128>()) {
        prop_assert_eq!(Lookup::count_trailing_zeros(x), x.trailing_zeros());
        prop_assert_eq!(BruteForce::count_trailing_zeros(x), x.trailing_zeros());
        prop_assert_eq!(Lookup::count_leading_zeros(x), x.leading_zeros());
        prop_assert_eq!(BruteForce::count_leading_zeros(x), x.leading_zeros());
        prop_assert_eq!(Lookup::population_count(x), x.count_ones());
        prop_assert_eq!(BruteForce::population_count(x), x.count_ones());
    }
}
