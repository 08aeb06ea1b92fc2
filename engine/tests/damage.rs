use arena_engine::damage::{reduction, resolve};
use proptest::prelude::*;

#[test]
fn zero_defense_takes_the_full_roll() {
    assert_eq!(reduction(0.0), 0.0);
    assert_eq!(resolve(10.0, 0.0, 1.0), 10.0);
}

#[test]
fn defense_fifty_absorbs_three_quarters() {
    // 0.06 * 50 = 3 → 3 / 4
    assert!((reduction(50.0) - 0.75).abs() < 1e-12);
    assert!((resolve(100.0, 50.0, 1.0) - 25.0).abs() < 1e-9);
    assert!((resolve(100.0, 50.0, 1.5) - 37.5).abs() < 1e-9);
}

#[test]
fn glancing_hits_still_deal_one() {
    assert_eq!(resolve(0.5, 0.0, 1.0), 1.0);
    assert_eq!(resolve(20.0, 10_000.0, 1.0), 1.0);
}

proptest! {
    #[test]
    fn every_hit_deals_at_least_one(
        rolled in 0.001f64..10_000.0,
        defense in 0.0f64..1e9,
        multiplier in prop_oneof![Just(1.0f64), Just(1.5f64)],
    ) {
        prop_assert!(resolve(rolled, defense, multiplier) >= 1.0);
    }

    #[test]
    fn reduction_is_never_total(defense in 0.0f64..1e6) {
        let r = reduction(defense);
        prop_assert!((0.0..1.0).contains(&r));
    }

    #[test]
    fn more_defense_never_means_more_damage(
        rolled in 1.0f64..500.0,
        low in 0.0f64..500.0,
        extra in 0.0f64..500.0,
    ) {
        prop_assert!(resolve(rolled, low + extra, 1.0) <= resolve(rolled, low, 1.0) + 1e-9);
    }
}
