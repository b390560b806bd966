//! Property tests for rate composition
//!
//! Run against the built-in table, whose unit rates rise with the weight band.

use parcel_rate_core::table::default_table;
use parcel_rate_core::{resolve_distance_band, RateEngine, ScaleCode, SlabTable};
use proptest::prelude::*;

fn scale_strategy() -> impl Strategy<Value = ScaleCode> {
    prop::sample::select(ScaleCode::ALL.to_vec())
}

fn gapped_table() -> SlabTable {
    SlabTable::from_json(
        r#"{
            "L": {"1-50": {"1-10": 1.0}, "101-200": {"1-10": 2.0}, "501-1000": {"1-10": 3.0}},
            "P": {"1-50": {"1-10": 1.5}, "101-200": {"1-10": 2.5}, "501-1000": {"1-10": 3.5}}
        }"#,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_total_is_base_times_surcharge_and_tax(
        distance in 0.1f64..2_000.0,
        weight in 0.1f64..1_000.0,
        scale in scale_strategy(),
    ) {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let rate = engine.compute_rate(distance, weight, scale).unwrap();

        let expected = rate.base_rate * 1.02 * 1.05;
        prop_assert!((rate.total_rate - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn prop_per_unit_rate_times_weight_is_total(
        distance in 0.1f64..2_000.0,
        weight in 0.1f64..1_000.0,
        scale in scale_strategy(),
    ) {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let rate = engine.compute_rate(distance, weight, scale).unwrap();

        let reconstructed = rate.rate_per_unit_weight * weight;
        prop_assert!((reconstructed - rate.total_rate).abs() <= 1e-9 * rate.total_rate.max(1.0));
    }

    #[test]
    fn prop_heavier_never_cheaper(
        distance in 0.1f64..2_000.0,
        weight in 0.1f64..500.0,
        extra in 0.0f64..500.0,
        scale in scale_strategy(),
    ) {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let lighter = engine.compute_rate(distance, weight, scale).unwrap();
        let heavier = engine.compute_rate(distance, weight + extra, scale).unwrap();

        prop_assert!(heavier.base_rate >= lighter.base_rate);
    }

    #[test]
    fn prop_every_distance_resolves(
        distance in 0.0f64..1_000_000.0,
        scale in prop::sample::select(vec![ScaleCode::Luggage, ScaleCode::Premier]),
    ) {
        let table = gapped_table();
        let band = resolve_distance_band(distance, &table, scale).unwrap();
        prop_assert!(band.is_some());
    }

    #[test]
    fn prop_compute_is_bit_identical(
        distance in 0.1f64..2_000.0,
        weight in 0.1f64..1_000.0,
        scale in scale_strategy(),
    ) {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let first = engine.compute_rate(distance, weight, scale).unwrap();
        let second = engine.compute_rate(distance, weight, scale).unwrap();

        prop_assert_eq!(first.total_rate.to_bits(), second.total_rate.to_bits());
        prop_assert_eq!(first.base_rate.to_bits(), second.base_rate.to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_fitting_weight_is_one_slab(
        weight in 0.01f64..=100.0,
        scale in scale_strategy(),
    ) {
        let table = default_table();
        let engine = RateEngine::new(&table);
        let rate = engine.compute_rate(25.0, weight, scale).unwrap();

        prop_assert_eq!(rate.lines.len(), 1);
        prop_assert_eq!(rate.lines[0].multiplier, 1);
    }
}
