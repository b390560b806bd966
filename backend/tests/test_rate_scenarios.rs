//! Worked tariff scenarios
//!
//! Each test pins one published example: band selection, slab repetition,
//! surcharge/tax composition and the two derived products.

use parcel_rate_core::table::default_table;
use parcel_rate_core::{
    RateBreakdown, RateEngine, ScaleCode, ScaleSelection, SlabTable,
};

/// Helper: single-scale table from the worked example
fn luggage_only_table() -> SlabTable {
    SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 7.53, "11-20": 15.06}}}"#).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Single-scale composition
// ============================================================================

#[test]
fn test_distance_25_weight_15_scale_l() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);

    let rate = engine.compute_rate(25.0, 15.0, ScaleCode::Luggage).unwrap();

    assert_eq!(rate.distance_band.as_deref(), Some("1-50"));
    assert_eq!(rate.lines.len(), 1);
    assert_eq!(rate.lines[0].weight_band, "11-20");
    assert_eq!(rate.lines[0].multiplier, 1);
    assert_close(rate.base_rate, 15.06);
    assert_close(rate.development_surcharge, 0.3012);
    assert_close(rate.rate_after_surcharge, 15.3612);
    assert_close(rate.tax, 0.76806);
    assert_close(rate.total_rate, 16.12926);
    assert_close(rate.rate_per_unit_weight, 16.12926 / 15.0);
    assert_eq!(rate.rounded_total(), 17.0);
}

#[test]
fn test_weight_beyond_largest_band_repeats_it() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);

    let rate = engine.compute_rate(25.0, 45.0, ScaleCode::Luggage).unwrap();

    assert_eq!(rate.lines[0].weight_band, "11-20");
    assert_eq!(rate.lines[0].multiplier, 3);
    assert_eq!(rate.lines[0].description, "3 × 20kg slab (11-20)");
    assert_close(rate.base_rate, 45.18);
}

#[test]
fn test_distance_beyond_table_uses_nearest_band() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);

    let rate = engine.compute_rate(800.0, 5.0, ScaleCode::Luggage).unwrap();

    assert_eq!(rate.distance_band.as_deref(), Some("1-50"));
    assert_close(rate.base_rate, 7.53);
}

#[test]
fn test_scale_without_data_is_zero() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);

    let rate = engine.compute_rate(25.0, 15.0, ScaleCode::Premier).unwrap();

    assert_eq!(rate, RateBreakdown::no_data(ScaleCode::Premier, 25.0, 15.0));
    assert!(!rate.is_available());
}

// ============================================================================
// Derived products
// ============================================================================

#[test]
fn test_luggage_total_100_becomes_150() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);
    let base = RateBreakdown {
        total_rate: 100.0,
        ..RateBreakdown::no_data(ScaleCode::Luggage, 100.0, 40.0)
    };

    let luggage = engine.luggage_rate(&base);

    assert_eq!(luggage.total, 150.0);
    // Informational only, not folded into the total
    assert_close(luggage.luggage_tax, 7.5);
}

#[test]
fn test_jpp_base_200() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);
    let premier = RateBreakdown {
        base_rate: 200.0,
        ..RateBreakdown::no_data(ScaleCode::Premier, 100.0, 40.0)
    };

    let jpp = engine.joint_product_rate(&premier);

    assert_close(jpp.base, 220.0);
    assert_close(jpp.development_surcharge, 4.4);
    assert_close(jpp.rate_after_surcharge, 224.4);
    assert_close(jpp.tax, 11.22);
    assert_eq!(jpp.total, 236.0);
    // Per-kg figure uses the real weight
    assert_close(jpp.rate_per_unit_weight, 235.62 / 40.0);
}

// ============================================================================
// Multi-scale quotes
// ============================================================================

#[test]
fn test_quote_all_scales_on_default_table() {
    let table = default_table();
    let engine = RateEngine::new(&table);

    let quote = engine.quote(30.0, 25.0, ScaleSelection::All).unwrap();

    let order: Vec<ScaleCode> = quote.scales.iter().map(|b| b.scale).collect();
    assert_eq!(order, ScaleCode::ALL.to_vec());

    // 25 kg falls in the 21-30 slab for every scale
    assert_close(quote.scale(ScaleCode::Luggage).unwrap().base_rate, 22.59);
    assert_close(quote.scale(ScaleCode::Premier).unwrap().base_rate, 12.55);
    assert_close(quote.scale(ScaleCode::Rajdhani).unwrap().base_rate, 18.83);
    assert_close(quote.scale(ScaleCode::Standard).unwrap().base_rate, 6.28);

    let luggage = quote.luggage.as_ref().unwrap();
    let total_l = quote.scale(ScaleCode::Luggage).unwrap().total_rate;
    assert_close(luggage.marked_up_rate, total_l * 1.5);

    let jpp = quote.joint_product.as_ref().unwrap();
    assert_close(jpp.unrounded_total, 12.55 * 1.1 * 1.02 * 1.05);
}

#[test]
fn test_quote_single_scale_skips_unrelated_variants() {
    let table = default_table();
    let engine = RateEngine::new(&table);

    let premier_only = engine
        .quote(30.0, 25.0, ScaleSelection::One(ScaleCode::Premier))
        .unwrap();
    assert_eq!(premier_only.scales.len(), 1);
    assert!(premier_only.luggage.is_none());
    assert!(premier_only.joint_product.is_some());

    let standard_only = engine
        .quote(30.0, 25.0, ScaleSelection::One(ScaleCode::Standard))
        .unwrap();
    assert!(standard_only.luggage.is_none());
    assert!(standard_only.joint_product.is_none());
}

#[test]
fn test_partial_table_only_derives_available_variants() {
    let table = luggage_only_table();
    let engine = RateEngine::new(&table);

    let quote = engine.quote(25.0, 15.0, ScaleSelection::All).unwrap();

    assert!(quote.luggage.is_some());
    assert!(quote.joint_product.is_none());
    assert_eq!(quote.scale(ScaleCode::Rajdhani).unwrap().total_rate, 0.0);
}

#[test]
fn test_zero_luggage_total_has_no_luggage_variant() {
    // L is present but its row has no weight slabs
    let table = SlabTable::from_json(
        r#"{"L": {"1-50": {}}, "P": {"1-50": {"1-10": 4.19, "11-20": 8.37}}}"#,
    )
    .unwrap();
    let engine = RateEngine::new(&table);

    let quote = engine.quote(25.0, 15.0, ScaleSelection::All).unwrap();

    assert_eq!(quote.scale(ScaleCode::Luggage).unwrap().total_rate, 0.0);
    assert!(quote.luggage.is_none());
    assert!(quote.joint_product.is_some());

    // Zero unit rate gives the same result
    let zero_rate = SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 0.0}}}"#).unwrap();
    let quote = RateEngine::new(&zero_rate)
        .quote(25.0, 5.0, ScaleSelection::One(ScaleCode::Luggage))
        .unwrap();
    assert_eq!(quote.scales[0].total_rate, 0.0);
    assert!(quote.luggage.is_none());
}

#[test]
fn test_quote_rejects_invalid_input() {
    let table = default_table();
    let engine = RateEngine::new(&table);

    assert!(engine.quote(0.0, 10.0, ScaleSelection::All).is_err());
    assert!(engine.quote(10.0, f64::INFINITY, ScaleSelection::All).is_err());
}
