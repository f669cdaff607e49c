// File: crates/propmap-core/tests/radius.rs
// Purpose: Radius scales are monotone for non-negative values and fall back to the minimum.

use propmap_core::{DatasetProfile, RadiusPolicy, RadiusScale};

fn scales() -> Vec<RadiusScale> {
    vec![
        RadiusScale::Sqrt { min: 3.0, factor: 0.03 },
        RadiusScale::Linear { min: 4.0, factor: 0.5 },
        RadiusScale::DividedLinear { min: 4.0, divisor: 200.0 },
    ]
}

#[test]
fn monotone_non_decreasing_for_non_negative_values() {
    let values = [0.0, 0.5, 1.0, 2.0, 10.0, 99.0, 100.0, 1_000.0, 2_783_726.0, 1e12];
    for scale in scales() {
        let mut prev = f64::NEG_INFINITY;
        for &v in &values {
            let r = scale.apply(Some(v));
            assert!(r >= prev, "{scale:?}: radius({v}) = {r} < {prev}");
            prev = r;
        }
    }
}

#[test]
fn missing_or_non_finite_values_get_min_radius() {
    for scale in scales() {
        let min = scale.min_radius();
        assert_eq!(scale.apply(None), min);
        assert_eq!(scale.apply(Some(f64::NAN)), min);
        assert_eq!(scale.apply(Some(f64::INFINITY)), min);
    }
}

#[test]
fn sqrt_scale_matches_population_formula() {
    let s = RadiusScale::Sqrt { min: 3.0, factor: 0.03 };
    assert!((s.apply(Some(100.0)) - 3.3).abs() < 1e-9);
    assert!((s.apply(Some(400.0)) - 3.6).abs() < 1e-9);
    assert_eq!(s.apply(Some(0.0)), 3.0);
}

#[test]
fn no_upper_clamp() {
    let s = RadiusScale::Linear { min: 4.0, factor: 0.5 };
    assert_eq!(s.apply(Some(10_000.0)), 5_004.0);
}

#[test]
fn negative_values_floor_at_minimum() {
    for scale in scales() {
        assert_eq!(scale.apply(Some(-50.0)), scale.min_radius());
    }
}

#[test]
fn zero_divisor_degrades_to_minimum() {
    let s = RadiusScale::DividedLinear { min: 2.0, divisor: 0.0 };
    assert_eq!(s.apply(Some(10.0)), 2.0);
}

#[test]
fn per_attribute_override_wins_over_default() {
    let policy = RadiusPolicy::uniform(RadiusScale::Linear { min: 4.0, factor: 0.5 })
        .with_override("Beat", RadiusScale::DividedLinear { min: 4.0, divisor: 200.0 });
    assert_eq!(policy.radius(Some(8.0), Some("District")), 8.0);
    assert_eq!(policy.radius(Some(800.0), Some("Beat")), 8.0);
    assert_eq!(policy.radius(Some(8.0), None), 8.0);
    assert_eq!(policy.min_radius(Some("Beat")), 4.0);
}

#[test]
fn crime_preset_sizes_code_columns() {
    let p = DatasetProfile::crime();
    assert_eq!(p.radius.radius(Some(8.0), Some("District")), 8.0);
    assert!((p.radius.radius(Some(823.0), Some("Beat")) - 8.115).abs() < 1e-9);
    assert_eq!(p.radius.radius(None, Some("Ward")), 4.0);
}
