// File: crates/propmap-core/tests/filter.rs
// Purpose: Category filter predicate (case-insensitive equality) and selector state cycling.

use propmap_core::filter::select;
use propmap_core::{CategoryFilter, Dataset, DatasetProfile};

const DOC: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-83.0, 42.3] }, "properties": { "City": "Detroit", "Belt": "Rust Belt" } },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-112.0, 33.4] }, "properties": { "City": "Phoenix", "Belt": "sun belt" } },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-79.9, 40.4] }, "properties": { "City": "Pittsburgh", "Belt": "RUST BELT" } },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-95.3, 29.7] }, "properties": { "City": "Houston" } }
  ]
}"#;

#[test]
fn all_selects_every_feature() {
    let ds = Dataset::from_geojson_str(DOC).expect("parse");
    assert_eq!(select(&ds, &CategoryFilter::All, Some("Belt")), vec![0, 1, 2, 3]);
}

#[test]
fn category_match_is_case_insensitive_and_exact() {
    let ds = Dataset::from_geojson_str(DOC).expect("parse");
    let rust = CategoryFilter::Only("rust belt".into());
    assert_eq!(select(&ds, &rust, Some("Belt")), vec![0, 2]);
    let sun = CategoryFilter::Only("Sun Belt".into());
    assert_eq!(select(&ds, &sun, Some("Belt")), vec![1]);
    let partial = CategoryFilter::Only("Rust".into());
    assert!(select(&ds, &partial, Some("Belt")).is_empty());
}

#[test]
fn missing_category_field_never_matches_a_category() {
    let ds = Dataset::from_geojson_str(DOC).expect("parse");
    let rust = CategoryFilter::Only("Rust Belt".into());
    assert!(!rust.matches(&ds.features[3], "Belt"));
    assert!(CategoryFilter::All.matches(&ds.features[3], "Belt"));
}

#[test]
fn without_field_every_feature_passes() {
    let ds = Dataset::from_geojson_str(DOC).expect("parse");
    let rust = CategoryFilter::Only("Rust Belt".into());
    assert_eq!(select(&ds, &rust, None).len(), 4);
}

#[test]
fn parse_and_cycle_choices() {
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse(" Sun Belt "), CategoryFilter::Only("Sun Belt".into()));

    let choices = DatasetProfile::population().filter.expect("filter").choices();
    assert_eq!(choices.len(), 3);
    let next = CategoryFilter::All.cycle(&choices);
    assert_eq!(next, CategoryFilter::Only("Rust Belt".into()));
    let next = next.cycle(&choices);
    assert_eq!(next, CategoryFilter::Only("Sun Belt".into()));
    assert_eq!(next.cycle(&choices), CategoryFilter::All);
    assert_eq!(CategoryFilter::Only("sun belt".into()).cycle(&choices), CategoryFilter::All);
}
