// File: crates/propmap-core/src/symbol.rs
// Summary: Symbolization; turns selected features into styled, sized circle markers with popup content.

use skia_safe as skia;

use crate::loader::Dataset;
use crate::profile::DatasetProfile;
use crate::style::MarkerStyle;
use crate::value::numeric_value;

/// One circle marker, fully resolved for drawing.
#[derive(Clone, Debug)]
pub struct Symbol {
    /// Index of the source feature in the dataset.
    pub feature: usize,
    pub lon: f64,
    pub lat: f64,
    pub radius: f64,
    pub fill: skia::Color,
    pub style: MarkerStyle,
    pub popup: String,
}

/// Build symbols for `selection` (feature indices) under the current `attribute`.
/// Without an attribute every marker gets the policy's minimum radius.
pub fn symbolize(
    dataset: &Dataset,
    selection: &[usize],
    attribute: Option<&str>,
    profile: &DatasetProfile,
) -> Vec<Symbol> {
    selection
        .iter()
        .filter_map(|&i| dataset.features.get(i).map(|f| (i, f)))
        .map(|(i, f)| {
            let value = attribute.and_then(|a| f.property(a)).and_then(numeric_value);
            Symbol {
                feature: i,
                lon: f.lon,
                lat: f.lat,
                radius: profile.radius.radius(value, attribute),
                fill: profile.color.resolve(&f.properties),
                style: profile.marker,
                popup: profile.popup.render(f, attribute, &profile.numbers),
            }
        })
        .collect()
}
