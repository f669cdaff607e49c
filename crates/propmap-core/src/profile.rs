// File: crates/propmap-core/src/profile.rs
// Summary: Dataset profiles (configuration); built-in crime/population presets and TOML profile files.
// Notes:
// - A profile bundles everything dataset-specific: data location, attribute allow-list,
//   radius policy, colors, popup template, filter and initial view.
// - TOML files use hex color strings; they are converted into runtime types on load.

use std::path::Path;

use serde::Deserialize;
use skia_safe as skia;

use crate::error::{MapError, Result};
use crate::filter::FilterSpec;
use crate::popup::{GroupedDecimal, PopupTemplate};
use crate::radius::{RadiusPolicy, RadiusScale};
use crate::style::{parse_hex_color, ColorRule, MarkerStyle};

/// Initial map center (degrees) and zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct InitialView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

#[derive(Clone, Debug)]
pub struct DatasetProfile {
    pub name: String,
    pub data: String,
    pub allow_list: Vec<String>,
    pub radius: RadiusPolicy,
    pub color: ColorRule,
    pub marker: MarkerStyle,
    pub popup: PopupTemplate,
    pub numbers: GroupedDecimal,
    pub filter: Option<FilterSpec>,
    pub view: Option<InitialView>,
}

impl DatasetProfile {
    /// Chicago crime incidents: fixed orange markers sized by code columns.
    pub fn crime() -> Self {
        let radius = RadiusPolicy::uniform(RadiusScale::Linear { min: 4.0, factor: 0.5 })
            .with_override("Beat", RadiusScale::DividedLinear { min: 4.0, divisor: 200.0 })
            .with_override("Ward", RadiusScale::Linear { min: 4.0, factor: 0.2 })
            .with_override("Community Area", RadiusScale::Linear { min: 4.0, factor: 0.1 });
        Self {
            name: "crime".into(),
            data: "data/ChicagoCrime.geojson".into(),
            allow_list: ["District", "Ward", "Community Area", "Beat"].map(String::from).to_vec(),
            radius,
            color: ColorRule::fixed(MarkerStyle::default().fill),
            marker: MarkerStyle::default(),
            popup: PopupTemplate::AllProperties,
            numbers: GroupedDecimal::default(),
            filter: None,
            view: Some(InitialView { lat: 41.791815984698715, lon: -87.79712747210827, zoom: 15.0 }),
        }
    }

    /// City populations by census year, colored and filterable by belt category.
    pub fn population() -> Self {
        let years = (1990..=2020).step_by(5).map(|y| format!("USER_F{y}")).collect();
        Self {
            name: "population".into(),
            data: "data/CityPopulation.geojson".into(),
            allow_list: years,
            radius: RadiusPolicy::uniform(RadiusScale::Sqrt { min: 3.0, factor: 0.03 }),
            color: ColorRule::by_category(
                "Belt",
                vec![
                    ("Rust Belt".into(), skia::Color::from_argb(255, 0xb7, 0x41, 0x0e)),
                    ("Sun Belt".into(), skia::Color::from_argb(255, 0xf2, 0xb7, 0x05)),
                ],
                skia::Color::from_argb(255, 0x80, 0x80, 0x80),
            ),
            marker: MarkerStyle { fill_opacity: 0.75, ..MarkerStyle::default() },
            popup: PopupTemplate::Attribute {
                name_field: "City".into(),
                name_label: "City".into(),
                value_label: "Population".into(),
            },
            numbers: GroupedDecimal::default(),
            filter: Some(FilterSpec {
                field: "Belt".into(),
                options: vec!["Rust Belt".into(), "Sun Belt".into()],
            }),
            view: Some(InitialView { lat: 38.5, lon: -92.0, zoom: 4.0 }),
        }
    }

    pub fn presets() -> Vec<Self> {
        vec![Self::crime(), Self::population()]
    }

    /// Built-in profile by name (case-insensitive).
    pub fn find(name: &str) -> Option<Self> {
        Self::presets().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Preset name, or path to a `.toml` profile file.
    pub fn load(name_or_path: &str) -> Result<Self> {
        let path = Path::new(name_or_path);
        if path.extension().map(|e| e.eq_ignore_ascii_case("toml")).unwrap_or(false) {
            let content = std::fs::read_to_string(path)
                .map_err(|source| MapError::Io { path: path.display().to_string(), source })?;
            return Self::from_toml_str(&content);
        }
        Self::find(name_or_path)
            .ok_or_else(|| MapError::Config(format!("unknown profile '{}'", name_or_path)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ProfileFile = toml::from_str(content)?;
        file.into_profile()
    }

    /// Category field used by the filter, if the profile has one.
    pub fn filter_field(&self) -> Option<&str> {
        self.filter.as_ref().map(|f| f.field.as_str())
    }
}

// ---- TOML schema ------------------------------------------------------------

#[derive(Deserialize)]
struct ProfileFile {
    name: String,
    data: String,
    #[serde(default)]
    allow_list: Vec<String>,
    radius: RadiusPolicy,
    #[serde(default)]
    color: ColorFile,
    #[serde(default)]
    marker: MarkerFile,
    #[serde(default)]
    popup: PopupFile,
    #[serde(default)]
    numbers: NumbersFile,
    filter: Option<FilterSpec>,
    view: Option<InitialView>,
}

#[derive(Deserialize, Default)]
struct ColorFile {
    field: Option<String>,
    #[serde(default)]
    categories: Vec<CategoryColorFile>,
    fallback: Option<String>,
}

#[derive(Deserialize)]
struct CategoryColorFile {
    value: String,
    color: String,
}

#[derive(Deserialize, Default)]
struct MarkerFile {
    fill: Option<String>,
    stroke: Option<String>,
    weight: Option<f32>,
    opacity: Option<f32>,
    fill_opacity: Option<f32>,
}

#[derive(Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum PopupFile {
    #[default]
    AllProperties,
    Attribute {
        name_field: String,
        name_label: Option<String>,
        value_label: Option<String>,
    },
}

#[derive(Deserialize, Default)]
struct NumbersFile {
    group_separator: Option<char>,
    decimal_separator: Option<char>,
    max_fraction_digits: Option<usize>,
}

fn color(field: &str, raw: &str) -> Result<skia::Color> {
    parse_hex_color(raw).ok_or_else(|| MapError::Config(format!("{}: invalid color '{}'", field, raw)))
}

impl ProfileFile {
    fn into_profile(self) -> Result<DatasetProfile> {
        let defaults = MarkerStyle::default();
        let marker = MarkerStyle {
            fill: self.marker.fill.as_deref().map(|c| color("marker.fill", c)).transpose()?.unwrap_or(defaults.fill),
            stroke: self.marker.stroke.as_deref().map(|c| color("marker.stroke", c)).transpose()?.unwrap_or(defaults.stroke),
            weight: self.marker.weight.unwrap_or(defaults.weight),
            opacity: self.marker.opacity.unwrap_or(defaults.opacity),
            fill_opacity: self.marker.fill_opacity.unwrap_or(defaults.fill_opacity),
        };

        let fallback = match self.color.fallback.as_deref() {
            Some(c) => color("color.fallback", c)?,
            None => marker.fill,
        };
        let categories = self
            .color
            .categories
            .into_iter()
            .map(|c| Ok((c.value, color("color.categories", &c.color)?)))
            .collect::<Result<Vec<_>>>()?;
        let color_rule = ColorRule { field: self.color.field, categories, fallback };

        let popup = match self.popup {
            PopupFile::AllProperties => PopupTemplate::AllProperties,
            PopupFile::Attribute { name_field, name_label, value_label } => PopupTemplate::Attribute {
                name_label: name_label.unwrap_or_else(|| name_field.clone()),
                name_field,
                value_label: value_label.unwrap_or_else(|| "Value".to_string()),
            },
        };

        let base = GroupedDecimal::default();
        let numbers = GroupedDecimal {
            group_separator: self.numbers.group_separator.unwrap_or(base.group_separator),
            decimal_separator: self.numbers.decimal_separator.unwrap_or(base.decimal_separator),
            max_fraction_digits: self.numbers.max_fraction_digits.unwrap_or(base.max_fraction_digits),
        };

        Ok(DatasetProfile {
            name: self.name,
            data: self.data,
            allow_list: self.allow_list,
            radius: self.radius,
            color: color_rule,
            marker,
            popup,
            numbers,
            filter: self.filter,
            view: self.view,
        })
    }
}
