// File: crates/propmap-core/src/filter.rs
// Summary: Category filter; narrows the rendered feature set by a case-insensitive property match.

use serde::Deserialize;

use crate::loader::{Dataset, PointFeature};
use crate::value::display_value;

/// Category field and its selectable values (e.g. `Belt`: `Rust Belt`, `Sun Belt`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub options: Vec<String>,
}

impl FilterSpec {
    /// Selector states in display order: "all" followed by every option.
    pub fn choices(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(self.options.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `all` (any case) or an empty string selects everything; anything else is a category value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(v) => v.as_str(),
        }
    }

    pub fn matches(&self, feature: &PointFeature, field: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => feature
                .property(field)
                .map(|v| display_value(v).trim().to_lowercase() == wanted.trim().to_lowercase())
                .unwrap_or(false),
        }
    }

    /// Next state in `choices`, wrapping; unknown states restart at the first choice.
    pub fn cycle(&self, choices: &[CategoryFilter]) -> CategoryFilter {
        if choices.is_empty() { return CategoryFilter::All; }
        let pos = choices.iter().position(|c| c.same_choice(self));
        match pos {
            Some(i) => choices[(i + 1) % choices.len()].clone(),
            None => choices[0].clone(),
        }
    }

    pub fn same_choice(&self, other: &CategoryFilter) -> bool {
        match (self, other) {
            (CategoryFilter::All, CategoryFilter::All) => true,
            (CategoryFilter::Only(a), CategoryFilter::Only(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => false,
        }
    }
}

/// Indices of the features selected by `filter`. With no category field every feature passes.
pub fn select(dataset: &Dataset, filter: &CategoryFilter, field: Option<&str>) -> Vec<usize> {
    dataset
        .features
        .iter()
        .enumerate()
        .filter(|(_, f)| match field {
            Some(field) => filter.matches(f, field),
            None => true,
        })
        .map(|(i, _)| i)
        .collect()
}
