// File: crates/propmap-core/src/radius.rs
// Summary: Proportional-symbol radius scales and the per-dataset radius policy.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Value -> pixel radius transform. Every variant starts at `min` and grows without an upper clamp.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusScale {
    /// `min + sqrt(v) * factor`; area tracks the value. Used for population counts.
    Sqrt { min: f64, factor: f64 },
    /// `min + v * factor`.
    Linear { min: f64, factor: f64 },
    /// `min + v / divisor`; for wide-ranging code columns.
    DividedLinear { min: f64, divisor: f64 },
}

impl RadiusScale {
    pub fn min_radius(&self) -> f64 {
        match *self {
            RadiusScale::Sqrt { min, .. }
            | RadiusScale::Linear { min, .. }
            | RadiusScale::DividedLinear { min, .. } => min,
        }
    }

    /// Radius for a value; missing or non-finite values get the minimum radius.
    /// Negative values floor at the minimum as well.
    pub fn apply(&self, value: Option<f64>) -> f64 {
        let min = self.min_radius();
        let Some(v) = value.filter(|v| v.is_finite()) else { return min; };
        let r = match *self {
            RadiusScale::Sqrt { factor, .. } => min + v.max(0.0).sqrt() * factor,
            RadiusScale::Linear { factor, .. } => min + v * factor,
            RadiusScale::DividedLinear { divisor, .. } => {
                if divisor.abs() < f64::EPSILON { min } else { min + v / divisor }
            }
        };
        if r.is_finite() { r.max(min) } else { min }
    }
}

/// Dataset radius policy: a default scale with optional per-attribute overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RadiusPolicy {
    pub default: RadiusScale,
    #[serde(default)]
    pub per_attribute: BTreeMap<String, RadiusScale>,
}

impl RadiusPolicy {
    pub fn uniform(scale: RadiusScale) -> Self {
        Self { default: scale, per_attribute: BTreeMap::new() }
    }

    pub fn with_override(mut self, attribute: impl Into<String>, scale: RadiusScale) -> Self {
        self.per_attribute.insert(attribute.into(), scale);
        self
    }

    pub fn scale_for(&self, attribute: Option<&str>) -> &RadiusScale {
        attribute
            .and_then(|a| self.per_attribute.get(a))
            .unwrap_or(&self.default)
    }

    /// Radius for `value` under the scale selected by `attribute`.
    pub fn radius(&self, value: Option<f64>, attribute: Option<&str>) -> f64 {
        self.scale_for(attribute).apply(value)
    }

    pub fn min_radius(&self, attribute: Option<&str>) -> f64 {
        self.scale_for(attribute).min_radius()
    }
}
