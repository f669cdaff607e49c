// File: crates/propmap-core/src/popup.rs
// Summary: Popup content templating (HTML fragments, unescaped) and number formatting.

use serde_json::Value;

use crate::attributes::attribute_label;
use crate::loader::PointFeature;
use crate::value::{display_value, numeric_value};

/// Number-to-text formatter used for attribute values in popups.
pub trait NumberFormat {
    fn format(&self, value: f64) -> String;
}

/// Digit grouping with a configurable separator; `,` (en-US) by default.
/// Whole numbers print without decimals, others keep up to `max_fraction_digits`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupedDecimal {
    pub group_separator: char,
    pub decimal_separator: char,
    pub max_fraction_digits: usize,
}

impl Default for GroupedDecimal {
    fn default() -> Self {
        Self { group_separator: ',', decimal_separator: '.', max_fraction_digits: 3 }
    }
}

impl NumberFormat for GroupedDecimal {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() { return value.to_string(); }
        let rendered = format!("{:.*}", self.max_fraction_digits, value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, f.trim_end_matches('0')),
            None => (rendered.as_str(), ""),
        };

        let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
        if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) { out.push('-'); }
        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 { out.push(self.group_separator); }
            out.push(ch);
        }
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

/// How popup content is built for a feature.
#[derive(Clone, Debug, PartialEq)]
pub enum PopupTemplate {
    /// One `<p>key: value</p>` per property, in document order.
    AllProperties,
    /// Name line plus the current attribute's formatted value.
    Attribute {
        name_field: String,
        name_label: String,
        value_label: String,
    },
}

impl PopupTemplate {
    pub fn render(&self, feature: &PointFeature, attribute: Option<&str>, numbers: &dyn NumberFormat) -> String {
        match self {
            PopupTemplate::AllProperties => {
                let mut html = String::new();
                for (key, value) in &feature.properties {
                    html.push_str(&format!("<p>{}: {}</p>", key, display_value(value)));
                }
                html
            }
            PopupTemplate::Attribute { name_field, name_label, value_label } => {
                let name = feature.property(name_field).map(display_value).unwrap_or_default();
                let mut html = format!("<p><b>{}:</b> {}</p>", name_label, name);
                if let Some(attr) = attribute {
                    let shown = feature
                        .property(attr)
                        .map(|v| format_property(v, numbers))
                        .unwrap_or_default();
                    html.push_str(&format!(
                        "<p><b>{} in {}:</b> {}</p>",
                        value_label,
                        attribute_label(attr),
                        shown
                    ));
                }
                html
            }
        }
    }
}

fn format_property(value: &Value, numbers: &dyn NumberFormat) -> String {
    match numeric_value(value) {
        Some(n) => numbers.format(n),
        None => display_value(value),
    }
}

/// Strip markup for plain-text display: one entry per `<p>` paragraph, tags removed.
pub fn plain_lines(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        current.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            current.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        if tag == "/p" || tag == "br" || tag == "br/" {
            push_line(&mut lines, &mut current);
        }
        rest = &rest[open + close + 1..];
    }
    current.push_str(rest);
    push_line(&mut lines, &mut current);
    lines
}

fn push_line(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    if !line.is_empty() { lines.push(line.to_string()); }
    current.clear();
}
