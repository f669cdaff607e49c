// File: crates/propmap-core/src/style.rs
// Summary: Marker styling, category color rules and map themes.

use serde_json::Value;
use skia_safe as skia;

use crate::value::display_value;

/// Circle marker paint options (fill/stroke colors, stroke weight, opacities).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub fill: skia::Color,
    pub stroke: skia::Color,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill: skia::Color::from_argb(255, 0xff, 0x78, 0x05),
            stroke: skia::Color::from_argb(255, 0, 0, 0),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Display color by category: the first case-insensitive match of `field` against
/// `categories`, otherwise `fallback`. Without a field every feature gets `fallback`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRule {
    pub field: Option<String>,
    pub categories: Vec<(String, skia::Color)>,
    pub fallback: skia::Color,
}

impl ColorRule {
    pub fn fixed(color: skia::Color) -> Self {
        Self { field: None, categories: Vec::new(), fallback: color }
    }

    pub fn by_category(field: impl Into<String>, categories: Vec<(String, skia::Color)>, fallback: skia::Color) -> Self {
        Self { field: Some(field.into()), categories, fallback }
    }

    pub fn resolve(&self, properties: &serde_json::Map<String, Value>) -> skia::Color {
        let Some(field) = &self.field else { return self.fallback; };
        let Some(raw) = properties.get(field) else { return self.fallback; };
        let wanted = display_value(raw).trim().to_lowercase();
        self.categories
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, c)| *c)
            .unwrap_or(self.fallback)
    }
}

/// Parse `#rgb`, `#rrggbb` or `#aarrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<skia::Color> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) { return None; }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Colors for everything that is not a marker: background, graticule, HUD.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub graticule: skia::Color,
    pub hud_bar: skia::Color,
    pub hud_track: skia::Color,
    pub hud_knob: skia::Color,
    pub hud_button: skia::Color,
    pub hud_text: skia::Color,
    pub hud_active: skia::Color,
    pub popup_background: skia::Color,
    pub popup_text: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 236, 238, 232),
            graticule: skia::Color::from_argb(255, 212, 216, 208),
            hud_bar: skia::Color::from_argb(220, 250, 250, 252),
            hud_track: skia::Color::from_argb(255, 190, 190, 200),
            hud_knob: skia::Color::from_argb(255, 32, 120, 200),
            hud_button: skia::Color::from_argb(255, 225, 225, 232),
            hud_text: skia::Color::from_argb(255, 20, 20, 30),
            hud_active: skia::Color::from_argb(255, 32, 120, 200),
            popup_background: skia::Color::from_argb(240, 255, 255, 255),
            popup_text: skia::Color::from_argb(255, 20, 20, 30),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            graticule: skia::Color::from_argb(255, 40, 40, 45),
            hud_bar: skia::Color::from_argb(220, 28, 28, 32),
            hud_track: skia::Color::from_argb(255, 80, 80, 90),
            hud_knob: skia::Color::from_argb(255, 64, 160, 255),
            hud_button: skia::Color::from_argb(255, 50, 50, 58),
            hud_text: skia::Color::from_argb(255, 235, 235, 245),
            hud_active: skia::Color::from_argb(255, 64, 160, 255),
            popup_background: skia::Color::from_argb(240, 40, 40, 46),
            popup_text: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            graticule: skia::Color::from_argb(255, 0x33, 0x33, 0x33),
            hud_bar: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            hud_track: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            hud_knob: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            hud_button: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            hud_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            hud_active: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
            popup_background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            popup_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
        }
    }
}

/// Built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
