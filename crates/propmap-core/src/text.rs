// File: crates/propmap-core/src/text.rs
// Summary: Label text shaping on Skia textlayout (slider label, filter chips, popup lines).

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

const FAMILIES: &[&str] = &["Segoe UI", "Helvetica Neue", "Arial", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts }
    }

    fn paragraph(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut style = TextStyle::new();
        style.set_font_size(size.max(1.0));
        style.set_color(color);
        style.set_font_families(FAMILIES);
        if bold {
            style.set_font_style(skia::FontStyle::bold());
        }
        let mut builder = ParagraphBuilder::new(&ParagraphStyle::new(), &self.fonts);
        builder.push_style(&style);
        builder.add_text(text);
        let mut p = builder.build();
        p.layout(10_000.0);
        p
    }

    /// Draw with the baseline at `y`, starting at `x`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, bold: bool) {
        let mut p = self.paragraph(text, size, color, bold);
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Draw horizontally centered on `cx`, vertically centered on `cy`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color, bold: bool) {
        let mut p = self.paragraph(text, size, color, bold);
        let w = p.longest_line();
        let h = p.height();
        p.paint(canvas, (cx - w / 2.0, cy - h / 2.0));
    }
}
