// File: crates/propmap-core/src/hud.rs
// Summary: On-canvas controls (step buttons, slider, filter chips, popup box) implementing ControlBinding.
// Notes:
// - Layout is a pure function of the surface size so window input can be hit-tested
//   against exactly what was drawn.

use skia_safe as skia;

use crate::controls::{ControlBinding, ControlEvent};
use crate::filter::CategoryFilter;
use crate::geometry::RectI32;
use crate::popup::plain_lines;
use crate::style::Theme;
use crate::text::TextShaper;

const BAR_HEIGHT: i32 = 64;
const BUTTON_W: i32 = 40;
const BUTTON_H: i32 = 32;
const LABEL_W: i32 = 72;
const CHIP_W: i32 = 96;
const CHIP_H: i32 = 26;
const CHIP_GAP: i32 = 6;
const MARGIN: i32 = 12;
const POPUP_W: i32 = 300;
const POPUP_LINE: i32 = 20;

/// Pixel layout of every control for one surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct HudLayout {
    pub bar: RectI32,
    pub reverse: RectI32,
    pub forward: RectI32,
    pub label: RectI32,
    pub track: RectI32,
    pub chips: Vec<RectI32>,
}

impl HudLayout {
    pub fn new(width: i32, height: i32, chip_count: usize) -> Self {
        let bar = RectI32::from_ltrb(0, height - BAR_HEIGHT, width, height);
        let row_top = bar.top + (BAR_HEIGHT - BUTTON_H) / 2;
        let reverse = RectI32::from_ltwh(16, row_top, BUTTON_W, BUTTON_H);
        let forward = RectI32::from_ltwh(width - 16 - BUTTON_W, row_top, BUTTON_W, BUTTON_H);
        let label = RectI32::from_ltwh(reverse.right + 8, row_top, LABEL_W, BUTTON_H);
        let track_right = (forward.left - 16).max(label.right + 1);
        let track = RectI32::from_ltrb(label.right + 8, row_top, track_right, row_top + BUTTON_H);
        let chips = (0..chip_count)
            .map(|i| {
                let from_right = (chip_count - i) as i32;
                let left = width - MARGIN - from_right * CHIP_W - (from_right - 1) * CHIP_GAP;
                RectI32::from_ltwh(left, MARGIN, CHIP_W, CHIP_H)
            })
            .collect();
        Self { bar, reverse, forward, label, track, chips }
    }

    /// Slider index under pixel `x`, for a slider of `len` positions.
    pub fn slider_index_at(&self, x: f32, len: usize) -> usize {
        if len <= 1 { return 0; }
        let w = self.track.width().max(1) as f32;
        let t = ((x - self.track.left as f32) / w).clamp(0.0, 1.0);
        (t * (len - 1) as f32).round() as usize
    }

    /// Knob center x for `index` of `len`.
    pub fn knob_x(&self, index: usize, len: usize) -> f32 {
        if len <= 1 { return self.track.left as f32; }
        let t = index.min(len - 1) as f32 / (len - 1) as f32;
        self.track.left as f32 + t * self.track.width() as f32
    }
}

/// Control state mirrored from the controller, plus the popup shown after a marker click.
#[derive(Clone, Debug, Default)]
pub struct HudControls {
    pub len: usize,
    pub filters: Vec<CategoryFilter>,
    pub index: usize,
    pub label: String,
    pub filter: CategoryFilter,
    pub title: String,
    popup: Option<Vec<String>>,
}

impl HudControls {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn layout(&self, width: i32, height: i32) -> HudLayout {
        HudLayout::new(width, height, self.filters.len())
    }

    pub fn show_popup(&mut self, html: &str) {
        let lines = plain_lines(html);
        self.popup = if lines.is_empty() { None } else { Some(lines) };
    }

    pub fn hide_popup(&mut self) { self.popup = None; }

    pub fn popup(&self) -> Option<&[String]> { self.popup.as_deref() }

    pub fn on_slider(&self, x: f32, y: f32, width: i32, height: i32) -> bool {
        self.len > 1 && self.layout(width, height).track.contains(x, y)
    }

    /// Whether the point lies on any control (bar, chips or popup box); such clicks never reach the map.
    pub fn captures(&self, x: f32, y: f32, width: i32, height: i32) -> bool {
        let layout = self.layout(width, height);
        layout.bar.contains(x, y)
            || layout.chips.iter().any(|c| c.contains(x, y))
            || self.popup_rect().map(|r| r.contains(x, y)).unwrap_or(false)
    }

    /// Decode a click into a control event.
    pub fn hit_test(&self, x: f32, y: f32, width: i32, height: i32) -> Option<ControlEvent> {
        let layout = self.layout(width, height);
        if layout.reverse.contains(x, y) { return Some(ControlEvent::Reverse); }
        if layout.forward.contains(x, y) { return Some(ControlEvent::Forward); }
        if self.len > 0 && layout.track.contains(x, y) {
            return Some(ControlEvent::Slide(layout.slider_index_at(x, self.len)));
        }
        layout
            .chips
            .iter()
            .zip(&self.filters)
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, f)| ControlEvent::Filter(f.clone()))
    }

    fn popup_rect(&self) -> Option<RectI32> {
        let lines = self.popup.as_ref()?;
        let h = lines.len() as i32 * POPUP_LINE + 16;
        Some(RectI32::from_ltwh(MARGIN, MARGIN, POPUP_W, h))
    }

    /// Paint the controls. Text is drawn only when a shaper is supplied.
    pub fn draw(&self, canvas: &skia::Canvas, theme: &Theme, text: Option<&TextShaper>, width: i32, height: i32) {
        let layout = self.layout(width, height);
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);

        fill.set_color(theme.hud_bar);
        canvas.draw_rect(layout.bar.to_skia(), &fill);

        fill.set_color(theme.hud_button);
        for r in [layout.reverse, layout.forward] {
            canvas.draw_round_rect(r.to_skia(), 4.0, 4.0, &fill);
        }
        fill.set_color(theme.hud_text);
        canvas.draw_path(&triangle(layout.reverse, false), &fill);
        canvas.draw_path(&triangle(layout.forward, true), &fill);

        // slider track and knob
        let (_, ty) = layout.track.center();
        let track = skia::Rect::from_ltrb(layout.track.left as f32, ty - 3.0, layout.track.right as f32, ty + 3.0);
        fill.set_color(theme.hud_track);
        canvas.draw_round_rect(track, 3.0, 3.0, &fill);
        if self.len > 0 {
            for i in 0..self.len {
                canvas.draw_circle((layout.knob_x(i, self.len), ty), 2.0, &fill);
            }
            fill.set_color(theme.hud_knob);
            canvas.draw_circle((layout.knob_x(self.index, self.len), ty), 8.0, &fill);
        }

        for (rect, choice) in layout.chips.iter().zip(&self.filters) {
            let active = choice.same_choice(&self.filter);
            fill.set_color(if active { theme.hud_active } else { theme.hud_button });
            canvas.draw_round_rect(rect.to_skia(), 13.0, 13.0, &fill);
            if let Some(t) = text {
                let (cx, cy) = rect.center();
                let color = if active { theme.background } else { theme.hud_text };
                t.draw_centered(canvas, choice.label(), cx, cy, 13.0, color, active);
            }
        }

        if let Some(t) = text {
            let (cx, cy) = layout.label.center();
            t.draw_centered(canvas, &self.label, cx, cy, 18.0, theme.hud_text, true);
            if !self.title.is_empty() && self.popup.is_none() {
                t.draw_left(canvas, &self.title, MARGIN as f32, (MARGIN + 18) as f32, 16.0, theme.hud_text, true);
            }
        }

        if let (Some(rect), Some(lines)) = (self.popup_rect(), self.popup.as_ref()) {
            fill.set_color(theme.popup_background);
            canvas.draw_round_rect(rect.to_skia(), 6.0, 6.0, &fill);
            if let Some(t) = text {
                for (i, line) in lines.iter().enumerate() {
                    let y = rect.top + 8 + (i as i32 + 1) * POPUP_LINE - 4;
                    t.draw_left(canvas, line, (rect.left + 10) as f32, y as f32, 14.0, theme.popup_text, false);
                }
            }
        }
    }
}

fn triangle(r: RectI32, pointing_right: bool) -> skia::Path {
    let (cx, cy) = r.center();
    let s = 7.0;
    let mut path = skia::Path::new();
    if pointing_right {
        path.move_to((cx - s * 0.6, cy - s));
        path.line_to((cx + s * 0.8, cy));
        path.line_to((cx - s * 0.6, cy + s));
    } else {
        path.move_to((cx + s * 0.6, cy - s));
        path.line_to((cx - s * 0.8, cy));
        path.line_to((cx + s * 0.6, cy + s));
    }
    path.close();
    path
}

impl ControlBinding for HudControls {
    fn configure(&mut self, len: usize, filters: &[CategoryFilter]) {
        self.len = len;
        self.filters = filters.to_vec();
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn set_filter(&mut self, filter: &CategoryFilter) {
        self.filter = filter.clone();
    }

    fn set_popup(&mut self, html: Option<&str>) {
        match html {
            Some(html) => self.show_popup(html),
            None => self.hide_popup(),
        }
    }
}
