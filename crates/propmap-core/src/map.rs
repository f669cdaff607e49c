// File: crates/propmap-core/src/map.rs
// Summary: MapCanvas surface and headless rendering pipeline using Skia CPU raster surfaces.

use std::collections::BTreeMap;

use skia_safe as skia;

use crate::error::{MapError, Result};
use crate::geometry::in_circle;
use crate::grid::{graticule_step, ticks};
use crate::hud::HudControls;
use crate::layer::{LayerId, MapSurface, MarkerLayer};
use crate::projection::MapView;
use crate::style::Theme;
use crate::symbol::Symbol;
use crate::text::TextShaper;
use crate::types::{HEIGHT, WIDTH};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Draw graticule lines under the markers.
    pub draw_graticule: bool,
    /// Draw text (labels, chips, popup). Off for pixel-stable snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            theme: Theme::light(),
            draw_graticule: true,
            draw_labels: true,
        }
    }
}

/// Map surface holding the added marker layers, drawn in layer-id order.
pub struct MapCanvas {
    pub view: MapView,
    layers: BTreeMap<LayerId, MarkerLayer>,
    text: Option<TextShaper>,
}

impl MapSurface for MapCanvas {
    fn add_layer(&mut self, layer: &MarkerLayer) {
        self.layers.insert(layer.id, layer.clone());
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }
}

impl MapCanvas {
    pub fn new(view: MapView) -> Self {
        Self { view, layers: BTreeMap::new(), text: None }
    }

    pub fn layer_count(&self) -> usize { self.layers.len() }

    pub fn layers(&self) -> impl Iterator<Item = &MarkerLayer> { self.layers.values() }

    /// Topmost marker under the pixel, if any (later layers and later markers win).
    pub fn symbol_at(&self, px: f32, py: f32) -> Option<&Symbol> {
        self.layers
            .values()
            .rev()
            .flat_map(|l| l.symbols.iter().rev())
            .find(|s| {
                let (cx, cy) = self.view.to_screen(s.lon, s.lat);
                in_circle(px, py, cx, cy, (s.radius as f32).max(3.0))
            })
    }

    fn draw(&mut self, canvas: &skia::Canvas, opts: &RenderOptions, hud: Option<&HudControls>) {
        canvas.clear(opts.theme.background);
        if opts.draw_graticule {
            draw_graticule(canvas, &self.view, &opts.theme);
        }
        for layer in self.layers.values() {
            draw_markers(canvas, &self.view, &layer.symbols);
        }
        if let Some(hud) = hud {
            let text = if opts.draw_labels { Some(&*self.text.get_or_insert_with(TextShaper::new)) } else { None };
            hud.draw(canvas, &opts.theme, text, opts.width, opts.height);
        }
    }

    fn render_surface(&mut self, opts: &RenderOptions, hud: Option<&HudControls>) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width.max(1), opts.height.max(1)))
            .ok_or(MapError::Render("failed to create raster surface"))?;
        self.view.resize(opts.width, opts.height);
        self.draw(surface.canvas(), opts, hud);
        Ok(surface)
    }

    /// Render to encoded PNG bytes.
    pub fn render_to_png_bytes(&mut self, opts: &RenderOptions, hud: Option<&HudControls>) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts, hud)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(MapError::Render("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(
        &mut self,
        opts: &RenderOptions,
        hud: Option<&HudControls>,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts, hud)?;
        let path = output_png_path.as_ref();
        let io = |source: std::io::Error| MapError::Io { path: path.display().to_string(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(path, bytes).map_err(io)
    }

    /// Render to unpremultiplied RGBA8; returns `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&mut self, opts: &RenderOptions, hud: Option<&HudControls>) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts, hud)?;
        let (w, h) = (opts.width.max(1), opts.height.max(1));
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(MapError::Render("read pixels failed"));
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_graticule(canvas: &skia::Canvas, view: &MapView, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.graticule);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.0);

    let (west, south, east, north) = view.bounds();
    let step = graticule_step(view.zoom);
    let (w, h) = (view.width as f32, view.height as f32);

    for lon in ticks(west, east, step) {
        let (x, _) = view.to_screen(lon, view.center_lat);
        canvas.draw_line((x, 0.0), (x, h), &paint);
    }
    for lat in ticks(south, north, step) {
        let (_, y) = view.to_screen(view.center_lon, lat);
        canvas.draw_line((0.0, y), (w, y), &paint);
    }
}

fn draw_markers(canvas: &skia::Canvas, view: &MapView, symbols: &[Symbol]) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);

    for s in symbols {
        let (x, y) = view.to_screen(s.lon, s.lat);
        let r = s.radius as f32;
        let margin = r + s.style.weight;
        if x < -margin || y < -margin || x > view.width as f32 + margin || y > view.height as f32 + margin {
            continue;
        }

        fill.set_color(s.fill);
        fill.set_alpha_f(s.style.fill_opacity.clamp(0.0, 1.0));
        canvas.draw_circle((x, y), r, &fill);

        if s.style.weight > 0.0 {
            stroke.set_color(s.style.stroke);
            stroke.set_alpha_f(s.style.opacity.clamp(0.0, 1.0));
            stroke.set_stroke_width(s.style.weight);
            canvas.draw_circle((x, y), r, &stroke);
        }
    }
}
