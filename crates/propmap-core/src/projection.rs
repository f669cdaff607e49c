// File: crates/propmap-core/src/projection.rs
// Summary: Web Mercator view transform (lon/lat <-> screen pixels) with pan/zoom hooks.

use std::f64::consts::PI;

use crate::loader::Dataset;
use crate::types::Insets;

/// Side of one zoom-0 world tile in pixels.
pub const TILE_SIZE: f64 = 256.0;
/// Latitude limit of the Mercator square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Map viewport: center in degrees, fractional zoom, pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    pub width: i32,
    pub height: i32,
}

impl MapView {
    pub fn new(center_lat: f64, center_lon: f64, zoom: f64, width: i32, height: i32) -> Self {
        Self {
            center_lon,
            center_lat: center_lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    fn world_size(&self) -> f64 { TILE_SIZE * 2f64.powf(self.zoom) }

    /// Mercator world pixel of a lon/lat at the current zoom.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let size = self.world_size();
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (lon + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        (lon, lat)
    }

    #[inline]
    pub fn to_screen(&self, lon: f64, lat: f64) -> (f32, f32) {
        let (cx, cy) = self.project(self.center_lon, self.center_lat);
        let (x, y) = self.project(lon, lat);
        (
            (x - cx + self.width as f64 / 2.0) as f32,
            (y - cy + self.height as f64 / 2.0) as f32,
        )
    }

    #[inline]
    pub fn from_screen(&self, px: f32, py: f32) -> (f64, f64) {
        let (cx, cy) = self.project(self.center_lon, self.center_lat);
        let x = cx + px as f64 - self.width as f64 / 2.0;
        let y = cy + py as f64 - self.height as f64 / 2.0;
        self.unproject(x, y)
    }

    /// Visible lon/lat bounds as `(west, south, east, north)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (west, north) = self.from_screen(0.0, 0.0);
        let (east, south) = self.from_screen(self.width as f32, self.height as f32);
        (west, south, east, north)
    }

    /// Drag the map by a pixel delta (content follows the pointer).
    pub fn pan_px(&mut self, dx: f32, dy: f32) {
        let (lon, lat) = self.from_screen(self.width as f32 / 2.0 - dx, self.height as f32 / 2.0 - dy);
        self.center_lon = lon;
        self.center_lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    }

    /// Zoom by `delta` levels keeping the geographic point under the cursor fixed.
    pub fn zoom_at(&mut self, cursor_x: f32, cursor_y: f32, delta: f64) {
        let (lon, lat) = self.from_screen(cursor_x, cursor_y);
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        // re-center so (lon, lat) lands back under the cursor
        let (x, y) = self.project(lon, lat);
        let cx = x - (cursor_x as f64 - self.width as f64 / 2.0);
        let cy = y - (cursor_y as f64 - self.height as f64 / 2.0);
        let (clon, clat) = self.unproject(cx, cy);
        self.center_lon = clon;
        self.center_lat = clat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Largest zoom (capped at `max_zoom`) showing every feature inside `insets`.
    pub fn fit_bounds(dataset: &Dataset, width: i32, height: i32, insets: &Insets, max_zoom: f64) -> Self {
        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        for f in &dataset.features {
            west = west.min(f.lon);
            east = east.max(f.lon);
            south = south.min(f.lat);
            north = north.max(f.lat);
        }
        if !west.is_finite() || !east.is_finite() || !south.is_finite() || !north.is_finite() {
            return Self::new(0.0, 0.0, MIN_ZOOM, width, height);
        }

        let probe = Self::new(0.0, 0.0, 0.0, width, height);
        let (x0, y0) = probe.project(west, north);
        let (x1, y1) = probe.project(east, south);
        let avail_w = ((width - insets.hsum() as i32) as f64).max(1.0);
        let avail_h = ((height - insets.vsum() as i32) as f64).max(1.0);
        let span_w = (x1 - x0).abs().max(1e-9);
        let span_h = (y1 - y0).abs().max(1e-9);
        let zoom = (avail_w / span_w).min(avail_h / span_h).log2().min(max_zoom);

        let (clon, clat) = probe.unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        let mut view = Self::new(clat, clon, zoom, width, height);
        // shift so the data sits in the middle of the inset box, not the surface
        let dx = (insets.left as f32 - insets.right as f32) / 2.0;
        let dy = (insets.top as f32 - insets.bottom as f32) / 2.0;
        view.pan_px(dx, dy);
        view
    }
}
