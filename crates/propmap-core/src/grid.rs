// File: crates/propmap-core/src/grid.rs
// Summary: Graticule layout helpers (line spacing per zoom, tick positions).

/// Graticule spacing in degrees for a zoom level; roughly 4–8 lines across a typical view.
pub fn graticule_step(zoom: f64) -> f64 {
    match zoom {
        z if z < 3.0 => 30.0,
        z if z < 5.0 => 10.0,
        z if z < 7.0 => 5.0,
        z if z < 9.0 => 1.0,
        z if z < 11.0 => 0.5,
        z if z < 13.0 => 0.1,
        z if z < 15.0 => 0.05,
        _ => 0.01,
    }
}

/// Multiples of `step` within `[min, max]`, ascending.
pub fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || max < min { return Vec::new(); }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    if last - first > 10_000 { return Vec::new(); }
    (first..=last).map(|i| i as f64 * step).collect()
}
