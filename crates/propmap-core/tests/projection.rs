// File: crates/propmap-core/tests/projection.rs
// Purpose: Web Mercator view transform, pan/zoom anchoring and data fitting.

use propmap_core::{Dataset, MapView};
use propmap_core::types::Insets;

fn close(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

#[test]
fn center_projects_to_middle_of_surface() {
    let view = MapView::new(38.5, -92.0, 4.0, 800, 500);
    let (x, y) = view.to_screen(-92.0, 38.5);
    assert!((x - 400.0).abs() < 1e-3 && (y - 250.0).abs() < 1e-3);
}

#[test]
fn zoom_zero_world_is_one_tile() {
    let view = MapView::new(0.0, 0.0, 0.0, 256, 256);
    let (x, y) = view.project(180.0, 0.0);
    assert!(close(x, 256.0, 1e-9));
    assert!(close(y, 128.0, 1e-9));
    let (lon, lat) = view.unproject(64.0, 128.0);
    assert!(close(lon, -90.0, 1e-9) && close(lat, 0.0, 1e-9));
}

#[test]
fn screen_round_trip() {
    let view = MapView::new(41.88, -87.63, 10.0, 1024, 640);
    let (px, py) = view.to_screen(-87.7, 41.9);
    let (lon, lat) = view.from_screen(px, py);
    assert!(close(lon, -87.7, 1e-4) && close(lat, 41.9, 1e-4));
}

#[test]
fn zoom_at_keeps_point_under_cursor() {
    let mut view = MapView::new(38.5, -92.0, 4.0, 800, 500);
    let before = view.from_screen(600.0, 120.0);
    view.zoom_at(600.0, 120.0, 1.0);
    assert!(close(view.zoom, 5.0, 1e-12));
    let after = view.from_screen(600.0, 120.0);
    assert!(close(before.0, after.0, 1e-4) && close(before.1, after.1, 1e-4));
}

#[test]
fn zoom_is_clamped() {
    let mut view = MapView::new(0.0, 0.0, 18.5, 100, 100);
    view.zoom_at(50.0, 50.0, 5.0);
    assert_eq!(view.zoom, 19.0);
    view.zoom_at(50.0, 50.0, -40.0);
    assert_eq!(view.zoom, 0.0);
}

#[test]
fn pan_moves_content_with_pointer() {
    let mut view = MapView::new(38.5, -92.0, 4.0, 800, 500);
    let (x0, y0) = view.to_screen(-100.0, 40.0);
    view.pan_px(30.0, -20.0);
    let (x1, y1) = view.to_screen(-100.0, 40.0);
    assert!((x1 - x0 - 30.0).abs() < 0.01, "dx {}", x1 - x0);
    assert!((y1 - y0 + 20.0).abs() < 0.01, "dy {}", y1 - y0);
}

#[test]
fn bounds_contain_center() {
    let view = MapView::new(38.5, -92.0, 4.0, 800, 500);
    let (w, s, e, n) = view.bounds();
    assert!(w < -92.0 && -92.0 < e);
    assert!(s < 38.5 && 38.5 < n);
}

#[test]
fn fit_bounds_shows_every_feature() {
    let data = Dataset::from_geojson_str(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[-122.4,37.8]},"properties":{}},
            {"type":"Feature","geometry":{"type":"Point","coordinates":[-71.1,42.4]},"properties":{}},
            {"type":"Feature","geometry":{"type":"Point","coordinates":[-80.2,25.8]},"properties":{}}
        ]}"#,
    )
    .expect("parse");
    let insets = Insets::default();
    let view = MapView::fit_bounds(&data, 1024, 640, &insets, 12.0);
    for f in &data.features {
        let (x, y) = view.to_screen(f.lon, f.lat);
        assert!(x >= insets.left as f32 - 0.5 && x <= (1024 - insets.right as i32) as f32 + 0.5, "x {x}");
        assert!(y >= insets.top as f32 - 0.5 && y <= (640 - insets.bottom as i32) as f32 + 0.5, "y {y}");
    }
}

#[test]
fn fit_bounds_single_point_caps_zoom() {
    let data = Dataset::from_geojson_str(
        r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[-87.6,41.9]},"properties":{}}"#,
    )
    .expect("parse");
    let view = MapView::fit_bounds(&data, 800, 500, &Insets::default(), 15.0);
    assert_eq!(view.zoom, 15.0);
    // centered in the inset box: (32 + 800 - 32) / 2, (32 + 500 - 88) / 2
    let (x, y) = view.to_screen(-87.6, 41.9);
    assert!((x - 400.0).abs() < 0.01 && (y - 222.0).abs() < 0.01, "({x}, {y})");
}

#[test]
fn fit_bounds_empty_dataset_shows_world() {
    let view = MapView::fit_bounds(&Dataset::empty(), 800, 500, &Insets::default(), 15.0);
    assert_eq!((view.center_lon, view.center_lat, view.zoom), (0.0, 0.0, 0.0));
}
