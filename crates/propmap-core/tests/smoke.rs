// File: crates/propmap-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use propmap_core::{
    DataSource, DatasetProfile, HudControls, MapApp, MapCanvas, MapSurface, MapView, RenderOptions, load_dataset,
};

fn data_path(name: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data").join(name)
}

#[test]
fn render_smoke_png() {
    let profile = DatasetProfile::population();
    let dataset = load_dataset(&DataSource::Path(data_path("CityPopulation.geojson"))).expect("load");
    let mut hud = HudControls::new(profile.name.clone());
    let mut app = MapApp::new(dataset, profile);
    let mut canvas = MapCanvas::new(app.initial_view(1024, 640));
    app.mount(&mut canvas, &mut hud);
    assert_eq!(canvas.layer_count(), 1);

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    canvas.render_to_png(&opts, Some(&hud), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = canvas.render_to_png_bytes(&opts, Some(&hud)).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_without_layers_or_hud() {
    let mut canvas = MapCanvas::new(MapView::new(0.0, 0.0, 1.0, 64, 64));
    canvas.remove_layer(propmap_core::LayerId(42));
    let opts = RenderOptions { width: 64, height: 64, ..RenderOptions::default() };
    let bytes = canvas.render_to_png_bytes(&opts, None).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
