// File: crates/propmap-core/tests/app.rs
// Purpose: End-to-end controller behavior against a recording surface and recording controls.

use propmap_core::{
    CategoryFilter, ControlEvent, Dataset, DatasetProfile, LayerId, MapApp, MapSurface, MarkerLayer,
    RecordingControls, SymbolRenderer,
};

/// Surface double logging every add/remove in call order.
#[derive(Default)]
struct RecordingSurface {
    ops: Vec<String>,
    live: Vec<MarkerLayer>,
}

impl MapSurface for RecordingSurface {
    fn add_layer(&mut self, layer: &MarkerLayer) {
        self.ops.push(format!("add {}", layer.id.0));
        self.live.push(layer.clone());
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.ops.push(format!("remove {}", id.0));
        self.live.retain(|l| l.id != id);
    }
}

fn two_cities() -> Dataset {
    Dataset::from_geojson_str(
        r#"{
          "type": "FeatureCollection",
          "features": [
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-83.0, 42.3] },
              "properties": { "City": "A", "Belt": "Rust Belt", "USER_F1990": 100, "USER_F1995": 400 } },
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-112.0, 33.4] },
              "properties": { "City": "B", "Belt": "Sun Belt", "USER_F1990": 100, "USER_F1995": 400 } }
          ]
        }"#,
    )
    .expect("parse")
}

fn radii(surface: &RecordingSurface) -> Vec<f64> {
    surface.live.iter().flat_map(|l| l.symbols.iter().map(|s| s.radius)).collect()
}

#[test]
fn slider_index_drives_radius() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();

    app.mount(&mut surface, &mut controls);
    assert_eq!(controls.len, 2);
    assert_eq!(controls.label, "1990");
    for r in radii(&surface) { assert!((r - 3.3).abs() < 1e-9, "radius {r}"); }

    app.handle(ControlEvent::Slide(1), &mut surface, &mut controls);
    assert_eq!(controls.index, 1);
    assert_eq!(controls.label, "1995");
    for r in radii(&surface) { assert!((r - 3.6).abs() < 1e-9, "radius {r}"); }
}

#[test]
fn every_event_replaces_the_layer_remove_then_add() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();

    app.mount(&mut surface, &mut controls);
    app.handle(ControlEvent::Forward, &mut surface, &mut controls);
    app.handle(ControlEvent::Forward, &mut surface, &mut controls);
    assert_eq!(surface.ops, vec!["add 1", "remove 1", "add 2", "remove 2", "add 3"]);
    assert_eq!(surface.live.len(), 1);
    assert_eq!(app.layer().map(|l| l.id), Some(LayerId(3)));
    assert_eq!(controls.updates, 3);
}

#[test]
fn step_buttons_wrap() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();
    app.mount(&mut surface, &mut controls);

    app.handle(ControlEvent::Reverse, &mut surface, &mut controls);
    assert_eq!(controls.index, 1);
    app.handle(ControlEvent::Forward, &mut surface, &mut controls);
    assert_eq!(controls.index, 0);
}

#[test]
fn filter_narrows_features_and_preserves_index() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();
    app.mount(&mut surface, &mut controls);
    assert_eq!(controls.filters.len(), 3);

    app.handle(ControlEvent::Slide(1), &mut surface, &mut controls);
    app.handle(ControlEvent::Filter(CategoryFilter::Only("sun belt".into())), &mut surface, &mut controls);
    assert_eq!(controls.index, 1);
    assert_eq!(controls.filter, CategoryFilter::Only("sun belt".into()));
    let layer = app.layer().expect("layer");
    assert_eq!(layer.symbols.len(), 1);
    assert_eq!(layer.symbols[0].feature, 1);
    assert_eq!(layer.attribute.as_deref(), Some("USER_F1995"));

    app.handle(ControlEvent::Filter(CategoryFilter::All), &mut surface, &mut controls);
    assert_eq!(app.layer().map(|l| l.symbols.len()), Some(2));
}

#[test]
fn category_colors_follow_belt() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();
    app.mount(&mut surface, &mut controls);

    let profile = DatasetProfile::population();
    let layer = app.layer().expect("layer");
    assert_eq!(layer.symbols[0].fill, profile.color.categories[0].1);
    assert_eq!(layer.symbols[1].fill, profile.color.categories[1].1);
    assert!(layer.symbols[0].popup.contains("<b>City:</b> A"));
}

#[test]
fn no_attributes_renders_minimum_radius_with_empty_label() {
    let mut app = MapApp::new(two_cities(), DatasetProfile::crime());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();
    app.mount(&mut surface, &mut controls);

    assert!(app.sequence().is_empty());
    assert_eq!(controls.len, 0);
    assert_eq!(controls.label, "");
    assert!(controls.filters.is_empty());
    assert_eq!(radii(&surface), vec![4.0, 4.0]);

    app.handle(ControlEvent::Forward, &mut surface, &mut controls);
    assert_eq!(controls.index, 0);
    assert_eq!(surface.live.len(), 1);
}

#[test]
fn empty_dataset_renders_an_empty_layer() {
    let mut app = MapApp::new(Dataset::empty(), DatasetProfile::population());
    let mut surface = RecordingSurface::default();
    let mut controls = RecordingControls::default();
    app.mount(&mut surface, &mut controls);
    assert_eq!(app.layer().map(|l| l.symbols.len()), Some(0));
    assert_eq!(controls.label, "");
}

#[test]
fn renderer_clear_removes_current_layer() {
    let profile = DatasetProfile::population();
    let data = two_cities();
    let mut surface = RecordingSurface::default();
    let mut renderer = SymbolRenderer::new();

    let id = renderer.render(&mut surface, &data, &[0, 1], Some("USER_F1990"), &profile).id;
    assert_eq!(surface.live.len(), 1);
    renderer.clear(&mut surface);
    assert!(renderer.current().is_none());
    assert!(surface.live.is_empty());
    assert_eq!(surface.ops.last().map(String::as_str), Some(format!("remove {}", id.0).as_str()));

    // clearing twice is a no-op
    renderer.clear(&mut surface);
    assert_eq!(surface.ops.len(), 2);
}
