// File: crates/propmap-core/tests/hud.rs
// Purpose: HUD layout hit-testing maps clicks onto the same control events the controller consumes.

use propmap_core::{CategoryFilter, ControlBinding, ControlEvent, HudControls};

const W: i32 = 800;
const H: i32 = 500;

fn hud(len: usize) -> HudControls {
    let mut h = HudControls::new("population");
    h.configure(len, &[CategoryFilter::All, CategoryFilter::Only("Rust Belt".into()), CategoryFilter::Only("Sun Belt".into())]);
    h
}

#[test]
fn step_buttons_hit() {
    let h = hud(7);
    let layout = h.layout(W, H);
    let (rx, ry) = layout.reverse.center();
    let (fx, fy) = layout.forward.center();
    assert_eq!(h.hit_test(rx, ry, W, H), Some(ControlEvent::Reverse));
    assert_eq!(h.hit_test(fx, fy, W, H), Some(ControlEvent::Forward));
}

#[test]
fn slider_track_maps_x_to_index() {
    let h = hud(7);
    let layout = h.layout(W, H);
    let (_, ty) = layout.track.center();
    let left = layout.track.left as f32;
    let right = layout.track.right as f32 - 0.5;
    assert_eq!(h.hit_test(left, ty, W, H), Some(ControlEvent::Slide(0)));
    assert_eq!(h.hit_test(right, ty, W, H), Some(ControlEvent::Slide(6)));
    let mid = layout.knob_x(3, 7);
    assert_eq!(h.hit_test(mid, ty, W, H), Some(ControlEvent::Slide(3)));
    assert!(h.on_slider(mid, ty, W, H));
    // dragging past the ends clamps
    assert_eq!(layout.slider_index_at(-100.0, 7), 0);
    assert_eq!(layout.slider_index_at(10_000.0, 7), 6);
}

#[test]
fn filter_chips_hit() {
    let h = hud(7);
    let layout = h.layout(W, H);
    assert_eq!(layout.chips.len(), 3);
    let (cx, cy) = layout.chips[2].center();
    assert_eq!(h.hit_test(cx, cy, W, H), Some(ControlEvent::Filter(CategoryFilter::Only("Sun Belt".into()))));
    assert!(layout.chips[0].right <= layout.chips[1].left);
    assert!(layout.chips[2].right <= W);
}

#[test]
fn map_area_is_not_captured() {
    let mut h = hud(7);
    assert_eq!(h.hit_test(400.0, 200.0, W, H), None);
    assert!(!h.captures(400.0, 200.0, W, H));
    assert!(h.captures(400.0, (H - 10) as f32, W, H));

    h.show_popup("<p>City: Chicago</p>");
    assert_eq!(h.popup(), Some(&["City: Chicago".to_string()][..]));
    assert!(h.captures(20.0, 20.0, W, H));
    h.hide_popup();
    assert!(h.popup().is_none());
}

#[test]
fn binding_updates_state() {
    let mut h = hud(7);
    h.set_index(4);
    h.set_label("2010");
    h.set_filter(&CategoryFilter::Only("Rust Belt".into()));
    assert_eq!((h.index, h.label.as_str()), (4, "2010"));
    assert_eq!(h.filter, CategoryFilter::Only("Rust Belt".into()));
}
