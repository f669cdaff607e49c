// File: crates/propmap-window/src/main.rs
// Summary: Windowed map; renders MapCanvas to a window via RGBA blit (CPU) using winit + softbuffer.
// Notes:
// - HUD clicks become ControlEvents for MapApp; everything else pans, zooms or picks markers.
// - Keys: Left/Right step the sequence, F cycles the category filter, Esc closes the popup.

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use clap::Parser;
use propmap_core::style;
use propmap_core::{
    ControlEvent, DataSource, Dataset, DatasetProfile, HudControls, MapApp, MapCanvas, RenderOptions, load_dataset,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Pointer travel (px) below which a press/release counts as a click.
const CLICK_SLOP: f64 = 3.0;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive proportional-symbol map")]
struct Args {
    /// Built-in profile name (crime, population) or path to a .toml profile
    #[arg(short, long, default_value = "population")]
    profile: String,

    /// GeoJSON path or http(s) URL; overrides the profile's data location
    #[arg(short, long)]
    data: Option<String>,

    /// Theme preset: light, dark, high-contrast
    #[arg(long, default_value = "light")]
    theme: String,
}

/// What the left button is doing while held.
enum Press {
    Idle,
    Slider,
    Map { last: (f64, f64), travel: f64 },
}

struct State {
    app: MapApp,
    canvas: MapCanvas,
    hud: HudControls,
    opts: RenderOptions,
    cursor: (f64, f64),
    press: Press,
}

impl State {
    fn size(&self) -> (i32, i32) { (self.opts.width, self.opts.height) }

    fn send(&mut self, event: ControlEvent) {
        self.app.handle(event, &mut self.canvas, &mut self.hud);
    }

    fn press(&mut self) {
        let (x, y) = (self.cursor.0 as f32, self.cursor.1 as f32);
        let (w, h) = self.size();
        if self.hud.captures(x, y, w, h) {
            if let Some(event) = self.hud.hit_test(x, y, w, h) {
                self.send(event);
            }
            self.press = if self.hud.on_slider(x, y, w, h) { Press::Slider } else { Press::Idle };
        } else {
            self.press = Press::Map { last: self.cursor, travel: 0.0 };
        }
    }

    fn release(&mut self) {
        if let Press::Map { travel, .. } = self.press {
            if travel < CLICK_SLOP {
                let (x, y) = (self.cursor.0 as f32, self.cursor.1 as f32);
                self.app.select_popup_at(&self.canvas, &mut self.hud, x, y);
            }
        }
        self.press = Press::Idle;
    }

    /// Returns whether anything visible changed.
    fn moved(&mut self, x: f64, y: f64) -> bool {
        self.cursor = (x, y);
        match self.press {
            Press::Idle => false,
            Press::Slider => {
                let (w, h) = self.size();
                let index = self.hud.layout(w, h).slider_index_at(x as f32, self.hud.len);
                if index == self.app.sequence().index() {
                    return false;
                }
                self.send(ControlEvent::Slide(index));
                true
            }
            Press::Map { ref mut last, ref mut travel } => {
                let (dx, dy) = (x - last.0, y - last.1);
                *last = (x, y);
                *travel += dx.abs() + dy.abs();
                self.canvas.view.pan_px(dx as f32, dy as f32);
                true
            }
        }
    }

    fn key(&mut self, key: VirtualKeyCode) -> bool {
        match key {
            VirtualKeyCode::Left => self.send(ControlEvent::Reverse),
            VirtualKeyCode::Right => self.send(ControlEvent::Forward),
            VirtualKeyCode::F => {
                let choices = self.app.filter_choices();
                if choices.is_empty() {
                    return false;
                }
                let next = self.app.filter().cycle(&choices);
                self.send(ControlEvent::Filter(next));
            }
            VirtualKeyCode::Escape => self.app.dismiss_popup(&mut self.hud),
            _ => return false,
        }
        true
    }

    fn zoom(&mut self, delta: MouseScrollDelta) {
        let levels = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64 * 0.5,
            MouseScrollDelta::PixelDelta(p) => p.y / 240.0,
        };
        let (x, y) = (self.cursor.0 as f32, self.cursor.1 as f32);
        self.canvas.view.zoom_at(x, y, levels);
    }
}

fn load(args: &Args) -> Result<(DatasetProfile, Dataset)> {
    let profile = DatasetProfile::load(&args.profile)
        .with_context(|| format!("failed to load profile '{}'", args.profile))?;
    let source = DataSource::parse(args.data.as_deref().unwrap_or(&profile.data));
    let dataset = match load_dataset(&source) {
        Ok(d) => d,
        Err(e) => {
            // keep the window up with an empty map
            error!(source = %source.describe(), error = %e, "failed to load dataset");
            Dataset::empty()
        }
    };
    Ok((profile, dataset))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let (profile, dataset) = load(&args)?;
    info!(profile = %profile.name, features = dataset.len(), "starting window");

    // Window + softbuffer setup
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(format!("Propmap: {}", profile.name))
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e:?}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e:?}"))?;

    let size = window.inner_size();
    let opts = RenderOptions {
        width: size.width.max(1) as i32,
        height: size.height.max(1) as i32,
        theme: style::find(&args.theme),
        ..RenderOptions::default()
    };
    let mut hud = HudControls::new(profile.name.clone());
    let mut app = MapApp::new(dataset, profile);
    let mut canvas = MapCanvas::new(app.initial_view(opts.width, opts.height));
    app.mount(&mut canvas, &mut hud);

    let mut state = State { app, canvas, hud, opts, cursor: (0.0, 0.0), press: Press::Idle };

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id: _ } => {
                let dirty = match event {
                    WindowEvent::CloseRequested => {
                        *cf = ControlFlow::Exit;
                        false
                    }
                    WindowEvent::Resized(new_size) => {
                        state.opts.width = new_size.width.max(1) as i32;
                        state.opts.height = new_size.height.max(1) as i32;
                        true
                    }
                    WindowEvent::CursorMoved { position, .. } => state.moved(position.x, position.y),
                    WindowEvent::MouseInput { state: button_state, button: MouseButton::Left, .. } => {
                        match button_state {
                            ElementState::Pressed => state.press(),
                            ElementState::Released => state.release(),
                        }
                        true
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        state.zoom(delta);
                        true
                    }
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                        ..
                    } => state.key(key),
                    _ => false,
                };
                if dirty {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                let (w, h) = (state.opts.width as u32, state.opts.height as u32);
                let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else { return };
                if let Err(e) = surface.resize(nw, nh) {
                    error!("surface resize: {e:?}");
                    return;
                }

                let rgba = match state.canvas.render_to_rgba8(&state.opts, Some(&state.hud)) {
                    Ok((rgba, ..)) => rgba,
                    Err(e) => {
                        error!(error = %e, "render failed");
                        return;
                    }
                };
                let mut frame = match surface.buffer_mut() {
                    Ok(f) => f,
                    Err(e) => {
                        error!("frame: {e:?}");
                        return;
                    }
                };
                // Softbuffer wants 0RGB in native-endian u32
                for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
                    let (r, g, b, a) = (px[0] as u32, px[1] as u32, px[2] as u32, px[3] as u32);
                    *dst = (a << 24) | (r << 16) | (g << 8) | b;
                }
                if let Err(e) = frame.present() {
                    error!("present error: {e:?}");
                }
            }
            _ => {}
        }
    });
}
