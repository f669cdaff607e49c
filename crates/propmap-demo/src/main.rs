// File: crates/propmap-demo/src/main.rs
// Summary: Headless demo; loads a dataset profile and renders the attribute sequence to PNG frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use propmap_core::style;
use propmap_core::{
    CategoryFilter, ControlEvent, DataSource, DatasetProfile, HudControls, MapApp, MapCanvas, RenderOptions,
    load_dataset,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Render proportional-symbol map frames to PNG")]
struct Args {
    /// Built-in profile name (crime, population) or path to a .toml profile
    #[arg(short, long, default_value = "population")]
    profile: String,

    /// GeoJSON path or http(s) URL; overrides the profile's data location
    #[arg(short, long)]
    data: Option<String>,

    /// Output directory for the frames
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Render only this attribute index instead of the whole sequence
    #[arg(short, long)]
    index: Option<usize>,

    /// Category filter value ("all" for no filter)
    #[arg(short, long, default_value = "all")]
    filter: String,

    #[arg(long, default_value_t = 1024)]
    width: i32,

    #[arg(long, default_value_t = 640)]
    height: i32,

    /// Theme preset: light, dark, high-contrast
    #[arg(long, default_value = "light")]
    theme: String,

    /// Skip text rendering (labels, chips, title)
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let profile = DatasetProfile::load(&args.profile)
        .with_context(|| format!("failed to load profile '{}'", args.profile))?;
    let source = DataSource::parse(args.data.as_deref().unwrap_or(&profile.data));
    let dataset = load_dataset(&source).with_context(|| format!("failed to load data from {}", source.describe()))?;
    if dataset.is_empty() {
        warn!(source = %source.describe(), "dataset has no point features");
    }

    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        theme: style::find(&args.theme),
        draw_labels: !args.no_labels,
        ..RenderOptions::default()
    };

    let mut hud = HudControls::new(profile.name.clone());
    let name = profile.name.clone();
    let mut app = MapApp::new(dataset, profile);
    let mut canvas = MapCanvas::new(app.initial_view(opts.width, opts.height));
    app.mount(&mut canvas, &mut hud);

    let filter = CategoryFilter::parse(&args.filter);
    if filter != CategoryFilter::All {
        if app.profile().filter.is_none() {
            warn!(profile = %name, "profile has no category filter; --filter ignored");
        } else {
            app.handle(ControlEvent::Filter(filter), &mut canvas, &mut hud);
        }
    }
    info!(markers = app.selection().len(), attributes = app.sequence().len(), "ready");

    let frames = frame_indices(args.index, app.sequence().len());

    for i in frames {
        app.handle(ControlEvent::Slide(i), &mut canvas, &mut hud);
        let out = frame_path(&args.out, &name, app.sequence().index(), app.sequence().label());
        canvas
            .render_to_png(&opts, Some(&hud), &out)
            .with_context(|| format!("failed to render {}", out.display()))?;
        info!(path = %out.display(), attribute = ?app.sequence().current(), "wrote frame");
    }

    Ok(())
}

/// Attribute indices to render. An out-of-range `--index` is clamped to the last frame with a warning.
fn frame_indices(requested: Option<usize>, len: usize) -> Vec<usize> {
    let last = len.saturating_sub(1);
    match requested {
        Some(i) if i > last => {
            warn!(index = i, attributes = len, "--index out of range; rendering frame {}", last);
            vec![last]
        }
        Some(i) => vec![i],
        None => (0..=last).collect(),
    }
}

/// Produce output file name like target/out/map_<profile>_<index>_<label>.png
fn frame_path(dir: &Path, profile: &str, index: usize, label: &str) -> PathBuf {
    let label: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if label.is_empty() {
        dir.join(format!("map_{}_{:02}.png", profile, index))
    } else {
        dir.join(format!("map_{}_{:02}_{}.png", profile, index, label))
    }
}
