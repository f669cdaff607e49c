// File: crates/propmap-core/src/lib.rs
// Summary: Core library entry point; exports the public API for loading, symbolizing, sequencing and rendering maps.

pub mod app;
pub mod attributes;
pub mod controls;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod grid;
pub mod hud;
pub mod layer;
pub mod loader;
pub mod map;
pub mod popup;
pub mod profile;
pub mod projection;
pub mod radius;
pub mod sequence;
pub mod style;
pub mod symbol;
pub mod text;
pub mod types;
pub mod value;

pub use app::MapApp;
pub use attributes::{attribute_label, extract_attributes};
pub use controls::{ControlBinding, ControlEvent, RecordingControls};
pub use error::MapError;
pub use filter::{CategoryFilter, FilterSpec};
pub use hud::HudControls;
pub use layer::{LayerId, MapSurface, MarkerLayer, SymbolRenderer};
pub use loader::{load_dataset, DataSource, Dataset, PointFeature};
pub use map::{MapCanvas, RenderOptions};
pub use popup::{GroupedDecimal, NumberFormat, PopupTemplate};
pub use profile::{DatasetProfile, InitialView};
pub use projection::MapView;
pub use radius::{RadiusPolicy, RadiusScale};
pub use sequence::SequenceController;
pub use style::{ColorRule, MarkerStyle, Theme};
pub use symbol::Symbol;
