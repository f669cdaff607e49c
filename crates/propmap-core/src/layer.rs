// File: crates/propmap-core/src/layer.rs
// Summary: Marker layers, the map-surface boundary trait, and the renderer that owns the current layer.
// Notes:
// - A layer is disposable: every render builds a new one, removes the previous layer
//   from the surface, then adds the new one. No incremental diffing.

use tracing::debug;

use crate::loader::Dataset;
use crate::profile::DatasetProfile;
use crate::symbol::{symbolize, Symbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// A complete overlay of markers for one attribute/filter combination.
#[derive(Clone, Debug)]
pub struct MarkerLayer {
    pub id: LayerId,
    pub attribute: Option<String>,
    pub symbols: Vec<Symbol>,
}

/// The map collaborator: the only operations the core needs from it.
pub trait MapSurface {
    fn add_layer(&mut self, layer: &MarkerLayer);
    fn remove_layer(&mut self, id: LayerId);
}

/// Owns the currently displayed layer and replaces it on every render.
#[derive(Debug, Default)]
pub struct SymbolRenderer {
    current: Option<MarkerLayer>,
    next_id: u64,
}

impl SymbolRenderer {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> Option<&MarkerLayer> { self.current.as_ref() }

    /// Rebuild the layer for `selection` under `attribute` and swap it onto `surface`.
    pub fn render<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        dataset: &Dataset,
        selection: &[usize],
        attribute: Option<&str>,
        profile: &DatasetProfile,
    ) -> &MarkerLayer {
        let layer = MarkerLayer {
            id: self.allocate_id(),
            attribute: attribute.map(str::to_string),
            symbols: symbolize(dataset, selection, attribute, profile),
        };
        if let Some(old) = self.current.take() {
            surface.remove_layer(old.id);
        }
        surface.add_layer(&layer);
        debug!(layer = layer.id.0, attribute = ?attribute, markers = layer.symbols.len(), "replaced marker layer");
        self.current.insert(layer)
    }

    /// Remove the current layer, if any.
    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(old) = self.current.take() {
            surface.remove_layer(old.id);
        }
    }

    fn allocate_id(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }
}
