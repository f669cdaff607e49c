// File: crates/propmap-core/src/app.rs
// Summary: Map application controller; wires dataset, sequence, filter and renderer to a surface and controls.
// Notes:
// - Every event re-renders synchronously; there is no debouncing or batching.
// - The filter changes the feature selection only; the attribute index is preserved.
// - A selected marker's popup follows the layer: rebuilt for the new attribute, or
//   dropped once its feature is filtered out.

use tracing::debug;

use crate::attributes::extract_attributes;
use crate::controls::{ControlBinding, ControlEvent};
use crate::filter::{select, CategoryFilter};
use crate::layer::{MapSurface, MarkerLayer, SymbolRenderer};
use crate::loader::Dataset;
use crate::map::MapCanvas;
use crate::profile::DatasetProfile;
use crate::projection::{MapView, MAX_ZOOM};
use crate::sequence::SequenceController;
use crate::types::Insets;

pub struct MapApp {
    dataset: Dataset,
    profile: DatasetProfile,
    sequence: SequenceController,
    filter: CategoryFilter,
    renderer: SymbolRenderer,
    /// Feature whose popup is open.
    selected: Option<usize>,
}

impl MapApp {
    pub fn new(dataset: Dataset, profile: DatasetProfile) -> Self {
        let attributes = extract_attributes(&dataset, &profile.allow_list);
        debug!(attributes = ?attributes, "attribute sequence");
        Self {
            dataset,
            profile,
            sequence: SequenceController::new(attributes),
            filter: CategoryFilter::All,
            renderer: SymbolRenderer::new(),
            selected: None,
        }
    }

    pub fn dataset(&self) -> &Dataset { &self.dataset }

    pub fn profile(&self) -> &DatasetProfile { &self.profile }

    pub fn sequence(&self) -> &SequenceController { &self.sequence }

    pub fn filter(&self) -> &CategoryFilter { &self.filter }

    pub fn layer(&self) -> Option<&MarkerLayer> { self.renderer.current() }

    /// Feature index of the open popup, if any.
    pub fn selected(&self) -> Option<usize> { self.selected }

    /// Filter states offered by the selector; empty when the profile has no category filter.
    pub fn filter_choices(&self) -> Vec<CategoryFilter> {
        self.profile.filter.as_ref().map(|f| f.choices()).unwrap_or_default()
    }

    /// Configure the controls for this dataset and draw the first layer.
    pub fn mount<S, C>(&mut self, surface: &mut S, controls: &mut C)
    where
        S: MapSurface + ?Sized,
        C: ControlBinding + ?Sized,
    {
        controls.configure(self.sequence.len(), &self.filter_choices());
        self.refresh(surface, controls);
    }

    /// Apply one control event, then re-render and update the controls.
    pub fn handle<S, C>(&mut self, event: ControlEvent, surface: &mut S, controls: &mut C)
    where
        S: MapSurface + ?Sized,
        C: ControlBinding + ?Sized,
    {
        match event {
            ControlEvent::Slide(i) => { self.sequence.set(i); }
            ControlEvent::Forward => { self.sequence.forward(); }
            ControlEvent::Reverse => { self.sequence.reverse(); }
            ControlEvent::Filter(f) => { self.filter = f; }
        }
        self.refresh(surface, controls);
    }

    /// The profile's initial view, or a fit of the whole dataset when it has none.
    pub fn initial_view(&self, width: i32, height: i32) -> MapView {
        match self.profile.view {
            Some(v) => MapView::new(v.lat, v.lon, v.zoom, width, height),
            None => MapView::fit_bounds(&self.dataset, width, height, &Insets::default(), MAX_ZOOM.min(16.0)),
        }
    }

    /// Show the popup of the marker under `(x, y)`, or hide it on a miss.
    /// Returns whether a marker was hit.
    pub fn select_popup_at<C>(&mut self, canvas: &MapCanvas, controls: &mut C, x: f32, y: f32) -> bool
    where
        C: ControlBinding + ?Sized,
    {
        match canvas.symbol_at(x, y) {
            Some(symbol) => {
                debug!(feature = symbol.feature, "marker selected");
                self.selected = Some(symbol.feature);
                controls.set_popup(Some(&symbol.popup));
                true
            }
            None => {
                self.dismiss_popup(controls);
                false
            }
        }
    }

    pub fn dismiss_popup<C: ControlBinding + ?Sized>(&mut self, controls: &mut C) {
        self.selected = None;
        controls.set_popup(None);
    }

    /// Feature indices passing the current filter.
    pub fn selection(&self) -> Vec<usize> {
        select(&self.dataset, &self.filter, self.profile.filter_field())
    }

    fn refresh<S, C>(&mut self, surface: &mut S, controls: &mut C)
    where
        S: MapSurface + ?Sized,
        C: ControlBinding + ?Sized,
    {
        let selection = self.selection();
        let layer = self.renderer.render(surface, &self.dataset, &selection, self.sequence.current(), &self.profile);
        let popup = self
            .selected
            .and_then(|i| layer.symbols.iter().find(|s| s.feature == i))
            .map(|s| s.popup.clone());
        if popup.is_none() {
            self.selected = None;
        }
        controls.set_index(self.sequence.index());
        controls.set_label(self.sequence.label());
        controls.set_filter(&self.filter);
        controls.set_popup(popup.as_deref());
    }
}
