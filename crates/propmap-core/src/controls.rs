// File: crates/propmap-core/src/controls.rs
// Summary: UI-binding interface between the sequencing logic and whatever draws the controls.

use crate::filter::CategoryFilter;

/// User input, already decoded from the front-end (window HUD, CLI, tests).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Slider drag to an absolute index.
    Slide(usize),
    Forward,
    Reverse,
    /// Category selector change.
    Filter(CategoryFilter),
}

/// What the controller pushes back to the controls after each transition.
pub trait ControlBinding {
    /// Slider range (`len` positions) and the selectable filter states, once per dataset.
    fn configure(&mut self, len: usize, filters: &[CategoryFilter]);
    fn set_index(&mut self, index: usize);
    fn set_label(&mut self, text: &str);
    fn set_filter(&mut self, filter: &CategoryFilter);
    /// Popup of the selected marker, rebuilt for the current attribute; `None` hides it.
    fn set_popup(&mut self, html: Option<&str>);
}

/// Headless binding that keeps the last values pushed to it.
#[derive(Clone, Debug, Default)]
pub struct RecordingControls {
    pub len: usize,
    pub filters: Vec<CategoryFilter>,
    pub index: usize,
    pub label: String,
    pub filter: CategoryFilter,
    pub popup: Option<String>,
    pub updates: usize,
}

impl ControlBinding for RecordingControls {
    fn configure(&mut self, len: usize, filters: &[CategoryFilter]) {
        self.len = len;
        self.filters = filters.to_vec();
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
        self.updates += 1;
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn set_filter(&mut self, filter: &CategoryFilter) {
        self.filter = filter.clone();
    }

    fn set_popup(&mut self, html: Option<&str>) {
        self.popup = html.map(str::to_string);
    }
}
