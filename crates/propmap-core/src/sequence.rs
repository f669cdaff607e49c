// File: crates/propmap-core/src/sequence.rs
// Summary: Attribute sequence controller; the slider/step state machine over the attribute list.

use crate::attributes::attribute_label;

/// Current position in a fixed, ordered attribute list.
/// Contract: `index < len()` whenever the list is non-empty; it stays 0 otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceController {
    attributes: Vec<String>,
    index: usize,
}

impl SequenceController {
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes, index: 0 }
    }

    pub fn len(&self) -> usize { self.attributes.len() }

    pub fn is_empty(&self) -> bool { self.attributes.is_empty() }

    pub fn index(&self) -> usize { self.index }

    pub fn attributes(&self) -> &[String] { &self.attributes }

    /// Attribute at the current index; `None` for an empty list.
    pub fn current(&self) -> Option<&str> {
        self.attributes.get(self.index).map(String::as_str)
    }

    /// Display label for the current attribute, empty when there is none.
    pub fn label(&self) -> &str {
        self.current().map(attribute_label).unwrap_or("")
    }

    /// Slider drag: absolute set, clamped to the last index.
    pub fn set(&mut self, index: usize) -> usize {
        if !self.is_empty() {
            self.index = index.min(self.len() - 1);
        }
        self.index
    }

    /// Step forward, wrapping from the last index to 0.
    pub fn forward(&mut self) -> usize {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
        }
        self.index
    }

    /// Step back, wrapping from 0 to the last index.
    pub fn reverse(&mut self) -> usize {
        if !self.is_empty() {
            self.index = (self.index + self.len() - 1) % self.len();
        }
        self.index
    }
}
