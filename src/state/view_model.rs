//! View model contract consumed by the layer list, plus an in-memory model.

use std::fmt::Display;

use crate::model::CompareMode;

/// Data source behind a [`LayerList`](crate::view::LayerList).
///
/// The widget never mutates layers; it only asks for them, reads the mode,
/// and requests index and mode changes.
pub trait LayersViewModel {
    /// Printable form of a single layer.
    type Layer: Display;

    /// Request moving the comparison marker to `index`.
    ///
    /// Returns whether the change was accepted. Implementations reject
    /// out-of-range (or otherwise incompatible) indices.
    fn set_layer_index(&mut self, index: usize) -> bool;

    /// Current full list of layers, in display order.
    ///
    /// Queried fresh on every render and every navigation bound check.
    fn printable_layers(&self) -> Vec<Self::Layer>;

    /// Flip between the two comparison modes.
    fn switch_mode(&mut self);

    /// Current comparison mode.
    fn mode(&self) -> CompareMode;
}

/// In-memory view model over a list of pre-rendered layer lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerListModel {
    layers: Vec<String>,
    layer_index: usize,
    mode: CompareMode,
}

impl LayerListModel {
    /// Model in single-layer mode with the first layer selected.
    pub fn new(layers: Vec<String>) -> Self {
        Self {
            layers,
            layer_index: 0,
            mode: CompareMode::SingleLayer,
        }
    }

    /// Same model, starting in `mode`.
    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode;
        self
    }

    /// Index last accepted by [`LayersViewModel::set_layer_index`].
    pub fn layer_index(&self) -> usize {
        self.layer_index
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl LayersViewModel for LayerListModel {
    type Layer = String;

    fn set_layer_index(&mut self, index: usize) -> bool {
        if index < self.layers.len() {
            self.layer_index = index;
            true
        } else {
            false
        }
    }

    fn printable_layers(&self) -> Vec<String> {
        self.layers.clone()
    }

    fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    fn mode(&self) -> CompareMode {
        self.mode
    }
}
