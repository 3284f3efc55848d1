//! layerlist
//!
//! Scrollable, selectable list of image layers with a comparison marker.
//!
//! The navigation algorithm ([`state::SelectionState`]) is pure; the
//! [`view::LayerList`] widget wires it to a [`state::LayersViewModel`],
//! configurable key bindings and a ratatui buffer.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
