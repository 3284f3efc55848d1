//! Navigation state and the view model contract.

pub mod selection;
pub mod view_model;

pub use selection::SelectionState;
pub use view_model::{LayerListModel, LayersViewModel};
