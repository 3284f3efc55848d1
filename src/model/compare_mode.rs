//! Layer comparison mode.

use std::fmt;

/// How the selected layer is compared against the rest of the list.
///
/// Owned and reported by the view model; the widget only reads it and
/// requests toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareMode {
    /// Only the selected layer is the comparison point.
    #[default]
    SingleLayer,
    /// Every layer up to and including the selection is included.
    AllLayers,
}

impl CompareMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CompareMode::SingleLayer => CompareMode::AllLayers,
            CompareMode::AllLayers => CompareMode::SingleLayer,
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::SingleLayer => f.write_str("Single layer"),
            CompareMode::AllLayers => f.write_str("All layers"),
        }
    }
}
