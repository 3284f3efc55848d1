//! Configurable keyboard actions of the layer list.

use std::fmt;

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from a
/// `crossterm::event::KeyEvent` to a `KeyAction` is resolved at setup time
/// from configuration (see [`crate::config::KeyBindingConfig`]).
///
/// Arrow keys are not configurable and are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the comparison marker up by one viewport height. Default: PgUp
    PageUp,
    /// Move the comparison marker down by one viewport height. Default: PgDn
    PageDown,
    /// Switch from single-layer to cumulative comparison. Default: Ctrl+a
    CompareAll,
    /// Switch from cumulative back to single-layer comparison. Default: Ctrl+l
    CompareLayer,
}

impl KeyAction {
    /// Every configurable action, in dispatch order.
    pub const ALL: [KeyAction; 4] = [
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::CompareAll,
        KeyAction::CompareLayer,
    ];

    /// Name of the binding in configuration (`[keybinding]` table key).
    pub fn config_name(self) -> &'static str {
        match self {
            KeyAction::PageUp => "page-up",
            KeyAction::PageDown => "page-down",
            KeyAction::CompareAll => "compare-all",
            KeyAction::CompareLayer => "compare-layer",
        }
    }

    /// Look up an action by its configuration name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.config_name() == name)
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}
