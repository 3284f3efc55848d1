//! Domain model types (pure).

pub mod compare_mode;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use compare_mode::CompareMode;
pub use error::{InputError, KeyBindingError, SetupError};
pub use key_action::KeyAction;
