//! Error types for the layer list.
//!
//! Errors are `thiserror` enums that compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`SetupError`] - the widget could not be bound, or was already bound
//!   - [`KeyBindingError`] - the underlying lookup/parse failure for one binding name
//! - [`InputError`] - reading layer lines from a file or stdin failed
//!
//! # Recovery Strategy
//!
//! Setup errors are returned to the caller instead of aborting the process: the
//! surrounding application decides whether to report and exit or to keep running
//! with a non-interactive list. Navigation never produces errors; out-of-range
//! requests are absorbed and reported only as a `false` "not moved" result.

use std::path::PathBuf;
use thiserror::Error;

use super::KeyAction;

/// Failure to resolve one named key binding from configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyBindingError {
    /// No binding with this name exists in the configuration.
    #[error("no key binding configured for '{name}'")]
    Missing {
        /// Configuration name that was looked up (e.g. `"page-up"`).
        name: String,
    },

    /// A binding exists but its value is not a valid key description.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerlist::model::KeyBindingError;
    ///
    /// let err = KeyBindingError::Malformed {
    ///     name: "page-up".to_string(),
    ///     value: "ctrl+".to_string(),
    ///     reason: "missing key after modifier".to_string(),
    /// };
    /// assert!(err.to_string().contains("page-up"));
    /// assert!(err.to_string().contains("ctrl+"));
    /// ```
    #[error("invalid key binding '{value}' for '{name}': {reason}")]
    Malformed {
        /// Configuration name of the binding.
        name: String,
        /// Raw configured value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Failure of [`LayerList::setup`](crate::view::LayerList::setup).
///
/// The widget's binding table is left exactly as it was: absent after a
/// failed first setup, unchanged after a rejected second one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A configurable action could not be bound.
    #[error("setup error during {action}: {source}")]
    Binding {
        /// The action whose binding failed.
        action: KeyAction,
        /// Underlying lookup failure.
        #[source]
        source: KeyBindingError,
    },

    /// The widget already has a resolved binding table.
    #[error("key bindings are already resolved for this layer list")]
    AlreadyBound,
}

impl SetupError {
    /// The action whose binding failed, if the error is about one binding.
    pub fn action(&self) -> Option<KeyAction> {
        match self {
            SetupError::Binding { action, .. } => Some(*action),
            SetupError::AlreadyBound => None,
        }
    }
}

/// Errors encountered when reading layer lines from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified layer file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use layerlist::model::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file argument was given and stdin is an interactive terminal.
    ///
    /// **Recovery**: show both invocation modes (`layerlist layers.txt` and
    /// `cmd | layerlist`) and exit with non-zero status.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
