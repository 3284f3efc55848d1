//! Layer input sources.
//!
//! Layers arrive as pre-rendered text, one layer per line, from a file or
//! from piped stdin. Blank lines are skipped and trailing whitespace is
//! trimmed; everything else is kept verbatim.

use crate::model::InputError;
use std::io::{BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

/// Where the layer lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read once from a file.
    File(PathBuf),
    /// Read once from piped stdin.
    Stdin,
}

impl InputSource {
    /// Read every layer line from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file is missing and
    /// `InputError::Io` for any read failure.
    pub fn read_layers(&self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                let file = std::fs::File::open(path)?;
                parse_layer_lines(BufReader::new(file))
            }
            InputSource::Stdin => parse_layer_lines(std::io::stdin().lock()),
        }
    }
}

/// Detect the input source.
///
/// # Logic:
/// 1. If a file path is provided: read that file
/// 2. If stdin is piped: read stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}

/// Collect non-blank lines from `reader`, trailing whitespace removed.
///
/// # Errors
///
/// Returns `InputError::Io` if reading fails (including invalid UTF-8).
pub fn parse_layer_lines(reader: impl BufRead) -> Result<Vec<String>, InputError> {
    let mut layers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_end();
        if !trimmed.trim_start().is_empty() {
            layers.push(trimmed.to_string());
        }
    }
    Ok(layers)
}
