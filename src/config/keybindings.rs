//! Keyboard bindings configuration.
//!
//! Bindings are written as strings such as `"pgup"`, `"ctrl+a"` or
//! `"pgdn, ctrl+d"` and resolved into [`KeyBinding`] matchers.

use crate::model::{KeyAction, KeyBindingError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// One concrete key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyPattern {
    /// Pattern for `code` pressed with exactly `modifiers`.
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether `event` is this key combination.
    ///
    /// Control and alt must match exactly. Shift is ignored for character
    /// keys because terminals report a shifted character as the uppercase
    /// character, with or without the shift flag.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        let significant = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.modifiers & significant == event.modifiers & significant
    }

    /// Parse a single combination such as `"ctrl+shift+tab"`.
    fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("empty key".to_string());
        }

        // "+" and "ctrl++" bind the plus key itself
        let (prefix, key) = if raw == "+" {
            ("", "+")
        } else if let Some(prefix) = raw.strip_suffix("++") {
            (prefix, "+")
        } else {
            match raw.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key.trim()),
                None => ("", raw),
            }
        };
        if key.is_empty() {
            return Err("missing key after modifier".to_string());
        }

        let mut modifiers = KeyModifiers::NONE;
        for token in prefix.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            modifiers |= match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier '{other}'")),
            };
        }

        let code = parse_key_code(key)?;
        if let KeyCode::Char(c) = code {
            if modifiers.contains(KeyModifiers::SHIFT) {
                // Terminals report shift+letter as the uppercase letter
                if !c.is_ascii_alphabetic() {
                    return Err(format!(
                        "shift cannot modify '{c}'; bind the shifted character instead"
                    ));
                }
                modifiers.remove(KeyModifiers::SHIFT);
                return Ok(Self::new(
                    KeyCode::Char(c.to_ascii_uppercase()),
                    modifiers,
                ));
            }
        }

        Ok(Self::new(code, modifiers))
    }
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        _ => match lower.strip_prefix('f').map(str::parse::<u8>) {
            Some(Ok(n @ 1..=12)) => KeyCode::F(n),
            _ => return Err(format!("unknown key '{key}'")),
        },
    };
    Ok(code)
}

/// A resolved binding: one or more alternative key combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    patterns: Vec<KeyPattern>,
}

impl KeyBinding {
    /// Binding that matches any of `patterns`.
    pub fn new(patterns: Vec<KeyPattern>) -> Self {
        Self { patterns }
    }

    /// Parse a configured value for binding `name`.
    ///
    /// Alternatives are separated by commas: `"pgup, ctrl+u"`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyBindingError::Malformed`] if the value is empty or any
    /// alternative is not a valid key description.
    pub fn parse(name: &str, value: &str) -> Result<Self, KeyBindingError> {
        let malformed = |reason: String| KeyBindingError::Malformed {
            name: name.to_string(),
            value: value.to_string(),
            reason,
        };

        if value.trim().is_empty() {
            return Err(malformed("empty binding".to_string()));
        }

        let patterns = split_alternatives(value)
            .into_iter()
            .map(KeyPattern::parse)
            .collect::<Result<Vec<_>, _>>()
            .map_err(malformed)?;

        Ok(Self { patterns })
    }

    /// Whether `event` matches any alternative.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.patterns.iter().any(|p| p.matches(event))
    }

    /// The alternatives of this binding.
    pub fn patterns(&self) -> &[KeyPattern] {
        &self.patterns
    }
}

/// Split on commas, keeping a literal `,` key (`"ctrl+,"` or a lone `","`).
fn split_alternatives(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = value.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b',' {
            continue;
        }
        let current = value[start..i].trim();
        if current.is_empty() || current.ends_with('+') {
            // comma is the key itself
            continue;
        }
        parts.push(&value[start..i]);
        start = i + 1;
    }
    parts.push(&value[start..]);
    parts
}

/// Source of named key bindings used by
/// [`LayerList::setup`](crate::view::LayerList::setup).
pub trait KeyBindingConfig {
    /// Resolve the binding called `name` (e.g. `"page-up"`).
    ///
    /// # Errors
    ///
    /// Returns [`KeyBindingError::Missing`] when no binding is configured
    /// under `name`, or [`KeyBindingError::Malformed`] when its value cannot
    /// be parsed.
    fn key_binding(&self, name: &str) -> Result<KeyBinding, KeyBindingError>;
}

/// Raw binding strings keyed by configuration name.
///
/// [`Default`] provides the stock bindings; [`KeyBindingSettings::empty`]
/// starts with none so every binding must be supplied explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindingSettings {
    bindings: HashMap<String, String>,
}

impl KeyBindingSettings {
    /// Settings with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Set (or replace) the binding for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Builder form of [`KeyBindingSettings::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove the binding for `name`.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.bindings.remove(name)
    }

    /// Raw configured value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Default binding string for `action`.
    pub fn default_for(action: KeyAction) -> &'static str {
        match action {
            KeyAction::PageUp => "pgup",
            KeyAction::PageDown => "pgdn",
            KeyAction::CompareAll => "ctrl+a",
            KeyAction::CompareLayer => "ctrl+l",
        }
    }
}

impl Default for KeyBindingSettings {
    fn default() -> Self {
        KeyAction::ALL
            .into_iter()
            .fold(Self::empty(), |settings, action| {
                settings.with(action.config_name(), Self::default_for(action))
            })
    }
}

impl KeyBindingConfig for KeyBindingSettings {
    fn key_binding(&self, name: &str) -> Result<KeyBinding, KeyBindingError> {
        let value = self.get(name).ok_or_else(|| KeyBindingError::Missing {
            name: name.to_string(),
        })?;
        KeyBinding::parse(name, value)
    }
}
