//! Comparison highlight styling.
//!
//! Maps each visible row to a [`RowHighlight`] and each highlight to the
//! styles of the marker gutter and the text body.

use crate::model::CompareMode;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit configuration, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowHighlight =====

/// How a row is marked relative to the comparison point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHighlight {
    /// The comparison point itself.
    Selected,
    /// Before the selection and part of the cumulative comparison.
    Included,
    /// Before the selection but not compared.
    Passed,
    /// After the selection.
    Plain,
}

impl RowHighlight {
    /// Classify row `index` for a list whose marker sits at `selection_index`.
    ///
    /// The first row is never "included": in cumulative mode it stays
    /// "passed" like in single-layer mode.
    pub fn classify(index: usize, selection_index: usize, mode: CompareMode) -> Self {
        if index == selection_index {
            RowHighlight::Selected
        } else if index > 0 && index < selection_index && mode == CompareMode::AllLayers {
            RowHighlight::Included
        } else if index < selection_index {
            RowHighlight::Passed
        } else {
            RowHighlight::Plain
        }
    }

    /// Whether the marker gutter of this row is drawn reversed.
    pub fn marks_gutter(self) -> bool {
        !matches!(self, RowHighlight::Plain)
    }
}

// ===== CompareStyles =====

/// Colors of the layer list.
///
/// Selected and included rows share red, passed rows are blue, text is white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareStyles {
    selected: Color,
    included: Color,
    passed: Color,
    text: Color,
    focused_border: Color,
    colors_enabled: bool,
}

impl CompareStyles {
    /// Default palette, honouring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Default palette with explicit color configuration.
    ///
    /// With colors disabled the same cells are marked with the reversed
    /// modifier instead.
    pub fn with_color_config(config: ColorConfig) -> Self {
        Self {
            selected: Color::Red,
            included: Color::Red,
            passed: Color::Blue,
            text: Color::White,
            focused_border: Color::Cyan,
            colors_enabled: config.colors_enabled(),
        }
    }

    fn highlight_color(&self, highlight: RowHighlight) -> Color {
        match highlight {
            RowHighlight::Selected => self.selected,
            RowHighlight::Included => self.included,
            RowHighlight::Passed => self.passed,
            RowHighlight::Plain => Color::Reset,
        }
    }

    /// Style of the marker gutter.
    ///
    /// Marked gutters carry the highlight as background.
    pub fn gutter_style(&self, highlight: RowHighlight) -> Style {
        match (highlight.marks_gutter(), self.colors_enabled) {
            (false, _) => Style::default(),
            (true, true) => Style::default()
                .fg(Color::Reset)
                .bg(self.highlight_color(highlight)),
            (true, false) => Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Style of the text body. Only the selected row is reversed.
    pub fn text_style(&self, highlight: RowHighlight) -> Style {
        match (highlight == RowHighlight::Selected, self.colors_enabled) {
            (false, true) => Style::default().fg(self.text),
            (false, false) => Style::default(),
            (true, true) => Style::default().fg(Color::Reset).bg(self.text),
            (true, false) => Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Border style of the surrounding block when the list has focus.
    pub fn focused_border_style(&self) -> Style {
        if self.colors_enabled {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        }
    }
}

impl Default for CompareStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
