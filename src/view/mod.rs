//! TUI rendering and terminal management (impure shell)

pub mod layer_list;
pub mod styles;

pub use layer_list::{LayerList, LayerListHandler, Navigation, Transition, TransitionObserver};
pub use styles::{ColorConfig, CompareStyles, RowHighlight};

use crate::config::KeyBindingSettings;
use crate::model::{CompareMode, SetupError};
use crate::state::{LayerListModel, LayersViewModel};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Key bindings could not be installed
    #[error("Key binding setup failed: {0}")]
    Setup(#[from] SetupError),
}

/// Startup options for the interactive viewer, resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Start in cumulative comparison mode.
    pub all_layers: bool,
    /// Whether highlights use colors or the reversed modifier.
    pub color_config: ColorConfig,
    /// Configurable key bindings.
    pub key_bindings: KeyBindingSettings,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            all_layers: false,
            color_config: ColorConfig::from_env_and_args(false),
            key_bindings: KeyBindingSettings::default(),
        }
    }
}

/// Build a focused, bound layer list over `layers`.
///
/// # Errors
///
/// Returns [`SetupError`] if any configured key binding fails to resolve.
pub fn build_layer_list(
    layers: Vec<String>,
    options: &AppOptions,
) -> Result<LayerList<LayerListModel>, SetupError> {
    let mode = if options.all_layers {
        CompareMode::AllLayers
    } else {
        CompareMode::SingleLayer
    };
    let model = LayerListModel::new(layers).with_mode(mode);

    let mut list = LayerList::new(model)
        .with_block(Block::bordered().title(" Layers "))
        .with_styles(CompareStyles::with_color_config(options.color_config));
    list.setup(&options.key_bindings)?;
    list.focus();
    list.set_changed_func(|index, shortcut| {
        debug!(index, %shortcut, "layer selection announced");
    });
    Ok(list)
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    list: LayerList<LayerListModel>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(list: LayerList<LayerListModel>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal, list })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C). Blocks on the next
    /// terminal event; redraws after every key press and resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an existing terminal (e.g. a `TestBackend`) and list.
    pub fn with_terminal(terminal: Terminal<B>, list: LayerList<LayerListModel>) -> Self {
        Self { terminal, list }
    }

    /// Handle a single key press. Returns `true` when the app should quit.
    ///
    /// Ctrl+C always quits. Otherwise the list sees the key first, and `q`
    /// or `Esc` quit only if the list did not consume them.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.list.handle_input(key) {
            if let KeyCode::Char(shortcut) = key.code {
                self.list.notify_changed(shortcut);
            }
            return false;
        }

        matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
    }

    /// Render the list and the status line.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let list = &mut self.list;
        self.terminal.draw(|frame| {
            let [list_area, status_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

            list.set_rect(list_area);
            list.draw(frame.buffer_mut());

            frame.render_widget(
                Paragraph::new(status_line(list))
                    .style(Style::default().add_modifier(Modifier::DIM)),
                status_area,
            );
        })?;
        Ok(())
    }

    /// The layer list driven by this app.
    pub fn list(&self) -> &LayerList<LayerListModel> {
        &self.list
    }

    /// The terminal (for inspecting a `TestBackend` buffer in tests).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn status_line(list: &LayerList<LayerListModel>) -> String {
    let model = list.view_model();
    let position = if model.is_empty() {
        0
    } else {
        list.selection().selection_index() + 1
    };
    format!(
        " {} | layer {}/{} | q quit",
        model.mode(),
        position,
        model.len()
    )
}

/// Run the interactive viewer over `layers`.
///
/// Key bindings are resolved before the terminal is touched, so a bad
/// configuration is reported on a normal screen.
pub fn run_with_layers(layers: Vec<String>, options: &AppOptions) -> Result<(), TuiError> {
    let list = build_layer_list(layers, options)?;
    info!(
        layers = list.view_model().len(),
        mode = %list.view_model().mode(),
        "starting layer list"
    );

    let mut app = TuiApp::new(list)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
