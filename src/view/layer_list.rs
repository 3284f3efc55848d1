//! Scrollable layer list with a comparison marker.
//!
//! The widget owns the selection/window state and the resolved key bindings.
//! Layers and the comparison mode live in the injected [`LayersViewModel`];
//! the widget only reads them and requests changes.

use std::borrow::Cow;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Widget};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles::{CompareStyles, RowHighlight};
use crate::config::{KeyBinding, KeyBindingConfig};
use crate::model::{CompareMode, KeyAction, SetupError};
use crate::state::{LayersViewModel, SelectionState};

/// Width of the marker gutter drawn before each layer.
pub const MARKER_WIDTH: u16 = 2;

/// Callback registered with [`LayerList::set_changed_func`]: `(index, shortcut)`.
pub type LayerListHandler = Box<dyn FnMut(usize, char)>;

/// Callback registered with [`LayerList::set_transition_observer`].
pub type TransitionObserver = Box<dyn FnMut(&Transition)>;

/// Which operation produced a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Single step towards the first layer.
    Up,
    /// Single step towards the last layer.
    Down,
    /// One viewport up.
    PageUp,
    /// One viewport down.
    PageDown,
    /// Single-layer to cumulative comparison.
    CompareAll,
    /// Cumulative to single-layer comparison.
    CompareLayer,
}

/// State after a navigation or mode operation, passed to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The operation that ran.
    pub navigation: Navigation,
    /// Whether it changed anything (or, for page steps, whether the view
    /// model accepted the new index).
    pub moved: bool,
    /// Selection and window after the operation.
    pub selection: SelectionState,
    /// Comparison mode after the operation.
    pub mode: CompareMode,
}

#[derive(Debug, Clone)]
struct BoundAction {
    action: KeyAction,
    binding: KeyBinding,
}

/// Layer list widget.
///
/// # Lifecycle
/// 1. [`LayerList::new`] with a view model: selection and window at 0.
/// 2. [`LayerList::setup`] resolves the configurable key bindings. Until it
///    succeeds only the arrow keys are live.
/// 3. Per frame: [`LayerList::set_rect`] with the layout area, then
///    [`LayerList::draw`].
/// 4. Per key press: [`LayerList::handle_input`].
pub struct LayerList<M: LayersViewModel> {
    view_model: M,
    selection: SelectionState,
    bindings: Option<Vec<BoundAction>>,
    changed: Option<LayerListHandler>,
    observer: Option<TransitionObserver>,
    styles: CompareStyles,
    block: Option<Block<'static>>,
    rect: Rect,
    focused: bool,
}

impl<M: LayersViewModel> LayerList<M> {
    /// Create an unbound, unfocused list over `view_model`.
    pub fn new(view_model: M) -> Self {
        Self {
            view_model,
            selection: SelectionState::new(),
            bindings: None,
            changed: None,
            observer: None,
            styles: CompareStyles::new(),
            block: None,
            rect: Rect::default(),
            focused: false,
        }
    }

    /// Draw a surrounding block (border, title) around the rows.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Replace the highlight styles.
    pub fn with_styles(mut self, styles: CompareStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Resolve every configurable action against `config`.
    ///
    /// Bindings are installed only if all of them resolve. Once installed,
    /// the table stays fixed for the lifetime of the list.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::AlreadyBound`] if a previous call succeeded, or
    /// [`SetupError::Binding`] naming the first action whose binding is
    /// missing or malformed.
    pub fn setup<C>(&mut self, config: &C) -> Result<(), SetupError>
    where
        C: KeyBindingConfig + ?Sized,
    {
        if self.bindings.is_some() {
            return Err(SetupError::AlreadyBound);
        }

        let bindings = KeyAction::ALL
            .into_iter()
            .map(|action| {
                config
                    .key_binding(action.config_name())
                    .map(|binding| BoundAction { action, binding })
                    .map_err(|source| SetupError::Binding { action, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = bindings.len(), "layer list key bindings resolved");
        self.bindings = Some(bindings);
        Ok(())
    }

    /// Whether [`LayerList::setup`] has succeeded.
    pub fn is_ready(&self) -> bool {
        self.bindings.is_some()
    }

    /// Register the `(index, shortcut)` change handler.
    ///
    /// The list never fires it on its own; owners call
    /// [`LayerList::notify_changed`] when a change should be announced.
    pub fn set_changed_func(&mut self, handler: impl FnMut(usize, char) + 'static) -> &mut Self {
        self.changed = Some(Box::new(handler));
        self
    }

    /// Invoke the change handler with the current selection.
    pub fn notify_changed(&mut self, shortcut: char) {
        let index = self.selection.selection_index();
        if let Some(changed) = self.changed.as_mut() {
            changed(index, shortcut);
        }
    }

    /// Register an observer called after every navigation or mode operation.
    pub fn set_transition_observer(
        &mut self,
        observer: impl FnMut(&Transition) + 'static,
    ) -> &mut Self {
        self.observer = Some(Box::new(observer));
        self
    }

    // ===== Focus =====

    /// Give the list keyboard focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Take keyboard focus away.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the list has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    // ===== Accessors =====

    /// Current selection and window.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// The injected view model.
    pub fn view_model(&self) -> &M {
        &self.view_model
    }

    /// Mutable access to the injected view model.
    pub fn view_model_mut(&mut self) -> &mut M {
        &mut self.view_model
    }

    // ===== Geometry =====

    /// Set the area the list occupies, as decided by the surrounding layout.
    ///
    /// If the new height no longer shows the selection (the terminal shrank,
    /// or keys arrived before the first layout), the window is shifted just
    /// enough to bring it back.
    pub fn set_rect(&mut self, area: Rect) {
        self.rect = area;
        if self.selection.reveal(self.viewport_height()) {
            debug!(
                selection_index = self.selection.selection_index(),
                window_lower_bound = self.selection.window_lower_bound(),
                "layer list window adjusted to new height"
            );
        }
    }

    /// Area last passed to [`LayerList::set_rect`].
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Area available for rows (inside the block, if any).
    pub fn inner_rect(&self) -> Rect {
        match &self.block {
            Some(block) => block.inner(self.rect),
            None => self.rect,
        }
    }

    fn viewport_height(&self) -> usize {
        usize::from(self.inner_rect().height)
    }

    fn item_count(&self) -> usize {
        self.view_model.printable_layers().len()
    }

    // ===== Navigation =====

    /// Move the marker up one layer, scrolling at the top edge.
    ///
    /// Does not notify the view model; the arrow-key path asks the view
    /// model to accept the new index before calling this.
    pub fn move_selection_up(&mut self) -> bool {
        let moved = self.selection.move_up();
        self.emit(Navigation::Up, moved);
        moved
    }

    /// Move the marker down one layer, scrolling at the bottom edge.
    pub fn move_selection_down(&mut self) -> bool {
        let item_count = self.item_count();
        let moved = self
            .selection
            .move_down(item_count, self.viewport_height());
        self.emit(Navigation::Down, moved);
        moved
    }

    /// Move the marker up one viewport and hand the index to the view model.
    ///
    /// Returns the view model's answer, or `false` for an empty list or a
    /// zero-height viewport.
    pub fn page_up(&mut self) -> bool {
        let item_count = self.item_count();
        let moved = match self.selection.page_up(item_count, self.viewport_height()) {
            Some(index) => self.view_model.set_layer_index(index),
            None => false,
        };
        self.emit(Navigation::PageUp, moved);
        moved
    }

    /// Move the marker down one viewport and hand the index to the view model.
    pub fn page_down(&mut self) -> bool {
        let item_count = self.item_count();
        let moved = match self.selection.page_down(item_count, self.viewport_height()) {
            Some(index) => self.view_model.set_layer_index(index),
            None => false,
        };
        self.emit(Navigation::PageDown, moved);
        moved
    }

    /// Switch to cumulative comparison. Only live in single-layer mode.
    pub fn compare_all(&mut self) -> bool {
        let toggled = self.view_model.mode() == CompareMode::SingleLayer;
        if toggled {
            self.view_model.switch_mode();
        }
        self.emit(Navigation::CompareAll, toggled);
        toggled
    }

    /// Switch back to single-layer comparison. Only live in cumulative mode.
    pub fn compare_layer(&mut self) -> bool {
        let toggled = self.view_model.mode() == CompareMode::AllLayers;
        if toggled {
            self.view_model.switch_mode();
        }
        self.emit(Navigation::CompareLayer, toggled);
        toggled
    }

    fn run_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::PageUp => self.page_up(),
            KeyAction::PageDown => self.page_down(),
            KeyAction::CompareAll => self.compare_all(),
            KeyAction::CompareLayer => self.compare_layer(),
        }
    }

    fn emit(&mut self, navigation: Navigation, moved: bool) {
        let transition = Transition {
            navigation,
            moved,
            selection: self.selection,
            mode: self.view_model.mode(),
        };
        debug!(
            ?navigation,
            moved,
            selection_index = transition.selection.selection_index(),
            window_lower_bound = transition.selection.window_lower_bound(),
            mode = ?transition.mode,
            "layer list transition"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer(&transition);
        }
    }

    // ===== Input =====

    /// Process one key event. Returns whether it was consumed.
    ///
    /// Arrow keys are built in: up/left and down/right first ask the view
    /// model to accept the neighbouring index, then step the marker.
    /// Configurable bindings are tried in [`KeyAction::ALL`] order; the first
    /// matching action that consumes the event ends dispatch.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let consumed = match key.code {
            KeyCode::Up | KeyCode::Left => self.step_up(),
            KeyCode::Down | KeyCode::Right => self.step_down(),
            _ => false,
        };

        let matching: Vec<KeyAction> = self
            .bindings
            .iter()
            .flatten()
            .filter(|bound| bound.binding.matches(&key))
            .map(|bound| bound.action)
            .collect();

        let mut consumed_by_binding = false;
        for action in matching {
            if self.run_action(action) {
                consumed_by_binding = true;
                break;
            }
        }

        consumed || consumed_by_binding
    }

    fn step_up(&mut self) -> bool {
        let Some(target) = self.selection.selection_index().checked_sub(1) else {
            return false;
        };
        self.view_model.set_layer_index(target) && self.move_selection_up()
    }

    fn step_down(&mut self) -> bool {
        let target = self.selection.selection_index() + 1;
        self.view_model.set_layer_index(target) && self.move_selection_down()
    }

    // ===== Rendering =====

    /// Render into `buf` within the area set by [`LayerList::set_rect`].
    ///
    /// Each visible row is a marker gutter of [`MARKER_WIDTH`] columns, a
    /// space, and the layer text. Rendering never changes navigation state.
    pub fn draw(&self, buf: &mut Buffer) {
        let area = self.rect.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        if let Some(block) = &self.block {
            let block = if self.focused {
                block.clone().border_style(self.styles.focused_border_style())
            } else {
                block.clone()
            };
            block.render(area, buf);
        }

        let inner = self.inner_rect().intersection(area);
        let layers = self.view_model.printable_layers();
        let mode = self.view_model.mode();
        let selection_index = self.selection.selection_index();
        let window_lower_bound = self.selection.window_lower_bound();

        for row in 0..inner.height {
            let index = window_lower_bound + usize::from(row);
            let Some(layer) = layers.get(index) else {
                break;
            };
            let highlight = RowHighlight::classify(index, selection_index, mode);
            let y = inner.y + row;

            let gutter_width = MARKER_WIDTH.min(inner.width);
            buf.set_stringn(
                inner.x,
                y,
                " ".repeat(usize::from(gutter_width)),
                usize::from(gutter_width),
                self.styles.gutter_style(highlight),
            );

            let text_width = usize::from(inner.width.saturating_sub(MARKER_WIDTH));
            if text_width > 0 {
                let text = format!(" {layer}");
                buf.set_stringn(
                    inner.x + MARKER_WIDTH,
                    y,
                    fit_to_width(&text, text_width).as_ref(),
                    text_width,
                    self.styles.text_style(highlight),
                );
            }
        }
    }
}

impl<M> fmt::Debug for LayerList<M>
where
    M: LayersViewModel + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerList")
            .field("view_model", &self.view_model)
            .field("selection", &self.selection)
            .field("bindings", &self.bindings)
            .field("rect", &self.rect)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

/// Fit `text` into exactly `max_width` columns.
///
/// Long text is cut and ends in `…`; short text is padded with spaces so the
/// row highlight spans the whole width.
fn fit_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    let width = text.width();
    if width == max_width {
        return Cow::Borrowed(text);
    }
    if width < max_width {
        return Cow::Owned(format!("{text}{}", " ".repeat(max_width - width)));
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    used += 1;
    if used < max_width {
        out.push_str(&" ".repeat(max_width - used));
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "layer_list_tests.rs"]
mod tests;
