//! Selection index and scroll window of the layer list.
//!
//! Pure state: every operation takes the current item count and viewport
//! height as arguments, so the algorithm runs without a terminal or a view
//! model. The widget layer supplies both values and forwards the final index
//! to the view model.

/// Comparison marker position plus the first visible row.
///
/// # Invariants
/// - `selection_index < item_count` whenever `item_count > 0`.
/// - After a navigation operation completes, the selection is visible:
///   `window_lower_bound <= selection_index < window_lower_bound + viewport_height`.
///   This is maintained by the adjustment logic, not by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selection_index: usize,
    window_lower_bound: usize,
}

impl SelectionState {
    /// Selection and window both at the top of the list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the marked comparison item.
    pub fn selection_index(&self) -> usize {
        self.selection_index
    }

    /// Index of the first visible item.
    pub fn window_lower_bound(&self) -> usize {
        self.window_lower_bound
    }

    /// Whether `index` is inside the current window.
    pub fn is_visible(&self, index: usize, viewport_height: usize) -> bool {
        index >= self.window_lower_bound && index - self.window_lower_bound < viewport_height
    }

    /// Move the marker up one item.
    ///
    /// Returns `false` without touching state when already at the top. The
    /// window follows only when the selection leaves it through the top edge.
    pub fn move_up(&mut self) -> bool {
        if self.selection_index == 0 {
            return false;
        }
        self.selection_index -= 1;
        if self.selection_index < self.window_lower_bound {
            self.window_lower_bound -= 1;
        }
        true
    }

    /// Move the marker down one item.
    ///
    /// Returns `false` without touching state when already on the last item
    /// (or the list is empty). The window follows only when the selection
    /// leaves it through the bottom edge. With no viewport yet (height 0)
    /// the window stays put; [`SelectionState::reveal`] catches up once the
    /// height is known.
    pub fn move_down(&mut self, item_count: usize, viewport_height: usize) -> bool {
        if self.selection_index + 1 >= item_count {
            return false;
        }
        self.selection_index += 1;
        if viewport_height > 0 && self.selection_index - self.window_lower_bound >= viewport_height
        {
            self.window_lower_bound += 1;
        }
        true
    }

    /// Shift the window by the least amount that brings the selection back
    /// into view, e.g. after the viewport shrank.
    ///
    /// Returns whether the window moved. A zero-height viewport is ignored.
    pub fn reveal(&mut self, viewport_height: usize) -> bool {
        if viewport_height == 0 {
            return false;
        }
        let window = if self.selection_index < self.window_lower_bound {
            self.selection_index
        } else if self.selection_index - self.window_lower_bound >= viewport_height {
            self.selection_index + 1 - viewport_height
        } else {
            return false;
        };
        self.window_lower_bound = window;
        true
    }

    /// Move the marker up by one viewport height, clamped at the top.
    ///
    /// Returns the index the view model should be asked to accept, or `None`
    /// when the step is a no-op (empty list or zero-height viewport).
    pub fn page_up(&mut self, item_count: usize, viewport_height: usize) -> Option<usize> {
        if item_count == 0 || viewport_height == 0 {
            return None;
        }
        self.selection_index = self.selection_index.saturating_sub(viewport_height);
        if self.selection_index < self.window_lower_bound {
            self.window_lower_bound = self.selection_index;
        }
        Some(self.selection_index)
    }

    /// Move the marker down by one viewport height, clamped at the last item.
    ///
    /// The window is only moved when the selection falls below it, and then
    /// never so far that it would extend past the last item.
    pub fn page_down(&mut self, item_count: usize, viewport_height: usize) -> Option<usize> {
        if item_count == 0 || viewport_height == 0 {
            return None;
        }
        let upper_bound_index = item_count - 1;
        self.selection_index = (self.selection_index + viewport_height).min(upper_bound_index);
        if self.selection_index >= self.window_lower_bound + viewport_height {
            self.window_lower_bound = self
                .selection_index
                .min(item_count.saturating_sub(viewport_height));
        }
        Some(self.selection_index)
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
