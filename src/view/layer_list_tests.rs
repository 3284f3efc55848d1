//! Tests for the layer list widget.

use super::*;
use crate::config::KeyBindingSettings;
use crate::model::KeyBindingError;
use crate::state::LayerListModel;
use crate::view::styles::ColorConfig;
use crossterm::event::KeyModifiers;
use ratatui::style::{Color, Modifier};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Helpers =====

fn layers(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("layer {i}")).collect()
}

fn colored() -> CompareStyles {
    CompareStyles::with_color_config(ColorConfig::new(true))
}

/// List over `n` layers, `height` rows tall, default bindings installed.
fn ready_list(n: usize, height: u16) -> LayerList<LayerListModel> {
    let mut list = LayerList::new(LayerListModel::new(layers(n))).with_styles(colored());
    list.set_rect(Rect::new(0, 0, 30, height));
    list.setup(&KeyBindingSettings::default())
        .expect("default bindings resolve");
    list
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn state(list: &LayerList<LayerListModel>) -> (usize, usize) {
    let selection = list.selection();
    (selection.selection_index(), selection.window_lower_bound())
}

// ===== Setup =====

#[test]
fn new_list_starts_at_top_unbound_and_unfocused() {
    let list = LayerList::new(LayerListModel::new(layers(3)));
    assert_eq!(state(&list), (0, 0));
    assert!(!list.is_ready());
    assert!(!list.has_focus());
}

#[test]
fn setup_with_defaults_makes_list_ready() {
    let list = ready_list(3, 5);
    assert!(list.is_ready());
}

#[test]
fn setup_reports_missing_binding_and_stays_unbound() {
    let mut list = LayerList::new(LayerListModel::new(layers(3)));
    let mut config = KeyBindingSettings::default();
    config.remove("page-up");

    let err = list.setup(&config).unwrap_err();

    assert_eq!(
        err,
        SetupError::Binding {
            action: KeyAction::PageUp,
            source: KeyBindingError::Missing {
                name: "page-up".to_string()
            },
        }
    );
    assert!(!list.is_ready(), "No partial binding table after a failure");
}

#[test]
fn setup_reports_malformed_binding_with_action() {
    let mut list = LayerList::new(LayerListModel::new(layers(3)));
    let config = KeyBindingSettings::default().with("compare-all", "ctrl+");

    let err = list.setup(&config).unwrap_err();

    assert_eq!(err.action(), Some(KeyAction::CompareAll));
    assert!(matches!(
        err,
        SetupError::Binding {
            source: KeyBindingError::Malformed { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("compare-all"));
}

#[test]
fn second_setup_is_rejected_and_keeps_first_table() {
    let mut list = ready_list(10, 4);
    assert!(list.handle_input(key(KeyCode::PageDown)));

    let rebind = KeyBindingSettings::default().with("page-down", "ctrl+x");
    assert_eq!(list.setup(&rebind), Err(SetupError::AlreadyBound));

    assert!(list.is_ready());
    assert!(!list.handle_input(ctrl('x')), "Replacement binding was not installed");
    assert!(list.handle_input(key(KeyCode::PageDown)));
    assert_eq!(list.selection().selection_index(), 8);
}

#[test]
fn second_setup_with_broken_config_reports_already_bound() {
    let mut list = ready_list(10, 4);
    let broken = KeyBindingSettings::default().with("page-down", "hyper+x");

    assert_eq!(list.setup(&broken), Err(SetupError::AlreadyBound));

    assert!(list.handle_input(key(KeyCode::PageDown)));
    assert_eq!(list.selection().selection_index(), 4);
}

#[test]
fn setup_can_retry_after_failure() {
    let mut list = LayerList::new(LayerListModel::new(layers(10)));
    list.set_rect(Rect::new(0, 0, 30, 4));

    assert!(list
        .setup(&KeyBindingSettings::default().with("page-down", "ctrl+"))
        .is_err());
    assert!(list.setup(&KeyBindingSettings::default()).is_ok());

    assert!(list.handle_input(key(KeyCode::PageDown)));
}

// ===== Arrow keys =====

#[test]
fn arrows_work_before_setup() {
    let mut list = LayerList::new(LayerListModel::new(layers(3)));
    list.set_rect(Rect::new(0, 0, 30, 5));

    assert!(list.handle_input(key(KeyCode::Down)));
    assert_eq!(list.selection().selection_index(), 1);
    assert!(
        !list.handle_input(key(KeyCode::PageDown)),
        "Configurable keys are inert until setup"
    );
}

#[test]
fn down_and_right_step_forward_and_update_view_model() {
    let mut list = ready_list(5, 5);

    assert!(list.handle_input(key(KeyCode::Down)));
    assert!(list.handle_input(key(KeyCode::Right)));

    assert_eq!(state(&list), (2, 0));
    assert_eq!(list.view_model().layer_index(), 2);
}

#[test]
fn up_and_left_step_backward() {
    let mut list = ready_list(5, 5);
    list.handle_input(key(KeyCode::Down));
    list.handle_input(key(KeyCode::Down));

    assert!(list.handle_input(key(KeyCode::Up)));
    assert!(list.handle_input(key(KeyCode::Left)));

    assert_eq!(state(&list), (0, 0));
    assert_eq!(list.view_model().layer_index(), 0);
}

#[test]
fn up_at_top_is_not_consumed() {
    let mut list = ready_list(5, 5);
    assert!(!list.handle_input(key(KeyCode::Up)));
    assert_eq!(state(&list), (0, 0));
}

#[test]
fn down_at_last_layer_is_not_consumed() {
    let mut list = ready_list(2, 5);
    assert!(list.handle_input(key(KeyCode::Down)));
    assert!(!list.handle_input(key(KeyCode::Down)));
    assert_eq!(state(&list), (1, 0));
    assert_eq!(list.view_model().layer_index(), 1);
}

#[test]
fn arrows_on_empty_list_are_not_consumed() {
    let mut list = ready_list(0, 5);
    assert!(!list.handle_input(key(KeyCode::Down)));
    assert!(!list.handle_input(key(KeyCode::Up)));
    assert_eq!(state(&list), (0, 0));
}

#[test]
fn window_scrolls_when_selection_leaves_bottom_edge() {
    let mut list = ready_list(10, 4);

    for _ in 0..6 {
        assert!(list.handle_input(key(KeyCode::Down)));
    }

    assert_eq!(state(&list), (6, 3));
}

// ===== Paging =====

#[test]
fn six_downs_then_page_up() {
    let mut list = ready_list(10, 4);
    for _ in 0..6 {
        list.handle_input(key(KeyCode::Down));
    }

    assert!(list.handle_input(key(KeyCode::PageUp)));

    assert_eq!(state(&list), (2, 2));
    assert_eq!(list.view_model().layer_index(), 2);
}

#[test]
fn page_down_moves_one_viewport() {
    let mut list = ready_list(10, 4);

    assert!(list.handle_input(key(KeyCode::PageDown)));

    assert_eq!(state(&list), (4, 4));
    assert_eq!(list.view_model().layer_index(), 4);
}

#[test]
fn page_down_clamps_at_last_layer_and_keeps_window_full() {
    let mut list = ready_list(10, 4);

    list.handle_input(key(KeyCode::PageDown));
    list.handle_input(key(KeyCode::PageDown));
    assert_eq!(state(&list), (8, 6));

    list.handle_input(key(KeyCode::PageDown));
    assert_eq!(state(&list), (9, 6));
    assert!(list.selection().is_visible(9, 4));
}

#[test]
fn page_up_at_top_still_reports_view_model_answer() {
    let mut list = ready_list(10, 4);
    assert!(list.page_up());
    assert_eq!(state(&list), (0, 0));
}

#[test]
fn paging_empty_list_is_a_no_op() {
    let mut list = ready_list(0, 4);
    assert!(!list.handle_input(key(KeyCode::PageDown)));
    assert!(!list.handle_input(key(KeyCode::PageUp)));
    assert_eq!(state(&list), (0, 0));
}

#[test]
fn paging_with_zero_height_is_a_no_op() {
    let mut list = ready_list(10, 0);
    assert!(!list.handle_input(key(KeyCode::PageDown)));
    assert_eq!(state(&list), (0, 0));
}

#[test]
fn block_border_shrinks_page_size() {
    let mut list = LayerList::new(LayerListModel::new(layers(10)))
        .with_block(Block::bordered().title("Layers"));
    list.set_rect(Rect::new(0, 0, 20, 5));
    list.setup(&KeyBindingSettings::default()).unwrap();

    assert_eq!(list.inner_rect().height, 3);
    list.handle_input(key(KeyCode::PageDown));
    assert_eq!(list.selection().selection_index(), 3);
}

// ===== Resizing =====

#[test]
fn keys_before_first_layout_keep_top_rows_visible() {
    let mut list = LayerList::new(LayerListModel::new(layers(10)));
    list.setup(&KeyBindingSettings::default()).unwrap();

    list.handle_input(key(KeyCode::Down));
    list.handle_input(key(KeyCode::Down));
    assert_eq!(state(&list), (2, 0));

    list.set_rect(Rect::new(0, 0, 30, 4));
    assert_eq!(state(&list), (2, 0));
}

#[test]
fn shrinking_viewport_brings_selection_back_into_view() {
    let mut list = ready_list(10, 6);
    for _ in 0..7 {
        list.handle_input(key(KeyCode::Down));
    }
    assert_eq!(state(&list), (7, 2));

    list.set_rect(Rect::new(0, 0, 30, 3));

    assert_eq!(state(&list), (7, 5));
    assert!(list.selection().is_visible(7, 3));
}

#[test]
fn growing_viewport_keeps_window() {
    let mut list = ready_list(10, 4);
    for _ in 0..6 {
        list.handle_input(key(KeyCode::Down));
    }

    list.set_rect(Rect::new(0, 0, 30, 8));

    assert_eq!(state(&list), (6, 3));
}

#[test]
fn shrunk_list_draws_selected_row() {
    let mut list = ready_list(10, 6);
    for _ in 0..7 {
        list.handle_input(key(KeyCode::Down));
    }
    list.set_rect(Rect::new(0, 0, 12, 3));

    let buf = render(&list, 12, 3);

    assert_eq!(buf[(9, 2)].symbol(), "7");
    assert_eq!(buf[(0, 2)].bg, Color::Red);
}

// ===== Comparison mode =====

#[test]
fn compare_layer_is_inert_in_single_mode() {
    let mut list = ready_list(3, 5);
    assert!(!list.handle_input(ctrl('l')));
    assert_eq!(list.view_model().mode(), CompareMode::SingleLayer);
}

#[test]
fn compare_all_then_compare_layer_round_trip() {
    let mut list = ready_list(3, 5);

    assert!(list.handle_input(ctrl('a')));
    assert_eq!(list.view_model().mode(), CompareMode::AllLayers);

    assert!(!list.handle_input(ctrl('a')), "Already comparing all layers");
    assert_eq!(list.view_model().mode(), CompareMode::AllLayers);

    assert!(list.handle_input(ctrl('l')));
    assert_eq!(list.view_model().mode(), CompareMode::SingleLayer);
}

#[test]
fn mode_changes_leave_selection_alone() {
    let mut list = ready_list(5, 5);
    list.handle_input(key(KeyCode::Down));

    list.handle_input(ctrl('a'));

    assert_eq!(state(&list), (1, 0));
}

#[test]
fn shared_binding_stops_at_first_consuming_action() {
    let mut list = LayerList::new(LayerListModel::new(layers(3)));
    list.set_rect(Rect::new(0, 0, 30, 5));
    let config = KeyBindingSettings::default()
        .with("compare-all", "ctrl+t")
        .with("compare-layer", "ctrl+t");
    list.setup(&config).unwrap();

    assert!(list.handle_input(ctrl('t')));
    assert_eq!(
        list.view_model().mode(),
        CompareMode::AllLayers,
        "Only the first consuming action runs"
    );

    assert!(list.handle_input(ctrl('t')));
    assert_eq!(
        list.view_model().mode(),
        CompareMode::SingleLayer,
        "compare-all declines, so dispatch falls through to compare-layer"
    );
}

#[test]
fn unbound_key_is_not_consumed() {
    let mut list = ready_list(3, 5);
    assert!(!list.handle_input(key(KeyCode::Char('z'))));
    assert!(!list.handle_input(key(KeyCode::Enter)));
}

#[test]
fn custom_bindings_replace_defaults() {
    let mut list = LayerList::new(LayerListModel::new(layers(10)));
    list.set_rect(Rect::new(0, 0, 30, 4));
    list.setup(&KeyBindingSettings::default().with("page-down", "ctrl+d, space"))
        .unwrap();

    assert!(!list.handle_input(key(KeyCode::PageDown)));
    assert!(list.handle_input(ctrl('d')));
    assert!(list.handle_input(key(KeyCode::Char(' '))));
    assert_eq!(list.selection().selection_index(), 8);
}

// ===== Callbacks and focus =====

#[test]
fn observer_sees_every_transition() {
    let seen: Rc<RefCell<Vec<Transition>>> = Rc::default();
    let sink = Rc::clone(&seen);

    let mut list = ready_list(10, 4);
    list.set_transition_observer(move |t| sink.borrow_mut().push(*t));

    list.handle_input(key(KeyCode::Down));
    list.handle_input(ctrl('l'));
    list.handle_input(key(KeyCode::PageDown));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].navigation, Navigation::Down);
    assert!(seen[0].moved);
    assert_eq!(seen[0].selection.selection_index(), 1);
    assert_eq!(seen[1].navigation, Navigation::CompareLayer);
    assert!(!seen[1].moved);
    assert_eq!(seen[2].navigation, Navigation::PageDown);
    assert_eq!(seen[2].selection.selection_index(), 5);
    assert_eq!(seen[2].mode, CompareMode::SingleLayer);
}

#[test]
fn rejected_arrow_emits_no_transition() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);

    let mut list = ready_list(1, 4);
    list.set_transition_observer(move |_| *sink.borrow_mut() += 1);

    list.handle_input(key(KeyCode::Down));
    list.handle_input(key(KeyCode::Up));

    assert_eq!(*count.borrow(), 0, "View model refused, selection untouched");
}

#[test]
fn notify_changed_passes_selection_and_shortcut() {
    let calls: Rc<RefCell<Vec<(usize, char)>>> = Rc::default();
    let sink = Rc::clone(&calls);

    let mut list = ready_list(5, 5);
    list.set_changed_func(move |index, shortcut| sink.borrow_mut().push((index, shortcut)));

    list.handle_input(key(KeyCode::Down));
    assert!(calls.borrow().is_empty(), "Navigation does not fire the handler");

    list.notify_changed('l');
    assert_eq!(*calls.borrow(), vec![(1, 'l')]);
}

#[test]
fn notify_changed_without_handler_is_harmless() {
    let mut list = ready_list(5, 5);
    list.notify_changed('x');
}

#[test]
fn focus_and_blur() {
    let mut list = ready_list(3, 5);
    list.focus();
    assert!(list.has_focus());
    list.blur();
    assert!(!list.has_focus());
}

#[test]
fn view_model_mut_changes_are_visible() {
    let mut list = ready_list(3, 5);
    list.view_model_mut().switch_mode();
    assert_eq!(list.view_model().mode(), CompareMode::AllLayers);
}

// ===== Rendering =====

fn render(list: &LayerList<LayerListModel>, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    list.draw(&mut buf);
    buf
}

#[test]
fn draw_writes_gutter_space_and_text() {
    let mut list = ready_list(3, 3);
    list.set_rect(Rect::new(0, 0, 12, 3));

    let buf = render(&list, 12, 3);

    assert_eq!(buf[(0, 0)].symbol(), " ");
    assert_eq!(buf[(1, 0)].symbol(), " ");
    assert_eq!(buf[(2, 0)].symbol(), " ");
    assert_eq!(buf[(3, 0)].symbol(), "l");
    assert_eq!(buf[(9, 1)].symbol(), "1");
}

#[test]
fn draw_colors_rows_in_single_mode() {
    let mut list = ready_list(3, 3);
    list.set_rect(Rect::new(0, 0, 12, 3));
    list.handle_input(key(KeyCode::Down));

    let buf = render(&list, 12, 3);

    // Passed row: blue gutter, white text
    assert_eq!(buf[(0, 0)].bg, Color::Blue);
    assert_eq!(buf[(1, 0)].bg, Color::Blue);
    assert_eq!(buf[(3, 0)].fg, Color::White);
    assert_eq!(buf[(3, 0)].bg, Color::Reset);

    // Selected row: red gutter, reversed text across the full width
    assert_eq!(buf[(0, 1)].bg, Color::Red);
    assert_eq!(buf[(3, 1)].bg, Color::White);
    assert_eq!(buf[(11, 1)].bg, Color::White);

    // After the selection: untouched gutter
    assert_eq!(buf[(0, 2)].bg, Color::Reset);
    assert_eq!(buf[(3, 2)].fg, Color::White);
}

#[test]
fn draw_marks_included_rows_in_all_mode() {
    let mut list = ready_list(4, 4);
    list.set_rect(Rect::new(0, 0, 12, 4));
    for _ in 0..3 {
        list.handle_input(key(KeyCode::Down));
    }
    list.handle_input(ctrl('a'));

    let buf = render(&list, 12, 4);

    assert_eq!(buf[(0, 0)].bg, Color::Blue, "First layer is never included");
    assert_eq!(buf[(0, 1)].bg, Color::Red);
    assert_eq!(buf[(0, 2)].bg, Color::Red);
    assert_eq!(buf[(0, 3)].bg, Color::Red);
    assert_eq!(buf[(3, 2)].bg, Color::Reset, "Only the gutter of included rows is marked");
}

#[test]
fn draw_starts_at_window_lower_bound() {
    let mut list = ready_list(10, 4);
    list.set_rect(Rect::new(0, 0, 12, 4));
    for _ in 0..6 {
        list.handle_input(key(KeyCode::Down));
    }

    let buf = render(&list, 12, 4);

    assert_eq!(buf[(9, 0)].symbol(), "3");
    assert_eq!(buf[(9, 3)].symbol(), "6");
}

#[test]
fn draw_truncates_long_layers_with_ellipsis() {
    let mut list = LayerList::new(LayerListModel::new(vec!["abcdefghij".to_string()]))
        .with_styles(colored());
    list.set_rect(Rect::new(0, 0, 8, 1));

    let buf = render(&list, 8, 1);

    let text: String = (2..8).map(|x| buf[(x, 0)].symbol().to_string()).collect();
    assert_eq!(text, " abcd…");
}

#[test]
fn draw_without_colors_reverses_marked_cells() {
    let mut list = LayerList::new(LayerListModel::new(layers(3)))
        .with_styles(CompareStyles::with_color_config(ColorConfig::new(false)));
    list.set_rect(Rect::new(0, 0, 12, 3));
    list.handle_input(key(KeyCode::Down));

    let buf = render(&list, 12, 3);

    assert!(buf[(0, 0)].modifier.contains(Modifier::REVERSED));
    assert!(!buf[(3, 0)].modifier.contains(Modifier::REVERSED));
    assert!(buf[(3, 1)].modifier.contains(Modifier::REVERSED));
    assert!(!buf[(0, 2)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn draw_outside_buffer_is_clipped() {
    let mut list = ready_list(3, 3);
    list.set_rect(Rect::new(0, 0, 40, 10));

    let buf = render(&list, 5, 2);

    assert_eq!(buf[(3, 0)].symbol(), "l");
}

#[test]
fn draw_does_not_change_navigation_state() {
    let mut list = ready_list(10, 4);
    list.handle_input(key(KeyCode::PageDown));
    let before = list.selection();

    let _ = render(&list, 30, 4);

    assert_eq!(list.selection(), before);
}

#[test]
fn fit_to_width_pads_short_text() {
    assert_eq!(fit_to_width("ab", 4), "ab  ");
    assert_eq!(fit_to_width("abcd", 4), "abcd");
    assert_eq!(fit_to_width("abcde", 4), "abc…");
    assert_eq!(fit_to_width("abc", 0), "");
}

#[test]
fn fit_to_width_counts_wide_characters() {
    // Each CJK character takes two columns
    assert_eq!(fit_to_width("日本語", 5), "日本…");
    assert_eq!(fit_to_width("日本語", 4), "日… ");
}
