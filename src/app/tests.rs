use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::tempdir;

use crate::editor::{Direction, Document};
use crate::highlight::{HighlightCategory, HighlightError, Highlighter};

use super::event_loop::{HighlightDebouncer, ResizeDebouncer};
use super::{App, Message, Model, ToastLevel, load_document, update};

fn create_test_model(text: &str) -> Model {
    Model::new(PathBuf::from("test.rs"), Document::from(text), (80, 24))
}

fn create_long_test_model() -> Model {
    let mut text = String::new();
    for i in 1..=100 {
        writeln!(text, "line {i}").unwrap();
    }
    create_test_model(&text)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

struct Failing;

impl Highlighter for Failing {
    fn highlight(
        &self,
        _source: &[u8],
        language: &str,
    ) -> Result<Vec<HighlightCategory>, HighlightError> {
        Err(HighlightError::UnsupportedLanguage(language.to_string()))
    }
}

struct AllKeywords;

impl Highlighter for AllKeywords {
    fn highlight(
        &self,
        source: &[u8],
        _language: &str,
    ) -> Result<Vec<HighlightCategory>, HighlightError> {
        Ok(vec![HighlightCategory::Keyword; source.len()])
    }
}

#[test]
fn test_new_model_fits_document_to_text_area() {
    let model = create_test_model("abc");
    // 4-digit gutter plus padding, one status row
    assert_eq!(model.document.viewport().width(), 74);
    assert_eq!(model.document.viewport().height(), 23);
}

#[test]
fn test_resize_updates_text_area() {
    let model = update(create_test_model("abc"), Message::Resize(40, 10));
    assert_eq!(model.terminal_size, (40, 10));
    assert_eq!(model.document.viewport().width(), 34);
    assert_eq!(model.document.viewport().height(), 9);
}

#[test]
fn test_scroll_down_updates_viewport() {
    let model = update(create_long_test_model(), Message::ScrollDown(5));
    assert_eq!(model.document.viewport().offset(), 5);
    assert_eq!(model.document.cursor_position(), 0);
}

#[test]
fn test_scroll_up_updates_viewport() {
    let model = update(create_long_test_model(), Message::ScrollDown(10));
    let model = update(model, Message::ScrollUp(3));
    assert_eq!(model.document.viewport().offset(), 7);
}

#[test]
fn test_scroll_up_at_top_stays_at_top() {
    let model = update(create_long_test_model(), Message::ScrollUp(3));
    assert_eq!(model.document.viewport().offset(), 0);
}

#[test]
fn test_insert_char_edits_document_and_marks_highlights_stale() {
    let mut model = create_test_model("abc");
    model.highlights_stale = false;
    let model = update(model, Message::InsertChar('x'));
    assert_eq!(model.document.text(), "xabc");
    assert!(model.document.is_dirty());
    assert!(model.highlights_stale);
}

#[test]
fn test_insert_newline_and_tab() {
    let model = update(create_test_model("ab"), Message::MoveCursor(Direction::Right));
    let model = update(model, Message::InsertNewline);
    let model = update(model, Message::InsertTab);
    assert_eq!(model.document.text(), "a\n\tb");
    assert_eq!(model.document.cursor_line(), 1);
    assert_eq!(model.document.cursor_column(), 4);
}

#[test]
fn test_delete_back_at_start_is_noop() {
    let model = update(create_test_model("abc"), Message::DeleteBack);
    assert_eq!(model.document.text(), "abc");
    assert!(!model.document.is_dirty());
}

#[test]
fn test_delete_forward_removes_char_under_cursor() {
    let model = update(create_test_model("abc"), Message::DeleteForward);
    assert_eq!(model.document.text(), "bc");
}

#[test]
fn test_cursor_messages_move_cursor() {
    let model = create_test_model("one\ntwo\nthree");
    let model = update(model, Message::MoveToEnd);
    assert_eq!(model.document.cursor_position(), 13);
    let model = update(model, Message::MoveHome);
    assert_eq!(model.document.cursor_position(), 8);
    let model = update(model, Message::MoveCursor(Direction::Up));
    assert_eq!(model.document.cursor_position(), 4);
    let model = update(model, Message::MoveEnd);
    assert_eq!(model.document.cursor_position(), 7);
    let model = update(model, Message::MoveToStart);
    assert_eq!(model.document.cursor_position(), 0);
}

#[test]
fn test_page_down_moves_cursor_by_a_page() {
    let model = update(create_long_test_model(), Message::PageDown);
    assert_eq!(model.document.cursor_line(), 23);
    let model = update(model, Message::PageUp);
    assert_eq!(model.document.cursor_line(), 0);
    assert_eq!(model.document.viewport().offset(), 0);
}

#[test]
fn test_extend_selection_then_clear() {
    let model = create_test_model("hello");
    let model = update(model, Message::ExtendSelection(Direction::Right));
    let model = update(model, Message::ExtendSelection(Direction::Right));
    assert_eq!(model.document.selected_bytes(), b"he");

    let model = update(model, Message::ClearSelection);
    assert!(model.document.selection().is_empty());
    assert_eq!(model.document.cursor_position(), 2);
}

#[test]
fn test_typing_replaces_selection() {
    let model = create_test_model("hello");
    let model = update(model, Message::ExtendSelection(Direction::Right));
    let model = update(model, Message::InsertChar('J'));
    assert_eq!(model.document.text(), "Jello");
}

#[test]
fn test_pointer_drag_selects_across_lines() {
    let model = create_test_model("hello\nworld\n");
    let model = update(model, Message::PointerPress(0, 0));
    let model = update(model, Message::PointerDrag(3, 1));
    let model = update(model, Message::PointerRelease(3, 1));
    assert_eq!(model.document.selected_bytes(), b"hello\nwor");
    assert_eq!(model.document.cursor_position(), 9);
}

#[test]
fn test_pointer_press_past_line_end_lands_at_end() {
    let model = update(create_test_model("ab\ncdef"), Message::PointerPress(40, 0));
    assert_eq!(model.document.cursor_position(), 2);
    assert!(model.document.selection().is_empty());
}

#[test]
fn test_quit_clean_document_quits_immediately() {
    let model = update(create_test_model("abc"), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_dirty_document_requires_confirmation() {
    let model = update(create_test_model("abc"), Message::InsertChar('x'));
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_resets_quit_confirmation() {
    let model = update(create_test_model("abc"), Message::InsertChar('x'));
    let model = update(model, Message::Quit);
    let model = update(model, Message::MoveCursor(Direction::Left));
    assert!(!model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_save_side_effect_writes_file_and_marks_clean() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let model = Model::new(path.clone(), Document::from("abc"), (80, 24));
    let mut model = update(model, Message::InsertChar('x'));

    let msg = Message::Save;
    model = update(model, msg.clone());
    App::handle_message_side_effects(&mut model, &msg);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "xabc");
    assert!(!model.document.is_dirty());
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Info);
    assert!(message.contains("notes.txt"));
}

#[test]
fn test_save_completes_pending_quit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let model = Model::new(path, Document::from("abc"), (80, 24));
    let model = update(model, Message::InsertChar('x'));
    let mut model = update(model, Message::Quit);
    assert!(model.quit_confirmed);

    model = update(model, Message::Save);
    App::handle_message_side_effects(&mut model, &Message::Save);
    assert!(model.should_quit);
}

#[test]
fn test_save_failure_shows_error_and_stays_dirty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("notes.txt");
    let model = Model::new(path, Document::from("abc"), (80, 24));
    let mut model = update(model, Message::InsertChar('x'));

    App::handle_message_side_effects(&mut model, &Message::Save);
    assert!(model.document.is_dirty());
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Error)
    );
}

#[test]
fn test_load_document_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let doc = load_document(&dir.path().join("new.rs")).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.line_count(), 1);
    assert_eq!(doc.language(), Some("Rust"));
}

#[test]
fn test_load_document_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.rs");
    std::fs::write(&path, "fn main() {}\n").unwrap();
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.text(), "fn main() {}\n");
    assert_eq!(doc.line_count(), 2);
    assert!(!doc.is_dirty());
}

#[test]
fn test_refresh_highlights_failure_keeps_colors_and_warns() {
    let doc = Document::from("let x = 1;").with_language("Rust");
    let mut model = Model::new(PathBuf::from("test.rs"), doc, (80, 24));
    model.refresh_highlights(&AllKeywords);
    assert_eq!(model.document.category_at(0), HighlightCategory::Keyword);

    model.highlights_stale = true;
    model.refresh_highlights(&Failing);
    assert!(!model.highlights_stale);
    assert_eq!(model.document.category_at(0), HighlightCategory::Keyword);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );
}

#[test]
fn test_refresh_highlights_disabled_leaves_document_plain() {
    let doc = Document::from("let x = 1;").with_language("Rust");
    let mut model =
        Model::new(PathBuf::from("test.rs"), doc, (80, 24)).with_highlighting(false);
    model.refresh_highlights(&AllKeywords);
    assert!(model.document.highlights().is_empty());
    assert!(model.active_toast().is_none());
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model("abc");
    model.show_toast(ToastLevel::Info, "hello");
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_text_coords_subtract_gutter() {
    let model = create_test_model("abc");
    assert_eq!(model.text_coords(10, 2), Some((4, 2)));
    assert_eq!(model.text_coords(1, 0), Some((0, 0)));
    assert_eq!(model.text_coords(10, 23), None);
}

#[test]
fn test_handle_key_maps_editing_keys() {
    let none = KeyModifiers::NONE;
    assert_eq!(
        App::handle_key(key(KeyCode::Char('a'), none)),
        Some(Message::InsertChar('a'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        Some(Message::InsertChar('A'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter, none)),
        Some(Message::InsertNewline)
    );
    assert_eq!(App::handle_key(key(KeyCode::Tab, none)), Some(Message::InsertTab));
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace, none)),
        Some(Message::DeleteBack)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Delete, none)),
        Some(Message::DeleteForward)
    );
}

#[test]
fn test_handle_key_maps_control_chords() {
    let ctrl = KeyModifiers::CONTROL;
    assert_eq!(App::handle_key(key(KeyCode::Char('q'), ctrl)), Some(Message::Quit));
    assert_eq!(App::handle_key(key(KeyCode::Char('s'), ctrl)), Some(Message::Save));
    assert_eq!(
        App::handle_key(key(KeyCode::Home, ctrl)),
        Some(Message::MoveToStart)
    );
    assert_eq!(App::handle_key(key(KeyCode::End, ctrl)), Some(Message::MoveToEnd));
    assert_eq!(App::handle_key(key(KeyCode::Char('x'), ctrl)), None);
}

#[test]
fn test_handle_key_maps_arrows_and_selection() {
    assert_eq!(
        App::handle_key(key(KeyCode::Left, KeyModifiers::NONE)),
        Some(Message::MoveCursor(Direction::Left))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Down, KeyModifiers::SHIFT)),
        Some(Message::ExtendSelection(Direction::Down))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::PageDown, KeyModifiers::NONE)),
        Some(Message::PageDown)
    );
}

#[test]
fn test_handle_key_ignores_release() {
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(App::handle_key(release), None);
}

#[test]
fn test_handle_mouse_press_maps_to_text_coords() {
    let model = create_test_model("abc");
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), &model),
        Some(Message::PointerPress(4, 2))
    );
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 23), &model),
        None
    );
}

#[test]
fn test_handle_mouse_drag_below_text_clamps_row() {
    let model = create_test_model("abc");
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 6, 30), &model),
        Some(Message::PointerDrag(0, 22))
    );
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 8, 1), &model),
        Some(Message::PointerRelease(2, 1))
    );
}

#[test]
fn test_handle_mouse_wheel_scrolls_when_possible() {
    let model = create_long_test_model();
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 5), &model),
        Some(Message::ScrollDown(3))
    );
    assert_eq!(
        App::handle_mouse(mouse(MouseEventKind::ScrollUp, 10, 5), &model),
        None
    );
}

#[test]
fn test_resize_debouncer_waits_for_delay() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(80, 24, 1_000);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(1_050), None);
    debouncer.queue(100, 30, 1_060);
    assert_eq!(debouncer.take_ready(1_150), None);
    assert_eq!(debouncer.take_ready(1_160), Some((100, 30)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_highlight_debouncer_restarts_on_each_edit() {
    let mut debouncer = HighlightDebouncer::new(150);
    assert!(!debouncer.take_ready(0));
    debouncer.queue(0);
    debouncer.queue(100);
    assert!(!debouncer.take_ready(200));
    assert!(debouncer.take_ready(250));
    assert!(!debouncer.is_pending());
    assert!(!debouncer.take_ready(400));
}

#[test]
fn test_message_is_edit() {
    assert!(Message::InsertChar('a').is_edit());
    assert!(Message::DeleteForward.is_edit());
    assert!(!Message::MoveHome.is_edit());
    assert!(!Message::Save.is_edit());
}
