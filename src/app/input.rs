use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        let arrow = match key.code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = arrow {
            return Some(if shift {
                Message::ExtendSelection(direction)
            } else {
                Message::MoveCursor(direction)
            });
        }

        match key.code {
            // Application
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),

            // Navigation
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Esc => Some(Message::ClearSelection),

            // Editing
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = model.text_coords(mouse.column, mouse.row)?;
                Some(Message::PointerPress(x, y))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (x, y) = clamped_text_coords(model, mouse)?;
                Some(Message::PointerDrag(x, y))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x, y) = clamped_text_coords(model, mouse)?;
                Some(Message::PointerRelease(x, y))
            }
            MouseEventKind::ScrollDown => model
                .document
                .viewport()
                .can_scroll_down()
                .then_some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => model
                .document
                .viewport()
                .can_scroll_up()
                .then_some(Message::ScrollUp(WHEEL_LINES)),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Text coordinates for a drag, pinning rows below the text area to its
/// last row so a selection can be dragged onto the status bar.
fn clamped_text_coords(model: &Model, mouse: MouseEvent) -> Option<(usize, usize)> {
    let last_row = model.document.viewport().height().checked_sub(1)?;
    model.text_coords(mouse.column, mouse.row.min(last_row))
}
