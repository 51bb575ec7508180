use crate::app::{Model, ToastLevel};
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Insert a tab character
    InsertTab,
    /// Delete the code point before the cursor (Backspace)
    DeleteBack,
    /// Delete the code point at the cursor (Delete)
    DeleteForward,

    // Cursor
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor while extending the selection (Shift+arrow)
    ExtendSelection(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor to start of document (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of document (Ctrl+End)
    MoveToEnd,
    /// Scroll and move the cursor up one page
    PageUp,
    /// Scroll and move the cursor down one page
    PageDown,

    // Viewport
    /// Scroll up by n lines, leaving the cursor in place
    ScrollUp(usize),
    /// Scroll down by n lines, leaving the cursor in place
    ScrollDown(usize),

    // Pointer, in text-area coordinates
    /// Left button pressed
    PointerPress(usize, usize),
    /// Pointer moved with the left button held
    PointerDrag(usize, usize),
    /// Left button released
    PointerRelease(usize, usize),
    /// Clear current selection
    ClearSelection,

    // File
    /// Write the document to disk
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    /// Whether the message changes the document content.
    pub const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertNewline
                | Self::InsertTab
                | Self::DeleteBack
                | Self::DeleteForward
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Saving is left to the event loop's side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    let edited = msg.is_edit();

    let doc = &mut model.document;
    match msg {
        // Editing
        Message::InsertChar(c) => doc.insert_char(c),
        Message::InsertNewline => doc.split_line(),
        Message::InsertTab => doc.insert_char('\t'),
        Message::DeleteBack => {
            doc.delete_back();
        }
        Message::DeleteForward => {
            doc.delete_forward();
        }

        // Cursor
        Message::MoveCursor(direction) => doc.move_cursor(direction),
        Message::ExtendSelection(direction) => doc.extend_selection(direction),
        Message::MoveHome => doc.move_home(),
        Message::MoveEnd => doc.move_end(),
        Message::MoveToStart => doc.move_to_start(),
        Message::MoveToEnd => doc.move_to_end(),
        Message::PageUp => doc.page_up(),
        Message::PageDown => doc.page_down(),

        // Viewport
        Message::ScrollUp(n) => doc.scroll_by(-isize::try_from(n).unwrap_or(isize::MAX)),
        Message::ScrollDown(n) => doc.scroll_by(isize::try_from(n).unwrap_or(isize::MAX)),

        // Pointer
        Message::PointerPress(x, y) => doc.pointer_press(x, y),
        Message::PointerDrag(x, y) => doc.pointer_drag(x, y),
        Message::PointerRelease(x, y) => doc.pointer_release(x, y),
        Message::ClearSelection => doc.clear_selection(),

        // Window
        Message::Resize(width, height) => model.resize(width, height),

        // Handled as side effects or no-op
        Message::Save | Message::Redraw => {}

        // Application
        Message::Quit => {
            if model.document.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    if edited {
        model.highlights_stale = true;
        model.sync_layout();
    }
    model
}
