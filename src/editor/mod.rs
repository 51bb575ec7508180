//! Text storage and editing core.
//!
//! A gap buffer holds the content, a line index maps offsets to lines, and
//! [`Document`] keeps the cursor, viewport and selection in step with edits.

mod cursor;
mod document;
mod gap_store;
mod layout;
mod line_index;
mod selection;
mod viewport;

pub use cursor::{Cursor, Direction};
pub use document::Document;
pub use gap_store::GapStore;
pub use layout::{DEFAULT_TAB_WIDTH, TextElement, TextView, advance_column};
pub use line_index::{LineIndex, LineSpan};
pub use selection::Selection;
pub use viewport::{DEFAULT_SCROLL_MARGIN, Viewport};
