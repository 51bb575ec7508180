// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. highlight::HighlightError)
    clippy::module_name_repetitions
)]

//! # elmo
//!
//! A small terminal text editor built around a gap buffer.
//!
//! elmo edits UTF-8 files in the terminal with:
//! - A gap-buffer store with lazy gap relocation
//! - Tab-aware cursor motion with vertical column memory
//! - Scrolling with a hysteresis margin around the cursor
//! - Mouse and keyboard selection
//! - Syntax highlighting through a pluggable highlighter
//!
//! ## Architecture
//!
//! elmo uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Text storage, line index, cursor, viewport and selection
//! - [`highlight`]: Highlight categories and the syntect highlighter
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults
//! - [`perf`]: Timing scopes and loop events

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Cursor, Direction, Document, GapStore, Selection, Viewport};
    pub use crate::highlight::{HighlightCategory, Highlighter, SyntectHighlighter};
}
