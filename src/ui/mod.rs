//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Document text, gutter and cursor
//! - [`style`]: Theming and colors

pub mod style;

mod render;
mod status;

pub use render::{gutter_width, render, text_area_size};

/// Rows below the text area (the status bar).
pub const STATUS_ROWS: u16 = 1;

/// Blank columns between the line numbers and the text.
pub const GUTTER_PADDING: u16 = 2;
