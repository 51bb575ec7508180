//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel, load_document};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeName;
use crate::editor::{DEFAULT_SCROLL_MARGIN, DEFAULT_TAB_WIDTH};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    tab_width: usize,
    scroll_margin: usize,
    theme: ThemeName,
    highlight_enabled: bool,
}

impl App {
    /// Create a new application for the given file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            tab_width: DEFAULT_TAB_WIDTH,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            theme: ThemeName::default(),
            highlight_enabled: true,
        }
    }

    /// Set the tab stop width.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Set how many lines stay visible around the cursor when scrolling.
    #[must_use]
    pub fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.scroll_margin = margin;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable syntax highlighting.
    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests;
