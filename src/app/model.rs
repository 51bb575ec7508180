use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::editor::Document;
use crate::highlight::{Highlighter, language_for_path};
use crate::ui::style::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    /// The open document, including cursor, viewport and selection
    pub document: Document,
    /// Path the document is saved to
    pub file_path: PathBuf,
    /// Colors used by the renderer
    pub theme: Theme,
    /// Whether syntax highlighting runs at all
    pub highlight_enabled: bool,
    /// Set by edits; cleared when the highlighter has caught up
    pub highlights_stale: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Full terminal size, status bar included
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
}

impl Model {
    /// Create a model and fit the document to the terminal.
    pub fn new(file_path: PathBuf, document: Document, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            document,
            file_path,
            theme: Theme::default(),
            highlight_enabled: true,
            highlights_stale: true,
            quit_confirmed: false,
            should_quit: false,
            terminal_size,
            toast: None,
        };
        model.sync_layout();
        model
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub const fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.sync_layout();
    }

    /// Fit the document viewport to the text area. The gutter grows with
    /// the line count, so this runs after edits as well as resizes.
    pub(super) fn sync_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let (text_width, text_height) =
            crate::ui::text_area_size(width, height, self.document.line_count());
        let viewport = self.document.viewport();
        if viewport.width() != text_width || viewport.height() != text_height {
            self.document.resize(text_width, text_height);
        }
    }

    /// Translate a terminal cell into text-area coordinates.
    ///
    /// Returns `None` for the status bar. Cells left of the text (the gutter)
    /// map to column 0.
    pub fn text_coords(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        if row >= self.document.viewport().height() {
            return None;
        }
        let gutter = crate::ui::gutter_width(self.document.line_count());
        Some((
            usize::from(column.saturating_sub(gutter)),
            usize::from(row),
        ))
    }

    /// Write the document to `file_path` and mark it clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let _scope = crate::perf::scope("app.save");
        std::fs::write(&self.file_path, self.document.materialize())
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        self.document.mark_clean();
        Ok(())
    }

    /// Re-run syntax highlighting. Failures keep the previous colors and
    /// surface as a warning toast.
    pub fn refresh_highlights(&mut self, highlighter: &dyn Highlighter) {
        self.highlights_stale = false;
        if !self.highlight_enabled {
            return;
        }
        if let Err(err) = self.document.refresh_highlights(highlighter) {
            tracing::warn!(path = %self.file_path.display(), error = %err, "highlighting failed");
            self.show_toast(ToastLevel::Warning, format!("Highlighting failed: {err}"));
        }
    }
}

/// Read `path` into a document. A missing file opens as an empty document
/// that will be created on save.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_document(path: &Path) -> Result<Document> {
    let _scope = crate::perf::scope("app.read_file");
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            crate::perf::log_event("app.read_file.missing", path.display().to_string());
            Vec::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let mut document = Document::from_bytes(&bytes);
    document.set_language(language_for_path(path));
    Ok(document)
}
