//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks which lines of the document are on screen and
//! keeps the cursor inside a margin band when it moves.

use std::ops::Range;

use super::layout::{TextElement, TextView};

/// Rows kept between the cursor and the viewport edges.
pub const DEFAULT_SCROLL_MARGIN: usize = 5;

/// Manages the visible portion of a document.
///
/// The viewport tracks:
/// - Text area dimensions (width, height)
/// - Current scroll offset (in lines)
/// - Total document length
/// - Scroll margin
///
/// The offset may run `margin` lines past the point where the last line
/// reaches the bottom, so the final lines can sit inside the band too.
///
/// # Example
///
/// ```
/// use elmo::editor::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_by(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
    margin: usize,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Text area width in columns
    /// * `height` - Text area height in lines
    /// * `total_lines` - Total lines in the document
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
            margin: DEFAULT_SCROLL_MARGIN,
        }
    }

    /// Set the scroll margin.
    #[must_use]
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self.offset = self.offset.min(self.max_offset());
        self
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of lines in the document.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Get the scroll margin.
    pub const fn margin(&self) -> usize {
        self.margin
    }

    /// Get the range of visible lines.
    ///
    /// Returns a range from the current offset to offset + height,
    /// clamped to the document bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }

        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    /// Check if we can scroll up.
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    /// Check if we can scroll down.
    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll by `delta` lines (negative is up), clamped to the valid range.
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    /// Adjust the offset so `cursor_line` sits inside the margin band.
    ///
    /// The margin is capped at half the height. Nothing moves while the
    /// cursor stays inside the band. Returns whether the offset changed.
    pub fn ensure_cursor_visible(&mut self, cursor_line: usize) -> bool {
        let height = self.height as usize;
        if height == 0 {
            return false;
        }
        let margin = self.margin.min(height / 2).max(1);
        let previous = self.offset;

        if cursor_line < self.offset + margin {
            self.offset = (cursor_line + 1).saturating_sub(margin);
        } else if cursor_line > self.offset + height - margin {
            self.offset = cursor_line + margin - height;
        }
        self.offset = self.offset.min(self.max_offset());

        if self.offset != previous {
            tracing::trace!(from = previous, to = self.offset, cursor_line, "viewport scrolled");
        }
        self.offset != previous
    }

    /// Map a point in the text area to a document offset.
    ///
    /// Rows past the last line resolve to the last line; columns past the
    /// end of a line resolve to its end.
    pub fn hit_test<T: TextElement>(&self, x: usize, y: usize, view: &TextView<'_, T>) -> usize {
        let last = view.line_count() - 1;
        let line = (self.offset + y).min(last);
        view.offset_at_column(line, x)
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        // Clamp offset if document is now shorter than viewport
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total number of lines (e.g., after an edit).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Calculate the maximum valid offset.
    const fn max_offset(&self) -> usize {
        (self.total_lines + self.margin).saturating_sub(self.height as usize)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24, 1)
    }
}
