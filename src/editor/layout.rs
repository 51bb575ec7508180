//! Tab-aware column model.
//!
//! A tab advances to the next multiple of the tab width, every other code
//! point advances by one column. Columns are never rounded: a tab that
//! straddles a target column counts in full.

use super::gap_store::GapStore;
use super::line_index::{LineIndex, LineSpan};

/// Default tab stop spacing in columns.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// An element type the editor core can lay out.
pub trait TextElement: Copy + Default + PartialEq {
    const NEWLINE: Self;
    const TAB: Self;

    /// Whether this element starts a code point. Offsets are only ever
    /// placed on such elements (or at the end of the content).
    fn is_boundary(self) -> bool;
}

impl TextElement for u8 {
    const NEWLINE: Self = b'\n';
    const TAB: Self = b'\t';

    fn is_boundary(self) -> bool {
        // UTF-8 continuation bytes look like 0b10xx_xxxx
        self & 0xC0 != 0x80
    }
}

impl TextElement for char {
    const NEWLINE: Self = '\n';
    const TAB: Self = '\t';

    fn is_boundary(self) -> bool {
        true
    }
}

/// The column reached after laying out `element` starting at `column`.
pub fn advance_column<T: TextElement>(column: usize, element: T, tab_width: usize) -> usize {
    if element == T::TAB {
        let tab_width = tab_width.max(1);
        column + tab_width - column % tab_width
    } else if element.is_boundary() {
        column + 1
    } else {
        column
    }
}

/// Borrowed view over a store and its line index, with a fixed tab width.
///
/// All coordinate conversions of the core go through here.
#[derive(Debug, Clone, Copy)]
pub struct TextView<'a, T> {
    store: &'a GapStore<T>,
    lines: &'a LineIndex,
    tab_width: usize,
}

impl<'a, T: TextElement> TextView<'a, T> {
    pub fn new(store: &'a GapStore<T>, lines: &'a LineIndex, tab_width: usize) -> Self {
        Self {
            store,
            lines,
            tab_width: tab_width.max(1),
        }
    }

    pub const fn store(&self) -> &'a GapStore<T> {
        self.store
    }

    pub const fn lines(&self) -> &'a LineIndex {
        self.lines
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Line number holding `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_containing(offset).0
    }

    pub fn line_span(&self, line: usize) -> LineSpan {
        self.lines.line_span(line)
    }

    /// Display column of `offset` within its line.
    pub fn column_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        let (_, span) = self.lines.line_containing(offset);
        self.store
            .range_iter(span.start..offset)
            .fold(0, |column, element| {
                advance_column(column, element, self.tab_width)
            })
    }

    /// Offset on `line` reached by walking until the running column meets
    /// or exceeds `column`, or the line ends.
    ///
    /// The result may be the line's end, i.e. one past its last character.
    pub fn offset_at_column(&self, line: usize, column: usize) -> usize {
        let span = self.lines.line_span(line);
        let mut offset = span.start;
        let mut reached = 0;
        for element in self.store.range_iter(span.range()) {
            if reached >= column {
                break;
            }
            reached = advance_column(reached, element, self.tab_width);
            offset += 1;
        }
        // Finish the code point we stopped in.
        while offset < span.end && !self.is_boundary(offset) {
            offset += 1;
        }
        offset
    }

    /// The next code-point boundary after `offset`, or the end.
    pub fn next_boundary(&self, offset: usize) -> usize {
        let len = self.len();
        if offset >= len {
            return len;
        }
        let mut next = offset + 1;
        while next < len && !self.is_boundary(next) {
            next += 1;
        }
        next
    }

    /// The previous code-point boundary before `offset`, or 0.
    pub fn prev_boundary(&self, offset: usize) -> usize {
        let mut prev = offset.min(self.len()).saturating_sub(1);
        while prev > 0 && !self.is_boundary(prev) {
            prev -= 1;
        }
        prev
    }

    /// Clamp `offset` into the content and back off to a code-point boundary.
    pub fn snap_to_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.len());
        while offset > 0 && !self.is_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn is_boundary(&self, offset: usize) -> bool {
        self.store.get(offset).is_none_or(TextElement::is_boundary)
    }
}
