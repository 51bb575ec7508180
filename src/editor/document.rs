//! The open document: storage, line index, cursor, viewport and selection
//! kept consistent with one another.

use std::ops::Range;

use super::cursor::{Cursor, Direction};
use super::gap_store::GapStore;
use super::layout::{DEFAULT_TAB_WIDTH, TextView};
use super::line_index::{LineIndex, LineSpan};
use super::selection::Selection;
use super::viewport::Viewport;
use crate::highlight::{HighlightCategory, HighlightError, Highlighter};

/// An editable UTF-8 document.
///
/// The gap is moved to the cursor lazily, right before an edit. After every
/// edit the line index is rebuilt, the cursor lands after the change, the
/// selection collapses and the viewport follows the cursor. The highlight
/// array is stored as given and may lag behind the content.
#[derive(Debug, Clone)]
pub struct Document {
    store: GapStore<u8>,
    lines: LineIndex,
    cursor: Cursor,
    viewport: Viewport,
    selection: Selection,
    highlights: Vec<HighlightCategory>,
    language: Option<String>,
    tab_width: usize,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::from_bytes(&[])
    }

    /// Create a document holding `content`, cursor at offset 0.
    pub fn from_bytes(content: &[u8]) -> Self {
        let store = GapStore::from_slice(content);
        let lines = LineIndex::from_store(&store);
        let viewport = Viewport::new(80, 24, lines.line_count());
        Self {
            store,
            lines,
            cursor: Cursor::new(),
            viewport,
            selection: Selection::default(),
            highlights: Vec::new(),
            language: None,
            tab_width: DEFAULT_TAB_WIDTH,
            dirty: false,
        }
    }

    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        let position = self.cursor.position();
        self.move_with(|cursor, view| cursor.goto(view, position));
        self
    }

    #[must_use]
    pub fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.viewport = self.viewport.with_margin(margin);
        self
    }

    #[must_use]
    pub fn with_viewport_size(mut self, width: u16, height: u16) -> Self {
        self.resize(width, height);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Borrowed coordinate view over the current content.
    pub fn view(&self) -> TextView<'_, u8> {
        TextView::new(&self.store, &self.lines, self.tab_width)
    }

    pub const fn store(&self) -> &GapStore<u8> {
        &self.store
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn cursor_position(&self) -> usize {
        self.cursor.position()
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget unsaved changes, e.g. after writing the file.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // --- Content ---

    /// Full logical content as one contiguous buffer.
    pub fn materialize(&self) -> Vec<u8> {
        self.store.materialize()
    }

    /// Content as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.materialize()).into_owned()
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    pub fn line_span(&self, line: usize) -> LineSpan {
        self.lines.line_span(line)
    }

    /// Bytes of `line` without its newline.
    pub fn line_bytes(&self, line: usize) -> Vec<u8> {
        self.store.copy_range(self.lines.line_span(line).range())
    }

    /// Line the cursor is on.
    pub fn cursor_line(&self) -> usize {
        self.lines.line_containing(self.cursor.position()).0
    }

    /// Display column of the cursor, tabs expanded.
    pub fn cursor_column(&self) -> usize {
        self.view().column_of(self.cursor.position())
    }

    // --- Editing ---

    pub fn insert_char(&mut self, c: char) {
        let mut encoded = [0; 4];
        self.insert_bytes(c.encode_utf8(&mut encoded).as_bytes());
    }

    pub fn insert_str(&mut self, text: &str) {
        self.insert_bytes(text.as_bytes());
    }

    /// Insert at the cursor, replacing the selection if there is one.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        let at = self
            .take_selection()
            .unwrap_or_else(|| self.cursor.position());
        self.store.relocate(at);
        self.store.insert_slice(bytes);
        self.after_edit(self.store.position());
    }

    /// Break the line at the cursor.
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the code point before the cursor, or the selection.
    ///
    /// Returns `false` without changing anything at the start of the
    /// document.
    pub fn delete_back(&mut self) -> bool {
        if let Some(at) = self.take_selection() {
            self.after_edit(at);
            return true;
        }
        let position = self.cursor.position();
        if position == 0 {
            return false;
        }
        let start = self.view().prev_boundary(position);
        self.store.relocate(position);
        for _ in start..position {
            self.store.backspace();
        }
        self.after_edit(start);
        true
    }

    /// Delete the code point after the cursor, or the selection.
    ///
    /// Returns `false` without changing anything at the end of the
    /// document.
    pub fn delete_forward(&mut self) -> bool {
        if let Some(at) = self.take_selection() {
            self.after_edit(at);
            return true;
        }
        let position = self.cursor.position();
        if position >= self.store.len() {
            return false;
        }
        let end = self.view().next_boundary(position);
        self.store.relocate(position);
        self.store.delete_range(end - position);
        self.after_edit(position);
        true
    }

    // --- Motion ---

    pub fn move_cursor(&mut self, direction: Direction) {
        self.motion(|cursor, view| cursor.move_in(view, direction));
    }

    pub fn move_left(&mut self) {
        self.motion(|cursor, view| cursor.move_left(view, 1));
    }

    pub fn move_right(&mut self) {
        self.motion(|cursor, view| cursor.move_right(view, 1));
    }

    pub fn move_up(&mut self) {
        self.motion(|cursor, view| cursor.move_up(view));
    }

    pub fn move_down(&mut self) {
        self.motion(|cursor, view| cursor.move_down(view));
    }

    pub fn move_home(&mut self) {
        self.motion(|cursor, view| cursor.move_line_start(view));
    }

    pub fn move_end(&mut self) {
        self.motion(|cursor, view| cursor.move_line_end(view));
    }

    pub fn move_to_start(&mut self) {
        self.motion(|cursor, view| cursor.move_to_start(view));
    }

    pub fn move_to_end(&mut self) {
        self.motion(|cursor, view| cursor.move_to_end(view));
    }

    /// Move the cursor and the viewport one page up.
    pub fn page_up(&mut self) {
        let page = self.page_size();
        self.viewport.scroll_by(-page);
        self.motion(|cursor, view| cursor.move_lines(view, -page));
    }

    /// Move the cursor and the viewport one page down.
    pub fn page_down(&mut self) {
        let page = self.page_size();
        self.viewport.scroll_by(page);
        self.motion(|cursor, view| cursor.move_lines(view, page));
    }

    /// Jump to `offset` and bring the gap along.
    pub fn goto(&mut self, offset: usize) {
        self.motion(|cursor, view| cursor.goto(view, offset));
        self.store.relocate(self.cursor.position());
    }

    // --- Viewport ---

    /// Scroll without moving the cursor.
    pub fn scroll_by(&mut self, delta: isize) {
        self.viewport.scroll_by(delta);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.scroll_to_cursor();
    }

    /// Document offset under a point in the text area.
    pub fn hit_test(&self, x: usize, y: usize) -> usize {
        self.viewport.hit_test(x, y, &self.view())
    }

    // --- Pointer ---

    /// Place the cursor under the pointer and start a selection there.
    pub fn pointer_press(&mut self, x: usize, y: usize) {
        let offset = self.hit_test(x, y);
        self.motion(|cursor, view| cursor.goto(view, offset));
    }

    /// Extend the selection to the point under the pointer.
    pub fn pointer_drag(&mut self, x: usize, y: usize) {
        let offset = self.hit_test(x, y);
        self.move_with(|cursor, view| cursor.goto(view, offset));
        self.selection.set_active(self.cursor.position());
        self.scroll_to_cursor();
    }

    pub fn pointer_release(&mut self, x: usize, y: usize) {
        self.pointer_drag(x, y);
    }

    // --- Selection ---

    /// Move in `direction` while keeping the selection anchor in place.
    pub fn extend_selection(&mut self, direction: Direction) {
        if self.selection.is_empty() {
            self.selection.set_anchor(self.cursor.position());
        }
        self.move_with(|cursor, view| cursor.move_in(view, direction));
        self.selection.set_active(self.cursor.position());
        self.scroll_to_cursor();
    }

    pub const fn clear_selection(&mut self) {
        self.selection.clear(self.cursor.position());
    }

    pub fn selected_bytes(&self) -> Vec<u8> {
        self.store.copy_range(self.selection.normalized_range())
    }

    // --- Highlights ---

    /// Store a highlight array as produced by a highlighter.
    pub fn set_highlights(&mut self, highlights: Vec<HighlightCategory>) {
        self.highlights = highlights;
    }

    pub fn highlights(&self) -> &[HighlightCategory] {
        &self.highlights
    }

    /// Category of the byte at `offset`; `Default` past the stored array.
    pub fn category_at(&self, offset: usize) -> HighlightCategory {
        self.highlights.get(offset).copied().unwrap_or_default()
    }

    /// One category per offset in `range`, padded where the array is short.
    pub fn colors_in_range(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = HighlightCategory> + '_ {
        range.map(|offset| self.category_at(offset))
    }

    /// Re-run `highlighter` over the whole document.
    ///
    /// Without a language the array is cleared. On failure the previous
    /// array is kept.
    ///
    /// # Errors
    ///
    /// Returns the highlighter's error unchanged.
    pub fn refresh_highlights(&mut self, highlighter: &dyn Highlighter) -> Result<(), HighlightError> {
        let Some(language) = self.language.as_deref() else {
            self.highlights.clear();
            return Ok(());
        };
        let highlights = highlighter.highlight(&self.store.materialize(), language)?;
        self.highlights = highlights;
        Ok(())
    }

    // --- Internals ---

    fn page_size(&self) -> isize {
        isize::try_from(self.viewport.height().max(1)).unwrap_or(1)
    }

    /// Remove the selected bytes, if any, and return where they started.
    fn take_selection(&mut self) -> Option<usize> {
        if self.selection.is_empty() {
            return None;
        }
        let range = self.selection.normalized_range();
        self.store.relocate(range.start);
        self.store.delete_range(range.len());
        Some(range.start)
    }

    fn after_edit(&mut self, position: usize) {
        self.lines.rebuild(&self.store);
        self.viewport.set_total_lines(self.lines.line_count());
        self.dirty = true;
        self.motion(|cursor, view| cursor.goto(view, position));
    }

    /// Move the cursor, collapse the selection onto it and follow it.
    fn motion(&mut self, step: impl FnOnce(&mut Cursor, &TextView<'_, u8>)) {
        self.move_with(step);
        self.selection.clear(self.cursor.position());
        self.scroll_to_cursor();
    }

    fn move_with(&mut self, step: impl FnOnce(&mut Cursor, &TextView<'_, u8>)) {
        let view = TextView::new(&self.store, &self.lines, self.tab_width);
        step(&mut self.cursor, &view);
    }

    fn scroll_to_cursor(&mut self) {
        let line = self.cursor_line();
        self.viewport.ensure_cursor_visible(line);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}
