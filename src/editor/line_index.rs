use std::ops::Range;

use super::gap_store::GapStore;
use super::layout::TextElement;

/// Byte span of one line, excluding its trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies on this line, counting the end-of-line position.
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Line spans of a document, rebuilt from the store after every edit.
///
/// The spans together with their newline delimiters partition the content,
/// and there is always at least one line: an empty document has a single
/// zero-length line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    spans: Vec<LineSpan>,
}

impl LineIndex {
    /// An index for the empty document.
    pub fn new() -> Self {
        Self {
            spans: vec![LineSpan::default()],
        }
    }

    pub fn from_store<T: TextElement>(store: &GapStore<T>) -> Self {
        let mut index = Self::new();
        index.rebuild(store);
        index
    }

    /// Recompute every span from the newline positions in `store`. O(N).
    pub fn rebuild<T: TextElement>(&mut self, store: &GapStore<T>) {
        let _scope = crate::perf::scope("editor.line_index.rebuild");
        let newlines = store.find_all(T::NEWLINE);
        self.spans.clear();
        self.spans.reserve(newlines.len() + 1);
        let mut start = 0;
        for newline in newlines {
            self.spans.push(LineSpan::new(start, newline));
            start = newline + 1;
        }
        self.spans.push(LineSpan::new(start, store.len()));
    }

    pub fn line_count(&self) -> usize {
        self.spans.len()
    }

    /// Span of `line`, clamped to the last line.
    pub fn line_span(&self, line: usize) -> LineSpan {
        self.spans[line.min(self.last_line())]
    }

    /// The line holding `offset` and its span.
    ///
    /// The newline position of a line (its `end`) belongs to that line.
    /// Offsets past the document end resolve to the last line.
    pub fn line_containing(&self, offset: usize) -> (usize, LineSpan) {
        let line = self
            .spans
            .partition_point(|span| span.start <= offset)
            .saturating_sub(1);
        (line, self.spans[line])
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    fn last_line(&self) -> usize {
        self.spans.len() - 1
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(text: &str) -> LineIndex {
        LineIndex::from_store(&GapStore::from_slice(text.as_bytes()))
    }

    #[test]
    fn test_empty_document_has_one_empty_line() {
        let index = index_for("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_span(0), LineSpan::new(0, 0));
    }

    #[test]
    fn test_spans_exclude_newlines() {
        let index = index_for("foo\nbar\nbaz");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_span(0), LineSpan::new(0, 3));
        assert_eq!(index.line_span(1), LineSpan::new(4, 7));
        assert_eq!(index.line_span(2), LineSpan::new(8, 11));
    }

    #[test]
    fn test_trailing_newline_adds_empty_last_line() {
        let index = index_for("hello\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_span(1), LineSpan::new(6, 6));
    }

    #[test]
    fn test_consecutive_newlines_make_empty_lines() {
        let index = index_for("\n\n");
        assert_eq!(
            index.spans(),
            &[
                LineSpan::new(0, 0),
                LineSpan::new(1, 1),
                LineSpan::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_carriage_return_stays_in_line() {
        let index = index_for("a\r\nb");
        assert_eq!(index.line_span(0), LineSpan::new(0, 2));
        assert_eq!(index.line_span(1), LineSpan::new(3, 4));
    }

    #[test]
    fn test_line_span_clamps_line_number() {
        let index = index_for("a\nb");
        assert_eq!(index.line_span(99), LineSpan::new(2, 3));
    }

    #[test]
    fn test_line_containing_maps_offsets() {
        let index = index_for("foo\nbar\nbaz");
        assert_eq!(index.line_containing(0).0, 0);
        assert_eq!(index.line_containing(3).0, 0); // end of "foo"
        assert_eq!(index.line_containing(4).0, 1);
        assert_eq!(index.line_containing(7).0, 1);
        assert_eq!(index.line_containing(8), (2, LineSpan::new(8, 11)));
        assert_eq!(index.line_containing(11).0, 2);
        assert_eq!(index.line_containing(500).0, 2);
    }

    #[test]
    fn test_rebuild_tracks_edits() {
        let mut store = GapStore::from_slice(b"ab");
        let mut index = LineIndex::from_store(&store);
        store.relocate(1);
        store.insert(b'\n');
        index.rebuild(&store);
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_span(1), LineSpan::new(2, 3));
    }

    #[test]
    fn test_char_store_spans_count_code_points() {
        let index = LineIndex::from_store(&GapStore::from_text("né\nü"));
        assert_eq!(index.line_span(0), LineSpan::new(0, 2));
        assert_eq!(index.line_span(1), LineSpan::new(3, 4));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spans_with_delimiters_reconstruct_document(text in "[a-c\n]{0,200}") {
                let store = GapStore::from_slice(text.as_bytes());
                let index = LineIndex::from_store(&store);
                prop_assert!(index.line_count() >= 1);

                let mut rebuilt = Vec::new();
                for (i, span) in index.spans().iter().enumerate() {
                    rebuilt.extend(store.range_iter(span.range()));
                    if i + 1 < index.line_count() {
                        prop_assert_eq!(store.get(span.end), Some(b'\n'));
                        prop_assert_eq!(index.spans()[i + 1].start, span.end + 1);
                        rebuilt.push(b'\n');
                    }
                }
                prop_assert_eq!(rebuilt, text.as_bytes().to_vec());
            }

            #[test]
            fn line_containing_agrees_with_spans(text in "[ab\n]{0,100}", offset in 0..120usize) {
                let store = GapStore::from_slice(text.as_bytes());
                let index = LineIndex::from_store(&store);
                let (line, span) = index.line_containing(offset);
                prop_assert_eq!(span, index.line_span(line));
                prop_assert!(span.contains(offset.min(store.len())));
            }
        }
    }
}
