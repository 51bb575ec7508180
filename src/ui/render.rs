use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use super::style::Theme;
use super::{GUTTER_PADDING, STATUS_ROWS, status};
use crate::app::Model;
use crate::editor::{Document, TextElement, advance_column};

/// Render the whole screen: text area with gutter, then the status bar.
pub fn render(model: &Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let [text_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_ROWS)]).areas(frame.area());
    render_document(&model.document, &model.theme, frame, text_area);
    status::render_status_bar(model, frame, status_area);
}

/// Columns taken by the line-number gutter, padding included.
pub fn gutter_width(line_count: usize) -> u16 {
    line_number_width(line_count).max(4) + GUTTER_PADDING
}

/// Size of the text area for a terminal of `width` by `height`.
pub fn text_area_size(width: u16, height: u16, line_count: usize) -> (u16, u16) {
    (
        width.saturating_sub(gutter_width(line_count)),
        height.saturating_sub(STATUS_ROWS),
    )
}

fn render_document(doc: &Document, theme: &Theme, frame: &mut Frame, area: Rect) {
    let gutter = gutter_width(doc.line_count());
    let [gutter_area, body_area] =
        Layout::horizontal([Constraint::Length(gutter), Constraint::Min(0)]).areas(area);

    let cursor_line = doc.cursor_line();
    let visible = doc.viewport().visible_range();
    let number_width = usize::from(gutter - GUTTER_PADDING);

    let mut numbers = Vec::with_capacity(visible.len());
    let mut lines = Vec::with_capacity(visible.len());
    for line in visible.clone() {
        let current = line == cursor_line;
        let gutter_style = if current {
            theme.gutter_current
        } else {
            theme.gutter
        };
        numbers.push(Line::styled(
            format!("{:>number_width$}  ", line + 1),
            gutter_style,
        ));

        let text = line_content(doc, theme, line);
        lines.push(if current {
            text.patch_style(theme.current_line)
        } else {
            text
        });
    }

    frame.render_widget(Paragraph::new(numbers).style(theme.gutter), gutter_area);
    frame.render_widget(Paragraph::new(lines).style(theme.text), body_area);

    if visible.contains(&cursor_line) {
        let column = doc.cursor_column();
        let row = cursor_line - visible.start;
        if let (Ok(column), Ok(row)) = (u16::try_from(column), u16::try_from(row))
            && column < body_area.width
        {
            frame.set_cursor_position(Position::new(body_area.x + column, body_area.y + row));
        }
    }
}

/// Styled text of one line: tabs expanded, one cell per code point.
fn line_content(doc: &Document, theme: &Theme, line: usize) -> Line<'static> {
    let span = doc.line_span(line);
    let bytes = doc.line_bytes(line);
    let selection = doc.selection();
    let tab_width = doc.tab_width();

    let mut out = StyledRun::default();
    let mut column = 0;
    let mut offset = span.start;
    for chunk in bytes.utf8_chunks() {
        for (index, c) in chunk.valid().char_indices() {
            let at = offset + index;
            let style = theme.cell(doc.category_at(at), selection.contains(at));
            if c == '\t' {
                let next = advance_column(column, c, tab_width);
                for _ in column..next {
                    out.push(' ', style);
                }
                column = next;
            } else {
                out.push(display_char(c), style);
                column += 1;
            }
        }
        offset += chunk.valid().len();
        for (index, &byte) in chunk.invalid().iter().enumerate() {
            if byte.is_boundary() {
                let at = offset + index;
                let style = theme.cell(doc.category_at(at), selection.contains(at));
                out.push(char::REPLACEMENT_CHARACTER, style);
                column += 1;
            }
        }
        offset += chunk.invalid().len();
    }

    // A selected newline shows as one highlighted cell past the text.
    if span.end < doc.len() && selection.contains(span.end) {
        out.push(' ', Style::default().bg(theme.selection_bg));
    }
    out.finish()
}

/// Characters that would not occupy exactly one cell are drawn as a
/// placeholder so columns stay aligned with the cursor.
fn display_char(c: char) -> char {
    match c.width() {
        Some(1) => c,
        _ => char::REPLACEMENT_CHARACTER,
    }
}

/// Collects characters into spans, merging runs of equal style.
#[derive(Default)]
struct StyledRun {
    spans: Vec<Span<'static>>,
    text: String,
    style: Style,
}

impl StyledRun {
    fn push(&mut self, c: char, style: Style) {
        if style != self.style && !self.text.is_empty() {
            self.flush();
        }
        self.style = style;
        self.text.push(c);
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.spans.push(Span::styled(text, self.style));
    }

    fn finish(mut self) -> Line<'static> {
        if !self.text.is_empty() {
            self.flush();
        }
        Line::from(self.spans)
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
