use super::layout::{TextElement, TextView};

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor position in a document.
///
/// `position` is a logical offset on a code-point boundary. The desired
/// column is the display column vertical motion aims for; it survives trips
/// through shorter lines and is only reset by horizontal or absolute moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
    desired_column: usize,
}

impl Cursor {
    /// Create a cursor at offset 0, column 0.
    pub const fn new() -> Self {
        Self {
            position: 0,
            desired_column: 0,
        }
    }

    /// Create a cursor with an explicit position and desired column.
    pub const fn at(position: usize, desired_column: usize) -> Self {
        Self {
            position,
            desired_column,
        }
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn desired_column(&self) -> usize {
        self.desired_column
    }

    /// Move in `direction` by one step.
    pub fn move_in<T: TextElement>(&mut self, view: &TextView<'_, T>, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(view, 1),
            Direction::Right => self.move_right(view, 1),
            Direction::Up => self.move_up(view),
            Direction::Down => self.move_down(view),
        }
    }

    /// Move `n` code points left. A no-op at offset 0.
    pub fn move_left<T: TextElement>(&mut self, view: &TextView<'_, T>, n: usize) {
        let mut position = self.position;
        for _ in 0..n {
            if position == 0 {
                break;
            }
            position = view.prev_boundary(position);
        }
        self.place_horizontally(view, position);
    }

    /// Move `n` code points right. A no-op at the end of the content.
    pub fn move_right<T: TextElement>(&mut self, view: &TextView<'_, T>, n: usize) {
        let mut position = self.position;
        for _ in 0..n {
            if position >= view.len() {
                break;
            }
            position = view.next_boundary(position);
        }
        self.place_horizontally(view, position);
    }

    /// Move to the previous line, aiming for the desired column.
    pub fn move_up<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        self.move_lines(view, -1);
    }

    /// Move to the next line, aiming for the desired column.
    pub fn move_down<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        self.move_lines(view, 1);
    }

    /// Move `delta` lines up (negative) or down, clamped to the document.
    ///
    /// The desired column is kept, so passing through short lines does not
    /// lose it. A no-op when already on the first/last line.
    pub fn move_lines<T: TextElement>(&mut self, view: &TextView<'_, T>, delta: isize) {
        let line = view.line_of(self.position);
        let last = view.line_count() - 1;
        let target = line.saturating_add_signed(delta).min(last);
        if target == line {
            return;
        }
        self.position = view.offset_at_column(target, self.desired_column);
    }

    /// Place the cursor at `offset` (clamped, snapped to a code point) and
    /// reset the desired column from it.
    pub fn goto<T: TextElement>(&mut self, view: &TextView<'_, T>, offset: usize) {
        self.position = view.snap_to_boundary(offset);
        self.desired_column = view.column_of(self.position);
    }

    /// Move to the start of the current line (Home).
    pub fn move_line_start<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        let span = view.line_span(view.line_of(self.position));
        self.goto(view, span.start);
    }

    /// Move to the end of the current line (End).
    pub fn move_line_end<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        let span = view.line_span(view.line_of(self.position));
        self.goto(view, span.end);
    }

    /// Move to the start of the document (Ctrl+Home).
    pub fn move_to_start<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        self.goto(view, 0);
    }

    /// Move to the end of the document (Ctrl+End).
    pub fn move_to_end<T: TextElement>(&mut self, view: &TextView<'_, T>) {
        self.goto(view, view.len());
    }

    fn place_horizontally<T: TextElement>(&mut self, view: &TextView<'_, T>, position: usize) {
        if position == self.position {
            return;
        }
        self.position = position;
        self.desired_column = view.column_of(position);
    }
}
