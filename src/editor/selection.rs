use std::ops::Range;

/// A selected span between an anchor and an active end.
///
/// The anchor stays where the selection started; the active end follows the
/// cursor. The selection is empty when both ends coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: usize,
    active: usize,
}

impl Selection {
    /// An empty selection at `offset`.
    pub const fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            active: offset,
        }
    }

    pub const fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    pub const fn active(&self) -> usize {
        self.active
    }

    pub const fn set_anchor(&mut self, offset: usize) {
        self.anchor = offset;
    }

    pub const fn set_active(&mut self, offset: usize) {
        self.active = offset;
    }

    /// Collapse both ends onto `cursor`.
    pub const fn clear(&mut self, cursor: usize) {
        self.anchor = cursor;
        self.active = cursor;
    }

    pub const fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The selected offsets in ascending order, regardless of direction.
    pub fn normalized_range(&self) -> Range<usize> {
        self.anchor.min(self.active)..self.anchor.max(self.active)
    }

    /// Whether `offset` is inside the selection.
    pub fn contains(&self, offset: usize) -> bool {
        self.normalized_range().contains(&offset)
    }

    /// Number of selected elements.
    pub const fn len(&self) -> usize {
        self.anchor.abs_diff(self.active)
    }
}
