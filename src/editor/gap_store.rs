use std::fmt;
use std::ops::Range;

/// Growth floor for an exhausted gap. Tests use a tiny floor so growth paths
/// are hit with short inputs.
const GROWTH_FLOOR: usize = if cfg!(test) { 5 } else { 64 };

/// The gap grows by this fraction (1/20, i.e. 5%) of the backing capacity.
const GROWTH_DIVISOR: usize = 20;

/// A gap buffer over `Copy` elements.
///
/// Content lives in a single backing vector with a contiguous unused region
/// (the gap) at the edit position:
///
/// ```text
/// backing: [ before gap ][ ..gap.. ][ after gap ]
///           0             gap_start  gap_end      capacity
/// ```
///
/// Inserting or deleting at the gap is O(1) amortized; moving the gap costs
/// O(distance). Every offset taken by this type is a *logical* offset, i.e.
/// a position in the content as if the gap did not exist. Out-of-range
/// offsets are clamped to the nearest valid boundary, never rejected.
///
/// # Example
///
/// ```
/// use elmo::editor::GapStore;
///
/// let mut store = GapStore::from_slice(b"held");
/// store.relocate(3);
/// store.insert(b'l');
/// store.relocate(5);
/// store.insert_slice(b" world");
/// assert_eq!(store.materialize(), b"hello world");
/// ```
#[derive(Clone)]
pub struct GapStore<T> {
    buffer: Vec<T>,
    gap_start: usize,
    gap_end: usize,
}

impl<T: Copy + Default> GapStore<T> {
    /// Create an empty store with no backing capacity.
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            gap_start: 0,
            gap_end: 0,
        }
    }

    /// Create a store holding `content`.
    ///
    /// The backing is filled exactly; the gap is empty and sits at offset 0,
    /// so the first insert grows the backing.
    pub fn from_slice(content: &[T]) -> Self {
        Self {
            buffer: content.to_vec(),
            gap_start: 0,
            gap_end: 0,
        }
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        self.buffer.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the backing array, gap included.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub const fn gap_start(&self) -> usize {
        self.gap_start
    }

    pub const fn gap_end(&self) -> usize {
        self.gap_end
    }

    /// Logical offset of the edit position (the start of the gap).
    pub const fn position(&self) -> usize {
        self.gap_start
    }

    const fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Insert one element at the edit position and advance past it.
    pub fn insert(&mut self, element: T) {
        if self.gap_len() == 0 {
            self.grow();
        }
        self.buffer[self.gap_start] = element;
        self.gap_start += 1;
        self.debug_check();
    }

    /// Insert `elements` in order, as repeated single inserts.
    pub fn insert_slice(&mut self, elements: &[T]) {
        for &element in elements {
            self.insert(element);
        }
    }

    /// Remove the element right after the edit position.
    ///
    /// Returns `false` (and does nothing) at the end of the content.
    pub fn delete(&mut self) -> bool {
        if self.gap_end == self.buffer.len() {
            return false;
        }
        self.gap_end += 1;
        self.debug_check();
        true
    }

    /// Remove up to `count` elements after the edit position.
    ///
    /// Returns how many elements were actually removed.
    pub fn delete_range(&mut self, count: usize) -> usize {
        let removed = count.min(self.buffer.len() - self.gap_end);
        self.gap_end += removed;
        self.debug_check();
        removed
    }

    /// Remove the element right before the edit position.
    ///
    /// Returns `false` (and does nothing) at the start of the content.
    pub fn backspace(&mut self) -> bool {
        if self.gap_start == 0 {
            return false;
        }
        self.gap_start -= 1;
        self.debug_check();
        true
    }

    /// Move the gap so that it starts at `target` (clamped to `0..=len`).
    ///
    /// Returns the position the gap actually moved to.
    pub fn relocate(&mut self, target: usize) -> usize {
        let target = target.min(self.len());
        if target < self.gap_start {
            // [a b c d e _ _ _ f] -> [a b _ _ _ c d e f]
            let shift = self.gap_start - target;
            self.buffer
                .copy_within(target..self.gap_start, self.gap_end - shift);
            self.gap_start = target;
            self.gap_end -= shift;
        } else if target > self.gap_start {
            // [a b _ _ _ c d e f] -> [a b c d e _ _ _ f]
            let shift = target - self.gap_start;
            self.buffer
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
        tracing::trace!(to = target, capacity = self.buffer.len(), "gap relocated");
        self.debug_check();
        target
    }

    /// Read the element at a logical offset.
    ///
    /// Offsets past the end clamp to the last element; only an empty store
    /// yields `None`.
    pub fn read_at(&self, offset: usize) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        Some(self.buffer[self.physical(offset.min(last))])
    }

    /// Read the element at a logical offset, or `None` when out of range.
    pub fn get(&self, offset: usize) -> Option<T> {
        (offset < self.len()).then(|| self.buffer[self.physical(offset)])
    }

    /// Logical offsets of every element equal to `value`.
    pub fn find_all(&self, value: T) -> Vec<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .enumerate()
            .filter_map(|(offset, element)| (element == value).then_some(offset))
            .collect()
    }

    /// Copy the logical content into a contiguous vector.
    pub fn materialize(&self) -> Vec<T> {
        let (before, after) = self.as_slices();
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(before);
        out.extend_from_slice(after);
        out
    }

    /// Content before and after the gap.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        (
            &self.buffer[..self.gap_start],
            &self.buffer[self.gap_end..],
        )
    }

    /// The two backing slices covering a logical range (clamped).
    pub fn slices_in(&self, range: Range<usize>) -> (&[T], &[T]) {
        let range = self.clamp_range(range);
        let (before, after) = self.as_slices();
        let empty: &[T] = &[];
        if range.end <= self.gap_start {
            (&before[range], empty)
        } else if range.start >= self.gap_start {
            (
                &after[range.start - self.gap_start..range.end - self.gap_start],
                empty,
            )
        } else {
            (
                &before[range.start..],
                &after[..range.end - self.gap_start],
            )
        }
    }

    /// Iterate the elements of a logical range (clamped), skipping the gap.
    pub fn range_iter(&self, range: Range<usize>) -> impl Iterator<Item = T> + '_ {
        let (first, second) = self.slices_in(range);
        first.iter().chain(second).copied()
    }

    /// Copy a logical range (clamped) into a contiguous vector.
    pub fn copy_range(&self, range: Range<usize>) -> Vec<T> {
        let (first, second) = self.slices_in(range);
        let mut out = Vec::with_capacity(first.len() + second.len());
        out.extend_from_slice(first);
        out.extend_from_slice(second);
        out
    }

    /// Iterate the whole logical content, skipping the gap.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (before, after) = self.as_slices();
        before.iter().chain(after).copied()
    }

    const fn physical(&self, offset: usize) -> usize {
        if offset < self.gap_start {
            offset
        } else {
            offset + self.gap_len()
        }
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.len());
        range.start.min(end)..end
    }

    /// Grow the backing by 5% of its size (at least the growth floor),
    /// keeping the content on both sides of the gap in place.
    fn grow(&mut self) {
        let growth = (self.buffer.len() / GROWTH_DIVISOR).max(GROWTH_FLOOR);
        let old_capacity = self.buffer.len();
        self.buffer.resize(old_capacity + growth, T::default());
        self.buffer
            .copy_within(self.gap_end..old_capacity, self.gap_end + growth);
        self.gap_end += growth;
        tracing::trace!(
            old_capacity,
            capacity = self.buffer.len(),
            "gap grown"
        );
    }

    fn debug_check(&self) {
        debug_assert!(
            self.gap_start <= self.gap_end && self.gap_end <= self.buffer.len(),
            "gap bounds crossed: {}..{} in {}",
            self.gap_start,
            self.gap_end,
            self.buffer.len()
        );
    }
}

impl<T: Copy + Default> Default for GapStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> From<&[T]> for GapStore<T> {
    fn from(content: &[T]) -> Self {
        Self::from_slice(content)
    }
}

impl GapStore<char> {
    /// Create a code-point store from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: text.chars().collect(),
            gap_start: 0,
            gap_end: 0,
        }
    }
}

impl fmt::Display for GapStore<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|ch| fmt::Write::write_char(f, ch))
    }
}

impl<T> fmt::Debug for GapStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapStore")
            .field("len", &(self.buffer.len() - (self.gap_end - self.gap_start)))
            .field("capacity", &self.buffer.len())
            .field("gap", &(self.gap_start..self.gap_end))
            .finish()
    }
}
