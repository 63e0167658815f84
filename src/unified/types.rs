/// One body line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<T> {
    Context(T),
    Delete(T),
    Insert(T),
}

/// A group of nearby deltas with their surrounding context.
///
/// Positions are 0-based; they are converted to the 1-based numbers of the
/// text format only when the header is rendered or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    pub old_position: usize,
    pub new_position: usize,
    pub lines: Vec<Line<T>>,
}

impl<T> Hunk<T> {
    /// Lines taken from the original side: context and deletions.
    pub fn old_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| !matches!(l, Line::Insert(_)))
            .count()
    }

    /// Lines found on the revised side: context and insertions.
    pub fn new_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| !matches!(l, Line::Delete(_)))
            .count()
    }
}
