use crate::equalizer::Equalizer;

/// A contiguous slice of a sequence, remembered together with the 0-based
/// index it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk<T> {
    position: usize,
    lines: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn new(position: usize, lines: Vec<T>) -> Self {
        Chunk { position, lines }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lines(&self) -> &[T] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last element covered, `None` for an empty chunk.
    pub fn last(&self) -> Option<usize> {
        self.lines.len().checked_sub(1).map(|l| self.position + l)
    }

    /// One past the last element covered.
    pub fn end(&self) -> usize {
        self.position.saturating_add(self.lines.len())
    }

    /// Whether `target` holds exactly these lines at `position`.
    pub fn verify<E: Equalizer<T> + ?Sized>(&self, target: &[T], equalizer: &E) -> bool {
        match target.get(self.position..self.end()) {
            Some(found) => self
                .lines
                .iter()
                .zip(found)
                .all(|(expected, actual)| equalizer.equals(expected, actual)),
            None => false,
        }
    }

    pub(crate) fn found_in(&self, target: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let start = self.position.min(target.len());
        let end = self.end().min(target.len());
        target[start..end].to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaType {
    /// Only the revised side has lines.
    Insert,
    /// Only the original side has lines.
    Delete,
    /// Lines on the original side are replaced by the revised ones.
    Change,
}

/// One edit: the `original` chunk of the source becomes the `revised` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delta<T> {
    kind: DeltaType,
    original: Chunk<T>,
    revised: Chunk<T>,
}

impl<T> Delta<T> {
    /// Builds a delta, classifying it by which sides carry lines.
    ///
    /// At least one side must be non-empty; debug builds panic otherwise.
    pub fn new(original: Chunk<T>, revised: Chunk<T>) -> Self {
        debug_assert!(
            !(original.is_empty() && revised.is_empty()),
            "a delta needs lines on at least one side"
        );
        let kind = match (original.is_empty(), revised.is_empty()) {
            (true, false) => DeltaType::Insert,
            (false, true) => DeltaType::Delete,
            _ => DeltaType::Change,
        };
        Delta {
            kind,
            original,
            revised,
        }
    }

    pub fn kind(&self) -> DeltaType {
        self.kind
    }

    pub fn original(&self) -> &Chunk<T> {
        &self.original
    }

    pub fn revised(&self) -> &Chunk<T> {
        &self.revised
    }

    /// Whether this delta can be applied to `target`.
    pub fn verify<E: Equalizer<T> + ?Sized>(&self, target: &[T], equalizer: &E) -> bool {
        self.original.verify(target, equalizer)
    }
}

/// Deltas sorted by original position, never overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Patch<T> {
    deltas: Vec<Delta<T>>,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch { deltas: Vec::new() }
    }
}

impl<T> Patch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `delta` after every delta starting at or before it.
    pub fn add_delta(&mut self, delta: Delta<T>) {
        let at = self
            .deltas
            .partition_point(|d| d.original.position <= delta.original.position);
        self.deltas.insert(at, delta);
    }

    pub fn deltas(&self) -> &[Delta<T>] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delta<T>> {
        self.deltas.iter()
    }
}

impl<T> FromIterator<Delta<T>> for Patch<T> {
    fn from_iter<I: IntoIterator<Item = Delta<T>>>(iter: I) -> Self {
        let mut deltas: Vec<Delta<T>> = iter.into_iter().collect();
        deltas.sort_by_key(|d| d.original.position);
        Patch { deltas }
    }
}

impl<T> IntoIterator for Patch<T> {
    type Item = Delta<T>;
    type IntoIter = std::vec::IntoIter<Delta<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Patch<T> {
    type Item = &'a Delta<T>;
    type IntoIter = std::slice::Iter<'a, Delta<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}
