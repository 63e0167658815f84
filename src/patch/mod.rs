mod types;
pub use types::*;

use crate::equalizer::{DefaultEqualizer, Equalizer};
use crate::error::PatchFailed;
use std::fmt::Debug;

/// Which side of each delta is expected in the target and which replaces it.
#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

impl<T: Clone + Debug> Patch<T> {
    /// Applies the patch to `target`, producing the revised sequence.
    pub fn apply_to(&self, target: &[T]) -> Result<Vec<T>, PatchFailed<T>>
    where
        T: PartialEq,
    {
        self.apply_to_with(target, &DefaultEqualizer)
    }

    pub fn apply_to_with<E>(&self, target: &[T], equalizer: &E) -> Result<Vec<T>, PatchFailed<T>>
    where
        E: Equalizer<T> + ?Sized,
    {
        splice(self, target, equalizer, Direction::Forward)
    }

    /// Undoes the patch on `target`, producing the original sequence.
    pub fn restore(&self, target: &[T]) -> Result<Vec<T>, PatchFailed<T>>
    where
        T: PartialEq,
    {
        self.restore_with(target, &DefaultEqualizer)
    }

    pub fn restore_with<E>(&self, target: &[T], equalizer: &E) -> Result<Vec<T>, PatchFailed<T>>
    where
        E: Equalizer<T> + ?Sized,
    {
        splice(self, target, equalizer, Direction::Backward)
    }
}

/// Applies `patch` to `original`.
pub fn apply<T: Clone + Debug + PartialEq>(
    original: &[T],
    patch: &Patch<T>,
) -> Result<Vec<T>, PatchFailed<T>> {
    patch.apply_to(original)
}

/// Recovers the original sequence from `revised`.
pub fn restore<T: Clone + Debug + PartialEq>(
    revised: &[T],
    patch: &Patch<T>,
) -> Result<Vec<T>, PatchFailed<T>> {
    patch.restore(revised)
}

// Copies the untouched stretches of `target` and swaps in the replacement
// side of every delta. Each delta is checked against `target` at its own,
// unshifted position; the output index of a delta is that position plus the
// net growth of all deltas before it.
fn splice<T, E>(
    patch: &Patch<T>,
    target: &[T],
    equalizer: &E,
    direction: Direction,
) -> Result<Vec<T>, PatchFailed<T>>
where
    T: Clone + Debug,
    E: Equalizer<T> + ?Sized,
{
    let mut result = Vec::with_capacity(target.len());
    let mut cursor = 0;
    let mut offset: isize = 0;

    for delta in patch {
        let (expected, replacement) = match direction {
            Direction::Forward => (delta.original(), delta.revised()),
            Direction::Backward => (delta.revised(), delta.original()),
        };
        if expected.position() < cursor || !expected.verify(target, equalizer) {
            return Err(PatchFailed {
                delta: delta.clone(),
                actual: expected.found_in(target),
            });
        }
        result.extend_from_slice(&target[cursor..expected.position()]);
        debug_assert_eq!(result.len() as isize, expected.position() as isize + offset);
        result.extend_from_slice(replacement.lines());
        offset += replacement.len() as isize - expected.len() as isize;
        cursor = expected.end();
    }
    result.extend_from_slice(&target[cursor..]);

    tracing::trace!(
        deltas = patch.len(),
        input_len = target.len(),
        output_len = result.len(),
        "patch spliced"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::myers::diff;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    proptest! {
        #[test]
        fn test_apply_roundtrip(
            old in prop::collection::vec(".*", 0..20usize),
            new in prop::collection::vec(".*", 0..20usize),
        ) {
            let patch = diff(&old, &new);
            prop_assert_eq!(patch.apply_to(&old), Ok(new));
        }

        #[test]
        fn test_restore_roundtrip(
            old in prop::collection::vec(0u8..4, 0..30usize),
            new in prop::collection::vec(0u8..4, 0..30usize),
        ) {
            let patch = diff(&old, &new);
            let revised = patch.apply_to(&old).unwrap();
            prop_assert_eq!(patch.restore(&revised), Ok(old));
        }
    }

    #[test]
    fn test_apply_change_in_middle() {
        let old = strings(&["a", "b", "c", "d", "e"]);
        let new = strings(&["a", "b", "X", "d", "e"]);
        let patch = diff(&old, &new);
        assert_eq!(patch.apply_to(&old), Ok(new));
    }

    #[test]
    fn test_apply_multiple_deltas() {
        let old = strings(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let new = strings(&["X", "b", "c", "Z", "Z", "d", "e", "g", "h", "i", "Y"]);
        let patch = diff(&old, &new);
        assert_eq!(patch.len(), 4);
        assert_eq!(apply(&old, &patch), Ok(new.clone()));
        assert_eq!(restore(&new, &patch), Ok(old));
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let old = strings(&["a", "b"]);
        assert_eq!(Patch::new().apply_to(&old), Ok(old));
    }

    #[test]
    fn test_apply_invalid_patch() {
        let old = strings(&["a", "b", "c"]);
        let mut patch = Patch::new();
        patch.add_delta(Delta::new(
            Chunk::new(1, strings(&["x"])),
            Chunk::new(1, strings(&["z"])),
        ));

        let err = patch.apply_to(&old).unwrap_err();
        assert_eq!(err.delta, patch.deltas()[0]);
        assert_eq!(err.actual, strings(&["b"]));
    }

    #[test]
    fn test_apply_past_the_end() {
        let old = strings(&["a"]);
        let mut patch = Patch::new();
        patch.add_delta(Delta::new(
            Chunk::new(1, strings(&["b", "c"])),
            Chunk::new(1, vec![]),
        ));

        let err = patch.apply_to(&old).unwrap_err();
        assert!(err.actual.is_empty());
    }

    #[test]
    fn test_apply_leaves_input_untouched_on_failure() {
        let old = strings(&["a", "b", "c"]);
        let new = strings(&["a", "c"]);
        let patch = diff(&old, &new);
        assert!(patch.apply_to(&new).is_err());
        assert_eq!(old, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_restore_checks_revised_side() {
        let old = strings(&["a", "b", "c"]);
        let new = strings(&["a", "z", "c"]);
        let patch = diff(&old, &new);
        let err = patch.restore(&old).unwrap_err();
        assert_eq!(err.actual, strings(&["b"]));
    }

    #[test]
    fn test_apply_with_equalizer() {
        let old = strings(&["A", "B", "C"]);
        let mut patch = Patch::new();
        patch.add_delta(Delta::new(
            Chunk::new(1, strings(&["b"])),
            Chunk::new(1, strings(&["y"])),
        ));
        let eq = |a: &String, b: &String| a.eq_ignore_ascii_case(b);
        assert_eq!(
            patch.apply_to_with(&old, &eq),
            Ok(strings(&["A", "y", "C"]))
        );
    }

    #[test]
    fn test_add_delta_keeps_order() {
        let mut patch = Patch::new();
        patch.add_delta(Delta::new(Chunk::new(5, vec![1]), Chunk::new(5, vec![])));
        patch.add_delta(Delta::new(Chunk::new(1, vec![2]), Chunk::new(1, vec![])));
        let positions: Vec<usize> = patch.iter().map(|d| d.original().position()).collect();
        assert_eq!(positions, vec![1, 5]);
        assert_eq!(patch.deltas()[0].kind(), DeltaType::Delete);
    }

    #[test]
    fn test_chunk_last() {
        assert_eq!(Chunk::new(3, vec!['a', 'b']).last(), Some(4));
        assert_eq!(Chunk::<char>::new(3, vec![]).last(), None);
    }

    #[test]
    fn test_delta_kind_by_sides() {
        let insert = Delta::new(Chunk::new(2, vec![]), Chunk::new(2, vec!['x']));
        let change = Delta::new(Chunk::new(2, vec!['a']), Chunk::new(2, vec!['x']));
        assert_eq!(insert.kind(), DeltaType::Insert);
        assert_eq!(change.kind(), DeltaType::Change);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one side")]
    fn test_delta_without_lines_rejected() {
        Delta::<char>::new(Chunk::new(0, vec![]), Chunk::new(0, vec![]));
    }
}
