mod text;
mod types;
pub use types::*;

use crate::equalizer::{DefaultEqualizer, Equalizer};
use crate::error::ConfigurationError;
use crate::myers;
use crate::patch::{DeltaType, Patch};
use text::{collapse_whitespace, expand_tabs, render, unmarked, wrap, Marked};

/// Builds side-by-side rows for displaying the difference of two texts.
///
/// ```
/// use seqpatch::rows::{DiffRowConfig, DiffRowGenerator, Tag};
///
/// let generator = DiffRowGenerator::new(DiffRowConfig::default()).unwrap();
/// let rows = generator.generate_diff_rows(&["a", "b"], &["a", "c"]);
/// assert_eq!(rows[0].tag, Tag::Equal);
/// assert_eq!(rows[1].tag, Tag::Change);
/// ```
#[derive(Debug, Clone)]
pub struct DiffRowGenerator<E = DefaultEqualizer> {
    config: DiffRowConfig,
    equalizer: E,
}

impl DiffRowGenerator<DefaultEqualizer> {
    pub fn new(config: DiffRowConfig) -> Result<Self, ConfigurationError> {
        Self::with_equalizer(config, DefaultEqualizer)
    }
}

impl<E: Equalizer<str>> DiffRowGenerator<E> {
    /// Lines are compared with `equalizer`, after whitespace normalization
    /// when `ignore_white_spaces` is set.
    pub fn with_equalizer(config: DiffRowConfig, equalizer: E) -> Result<Self, ConfigurationError> {
        if config.column_width == Some(0) {
            return Err(ConfigurationError::ZeroColumnWidth);
        }
        Ok(DiffRowGenerator { config, equalizer })
    }

    pub fn config(&self) -> &DiffRowConfig {
        &self.config
    }

    fn lines_equal(&self, original: &str, revised: &str) -> bool {
        if self.config.ignore_white_spaces {
            self.equalizer
                .equals(&collapse_whitespace(original), &collapse_whitespace(revised))
        } else {
            self.equalizer.equals(original, revised)
        }
    }

    pub fn generate_diff_rows<S>(&self, original: &[S], revised: &[S]) -> Vec<DiffRow>
    where
        S: AsRef<str> + Clone,
    {
        let equalizer = |a: &S, b: &S| self.lines_equal(a.as_ref(), b.as_ref());
        let patch = myers::diff_with(original, revised, &equalizer);
        self.generate_diff_rows_with_patch(original, revised, &patch)
    }

    /// Builds rows from a patch computed beforehand for the same inputs.
    pub fn generate_diff_rows_with_patch<S: AsRef<str>>(
        &self,
        original: &[S],
        revised: &[S],
        patch: &Patch<S>,
    ) -> Vec<DiffRow> {
        let mut rows = vec![];
        let mut old_end = 0;
        let mut new_end = 0;

        for delta in patch {
            let orig = delta.original();
            let rev = delta.revised();
            let old_equal = span(original, old_end, orig.position());
            let new_equal = span(revised, new_end, rev.position());
            self.push_pairs(&mut rows, Tag::Equal, old_equal, new_equal);

            match delta.kind() {
                DeltaType::Insert => self.push_pairs(&mut rows, Tag::Insert, &[], rev.lines()),
                DeltaType::Delete => self.push_pairs(&mut rows, Tag::Delete, orig.lines(), &[]),
                DeltaType::Change if self.config.show_inline_diffs => {
                    let (old, new) = inline_diff(orig.lines(), rev.lines());
                    self.push_marked(&mut rows, Tag::Change, old, new);
                }
                DeltaType::Change => {
                    self.push_pairs(&mut rows, Tag::Change, orig.lines(), rev.lines())
                }
            }
            old_end = orig.end();
            new_end = rev.end();
        }
        let old_rest = span(original, old_end, original.len());
        let new_rest = span(revised, new_end, revised.len());
        self.push_pairs(&mut rows, Tag::Equal, old_rest, new_rest);

        tracing::debug!(deltas = patch.len(), rows = rows.len(), "generated diff rows");
        rows
    }

    fn push_pairs<S: AsRef<str>>(&self, rows: &mut Vec<DiffRow>, tag: Tag, old: &[S], new: &[S]) {
        let prepare = |lines: &[S]| -> Vec<Marked> {
            lines
                .iter()
                .map(|l| unmarked(&expand_tabs(l.as_ref())))
                .collect()
        };
        self.push_marked(rows, tag, prepare(old), prepare(new));
    }

    // Pairs old and new lines by index, then wraps each pair into as many
    // rows as its longer side needs.
    fn push_marked(&self, rows: &mut Vec<DiffRow>, tag: Tag, old: Vec<Marked>, new: Vec<Marked>) {
        let width = self.config.column_width;
        for i in 0..old.len().max(new.len()) {
            let old_pieces = old.get(i).map(|l| wrap(l, width)).unwrap_or_default();
            let new_pieces = new.get(i).map(|l| wrap(l, width)).unwrap_or_default();
            for j in 0..old_pieces.len().max(new_pieces.len()) {
                let old_line = old_pieces
                    .get(j)
                    .map(|p| render(p, &self.config.inline_old, self.config.escape_html))
                    .unwrap_or_default();
                let new_line = new_pieces
                    .get(j)
                    .map(|p| render(p, &self.config.inline_new, self.config.escape_html))
                    .unwrap_or_default();
                rows.push(DiffRow::new(tag, old_line, new_line));
            }
        }
    }
}

fn span<S>(lines: &[S], from: usize, to: usize) -> &[S] {
    let end = to.min(lines.len());
    &lines[from.min(end)..end]
}

// Diffs the changed lines again character by character and marks what
// differs. Lines are joined with '\n' so edits may cross line boundaries.
fn inline_diff<S: AsRef<str>>(old: &[S], new: &[S]) -> (Vec<Marked>, Vec<Marked>) {
    let join = |lines: &[S]| -> Vec<char> {
        lines
            .iter()
            .map(|l| expand_tabs(l.as_ref()))
            .collect::<Vec<_>>()
            .join("\n")
            .chars()
            .collect()
    };
    let old_chars = join(old);
    let new_chars = join(new);
    let patch = myers::diff(&old_chars, &new_chars);

    let mut old_marks = vec![false; old_chars.len()];
    let mut new_marks = vec![false; new_chars.len()];
    for delta in &patch {
        let orig = delta.original();
        let rev = delta.revised();
        old_marks[orig.position()..orig.end()].fill(true);
        new_marks[rev.position()..rev.end()].fill(true);
    }
    (split_lines(&old_chars, &old_marks), split_lines(&new_chars, &new_marks))
}

fn split_lines(chars: &[char], marks: &[bool]) -> Vec<Marked> {
    let mut lines = vec![Marked::new()];
    for (&c, &marked) in chars.iter().zip(marks) {
        if c == '\n' {
            lines.push(Marked::new());
        } else if let Some(line) = lines.last_mut() {
            line.push((c, marked));
        }
    }
    lines
}
