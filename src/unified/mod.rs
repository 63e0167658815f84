//! Reading and writing the unified diff text format.
//!
//! ```text
//! --- original
//! +++ revised
//! @@ -origStart,origCount +revStart,revCount @@
//!  context line
//! -deleted line
//! +inserted line
//! ```
//!
//! Line numbers in the text are 1-based. A side with a count of zero names
//! the line *before* the empty range, as GNU diff and `patch` do. Java
//! DiffUtils instead writes `position + 1` for empty sides, so its zero-context
//! inserts and deletes read one line later here, and ours one line earlier
//! there.

mod types;
pub use types::*;

use crate::error::{ParseError, ParseErrorKind};
use crate::patch::{Chunk, Delta, Patch};
use std::mem;

pub trait ToPatch {
    fn to_patch(&self) -> String;
}

pub trait FromPatch: Sized {
    fn from_patch(s: &str) -> Result<Self, ParseError>;
}

impl<T: AsRef<str>> ToPatch for Line<T> {
    fn to_patch(&self) -> String {
        match self {
            Line::Context(el) => format!(" {}", el.as_ref()),
            Line::Delete(el) => format!("-{}", el.as_ref()),
            Line::Insert(el) => format!("+{}", el.as_ref()),
        }
    }
}

impl<T: AsRef<str>> ToPatch for Hunk<T> {
    fn to_patch(&self) -> String {
        let body = self
            .lines
            .iter()
            .map(ToPatch::to_patch)
            .collect::<Vec<String>>();
        format!("{}\n{}", hunk_header(self), body.join("\n"))
    }
}

impl FromPatch for Patch<String> {
    fn from_patch(s: &str) -> Result<Self, ParseError> {
        // can't use `.lines()` because of Windows \r
        // would break the roundtrip property
        let lines: Vec<&str> = s.split('\n').collect();
        parse_unified_diff(&lines)
    }
}

fn header_start(position: usize, count: usize) -> usize {
    if count == 0 {
        position
    } else {
        position + 1
    }
}

fn hunk_header<T>(hunk: &Hunk<T>) -> String {
    let old_count = hunk.old_count();
    let new_count = hunk.new_count();
    format!(
        "@@ -{},{} +{},{} @@",
        header_start(hunk.old_position, old_count),
        old_count,
        header_start(hunk.new_position, new_count),
        new_count
    )
}

/// Renders `patch` as unified diff lines with up to `context_size` unchanged
/// lines around every change.
///
/// Deltas whose gap is at most `2 * context_size` lines share a hunk. An
/// empty patch yields only the two file header lines.
pub fn generate_unified_diff<T: AsRef<str>>(
    original_name: &str,
    revised_name: &str,
    original_lines: &[T],
    patch: &Patch<T>,
    context_size: usize,
) -> Vec<String> {
    let hunks = hunks(original_lines, patch, context_size);
    let mut out = vec![
        format!("--- {original_name}"),
        format!("+++ {revised_name}"),
    ];
    for hunk in &hunks {
        out.push(hunk_header(hunk));
        out.extend(hunk.lines.iter().map(ToPatch::to_patch));
    }
    tracing::debug!(
        deltas = patch.len(),
        hunks = hunks.len(),
        context_size,
        "generated unified diff"
    );
    out
}

/// Groups the deltas of `patch` into hunks, borrowing context lines from
/// `original_lines`.
pub fn hunks<'a, T>(
    original_lines: &'a [T],
    patch: &'a Patch<T>,
    context_size: usize,
) -> Vec<Hunk<&'a T>> {
    let mut builder = HunkBuilder::new(original_lines, context_size);
    for delta in patch {
        builder.process(delta);
    }
    builder.finish()
}

struct HunkBuilder<'a, T> {
    original: &'a [T],
    context_size: usize,
    current: Option<Hunk<&'a T>>,
    last_end: usize,
    hunks: Vec<Hunk<&'a T>>,
}

impl<'a, T> HunkBuilder<'a, T> {
    fn new(original: &'a [T], context_size: usize) -> Self {
        HunkBuilder {
            original,
            context_size,
            current: None,
            last_end: 0,
            hunks: vec![],
        }
    }

    // Clipped to the original, so a patch made for a longer base cannot panic.
    fn context(&self, from: usize, to: usize) -> &'a [T] {
        let end = to.min(self.original.len());
        let start = from.min(end);
        &self.original[start..end]
    }

    fn process(&mut self, delta: &'a Delta<T>) {
        let position = delta.original().position();
        let mut hunk = match self.current.take() {
            Some(mut hunk)
                if position.saturating_sub(self.last_end) <= 2 * self.context_size =>
            {
                let between = self.context(self.last_end, position);
                hunk.lines.extend(between.iter().map(Line::Context));
                hunk
            }
            previous => {
                if let Some(done) = previous {
                    self.close(done);
                }
                let leading = self.context(position.saturating_sub(self.context_size), position);
                Hunk {
                    old_position: position - leading.len(),
                    new_position: delta.revised().position().saturating_sub(leading.len()),
                    lines: leading.iter().map(Line::Context).collect(),
                }
            }
        };
        hunk.lines
            .extend(delta.original().lines().iter().map(Line::Delete));
        hunk.lines
            .extend(delta.revised().lines().iter().map(Line::Insert));
        self.current = Some(hunk);
        self.last_end = delta.original().end();
    }

    fn close(&mut self, mut hunk: Hunk<&'a T>) {
        let trailing = self.context(self.last_end, self.last_end + self.context_size);
        hunk.lines.extend(trailing.iter().map(Line::Context));
        self.hunks.push(hunk);
    }

    fn finish(mut self) -> Vec<Hunk<&'a T>> {
        if let Some(hunk) = self.current.take() {
            self.close(hunk);
        }
        self.hunks
    }
}

/// Reads a unified diff back into a patch.
///
/// Lines before the `+++` header are skipped. Context lines separate the
/// deltas of a hunk, so every edited run becomes its own insert, delete or
/// change delta. Hunk headers may omit counts (meaning one line); empty body
/// lines count as empty context and `\ No newline at end of file` markers
/// are ignored.
pub fn parse_unified_diff<S: AsRef<str>>(lines: &[S]) -> Result<Patch<String>, ParseError> {
    let mut parser = Parser {
        state: State::Prelude,
        patch: Patch::new(),
    };
    for (index, line) in lines.iter().enumerate() {
        parser.feed(index + 1, line.as_ref())?;
    }
    let patch = parser.finish()?;
    tracing::debug!(lines = lines.len(), deltas = patch.len(), "parsed unified diff");
    Ok(patch)
}

struct OpenHunk {
    header_line: usize,
    header: String,
    hunk: Hunk<String>,
    old_left: usize,
    new_left: usize,
}

enum State {
    Prelude,
    BetweenHunks,
    InHunk(OpenHunk),
}

struct Parser {
    state: State,
    patch: Patch<String>,
}

impl Parser {
    fn feed(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        let state = mem::replace(&mut self.state, State::BetweenHunks);
        self.state = match state {
            State::Prelude | State::BetweenHunks if line.starts_with("@@") => {
                open_hunk(line_number, line)?
            }
            State::Prelude if line.starts_with("+++") => State::BetweenHunks,
            State::Prelude => State::Prelude,
            State::BetweenHunks if line.is_empty() || line.starts_with('\\') => {
                State::BetweenHunks
            }
            State::BetweenHunks => {
                return Err(ParseError::new(
                    line_number,
                    line,
                    ParseErrorKind::UnexpectedLine,
                ))
            }
            State::InHunk(open) => self.extend(open, line_number, line)?,
        };
        Ok(())
    }

    fn extend(
        &mut self,
        mut open: OpenHunk,
        line_number: usize,
        line: &str,
    ) -> Result<State, ParseError> {
        if line.starts_with('\\') {
            return Ok(State::InHunk(open));
        }
        let body = parse_line(line).map_err(|kind| ParseError::new(line_number, line, kind))?;
        let (old, new) = match body {
            Line::Context(_) => (1, 1),
            Line::Delete(_) => (1, 0),
            Line::Insert(_) => (0, 1),
        };
        if open.old_left < old || open.new_left < new {
            return Err(ParseError::new(
                line_number,
                line,
                ParseErrorKind::BodyExceedsHeader,
            ));
        }
        open.old_left -= old;
        open.new_left -= new;
        open.hunk.lines.push(body);

        if open.old_left == 0 && open.new_left == 0 {
            for delta in hunk_deltas(open.hunk) {
                self.patch.add_delta(delta);
            }
            Ok(State::BetweenHunks)
        } else {
            Ok(State::InHunk(open))
        }
    }

    fn finish(self) -> Result<Patch<String>, ParseError> {
        match self.state {
            State::InHunk(open) => Err(ParseError::new(
                open.header_line,
                &open.header,
                ParseErrorKind::UnexpectedEof,
            )),
            _ => Ok(self.patch),
        }
    }
}

fn open_hunk(line_number: usize, line: &str) -> Result<State, ParseError> {
    let malformed = || ParseError::new(line_number, line, ParseErrorKind::MalformedHunkHeader);
    let ((old_start, old_count), (new_start, new_count)) =
        parse_hunk_header(line).ok_or_else(malformed)?;
    // body lines advance from the start, so every range must stay addressable
    if old_start.checked_add(old_count).is_none() || new_start.checked_add(new_count).is_none() {
        return Err(malformed());
    }
    if old_count == 0 && new_count == 0 {
        return Ok(State::BetweenHunks);
    }
    Ok(State::InHunk(OpenHunk {
        header_line: line_number,
        header: line.to_string(),
        hunk: Hunk {
            old_position: position_of(old_start, old_count),
            new_position: position_of(new_start, new_count),
            lines: vec![],
        },
        old_left: old_count,
        new_left: new_count,
    }))
}

fn position_of(start: usize, count: usize) -> usize {
    if count == 0 {
        start
    } else {
        start.saturating_sub(1)
    }
}

// "@@ -1,4 +1,5 @@ optional section text"
fn parse_hunk_header(s: &str) -> Option<((usize, usize), (usize, usize))> {
    let rest = s.strip_prefix("@@")?.trim_start().strip_prefix('-')?;
    let (old, rest) = rest.split_once(char::is_whitespace)?;
    let rest = rest.trim_start().strip_prefix('+')?;
    let (new, rest) = rest.split_once(char::is_whitespace)?;
    if !rest.trim_start().starts_with("@@") {
        return None;
    }
    Some((parse_range(old)?, parse_range(new)?))
}

fn parse_range(s: &str) -> Option<(usize, usize)> {
    match s.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((s.parse().ok()?, 1)),
    }
}

fn parse_line(s: &str) -> Result<Line<String>, ParseErrorKind> {
    match s.chars().next() {
        None => Ok(Line::Context(String::new())),
        Some(' ') => Ok(Line::Context(s[1..].to_string())),
        Some('+') => Ok(Line::Insert(s[1..].to_string())),
        Some('-') => Ok(Line::Delete(s[1..].to_string())),
        Some(c) => Err(ParseErrorKind::UnexpectedPrefix(c)),
    }
}

fn hunk_deltas(hunk: Hunk<String>) -> Vec<Delta<String>> {
    let mut deltas = vec![];
    let mut old_line = hunk.old_position;
    let mut new_line = hunk.new_position;
    let mut run_start = (old_line, new_line);
    let mut deleted = vec![];
    let mut inserted = vec![];

    for line in hunk.lines {
        match line {
            Line::Context(_) => {
                flush_run(&mut deltas, run_start, &mut deleted, &mut inserted);
                old_line += 1;
                new_line += 1;
                run_start = (old_line, new_line);
            }
            Line::Delete(text) => {
                deleted.push(text);
                old_line += 1;
            }
            Line::Insert(text) => {
                inserted.push(text);
                new_line += 1;
            }
        }
    }
    flush_run(&mut deltas, run_start, &mut deleted, &mut inserted);
    deltas
}

fn flush_run(
    deltas: &mut Vec<Delta<String>>,
    (old_position, new_position): (usize, usize),
    deleted: &mut Vec<String>,
    inserted: &mut Vec<String>,
) {
    if deleted.is_empty() && inserted.is_empty() {
        return;
    }
    deltas.push(Delta::new(
        Chunk::new(old_position, mem::take(deleted)),
        Chunk::new(new_position, mem::take(inserted)),
    ));
}
