use crate::patch::Delta;
use std::fmt::Debug;
use thiserror::Error;

/// Invalid settings handed to one of the library entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("column width must be positive")]
    ZeroColumnWidth,
    #[error("memory limit must be positive")]
    ZeroMemoryLimit,
}

/// Why a unified diff could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("malformed hunk header")]
    MalformedHunkHeader,
    #[error("unexpected line prefix {0:?}")]
    UnexpectedPrefix(char),
    #[error("hunk body is longer than its header announces")]
    BodyExceedsHeader,
    #[error("input ended before the hunk body was complete")]
    UnexpectedEof,
    #[error("unexpected line outside of a hunk")]
    UnexpectedLine,
}

/// A malformed unified diff. `line_number` is 1-based, `line` is the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind}: {line:?}")]
pub struct ParseError {
    pub line_number: usize,
    pub line: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line_number: usize, line: &str, kind: ParseErrorKind) -> Self {
        ParseError {
            line_number,
            line: line.to_string(),
            kind,
        }
    }
}

/// The content found at a delta's position did not match the delta.
///
/// `actual` is the slice of the target that was compared, clipped to the
/// target's bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("patch failed: {delta:?} does not match target content {actual:?}")]
pub struct PatchFailed<T: Debug> {
    pub delta: Delta<T>,
    pub actual: Vec<T>,
}

/// Failures of the bounded diff, see [`crate::myers::try_diff_with`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("diff needs {required} bytes of search state, limit is {limit}")]
    MemoryLimitExceeded { limit: usize, required: usize },
    #[error("diff was interrupted")]
    Interrupted,
}
