//! Line-oriented diff and patch: compute the edits between two sequences,
//! apply or revert them, read and write unified diffs, and lay the result out
//! as side-by-side rows.
//!
//! ```
//! use seqpatch::{diff, generate_unified_diff, parse_unified_diff};
//!
//! let old = vec!["a".to_string(), "b".to_string(), "c".to_string()];
//! let new = vec!["a".to_string(), "x".to_string(), "c".to_string()];
//!
//! let patch = diff(&old, &new);
//! let text = generate_unified_diff("old", "new", &old, &patch, 1);
//! assert_eq!(text, ["--- old", "+++ new", "@@ -1,3 +1,3 @@", " a", "-b", "+x", " c"]);
//!
//! let parsed = parse_unified_diff(&text).unwrap();
//! assert_eq!(parsed.apply_to(&old).unwrap(), new);
//! ```

pub mod equalizer;
pub mod error;
pub mod myers;
pub mod patch;
pub mod rows;
pub mod unified;

pub use equalizer::{DefaultEqualizer, Equalizer, IgnoreWhitespace};
pub use error::{ConfigurationError, DiffError, ParseError, ParseErrorKind, PatchFailed};
pub use myers::{diff, diff_with, try_diff_with, DiffOptions};
pub use patch::{Chunk, Delta, DeltaType, Patch};
pub use rows::{DiffRow, DiffRowConfig, DiffRowGenerator, InlineMarkup, Tag};
pub use unified::{generate_unified_diff, parse_unified_diff};
