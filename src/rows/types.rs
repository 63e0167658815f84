/// How a row relates the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Equal,
    Insert,
    Delete,
    Change,
}

/// One side-by-side display row. The absent side of an insert or delete is
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffRow {
    pub tag: Tag,
    pub old_line: String,
    pub new_line: String,
}

impl DiffRow {
    pub fn new(tag: Tag, old_line: impl Into<String>, new_line: impl Into<String>) -> Self {
        DiffRow {
            tag,
            old_line: old_line.into(),
            new_line: new_line.into(),
        }
    }
}

/// Text placed around the characters an inline diff marks as changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InlineMarkup {
    pub open: String,
    pub close: String,
}

impl InlineMarkup {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        InlineMarkup {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `<span class="...">` / `</span>`.
    pub fn span(class: &str) -> Self {
        InlineMarkup::new(format!("<span class=\"{class}\">"), "</span>")
    }
}

/// Settings of a [`super::DiffRowGenerator`].
///
/// `column_width` of `None` disables wrapping. `ignore_white_spaces` only
/// affects which lines count as equal; row text is never altered by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRowConfig {
    pub column_width: Option<usize>,
    pub show_inline_diffs: bool,
    pub ignore_white_spaces: bool,
    pub inline_old: InlineMarkup,
    pub inline_new: InlineMarkup,
    /// Escape `&`, `<` and `>` in row text. Markup is never escaped.
    pub escape_html: bool,
}

impl Default for DiffRowConfig {
    fn default() -> Self {
        DiffRowConfig {
            column_width: Some(80),
            show_inline_diffs: false,
            ignore_white_spaces: false,
            inline_old: InlineMarkup::span("editOldInline"),
            inline_new: InlineMarkup::span("editNewInline"),
            escape_html: false,
        }
    }
}
