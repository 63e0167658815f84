use super::InlineMarkup;

/// A character and whether an inline diff marked it as changed.
pub(crate) type Marked = Vec<(char, bool)>;

const TAB: &str = "    ";

pub(crate) fn expand_tabs(line: &str) -> String {
    line.replace('\t', TAB)
}

pub(crate) fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn unmarked(line: &str) -> Marked {
    line.chars().map(|c| (c, false)).collect()
}

/// Breaks `line` into pieces of at most `width` characters, preferring to
/// break at the last whitespace that fits. The whitespace at a break is
/// dropped; a word longer than `width` is cut.
pub(crate) fn wrap(line: &[(char, bool)], width: Option<usize>) -> Vec<&[(char, bool)]> {
    let Some(width) = width else {
        return vec![line];
    };
    let mut pieces = vec![];
    let mut rest = line;
    while rest.len() > width {
        match (1..=width).rev().find(|&j| rest[j].0.is_whitespace()) {
            Some(j) => {
                pieces.push(&rest[..j]);
                rest = &rest[j + 1..];
            }
            None => {
                pieces.push(&rest[..width]);
                rest = &rest[width..];
            }
        }
    }
    pieces.push(rest);
    pieces
}

fn push_escaped(out: &mut String, c: char, escape_html: bool) {
    match c {
        '&' if escape_html => out.push_str("&amp;"),
        '<' if escape_html => out.push_str("&lt;"),
        '>' if escape_html => out.push_str("&gt;"),
        c => out.push(c),
    }
}

/// Renders a piece, wrapping every marked run in `markup`.
pub(crate) fn render(piece: &[(char, bool)], markup: &InlineMarkup, escape_html: bool) -> String {
    let mut out = String::with_capacity(piece.len());
    let mut open = false;
    for &(c, marked) in piece {
        if marked != open {
            out.push_str(if marked { &markup.open } else { &markup.close });
            open = marked;
        }
        push_escaped(&mut out, c, escape_html);
    }
    if open {
        out.push_str(&markup.close);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(pieces: Vec<&[(char, bool)]>) -> Vec<String> {
        pieces
            .into_iter()
            .map(|p| p.iter().map(|(c, _)| c).collect())
            .collect()
    }

    #[test]
    fn test_wrap_at_word_boundary() {
        let line = unmarked("the quick brown fox");
        assert_eq!(text(wrap(&line, Some(10))), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let line = unmarked("abcdefghij");
        assert_eq!(text(wrap(&line, Some(4))), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_unlimited_and_empty() {
        let line = unmarked("the quick brown fox");
        assert_eq!(wrap(&line, None).len(), 1);
        assert_eq!(text(wrap(&[], Some(3))), vec![""]);
    }

    #[test]
    fn test_render_marks_runs() {
        let mut line = unmarked("a<b>c");
        line[1].1 = true;
        line[2].1 = true;
        let markup = InlineMarkup::new("[", "]");
        assert_eq!(render(&line, &markup, false), "a[<b]>c");
        assert_eq!(render(&line, &markup, true), "a[&lt;b]&gt;c");
        line[4].1 = true;
        assert_eq!(render(&line, &markup, false), "a[<b]>[c]");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b  "), "a b");
        assert_eq!(collapse_whitespace(" "), "");
    }
}
