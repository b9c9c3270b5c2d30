//! Indentation helpers for menu text and action output.

/// Width a tab in leading whitespace expands to.
const TAB_WIDTH: usize = 8;

/// Removes the common indentation from `text`.
///
/// A single leading newline is dropped first, so text written as an
/// indented block literal comes out flush left. Tabs in indentation count as
/// eight spaces. Trailing spaces at the very end are removed.
///
/// ```rust
/// use treeline_dispatch::unindent;
///
/// assert_eq!(unindent("\n    - a/\n      - b/\n    "), "- a/\n  - b/\n");
/// ```
pub fn unindent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let lines: Vec<String> = text.split('\n').map(untabify_indent).collect();

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    let body = lines
        .iter()
        .map(|line| {
            let bytes = line.as_bytes();
            if bytes.len() >= indent && bytes[..indent].iter().all(|b| *b == b' ') {
                &line[indent..]
            } else {
                line.trim_start_matches(' ')
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    body.trim_end_matches(' ').to_string()
}

/// Unindents `text` only when it starts with a space or newline.
pub fn tidy(text: String) -> String {
    if text.starts_with([' ', '\n']) {
        unindent(&text)
    } else {
        text
    }
}

fn untabify_indent(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let lead = &line[..line.len() - body.len()];
    if !lead.contains('\t') {
        return line.to_string();
    }
    let spaces: usize = lead
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    format!("{}{}", " ".repeat(spaces), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unindent_block() {
        let menu = "\n      - .foo/\n      - bar/\n        - baz/\n      ";
        assert_eq!(unindent(menu), "- .foo/\n- bar/\n  - baz/\n");
    }

    #[test]
    fn test_unindent_ignores_blank_lines_for_indent() {
        assert_eq!(unindent("  a\n\n  b"), "a\n\nb");
    }

    #[test]
    fn test_unindent_tabs() {
        assert_eq!(unindent("\ta\n\t  b"), "a\n  b");
    }

    #[test]
    fn test_unindent_flush_text_unchanged() {
        assert_eq!(unindent("- a/\n- b/\n"), "- a/\n- b/\n");
    }

    #[test]
    fn test_tidy_only_when_indented() {
        assert_eq!(tidy("  hi\n  there\n".into()), "hi\nthere\n");
        assert_eq!(tidy("\nhi\n".into()), "hi\n");
        assert_eq!(tidy("hi\n  there".into()), "hi\n  there");
    }
}
