//! Intermediate tree to Markdown text.

use bbmark_core::ConvertOptions;

use crate::ir::{IrTree, LinebreakType, NodeId};
use crate::rules::Rule;

/// Break units, longest first so suffix matching is unambiguous.
const BREAK_UNITS: [&str; 3] = ["<br>\n", "\\\n", "\n"];
const SOFT_BREAK: &str = "\n";
const HARD_BREAK: &str = "\\\n";
const HTML_BREAK: &str = "<br>\n";

/// Runs longer than this start alternating to explicit breaks early.
const ALTERNATE_THRESHOLD: usize = 2;

/// Render the tree to Markdown with trailing whitespace and breaks removed.
pub fn render(tree: &IrTree, options: &ConvertOptions) -> String {
    let renderer = Renderer { tree, options };
    let mut out = renderer.render_children(tree.root());
    strip_trailing_breaks(&mut out, "");
    out
}

struct Renderer<'a> {
    tree: &'a IrTree,
    options: &'a ConvertOptions,
}

impl Renderer<'_> {
    fn render_children(&self, parent: NodeId) -> String {
        let parent_node = self.tree.node(parent);
        let line_prefix = self.tree.line_prefix(parent);
        let mut out = String::new();

        for &id in parent_node.children() {
            let node = self.tree.node(id);
            let leaf = node.children().is_empty();
            let mut body = if leaf {
                node.text.clone()
            } else {
                self.render_children(id)
            };

            self.add_linebreaks(
                &mut out,
                node.prefix_linebreaks,
                node.prefix_linebreak_type,
                &line_prefix,
            );

            // A node declaring its own line prefix writes it on every line
            // it renders, including the first.
            let at_line_start = (out.is_empty() && parent_node.prefix_children.is_some())
                || out.ends_with('\n');
            let apply_line_prefix = !line_prefix.is_empty()
                && !node.is_rule(Rule::LineBreak)
                && node.prefix_children.is_none()
                && at_line_start;

            let mut prefix = node.prefix.clone();
            let mut postfix = node.postfix.clone();

            if !node.is_rule(Rule::Code) {
                if (!prefix.is_empty() || apply_line_prefix)
                    && let Some(first) = body.chars().next().filter(|c| c.is_whitespace())
                {
                    body.replace_range(..first.len_utf8(), "");
                    if !apply_line_prefix && !out.ends_with(char::is_whitespace) {
                        prefix.insert(0, first);
                    }
                }
                if !postfix.is_empty()
                    && let Some(last) = body.chars().next_back().filter(|c| c.is_whitespace())
                {
                    body.truncate(body.len() - last.len_utf8());
                    postfix.push(last);
                }
            }

            if !line_prefix.is_empty() {
                prefix = prefix_lines(&prefix, &line_prefix);
                postfix = prefix_lines(&postfix, &line_prefix);
                if leaf {
                    body = prefix_lines(&body, &line_prefix);
                }
            }
            if apply_line_prefix {
                prefix.insert_str(0, &line_prefix);
            }

            out.push_str(&prefix);
            out.push_str(&body);
            out.push_str(&postfix);

            self.add_linebreaks(
                &mut out,
                node.postfix_linebreaks,
                node.postfix_linebreak_type,
                &line_prefix,
            );
        }

        // The owner's own postfix breaks are spelled outside its prefix.
        if parent_node.prefix_children.is_some() {
            strip_trailing_breaks(&mut out, &line_prefix);
        }
        out
    }

    /// Make sure `out` ends with at least `required` breaks.
    ///
    /// An existing run that is long enough is left alone. A shorter run is
    /// stripped and re-emitted in full so the spelling of each unit follows
    /// its position in the run.
    fn add_linebreaks(
        &self,
        out: &mut String,
        required: usize,
        kind: LinebreakType,
        line_prefix: &str,
    ) {
        if required == 0 || out.is_empty() {
            return;
        }

        let existing = count_trailing_breaks(out, line_prefix);
        let required = match kind {
            LinebreakType::Html => required.max(existing.max(required - 1) + 1),
            LinebreakType::Auto | LinebreakType::Hard => required,
        };
        if existing >= required {
            return;
        }

        strip_trailing_breaks(out, line_prefix);
        if out.is_empty() {
            return;
        }

        for index in 0..required {
            let unit = self.linebreak(index, required, kind);
            if index > 0 && !line_prefix.is_empty() {
                if unit == SOFT_BREAK {
                    out.push_str(line_prefix.trim_end());
                } else {
                    out.push_str(line_prefix);
                }
            }
            out.push_str(unit);
        }
    }

    fn linebreak(&self, index: usize, required: usize, kind: LinebreakType) -> &'static str {
        let alternate_from = if required > ALTERNATE_THRESHOLD {
            1
        } else {
            ALTERNATE_THRESHOLD
        };
        let alternate = index >= alternate_from;

        if kind == LinebreakType::Html && alternate && index + 1 == required {
            HTML_BREAK
        } else if kind == LinebreakType::Hard || self.options.traditional_linebreaks || alternate {
            HARD_BREAK
        } else {
            SOFT_BREAK
        }
    }
}

/// Prefix every line after the first. Blank lines get the prefix without
/// its trailing spaces; the final line always gets the full prefix since
/// more content may follow on it.
fn prefix_lines(text: &str, line_prefix: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + line_prefix.len());
    let mut pieces = text.split('\n');
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    let mut pieces = pieces.peekable();
    while let Some(piece) = pieces.next() {
        out.push('\n');
        if piece.is_empty() && pieces.peek().is_some() {
            out.push_str(line_prefix.trim_end());
        } else {
            out.push_str(line_prefix);
        }
        out.push_str(piece);
    }
    out
}

fn strip_break_unit(text: &str) -> Option<&str> {
    BREAK_UNITS.iter().find_map(|unit| text.strip_suffix(unit))
}

/// Strip a final line holding nothing but the line prefix.
fn strip_prefix_line<'t>(text: &'t str, line_prefix: &str) -> Option<&'t str> {
    if line_prefix.is_empty() {
        return None;
    }
    let start = text.rfind('\n')? + 1;
    let line = &text[start..];
    let prefix_only = !line.is_empty() && (line == line_prefix || line == line_prefix.trim_end());
    prefix_only.then(|| &text[..start])
}

fn strip_trailing_whitespace_char(text: &str) -> Option<&str> {
    let last = text.chars().next_back().filter(|c| c.is_whitespace())?;
    Some(&text[..text.len() - last.len_utf8()])
}

fn count_trailing_breaks(text: &str, line_prefix: &str) -> usize {
    let mut rest = text;
    let mut count = 0;
    loop {
        if let Some(stripped) = strip_break_unit(rest) {
            count += 1;
            rest = stripped;
        } else if let Some(stripped) = strip_prefix_line(rest, line_prefix) {
            rest = stripped;
        } else {
            return count;
        }
    }
}

fn strip_trailing_breaks(text: &mut String, line_prefix: &str) {
    loop {
        let Some(len) = strip_break_unit(text)
            .or_else(|| strip_prefix_line(text, line_prefix))
            .or_else(|| strip_trailing_whitespace_char(text))
            .map(str::len)
        else {
            return;
        };
        text.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn breaks_with(
        options: &ConvertOptions,
        out: &str,
        required: usize,
        kind: LinebreakType,
        line_prefix: &str,
    ) -> String {
        let tree = IrTree::new();
        let renderer = Renderer {
            tree: &tree,
            options,
        };
        let mut out = out.to_string();
        renderer.add_linebreaks(&mut out, required, kind, line_prefix);
        out
    }

    fn breaks(out: &str, required: usize, kind: LinebreakType, line_prefix: &str) -> String {
        breaks_with(&ConvertOptions::default(), out, required, kind, line_prefix)
    }

    #[rstest]
    #[case("", 2, LinebreakType::Html, "")]
    #[case("", 1, LinebreakType::Auto, "")]
    #[case("a", 0, LinebreakType::Html, "a")]
    #[case("a", 1, LinebreakType::Auto, "a\n")]
    #[case("a", 2, LinebreakType::Auto, "a\n\n")]
    #[case("a", 3, LinebreakType::Auto, "a\n\\\n\\\n")]
    #[case("a", 3, LinebreakType::Html, "a\n\\\n<br>\n")]
    #[case("a", 1, LinebreakType::Hard, "a\\\n")]
    #[case("a", 2, LinebreakType::Hard, "a\\\n\\\n")]
    #[case("a\n\n", 2, LinebreakType::Auto, "a\n\n")]
    #[case("a\n\n\n", 1, LinebreakType::Auto, "a\n\n\n")]
    #[case("a \n", 2, LinebreakType::Auto, "a\n\n")]
    #[case("a\n", 2, LinebreakType::Html, "a\n\n")]
    #[case("a\n\n", 2, LinebreakType::Html, "a\n\\\n<br>\n")]
    fn test_add_linebreaks(
        #[case] out: &str,
        #[case] required: usize,
        #[case] kind: LinebreakType,
        #[case] expected: &str,
    ) {
        assert_eq!(breaks(out, required, kind, ""), expected);
    }

    #[test]
    fn test_add_linebreaks_traditional() {
        let options = ConvertOptions::default().with_traditional_linebreaks(true);
        assert_eq!(
            breaks_with(&options, "a", 2, LinebreakType::Auto, ""),
            "a\\\n\\\n"
        );
    }

    #[test]
    fn test_add_linebreaks_under_line_prefix() {
        assert_eq!(breaks("> a", 2, LinebreakType::Auto, "> "), "> a\n>\n");
        assert_eq!(breaks("> a\n>\n", 2, LinebreakType::Auto, "> "), "> a\n>\n");
        assert_eq!(
            breaks("> a", 3, LinebreakType::Auto, "> "),
            "> a\n> \\\n> \\\n"
        );
    }

    #[test]
    fn test_count_trailing_breaks_mixed_units() {
        assert_eq!(count_trailing_breaks("a\n\\\n<br>\n", ""), 3);
        assert_eq!(count_trailing_breaks("a\n>\n", "> "), 2);
        assert_eq!(count_trailing_breaks("a \n", ""), 1);
    }

    #[test]
    fn test_strip_trailing_breaks() {
        let mut out = "a \\\n<br>\n \n".to_string();
        strip_trailing_breaks(&mut out, "");
        assert_eq!(out, "a");

        let mut out = "> a\n>\n> ".to_string();
        strip_trailing_breaks(&mut out, "> ");
        assert_eq!(out, "> a");
    }

    #[test]
    fn test_prefix_lines() {
        assert_eq!(prefix_lines("a", "> "), "a");
        assert_eq!(prefix_lines("a\n\nb", "> "), "a\n>\n> b");
        assert_eq!(prefix_lines("```\n", "> "), "```\n> ");
    }
}
