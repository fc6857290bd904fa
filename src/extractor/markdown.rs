use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::tree::{NodeKind, TreeNode};

static EXTRA_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Serialize the children of `root` into markdown-flavoured text.
///
/// Headings, paragraphs, line breaks and bold/italic runs keep their
/// structure; every other element only contributes its text.
pub fn serialize<N: TreeNode>(root: &N) -> String {
    let mut out = String::new();
    write_children(root, &mut out);
    out
}

fn write_children<N: TreeNode>(node: &N, out: &mut String) {
    for child in node.children() {
        match child.kind() {
            NodeKind::Text => {
                let text = child.text_content();
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push(' ');
                }
            }
            NodeKind::Element => write_element(child, out),
            NodeKind::Other => {}
        }
    }
}

fn write_element<N: TreeNode>(element: &N, out: &mut String) {
    let tag = element.tag_name().unwrap_or_default().to_ascii_lowercase();

    if let Some(level) = heading_level(&tag) {
        let text = element.text_content();
        let text = text.trim();
        if !text.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(text);
            out.push_str("\n\n");
        }
        return;
    }

    match tag.as_str() {
        "p" | "div" => {
            let start = out.len();
            write_children(element, out);
            if out[start..].trim().is_empty() {
                out.truncate(start);
            } else {
                out.push_str("\n\n");
            }
        }
        "br" => out.push('\n'),
        "strong" | "b" => wrap_text(element, "**", out),
        "em" | "i" => wrap_text(element, "*", out),
        _ => write_children(element, out),
    }
}

fn wrap_text<N: TreeNode>(element: &N, marker: &str, out: &mut String) {
    let text = element.text_content();
    let text = text.trim();
    if !text.is_empty() {
        out.push_str(marker);
        out.push_str(text);
        out.push_str(marker);
        out.push(' ');
    }
}

fn heading_level(tag: &str) -> Option<usize> {
    match tag.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some((level - b'0') as usize),
        _ => None,
    }
}

/// Collapse 3+ newlines to a blank line, runs of spaces to one space, and trim.
pub fn normalize_whitespace(text: &str) -> String {
    let text = EXTRA_NEWLINES.replace_all(text, "\n\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}
