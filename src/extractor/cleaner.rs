use crate::extractor::tree::{Element, Node};

/// One entry of the removal list applied to the content copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalRule {
    /// Any element with this tag name.
    Tag(String),
    /// Any element carrying this class.
    Class(String),
    /// Elements hidden through an inline `display: none` style.
    InlineHidden,
}

const REMOVED_TAGS: &[&str] = &["img", "video", "audio", "iframe", "script", "style"];

const REMOVED_CLASSES: &[&str] = &[
    "js_sponsor_ad_area", // ads
    "qr_code_pc",
    "profile_container", // account card
    "rich_media_tool",   // toolbar
    "share_notice",
];

impl RemovalRule {
    pub fn defaults() -> Vec<Self> {
        REMOVED_TAGS
            .iter()
            .map(|tag| Self::Tag(tag.to_string()))
            .chain(REMOVED_CLASSES.iter().map(|c| Self::Class(c.to_string())))
            .chain(std::iter::once(Self::InlineHidden))
            .collect()
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Tag(tag) => element.name.eq_ignore_ascii_case(tag),
            Self::Class(class) => element.has_class(class),
            Self::InlineHidden => element
                .attr("style")
                .is_some_and(|style| style.contains("display:none") || style.contains("display: none")),
        }
    }
}

/// Drop every descendant of `node` matched by a rule, whole subtree included.
///
/// The node itself is never removed. Returns how many elements were dropped.
pub fn prune(node: &mut Node, rules: &[RemovalRule]) -> usize {
    let mut removed = 0;
    let mut pending = vec![node];

    while let Some(node) = pending.pop() {
        let Node::Element(element) = node else {
            continue;
        };

        let before = element.children.len();
        element.children.retain(|child| match child {
            Node::Element(el) => !rules.iter().any(|rule| rule.matches(el)),
            _ => true,
        });
        removed += before - element.children.len();

        pending.extend(element.children.iter_mut());
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::tree::TreeNode;

    #[test]
    fn test_prune_removes_media_and_subtrees() {
        let mut root = Node::element(
            "section",
            &[],
            vec![
                Node::element("p", &[], vec![Node::text("keep me")]),
                Node::element("img", &[("src", "a.png")], vec![]),
                Node::element(
                    "div",
                    &[("class", "qr_code_pc")],
                    vec![Node::text("scan this code")],
                ),
                Node::element(
                    "p",
                    &[],
                    vec![
                        Node::text("nested "),
                        Node::element("script", &[], vec![Node::text("alert(1)")]),
                    ],
                ),
            ],
        );

        let removed = prune(&mut root, &RemovalRule::defaults());

        assert_eq!(removed, 3);
        let text = root.text_content();
        assert!(text.contains("keep me"));
        assert!(text.contains("nested"));
        assert!(!text.contains("scan this code"));
        assert!(!text.contains("alert"));
    }

    #[test]
    fn test_prune_removes_inline_hidden() {
        let mut root = Node::element(
            "div",
            &[],
            vec![
                Node::element("span", &[("style", "display:none")], vec![Node::text("a")]),
                Node::element(
                    "span",
                    &[("style", "color: red; display: none;")],
                    vec![Node::text("b")],
                ),
                Node::element("span", &[("style", "display: block")], vec![Node::text("c")]),
            ],
        );

        prune(&mut root, &RemovalRule::defaults());

        assert_eq!(root.text_content(), "c");
    }

    #[test]
    fn test_prune_keeps_root() {
        let mut root = Node::element("img", &[], vec![]);
        assert_eq!(prune(&mut root, &RemovalRule::defaults()), 0);
        assert_eq!(root.tag_name(), Some("img"));
    }
}
