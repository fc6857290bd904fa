//! A minimal document tree.
//!
//! Extraction only needs a handful of capabilities from a document: the kind
//! of each node, its tag name, its text, its children and attribute lookup.
//! [`TreeNode`] captures exactly that, so the serializer and link collector
//! work over any tree that can provide it. [`Node`] is the owned
//! implementation built from a parsed `scraper` document; being owned, it can
//! be cloned and pruned without touching the parsed page.
//!
//! Snapshots are capped at [`MAX_DEPTH`] levels, so every later walk over a
//! snapshot stays shallow.

use scraper::ElementRef;

use crate::extractor::model::ExtractError;

/// Deepest element nesting a snapshot accepts, root included.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, doctypes, processing instructions.
    Other,
}

pub trait TreeNode {
    fn kind(&self) -> NodeKind;

    /// Lowercase tag name for elements, `None` otherwise.
    fn tag_name(&self) -> Option<&str>;

    /// Concatenated text of this node and all its descendants.
    fn text_content(&self) -> String;

    fn children(&self) -> Vec<&Self>;

    fn attr(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn from_parsed(value: &scraper::node::Element) -> Self {
        Self {
            name: value.name().to_ascii_lowercase(),
            attrs: value
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl Node {
    pub fn element(name: &str, attrs: &[(&str, &str)], children: Vec<Node>) -> Self {
        Node::Element(Element {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        })
    }

    pub fn text(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    /// Snapshot a parsed element and its subtree.
    ///
    /// Fails when elements nest deeper than [`MAX_DEPTH`].
    pub fn from_element(root: ElementRef<'_>) -> Result<Self, ExtractError> {
        let mut stack = vec![(Element::from_parsed(root.value()), root.children())];

        while let Some((current, children)) = stack.last_mut() {
            if let Some(child) = children.next() {
                match child.value() {
                    scraper::Node::Element(value) => {
                        if stack.len() >= MAX_DEPTH {
                            return Err(ExtractError::TooDeeplyNested { limit: MAX_DEPTH });
                        }
                        stack.push((Element::from_parsed(value), child.children()));
                    }
                    scraper::Node::Text(text) => current.children.push(Node::Text((**text).to_owned())),
                    _ => current.children.push(Node::Other),
                }
            } else if stack.len() > 1
                && let Some((element, _)) = stack.pop()
                && let Some((parent, _)) = stack.last_mut()
            {
                parent.children.push(Node::Element(element));
            } else {
                break;
            }
        }

        Ok(stack
            .pop()
            .map(|(element, _)| Node::Element(element))
            .unwrap_or(Node::Other))
    }
}

impl TreeNode for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::Other => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(element.name.as_str()),
            _ => None,
        }
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => pending.extend(element.children.iter().rev()),
                Node::Other => {}
            }
        }
        out
    }

    fn children(&self) -> Vec<&Self> {
        match self {
            Node::Element(element) => element.children.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }
}
