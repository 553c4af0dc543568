//! Intermediate tree between the element tree and Markdown text.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The walker
//! appends nodes, the renderer reads them; nothing is removed.

use crate::rules::Rule;

/// Index of a node in an [`IrTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// How the line breaks on one side of a node are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinebreakType {
    /// Plain newlines, escalating to explicit breaks for long runs.
    #[default]
    Auto,
    /// Escaped hard breaks (`\` + newline).
    Hard,
    /// Block boundary; always adds at least one break to what is there and
    /// spells the last of a long run as `<br>`.
    Html,
}

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The synthetic root.
    Root,
    /// A text leaf.
    Text,
    /// An element handled by a rule.
    Rule(Rule),
}

/// A span of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrNode {
    pub origin: Origin,
    /// Literal content, used when the node has no children.
    pub text: String,
    pub prefix: String,
    pub postfix: String,
    pub prefix_linebreaks: usize,
    pub postfix_linebreaks: usize,
    pub prefix_linebreak_type: LinebreakType,
    pub postfix_linebreak_type: LinebreakType,
    /// Prepended to every line rendered by descendants.
    pub prefix_children: Option<String>,
    /// `text` is authoritative; the walker attaches no children.
    pub skip_recursion: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl IrNode {
    fn new(origin: Origin, parent: Option<NodeId>) -> Self {
        Self {
            origin,
            text: String::new(),
            prefix: String::new(),
            postfix: String::new(),
            prefix_linebreaks: 0,
            postfix_linebreaks: 0,
            prefix_linebreak_type: LinebreakType::Auto,
            postfix_linebreak_type: LinebreakType::Auto,
            prefix_children: None,
            skip_recursion: false,
            parent,
            children: Vec::new(),
        }
    }

    /// Wrap the content in the same marker on both sides.
    pub fn enclose_with(&mut self, marker: &str) {
        self.prefix = marker.to_string();
        self.postfix = marker.to_string();
    }

    /// Require the same number of line breaks on both sides.
    pub fn set_linebreaks(&mut self, count: usize) {
        self.prefix_linebreaks = count;
        self.postfix_linebreaks = count;
    }

    /// Replace the content with literal text and stop descending.
    pub fn replace_with(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.skip_recursion = true;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_rule(&self, rule: Rule) -> bool {
        self.origin == Origin::Rule(rule)
    }
}

/// Arena holding the intermediate tree.
#[derive(Debug, Clone)]
pub struct IrTree {
    nodes: Vec<IrNode>,
}

impl IrTree {
    /// Create a tree holding only the undecorated root.
    pub fn new() -> Self {
        Self {
            nodes: vec![IrNode::new(Origin::Root, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &IrNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut IrNode {
        &mut self.nodes[id.0]
    }

    /// Append a fresh node under `parent`.
    pub fn push(&mut self, parent: NodeId, origin: Origin) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(IrNode::new(origin, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The most recently appended child of `parent`.
    pub fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.node(parent).children.last().copied()
    }

    /// Whether new children may be attached under `id`.
    pub fn children_allowed(&self, id: NodeId) -> bool {
        !self.node(id).skip_recursion
    }

    /// The line prefix in effect for descendants of `id`: every
    /// `prefix_children` from the root down to `id`, outermost first.
    pub fn line_prefix(&self, id: NodeId) -> String {
        let mut prefixes = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(prefix) = &node.prefix_children {
                prefixes.push(prefix.as_str());
            }
            current = node.parent;
        }
        prefixes.into_iter().rev().collect()
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for IrTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_links_parent_and_children() {
        let mut tree = IrTree::new();
        let root = tree.root();
        let a = tree.push(root, Origin::Text);
        let b = tree.push(root, Origin::Rule(Rule::LineBreak));
        assert_eq!(tree.node(root).children(), &[a, b]);
        assert_eq!(tree.node(a).parent(), Some(root));
        assert_eq!(tree.last_child(root), Some(b));
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_line_prefix_stacks_outermost_first() {
        let mut tree = IrTree::new();
        let root = tree.root();
        let outer = tree.push(root, Origin::Rule(Rule::Quote));
        tree.node_mut(outer).prefix_children = Some("> ".into());
        let bold = tree.push(outer, Origin::Rule(Rule::Bold));
        let inner = tree.push(bold, Origin::Rule(Rule::Quote));
        tree.node_mut(inner).prefix_children = Some("| ".into());

        assert_eq!(tree.line_prefix(root), "");
        assert_eq!(tree.line_prefix(bold), "> ");
        assert_eq!(tree.line_prefix(inner), "> | ");
    }

    #[test]
    fn test_skip_recursion_forbids_children() {
        let mut tree = IrTree::new();
        let root = tree.root();
        let code = tree.push(root, Origin::Rule(Rule::Code));
        assert!(tree.children_allowed(code));
        tree.node_mut(code).replace_with("x");
        assert!(!tree.children_allowed(code));
    }
}
