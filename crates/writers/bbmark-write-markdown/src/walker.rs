//! Element tree to intermediate tree.

use bbmark_core::{Content, ConvertOptions, Element, Resolver};
use bbmark_tags::{MARKERS, NO_LEADING_WHITESPACE};
use html_escape::decode_html_entities;

use crate::ir::{IrTree, NodeId, Origin};
use crate::rules::{Rule, RuleContext};

/// Return a cleaned copy of `element`.
///
/// Marker elements are dropped, text leaves lose a leading run of newlines
/// and the whitespace after it, and the first text leaf of a list or list
/// item loses all leading whitespace. Leaves left empty are removed.
pub fn preprocess(element: &Element) -> Element {
    let strip_first = NO_LEADING_WHITESPACE.contains(&element.name.as_str());
    let mut children = Vec::with_capacity(element.children.len());

    for child in &element.children {
        match child {
            Content::Element(e) if MARKERS.contains(&e.name.as_str()) => {}
            Content::Element(e) => children.push(Content::Element(preprocess(e))),
            Content::Text(text) => {
                let mut text = strip_leading_newlines(text);
                if strip_first && children.is_empty() {
                    text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
                }
                if !text.is_empty() {
                    children.push(Content::Text(text.to_string()));
                }
            }
        }
    }

    Element {
        name: element.name.clone(),
        attrs: element.attrs.clone(),
        children,
    }
}

fn strip_leading_newlines(text: &str) -> &str {
    if text.starts_with('\n') {
        text.trim_start_matches(|c: char| c.is_ascii_whitespace())
    } else {
        text
    }
}

/// Build the intermediate tree for `root`.
pub fn build_ir<R: Resolver>(
    root: &Element,
    resolver: &R,
    options: &ConvertOptions,
) -> Result<IrTree, R::Error> {
    let root = preprocess(root);
    let mut walker = Walker {
        tree: IrTree::new(),
        rules: RuleContext::new(resolver, options),
    };
    let ir_root = walker.tree.root();
    walker.visit_children(&root, ir_root)?;
    Ok(walker.tree)
}

struct Walker<'a, R> {
    tree: IrTree,
    rules: RuleContext<'a, R>,
}

impl<R: Resolver> Walker<'_, R> {
    fn visit_children(&mut self, element: &Element, ir_parent: NodeId) -> Result<(), R::Error> {
        for child in &element.children {
            match child {
                Content::Element(e) => self.visit(e, Some(element), ir_parent)?,
                Content::Text(text) => self.visit_text(text, ir_parent),
            }
        }
        Ok(())
    }

    fn visit(
        &mut self,
        element: &Element,
        parent: Option<&Element>,
        ir_parent: NodeId,
    ) -> Result<(), R::Error> {
        let rule = Rule::for_tag(element.name.as_str());
        let created = match rule {
            Some(rule) if self.tree.children_allowed(ir_parent) => {
                let id = self.create_node(rule, ir_parent);
                self.rules
                    .apply(rule, element, parent, self.tree.node_mut(id))?;
                Some((rule, id))
            }
            Some(_) => None,
            None => {
                tracing::trace!(tag = %element.name, "no rule, passing children through");
                None
            }
        };

        let container = created.map_or(ir_parent, |(_, id)| id);
        self.rules.enter(element);
        self.visit_children(element, container)?;
        self.rules.leave(element);

        if let Some((rule, _)) = created {
            self.rules.after(rule);
        }
        Ok(())
    }

    fn visit_text(&mut self, text: &str, ir_parent: NodeId) {
        if !self.tree.children_allowed(ir_parent) {
            return;
        }
        let id = self.tree.push(ir_parent, Origin::Text);
        self.tree.node_mut(id).text = decode_html_entities(text).into_owned();
    }

    /// Consecutive line breaks share one node.
    fn create_node(&mut self, rule: Rule, ir_parent: NodeId) -> NodeId {
        if rule == Rule::LineBreak
            && let Some(last) = self.tree.last_child(ir_parent)
            && self.tree.node(last).is_rule(Rule::LineBreak)
        {
            return last;
        }
        self.tree.push(ir_parent, Origin::Rule(rule))
    }
}
