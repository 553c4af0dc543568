//! Per-tag rules: how an element decorates its intermediate node.

use std::borrow::Cow;

use bbmark_core::{ConvertOptions, Element, QuotedPost, Resolver};
use bbmark_tags::{HARD_BREAK_PARENTS, attr, tag};
use html_escape::decode_html_entities;

use crate::ir::{IrNode, LinebreakType};

/// Elements the converter has a rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Bold,
    Italic,
    Underline,
    Code,
    List,
    ListItem,
    Image,
    Url,
    Email,
    LineBreak,
    Smilie,
    Video,
    Quote,
    Attachment,
    Size,
}

impl Rule {
    /// Every rule, in table order.
    pub const ALL: [Rule; 15] = [
        Rule::Bold,
        Rule::Italic,
        Rule::Underline,
        Rule::Code,
        Rule::List,
        Rule::ListItem,
        Rule::Image,
        Rule::Url,
        Rule::Email,
        Rule::LineBreak,
        Rule::Smilie,
        Rule::Video,
        Rule::Quote,
        Rule::Attachment,
        Rule::Size,
    ];

    /// Look up the rule for a tag name.
    ///
    /// `None` means the tag is unregistered: the walker creates no node for
    /// it and hands its children to the enclosing node.
    pub fn for_tag(name: &str) -> Option<Rule> {
        let rule = match name {
            tag::BOLD => Rule::Bold,
            tag::ITALIC => Rule::Italic,
            tag::UNDERLINE => Rule::Underline,
            tag::CODE => Rule::Code,
            tag::LIST => Rule::List,
            tag::LIST_ITEM => Rule::ListItem,
            tag::IMAGE => Rule::Image,
            tag::URL => Rule::Url,
            tag::EMAIL => Rule::Email,
            tag::LINE_BREAK => Rule::LineBreak,
            tag::EMOTICON => Rule::Smilie,
            tag::YOUTUBE => Rule::Video,
            tag::QUOTE => Rule::Quote,
            tag::ATTACHMENT => Rule::Attachment,
            tag::SIZE => Rule::Size,
            _ => return None,
        };
        Some(rule)
    }

    /// The tag name this rule handles.
    pub fn tag_name(self) -> &'static str {
        match self {
            Rule::Bold => tag::BOLD,
            Rule::Italic => tag::ITALIC,
            Rule::Underline => tag::UNDERLINE,
            Rule::Code => tag::CODE,
            Rule::List => tag::LIST,
            Rule::ListItem => tag::LIST_ITEM,
            Rule::Image => tag::IMAGE,
            Rule::Url => tag::URL,
            Rule::Email => tag::EMAIL,
            Rule::LineBreak => tag::LINE_BREAK,
            Rule::Smilie => tag::EMOTICON,
            Rule::Video => tag::YOUTUBE,
            Rule::Quote => tag::QUOTE,
            Rule::Attachment => tag::ATTACHMENT,
            Rule::Size => tag::SIZE,
        }
    }

    /// What the rule produces, for listings.
    pub fn description(self) -> &'static str {
        match self {
            Rule::Bold => "**bold**",
            Rule::Italic => "_italic_",
            Rule::Underline => "[u]underline[/u]",
            Rule::Code => "fenced code block, or `inline code` when allowed",
            Rule::List => "list container",
            Rule::ListItem => "* item / 1. item",
            Rule::Image => "![](src)",
            Rule::Url => "[text](url), or the bare url",
            Rule::Email => "<address>",
            Rule::LineBreak => "line break",
            Rule::Smilie => "smilie replacement",
            Rule::Video => "video watch url",
            Rule::Quote => "[quote=\"...\"] header or > block quote",
            Rule::Attachment => "upload reference",
            Rule::Size => "<small>/<big>",
        }
    }
}

const BLOCK_QUOTE_PREFIX: &str = "> ";
const VIDEO_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, Copy)]
struct ListState {
    ordered: bool,
    item_count: usize,
}

/// State shared by the rules during one conversion.
pub(crate) struct RuleContext<'a, R> {
    resolver: &'a R,
    options: &'a ConvertOptions,
    lists: Vec<ListState>,
    /// Open bold/italic/underline elements around the current position.
    emphasis_depth: usize,
}

impl<'a, R: Resolver> RuleContext<'a, R> {
    pub(crate) fn new(resolver: &'a R, options: &'a ConvertOptions) -> Self {
        Self {
            resolver,
            options,
            lists: Vec::new(),
            emphasis_depth: 0,
        }
    }

    /// Called before the children of `element` are visited, whether or not
    /// it produced a node.
    pub(crate) fn enter(&mut self, element: &Element) {
        if HARD_BREAK_PARENTS.contains(&element.name.as_str()) {
            self.emphasis_depth += 1;
        }
    }

    /// Called after the children of `element` were visited.
    pub(crate) fn leave(&mut self, element: &Element) {
        if HARD_BREAK_PARENTS.contains(&element.name.as_str()) {
            self.emphasis_depth = self.emphasis_depth.saturating_sub(1);
        }
    }

    /// Decorate `node` for `element`. `parent` is the element's parent in
    /// the element tree.
    pub(crate) fn apply(
        &mut self,
        rule: Rule,
        element: &Element,
        parent: Option<&Element>,
        node: &mut IrNode,
    ) -> Result<(), R::Error> {
        match rule {
            Rule::Bold => emphasis(parent, node, tag::BOLD, "**", "**"),
            Rule::Italic => emphasis(parent, node, tag::ITALIC, "_", "_"),
            Rule::Underline => emphasis(parent, node, tag::UNDERLINE, "[u]", "[/u]"),
            Rule::Code => self.code(element, node),
            Rule::List => self.list(element, node),
            Rule::ListItem => self.list_item(node),
            Rule::Image => image(element, node),
            Rule::Url => self.url(element, node)?,
            Rule::Email => {
                node.prefix = "<".to_string();
                node.postfix = ">".to_string();
            }
            Rule::LineBreak => self.line_break(node),
            Rule::Smilie => self.smilie(element, node)?,
            Rule::Video => video(element, node),
            Rule::Quote => self.quote(element, node)?,
            Rule::Attachment => self.attachment(element, node)?,
            Rule::Size => self.size(element, node),
        }
        Ok(())
    }

    /// Run once the element's children have been visited.
    pub(crate) fn after(&mut self, rule: Rule) {
        if rule == Rule::List {
            self.lists.pop();
        }
    }

    fn code(&self, element: &Element, node: &mut IrNode) {
        let raw = element.text_content();
        let decoded = decode_html_entities(&raw);
        let content = decoded.trim_end();

        if !self.options.allow_inline_code || content.contains('\n') {
            let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
            let lang = element.attrs.get(attr::LANG).unwrap_or("").trim();
            node.prefix = format!("{fence}{lang}\n");
            node.postfix = format!("\n{fence}");
        } else if content.contains('`') {
            node.prefix = "`` ".to_string();
            node.postfix = " ``".to_string();
        } else {
            node.enclose_with("`");
        }

        node.replace_with(content);
        node.set_linebreaks(2);
        node.prefix_linebreak_type = LinebreakType::Html;
    }

    fn list(&mut self, element: &Element, node: &mut IrNode) {
        let outermost = self.lists.is_empty();
        node.set_linebreaks(if outermost { 2 } else { 1 });
        if outermost {
            node.prefix_linebreak_type = LinebreakType::Html;
        }

        self.lists.push(ListState {
            ordered: element.attrs.contains(attr::TYPE),
            item_count: 0,
        });
    }

    fn list_item(&mut self, node: &mut IrNode) {
        let depth = self.lists.len().saturating_sub(1);
        let symbol = match self.lists.last_mut() {
            Some(list) => {
                list.item_count += 1;
                if list.ordered {
                    format!("{}.", list.item_count)
                } else {
                    "*".to_string()
                }
            }
            None => {
                tracing::debug!("list item outside of a list");
                "*".to_string()
            }
        };

        node.prefix = format!("{}{symbol} ", "  ".repeat(depth));
        node.postfix_linebreaks = 1;
    }

    fn url(&self, element: &Element, node: &mut IrNode) -> Result<(), R::Error> {
        let content = element.text_content();
        let original = match element.attrs.get(attr::URL) {
            Some(url) => Cow::Borrowed(url),
            None => Cow::Owned(content.trim().to_string()),
        };
        let url = self
            .resolver
            .rewrite_url(&decode_html_entities(&original))?;

        if content.trim() == original {
            node.replace_with(url);
        } else {
            node.prefix = "[".to_string();
            node.postfix = format!("]({url})");
        }
        Ok(())
    }

    fn smilie(&self, element: &Element, node: &mut IrNode) -> Result<(), R::Error> {
        let code = element.text_content();
        match self.resolver.smilie(&code)? {
            Some(replacement) => node.replace_with(replacement),
            None => tracing::debug!(code = %code, "smilie not resolved, keeping its code"),
        }
        Ok(())
    }

    fn quote(&self, element: &Element, node: &mut IrNode) -> Result<(), R::Error> {
        if let Some(post) = self.quoted_post(element)? {
            node.prefix = format!(
                "[quote=\"{}, post:{}, topic:{}\"]\n",
                post.username, post.post_number, post.topic_id
            );
            node.postfix = "\n[/quote]".to_string();
        } else if let Some(username) = self.quoted_username(element)? {
            node.prefix = format!("[quote=\"{username}\"]\n");
            node.postfix = "\n[/quote]".to_string();
        } else {
            tracing::debug!("quote without resolvable author, using block quote");
            node.prefix_children = Some(BLOCK_QUOTE_PREFIX.to_string());
        }

        node.set_linebreaks(2);
        node.prefix_linebreak_type = LinebreakType::Html;
        Ok(())
    }

    fn quoted_post(&self, element: &Element) -> Result<Option<QuotedPost>, R::Error> {
        match element.attrs.get_number(attr::POST_ID) {
            Some(post_id) => self.resolver.quoted_post(post_id),
            None => Ok(None),
        }
    }

    fn quoted_username(&self, element: &Element) -> Result<Option<String>, R::Error> {
        let resolved = match element.attrs.get_number(attr::USER_ID) {
            Some(user_id) => self.resolver.username(user_id)?,
            None => None,
        };
        Ok(resolved.filter(|name| !name.is_empty()).or_else(|| {
            element
                .attrs
                .get_non_empty(attr::AUTHOR)
                .map(str::to_string)
        }))
    }

    fn attachment(&self, element: &Element, node: &mut IrNode) -> Result<(), R::Error> {
        let index = element.attrs.get_number(attr::INDEX);
        let markdown = match element.attrs.get_non_empty(attr::FILENAME) {
            Some(filename) => self.resolver.upload_markdown(filename, index)?,
            None => None,
        };
        if markdown.is_none() {
            tracing::debug!(?index, "attachment not resolved");
        }

        node.replace_with(markdown.unwrap_or_default());
        node.set_linebreaks(1);
        Ok(())
    }

    /// A run of breaks anywhere inside emphasis must not end the emphasis.
    fn line_break(&self, node: &mut IrNode) {
        node.postfix_linebreaks += 1;

        if node.postfix_linebreaks > 1 && self.emphasis_depth > 0 {
            node.postfix_linebreak_type = LinebreakType::Hard;
        }
    }

    fn size(&self, element: &Element, node: &mut IrNode) {
        let Some(size) = element.attrs.get_number(attr::SIZE) else {
            return;
        };

        let bands = &self.options.size_bands;
        if bands.small.contains(size) {
            node.prefix = "<small>".to_string();
            node.postfix = "</small>".to_string();
        } else if bands.big.contains(size) {
            node.prefix = "<big>".to_string();
            node.postfix = "</big>".to_string();
        }
    }
}

/// Bold, italic and underline share one shape: markers unless the
/// enclosing element is the same tag.
fn emphasis(parent: Option<&Element>, node: &mut IrNode, name: &str, open: &str, close: &str) {
    if parent.is_some_and(|p| p.is(name)) {
        return;
    }
    node.prefix = open.to_string();
    node.postfix = close.to_string();
}

fn image(element: &Element, node: &mut IrNode) {
    let src = element.attrs.get(attr::SRC).unwrap_or("");
    node.replace_with(format!("![]({src})"));
    node.set_linebreaks(2);
}

fn video(element: &Element, node: &mut IrNode) {
    if let Some(id) = element.attrs.get_non_empty(attr::ID) {
        node.replace_with(format!("{VIDEO_URL}{id}"));
    }
    node.set_linebreaks(1);
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}
