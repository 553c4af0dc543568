//! Closure-based element tree builders.
//!
//! Readers produce element trees from stored markup; these builders produce
//! the same shape directly, which keeps tests and callers free of tag-name
//! string literals.
//!
//! # Example
//!
//! ```rust
//! use bbmark_tags::builder::*;
//!
//! let root = post(|p| p
//!     .text("Hello ")
//!     .bold(|b| b.text("world"))
//!     .br()
//!     .list(|l| l
//!         .item(|i| i.text("first"))
//!         .item(|i| i.text("second"))
//!     )
//! );
//! assert_eq!(root.name.as_str(), "r");
//! ```

use crate::{Content, Element, attr, tag};

/// Build a post root (`r`) element.
pub fn post<F>(f: F) -> Element
where
    F: FnOnce(ContentBuilder) -> ContentBuilder,
{
    f(ContentBuilder::new()).wrap(tag::RICH_ROOT)
}

/// Builder for element content.
#[derive(Default)]
pub struct ContentBuilder {
    children: Vec<Content>,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text leaf.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Content::Text(content.into()));
        self
    }

    /// Add a prebuilt element.
    pub fn element(mut self, element: Element) -> Self {
        self.children.push(Content::Element(element));
        self
    }

    /// Add a line break.
    pub fn br(self) -> Self {
        self.element(Element::new(tag::LINE_BREAK))
    }

    /// Add bold content.
    pub fn bold<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        self.wrapped(tag::BOLD, f)
    }

    /// Add italic content.
    pub fn italic<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        self.wrapped(tag::ITALIC, f)
    }

    /// Add underlined content.
    pub fn underline<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        self.wrapped(tag::UNDERLINE, f)
    }

    /// Add strikethrough content.
    pub fn strike<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        self.wrapped(tag::STRIKE, f)
    }

    /// Add colored content.
    pub fn color<F>(self, color: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new())
            .wrap(tag::COLOR)
            .attr(attr::COLOR, color);
        self.element(element)
    }

    /// Add content with a size hint.
    pub fn size<F>(self, size: impl ToString, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new())
            .wrap(tag::SIZE)
            .attr(attr::SIZE, size.to_string());
        self.element(element)
    }

    /// Add code.
    pub fn code(self, content: impl Into<String>) -> Self {
        self.element(Element::new(tag::CODE).text(content))
    }

    /// Add code with a language.
    pub fn code_lang(self, lang: impl Into<String>, content: impl Into<String>) -> Self {
        self.element(Element::new(tag::CODE).attr(attr::LANG, lang).text(content))
    }

    /// Add a link with custom text.
    pub fn link<F>(self, url: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new()).wrap(tag::URL).attr(attr::URL, url);
        self.element(element)
    }

    /// Add a link whose text is the URL itself.
    pub fn autolink(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.element(Element::new(tag::URL).attr(attr::URL, url.clone()).text(url))
    }

    /// Add a plain-text email address.
    pub fn email(self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.element(
            Element::new(tag::EMAIL)
                .attr(attr::EMAIL, address.clone())
                .text(address),
        )
    }

    /// Add an image.
    pub fn image(self, src: impl Into<String>) -> Self {
        let src = src.into();
        self.element(Element::new(tag::IMAGE).attr(attr::SRC, src.clone()).text(src))
    }

    /// Add a smilie.
    pub fn smilie(self, code: impl Into<String>) -> Self {
        self.element(Element::new(tag::EMOTICON).text(code))
    }

    /// Add an embedded video.
    pub fn youtube(self, id: impl Into<String>) -> Self {
        let id = id.into();
        let url = format!("https://youtu.be/{id}");
        self.element(Element::new(tag::YOUTUBE).attr(attr::ID, id).text(url))
    }

    /// Add an attachment reference.
    pub fn attachment(self, index: u64, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        self.element(
            Element::new(tag::ATTACHMENT)
                .attr(attr::INDEX, index.to_string())
                .attr(attr::FILENAME, filename.clone())
                .text(filename),
        )
    }

    /// Add a quote without attribution.
    pub fn quote<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        self.wrapped(tag::QUOTE, f)
    }

    /// Add a quote attributed by a literal author name.
    pub fn quote_by<F>(self, author: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new())
            .wrap(tag::QUOTE)
            .attr(attr::AUTHOR, author);
        self.element(element)
    }

    /// Add a quote of a specific post by a specific user.
    pub fn quote_post<F>(self, post_id: u64, user_id: u64, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new())
            .wrap(tag::QUOTE)
            .attr(attr::POST_ID, post_id.to_string())
            .attr(attr::USER_ID, user_id.to_string());
        self.element(element)
    }

    /// Add an unordered list.
    pub fn list<F>(self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.element(f(ListBuilder::new(None)).build())
    }

    /// Add an ordered list.
    pub fn ordered_list<F>(self, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.element(f(ListBuilder::new(Some("decimal"))).build())
    }

    fn wrapped<F>(self, name: &str, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let element = f(ContentBuilder::new()).wrap(name);
        self.element(element)
    }

    /// Wrap the collected children in an element.
    pub fn wrap(self, name: &str) -> Element {
        Element::new(name).children(self.children)
    }
}

/// Builder for list items.
pub struct ListBuilder {
    list_type: Option<&'static str>,
    items: Vec<Content>,
}

impl ListBuilder {
    fn new(list_type: Option<&'static str>) -> Self {
        Self {
            list_type,
            items: Vec::new(),
        }
    }

    /// Add an item.
    pub fn item<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ContentBuilder) -> ContentBuilder,
    {
        let item = f(ContentBuilder::new()).wrap(tag::LIST_ITEM);
        self.items.push(Content::Element(item));
        self
    }

    fn build(self) -> Element {
        let list = Element::new(tag::LIST).children(self.items);
        match self.list_type {
            Some(t) => list.attr(attr::TYPE, t),
            None => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_root() {
        let root = post(|p| p.text("hi"));
        assert!(root.is(tag::RICH_ROOT));
        assert_eq!(root.text_content(), "hi");
    }

    #[test]
    fn test_ordered_list_has_type() {
        let root = post(|p| p.ordered_list(|l| l.item(|i| i.text("a"))));
        let list = root.child_elements().next().unwrap();
        assert!(list.is(tag::LIST));
        assert_eq!(list.attrs.get(attr::TYPE), Some("decimal"));
        assert!(list.child_elements().all(|c| c.is(tag::LIST_ITEM)));
    }

    #[test]
    fn test_quote_post_attrs() {
        let root = post(|p| p.quote_post(12, 5, |q| q.text("x")));
        let quote = root.child_elements().next().unwrap();
        assert_eq!(quote.attrs.get_number(attr::POST_ID), Some(12));
        assert_eq!(quote.attrs.get_number(attr::USER_ID), Some(5));
    }
}
