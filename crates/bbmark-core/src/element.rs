//! Element types for the parsed markup tree.

use crate::Attributes;

/// An element of the parsed markup tree.
///
/// Elements are produced by a reader and only read by the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (e.g., "B", "QUOTE", "br").
    pub name: TagName,
    /// Element attributes.
    pub attrs: Attributes,
    /// Child elements and text leaves, in document order.
    pub children: Vec<Content>,
}

/// A child of an [`Element`]: either a nested element or a raw text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

/// Tag name - open newtype so unknown tags survive parsing.
///
/// The tag vocabulary the converter understands lives in `bbmark-tags`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(pub String);

impl Element {
    /// Create a new element with the given tag name.
    pub fn new(name: impl Into<TagName>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Add a text leaf.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = Content>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check the tag name.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_str() == name
    }

    /// Concatenation of every descendant text leaf, in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// Iterate over child elements, skipping text leaves.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Content::Element(e) => collect_text(e, out),
            Content::Text(t) => out.push_str(t),
        }
    }
}

impl From<Element> for Content {
    fn from(e: Element) -> Self {
        Content::Element(e)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl TagName {
    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagName {
    fn from(s: &str) -> Self {
        TagName(s.to_string())
    }
}

impl From<String> for TagName {
    fn from(s: String) -> Self {
        TagName(s)
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_is_document_order() {
        let e = Element::new("r")
            .text("a")
            .child(Element::new("B").text("b").child(Element::new("I").text("c")))
            .text("d");
        assert_eq!(e.text_content(), "abcd");
    }

    #[test]
    fn test_child_elements_skips_text() {
        let e = Element::new("r")
            .text("a")
            .child(Element::new("br"))
            .text("b");
        let names: Vec<_> = e.child_elements().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["br"]);
    }
}
