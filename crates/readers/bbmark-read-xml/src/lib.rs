//! Stored forum XML reader for bbmark.
//!
//! Forum software that parses BBCode at posting time stores the result as
//! XML: an `<r>` root (or `<t>` for posts without markup), upper-case
//! elements for tags, `<s>`/`<e>` holding the original bracket text and
//! `<br/>` for line breaks.
//!
//! # Example
//!
//! ```
//! use bbmark_read_xml::parse;
//!
//! let xml = "<r><B><s>[b]</s>Hello<e>[/b]</e></B> world</r>";
//! let root = parse(xml).unwrap().value;
//! assert_eq!(root.name.as_str(), "r");
//! assert_eq!(root.text_content(), "[b]Hello[/b] world");
//! ```

use bbmark_core::{
    Attributes, Content, ConversionResult, Element, ParseError, Reader, Severity, Warning,
    WarningKind,
};
use bbmark_tags::tag;
use html_escape::decode_html_entities;
use quick_xml::events::{BytesStart, Event};

/// Parse stored XML into an element tree.
///
/// Whitespace is preserved. Character references are decoded once here;
/// text that was HTML-escaped before being stored stays escaped and is
/// decoded again by the converter.
pub fn parse(input: &str) -> Result<ConversionResult<Element>, ParseError> {
    let mut reader = quick_xml::Reader::from_str(input);
    let mut builder = TreeBuilder::default();

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                builder.flush_text();
                let element = start_element(&e)?;
                builder.stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                builder.flush_text();
                let element = start_element(&e)?;
                builder.close(element, position)?;
            }
            Ok(Event::End(_)) => {
                builder.flush_text();
                let element = builder
                    .stack
                    .pop()
                    .ok_or_else(|| ParseError::Invalid(format!("unexpected end tag at {position}")))?;
                builder.close(element, position)?;
            }
            Ok(Event::Text(e)) => {
                builder.pending.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(&e);
                builder.pending.push_str(&format!("&{name};"));
            }
            Ok(Event::CData(e)) => {
                builder.flush_text();
                builder.push_text(String::from_utf8_lossy(e.as_ref()).into_owned(), position)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::Invalid(format!(
                    "XML parse error at {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }

    builder.flush_text();
    if let Some(open) = builder.stack.last() {
        return Err(ParseError::Invalid(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    let root = builder
        .root
        .ok_or_else(|| ParseError::Invalid("no root element".to_string()))?;

    let expected_root = root.is(tag::RICH_ROOT) || root.is(tag::PLAIN_ROOT);
    let unexpected = Warning::new(
        Severity::Info,
        WarningKind::Misplaced(root.name.to_string()),
        format!("root element <{}> is neither <r> nor <t>", root.name),
    );
    let result = ConversionResult::with_warnings(root, builder.warnings);

    Ok(if expected_root {
        result
    } else {
        result.warn(unexpected)
    })
}

/// [`Reader`] implementation for stored XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlReader;

impl Reader for XmlReader {
    fn formats(&self) -> &[&str] {
        &["xml"]
    }

    fn parse(&self, input: &str) -> Result<ConversionResult<Element>, ParseError> {
        parse(input)
    }
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
    /// Raw text with character references still encoded.
    pending: String,
    warnings: Vec<Warning>,
}

impl TreeBuilder {
    fn flush_text(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.pending);
        let text = decode_html_entities(&raw).into_owned();
        // Text outside the root can only be whitespace between declarations.
        if self.stack.is_empty() {
            if !text.trim().is_empty() {
                self.warnings.push(Warning::new(
                    Severity::Major,
                    WarningKind::Misplaced("text".to_string()),
                    "text outside the root element dropped",
                ));
            }
            return;
        }
        self.append_text(text);
    }

    fn push_text(&mut self, text: String, offset: u64) -> Result<(), ParseError> {
        if self.stack.is_empty() {
            return Err(ParseError::Invalid(format!(
                "character data outside the root element at {offset}"
            )));
        }
        self.append_text(text);
        Ok(())
    }

    fn append_text(&mut self, text: String) {
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        match parent.children.last_mut() {
            Some(Content::Text(previous)) => previous.push_str(&text),
            _ => parent.children.push(Content::Text(text)),
        }
    }

    /// Attach a finished element to its parent, or make it the root.
    fn close(&mut self, element: Element, offset: u64) -> Result<(), ParseError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Content::Element(element));
            return Ok(());
        }
        if self.root.is_some() {
            return Err(ParseError::Invalid(format!(
                "second root element <{}> at {offset}",
                element.name
            )));
        }
        self.root = Some(element);
        Ok(())
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = Attributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Invalid(format!("bad attribute on <{name}>: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        attrs.set(key, decode_html_entities(&raw).into_owned());
    }

    Ok(Element {
        name: name.into(),
        attrs,
        children: Vec::new(),
    })
}
