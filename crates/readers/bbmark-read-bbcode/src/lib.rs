//! BBCode reader for bbmark.
//!
//! Parses raw bracket markup (`[b]bold[/b]`) into the element tree the
//! converter walks, using the same tag names as the stored forum XML.
//! Tags nest through an explicit stack: unknown tags and stray closing tags
//! are kept as literal text, tags left open are closed at end of input, and
//! both cases are reported as warnings.

use bbmark_core::{
    Attributes, Content, ConversionResult, Element, ParseError, Reader, Severity, Warning,
    WarningKind,
};
use bbmark_tags::{attr, tag};

/// Options for the BBCode reader.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Smilie codes to wrap in `E` elements, e.g. `:)`.
    pub smilies: Vec<String>,
}

impl ReaderOptions {
    /// Recognize the given smilie codes in text.
    pub fn with_smilies<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.smilies = codes.into_iter().map(Into::into).collect();
        self
    }
}

/// Parse BBCode markup into an element tree.
pub fn parse(input: &str) -> Result<ConversionResult<Element>, ParseError> {
    parse_with_options(input, &ReaderOptions::default())
}

/// Parse BBCode markup with options.
pub fn parse_with_options(
    input: &str,
    options: &ReaderOptions,
) -> Result<ConversionResult<Element>, ParseError> {
    let mut smilies: Vec<&str> = options
        .smilies
        .iter()
        .map(String::as_str)
        .filter(|code| !code.is_empty())
        .collect();
    // Longest first so `:-)` wins over `:-`.
    smilies.sort_by_key(|code| std::cmp::Reverse(code.len()));

    let mut parser = Parser::new(input, smilies);
    parser.run();
    let (root, warnings) = parser.finish();
    Ok(ConversionResult::with_warnings(root, warnings))
}

/// [`Reader`] implementation for raw BBCode.
#[derive(Debug, Clone, Default)]
pub struct BbcodeReader {
    pub options: ReaderOptions,
}

impl BbcodeReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }
}

impl Reader for BbcodeReader {
    fn formats(&self) -> &[&str] {
        &["bbcode", "bb"]
    }

    fn parse(&self, input: &str) -> Result<ConversionResult<Element>, ParseError> {
        parse_with_options(input, &self.options)
    }
}

/// Bracket tags the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BbTag {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    List,
    Item,
    Image,
    Url,
    Email,
    Quote,
    Attachment,
    Size,
    YouTube,
    Color,
}

impl BbTag {
    fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "b" => BbTag::Bold,
            "i" => BbTag::Italic,
            "u" => BbTag::Underline,
            "s" | "strike" => BbTag::Strike,
            "code" => BbTag::Code,
            "list" => BbTag::List,
            "*" => BbTag::Item,
            "img" => BbTag::Image,
            "url" => BbTag::Url,
            "email" => BbTag::Email,
            "quote" => BbTag::Quote,
            "attachment" => BbTag::Attachment,
            "size" => BbTag::Size,
            "youtube" => BbTag::YouTube,
            "color" => BbTag::Color,
            _ => return None,
        };
        Some(tag)
    }

    fn element_name(self) -> &'static str {
        match self {
            BbTag::Bold => tag::BOLD,
            BbTag::Italic => tag::ITALIC,
            BbTag::Underline => tag::UNDERLINE,
            BbTag::Strike => tag::STRIKE,
            BbTag::Code => tag::CODE,
            BbTag::List => tag::LIST,
            BbTag::Item => tag::LIST_ITEM,
            BbTag::Image => tag::IMAGE,
            BbTag::Url => tag::URL,
            BbTag::Email => tag::EMAIL,
            BbTag::Quote => tag::QUOTE,
            BbTag::Attachment => tag::ATTACHMENT,
            BbTag::Size => tag::SIZE,
            BbTag::YouTube => tag::YOUTUBE,
            BbTag::Color => tag::COLOR,
        }
    }
}

/// One bracket token, e.g. `[quote="bob" post_id=3]` or `[/b]`.
#[derive(Debug)]
struct Token<'a> {
    /// The full token text including brackets.
    raw: &'a str,
    start: usize,
    end: usize,
    closing: bool,
    /// Lower-cased tag name.
    name: String,
    /// Everything after the name, e.g. `="bob" post_id=3`.
    params: &'a str,
}

impl Token<'_> {
    /// The `=value` argument, unquoted.
    fn argument(&self) -> Option<&str> {
        let value = self.params.strip_prefix('=')?.trim();
        Some(unquote(value))
    }
}

struct Frame {
    element: Element,
    tag: Option<BbTag>,
    offset: usize,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    text: String,
    stack: Vec<Frame>,
    warnings: Vec<Warning>,
    smilies: Vec<&'a str>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, smilies: Vec<&'a str>) -> Self {
        Self {
            input,
            pos: 0,
            text: String::new(),
            stack: vec![Frame {
                element: Element::new(tag::RICH_ROOT),
                tag: None,
                offset: 0,
            }],
            warnings: Vec::new(),
            smilies,
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.input[self.pos..].chars().next() {
            match c {
                '[' => match self.scan_token() {
                    Some(token) => self.handle_token(token),
                    None => {
                        self.text.push('[');
                        self.pos += 1;
                    }
                },
                '\r' if self.input[self.pos + 1..].starts_with('\n') => self.pos += 1,
                '\n' => {
                    self.pos += 1;
                    if self.top_tag() != Some(BbTag::List) {
                        self.append(Element::new(tag::LINE_BREAK));
                    }
                }
                _ => {
                    self.text.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn finish(mut self) -> (Element, Vec<Warning>) {
        self.flush_text();
        while self.stack.len() > 1 {
            let implicit = self.top_tag() == Some(BbTag::Item) && self.parent_is_list();
            if let Some(frame) = self.stack.pop() {
                if !implicit {
                    self.warn_unclosed(&frame);
                }
                self.close_frame(frame);
            }
        }

        let root = match self.stack.pop() {
            Some(frame) => frame.element,
            None => Element::new(tag::RICH_ROOT),
        };
        (root, self.warnings)
    }

    /// Scan a bracket token at the current position. Tokens never span a
    /// line or contain another `[`.
    fn scan_token(&self) -> Option<Token<'a>> {
        let input: &'a str = self.input;
        let rest = &input[self.pos..];
        let close = rest[1..].find([']', '[', '\n'])? + 1;
        if !rest[close..].starts_with(']') {
            return None;
        }

        let inner = &rest[1..close];
        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };
        let name_len = body
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(body.len());
        if name_len == 0 {
            return None;
        }

        Some(Token {
            raw: &rest[..=close],
            start: self.pos,
            end: self.pos + close + 1,
            closing,
            name: body[..name_len].to_ascii_lowercase(),
            params: &body[name_len..],
        })
    }

    fn handle_token(&mut self, token: Token<'a>) {
        let Some(bbtag) = BbTag::from_name(&token.name) else {
            self.literal(&token);
            return;
        };

        if token.closing {
            self.close_tag(bbtag, &token);
            return;
        }

        match bbtag {
            BbTag::Code => self.open_code(&token),
            BbTag::Image => self.open_raw(&token, |src, _| {
                Element::new(tag::IMAGE)
                    .attr(attr::SRC, src.trim())
                    .text(src)
            }),
            BbTag::YouTube => self.open_raw(&token, |content, _| {
                let mut element = Element::new(tag::YOUTUBE).text(content);
                if let Some(id) = youtube_id(content.trim()) {
                    element = element.attr(attr::ID, id);
                }
                element
            }),
            BbTag::Attachment => self.open_raw(&token, |filename, index| {
                let mut element = Element::new(tag::ATTACHMENT)
                    .attr(attr::FILENAME, filename.trim())
                    .text(filename);
                if let Some(index) = index {
                    element = element.attr(attr::INDEX, index);
                }
                element
            }),
            BbTag::Url if token.argument().is_none() => self.open_raw(&token, |url, _| {
                Element::new(tag::URL).attr(attr::URL, url.trim()).text(url)
            }),
            BbTag::Email if token.argument().is_none() => self.open_raw(&token, |address, _| {
                Element::new(tag::EMAIL)
                    .attr(attr::EMAIL, address.trim())
                    .text(address)
            }),
            BbTag::Item => self.open_item(&token),
            _ => {
                let element = opening_element(bbtag, &token);
                self.open(bbtag, element, &token);
            }
        }
    }

    fn open(&mut self, bbtag: BbTag, element: Element, token: &Token<'_>) {
        self.flush_text();
        self.stack.push(Frame {
            element,
            tag: Some(bbtag),
            offset: token.start,
        });
        self.pos = token.end;
    }

    /// `[*]` ends the previous item and starts a new one.
    fn open_item(&mut self, token: &Token<'_>) {
        self.flush_text();
        if self.top_tag() == Some(BbTag::Item)
            && self.parent_is_list()
            && let Some(frame) = self.stack.pop()
        {
            self.close_frame(frame);
        }

        if self.top_tag() != Some(BbTag::List) {
            self.warnings.push(
                Warning::new(
                    Severity::Minor,
                    WarningKind::Misplaced("*".to_string()),
                    "list item outside of a list kept as text",
                )
                .at(token.start),
            );
            self.literal(token);
            return;
        }

        self.open(BbTag::Item, Element::new(tag::LIST_ITEM), token);
    }

    /// Code content is taken verbatim up to the matching close tag.
    fn open_code(&mut self, token: &Token<'_>) {
        let input = self.input;
        let body_start = token.end;
        let (content, end) = match find_close(input, body_start, "code") {
            Some((close_start, close_end)) => (&input[body_start..close_start], close_end),
            None => {
                self.warnings.push(
                    Warning::new(
                        Severity::Minor,
                        WarningKind::UnclosedTag("code".to_string()),
                        "code block runs to end of input",
                    )
                    .at(token.start),
                );
                (&input[body_start..], input.len())
            }
        };

        let mut element = Element::new(tag::CODE).text(content);
        if let Some(lang) = token.argument().filter(|lang| !lang.is_empty()) {
            element = element.attr(attr::LANG, lang);
        }
        self.append(element);
        self.pos = end;
    }

    /// Tags whose content is a plain value (an image source, a video id).
    /// Without a close tag the opener stays literal.
    fn open_raw<F>(&mut self, token: &Token<'_>, build: F)
    where
        F: FnOnce(&str, Option<&str>) -> Element,
    {
        let input = self.input;
        let Some((close_start, close_end)) = find_close(input, token.end, &token.name) else {
            self.literal(token);
            return;
        };

        let content = &input[token.end..close_start];
        let element = build(content, token.argument());
        self.append(element);
        self.pos = close_end;
    }

    fn close_tag(&mut self, bbtag: BbTag, token: &Token<'_>) {
        let Some(index) = self.stack.iter().rposition(|f| f.tag == Some(bbtag)) else {
            self.warnings.push(
                Warning::new(
                    Severity::Minor,
                    WarningKind::UnmatchedClose(token.name.clone()),
                    format!("closing tag {} without opener kept as text", token.raw),
                )
                .at(token.start),
            );
            self.literal(token);
            return;
        };

        self.flush_text();
        while self.stack.len() > index + 1 {
            let implicit = bbtag == BbTag::List
                && self.top_tag() == Some(BbTag::Item)
                && self.stack.len() == index + 2;
            if let Some(frame) = self.stack.pop() {
                if !implicit {
                    self.warn_unclosed(&frame);
                }
                self.close_frame(frame);
            }
        }
        if let Some(frame) = self.stack.pop() {
            self.close_frame(frame);
        }
        self.pos = token.end;
    }

    fn close_frame(&mut self, frame: Frame) {
        let mut element = frame.element;
        if frame.tag == Some(BbTag::Item) {
            trim_trailing_breaks(&mut element);
        }
        self.push_content(Content::Element(element));
    }

    fn warn_unclosed(&mut self, frame: &Frame) {
        let name = frame
            .tag
            .map(|t| t.element_name().to_ascii_lowercase())
            .unwrap_or_default();
        self.warnings.push(
            Warning::new(
                Severity::Minor,
                WarningKind::UnclosedTag(name.clone()),
                format!("[{name}] was never closed"),
            )
            .at(frame.offset),
        );
    }

    fn literal(&mut self, token: &Token<'_>) {
        self.text.push_str(token.raw);
        self.pos = token.end;
    }

    fn append(&mut self, element: Element) {
        self.flush_text();
        self.push_content(Content::Element(element));
    }

    fn push_content(&mut self, content: Content) {
        if let Some(frame) = self.stack.last_mut() {
            frame.element.children.push(content);
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        if self.top_tag() == Some(BbTag::List) && text.trim().is_empty() {
            return;
        }

        for content in split_smilies(&text, &self.smilies) {
            self.push_content(content);
        }
    }

    fn top_tag(&self) -> Option<BbTag> {
        self.stack.last().and_then(|f| f.tag)
    }

    fn parent_is_list(&self) -> bool {
        self.stack.len() >= 2 && self.stack[self.stack.len() - 2].tag == Some(BbTag::List)
    }
}

fn opening_element(bbtag: BbTag, token: &Token<'_>) -> Element {
    let element = Element::new(bbtag.element_name());
    let argument = token.argument().filter(|a| !a.is_empty());
    match (bbtag, argument) {
        (BbTag::List, Some(kind)) => match list_type(kind) {
            Some(kind) => element.attr(attr::TYPE, kind),
            None => element,
        },
        (BbTag::Url, Some(url)) => element.attr(attr::URL, url),
        (BbTag::Email, Some(address)) => element.attr(attr::EMAIL, address),
        (BbTag::Size, Some(size)) => element.attr(attr::SIZE, size),
        (BbTag::Color, Some(color)) => element.attr(attr::COLOR, color),
        (BbTag::Quote, _) => Element {
            attrs: quote_attributes(token.params),
            ..element
        },
        _ => element,
    }
}

/// Ordered list styles; bullet styles leave the list unordered.
fn list_type(kind: &str) -> Option<&'static str> {
    match kind {
        "1" => Some("decimal"),
        "a" => Some("lower-alpha"),
        "A" => Some("upper-alpha"),
        "i" => Some("lower-roman"),
        "I" => Some("upper-roman"),
        _ => None,
    }
}

/// Parse `="name" post_id=1 user_id=2`, `=name` or ` author=name`.
fn quote_attributes(params: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut rest = params.trim_start();

    if let Some(value) = rest.strip_prefix('=') {
        let (author, remaining) = take_value(value, true);
        if !author.is_empty() {
            attrs.set(attr::AUTHOR, author);
        }
        rest = remaining;
    }

    for (key, value) in named_params(rest) {
        match key.as_str() {
            "post_id" => attrs.set(attr::POST_ID, value),
            "user_id" => attrs.set(attr::USER_ID, value),
            "author" | "name" => attrs.set(attr::AUTHOR, value),
            _ => {}
        }
    }
    attrs
}

fn named_params(mut rest: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    loop {
        rest = rest.trim_start();
        let Some(eq) = rest.find('=') else {
            return params;
        };
        let key = rest[..eq].trim().to_ascii_lowercase();
        let (value, remaining) = take_value(&rest[eq + 1..], false);
        if !key.is_empty() {
            params.push((key, value.to_string()));
        }
        rest = remaining;
    }
}

/// Take a quoted or bare value. A bare default value may contain spaces
/// and runs until the first ` key=` pair.
fn take_value(input: &str, default_value: bool) -> (&str, &str) {
    for quote in ['"', '\''] {
        if let Some(inner) = input.strip_prefix(quote) {
            return match inner.find(quote) {
                Some(end) => (&inner[..end], &inner[end + 1..]),
                None => (inner, ""),
            };
        }
    }

    if default_value {
        let end = next_named_param(input).unwrap_or(input.len());
        return (input[..end].trim(), &input[end..]);
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    (&input[..end], &input[end..])
}

fn next_named_param(input: &str) -> Option<usize> {
    input.char_indices().find_map(|(i, c)| {
        if !c.is_whitespace() {
            return None;
        }
        let word = input[i..].trim_start();
        let key_len = word.find('=')?;
        let key = &word[..key_len];
        let is_key = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        is_key.then_some(i)
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Find `[/name]` case-insensitively, returning its start and end offsets.
fn find_close(input: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let needle = format!("[/{name}]");
    let haystack = input[from..].to_ascii_lowercase();
    let start = from + haystack.find(&needle)?;
    Some((start, start + needle.len()))
}

fn youtube_id(content: &str) -> Option<&str> {
    let id = if let Some((_, query)) = content.split_once("v=") {
        query.split(['&', '#']).next().unwrap_or(query)
    } else if let Some((_, path)) = content.split_once("youtu.be/") {
        path.split(['?', '&', '#']).next().unwrap_or(path)
    } else {
        content
    };
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

fn split_smilies(text: &str, smilies: &[&str]) -> Vec<Content> {
    if smilies.is_empty() {
        return vec![Content::Text(text.to_string())];
    }

    let mut out = Vec::new();
    let mut plain = String::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(code) = smilies.iter().find(|code| rest.starts_with(**code)) {
            if !plain.is_empty() {
                out.push(Content::Text(std::mem::take(&mut plain)));
            }
            out.push(Content::Element(Element::new(tag::EMOTICON).text(*code)));
            rest = &rest[code.len()..];
        } else {
            plain.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    if !plain.is_empty() {
        out.push(Content::Text(plain));
    }
    out
}

/// Line breaks and blank text before the next `[*]` belong to the list
/// layout, not to the item.
fn trim_trailing_breaks(element: &mut Element) {
    while let Some(last) = element.children.last() {
        let layout = match last {
            Content::Element(e) => e.is(tag::LINE_BREAK),
            Content::Text(t) => t.trim().is_empty(),
        };
        if !layout {
            return;
        }
        element.children.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(input: &str) -> Element {
        parse(input).unwrap().value
    }

    fn first(element: &Element) -> &Element {
        element.child_elements().next().unwrap()
    }

    #[test]
    fn test_parse_bold() {
        let result = parse("This is [b]bold[/b] text").unwrap();
        assert!(!result.has_warnings());
        let root = result.value;
        assert!(root.is(tag::RICH_ROOT));
        assert_eq!(root.children.len(), 3);
        assert!(first(&root).is(tag::BOLD));
        assert_eq!(first(&root).text_content(), "bold");
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let root = root("[B]x[/b][I]y[/I]");
        let names: Vec<_> = root.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![tag::BOLD, tag::ITALIC]);
    }

    #[test]
    fn test_newlines_become_breaks() {
        let root = root("a\r\nb\nc");
        let breaks = root.child_elements().filter(|e| e.is(tag::LINE_BREAK)).count();
        assert_eq!(breaks, 2);
        assert_eq!(root.text_content(), "abc");
    }

    #[test]
    fn test_parse_link() {
        let root = root("[url=http://example.com]Example[/url] [url]http://b.example[/url]");
        let links: Vec<_> = root.child_elements().collect();
        assert_eq!(links[0].attrs.get(attr::URL), Some("http://example.com"));
        assert_eq!(links[0].text_content(), "Example");
        assert_eq!(links[1].attrs.get(attr::URL), Some("http://b.example"));
        assert_eq!(links[1].text_content(), "http://b.example");
    }

    #[test]
    fn test_parse_list() {
        let root = root("[list]\n[*]Item 1\n[*]Item 2\n[/list]");
        let list = first(&root);
        assert!(list.is(tag::LIST));
        assert!(!list.attrs.contains(attr::TYPE));
        let items: Vec<_> = list.child_elements().collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.is(tag::LIST_ITEM)));
        assert_eq!(items[0].children, vec![Content::Text("Item 1".into())]);
        assert_eq!(items[1].children, vec![Content::Text("Item 2".into())]);
    }

    #[test]
    fn test_ordered_list_types() {
        assert_eq!(first(&root("[list=1][*]a[/list]")).attrs.get(attr::TYPE), Some("decimal"));
        assert_eq!(
            first(&root("[list=a][*]a[/list]")).attrs.get(attr::TYPE),
            Some("lower-alpha")
        );
        assert_eq!(first(&root("[list=disc][*]a[/list]")).attrs.get(attr::TYPE), None);
    }

    #[test]
    fn test_parse_code_is_raw() {
        let root = root("[code=rust]let a = [b]x[/b];\n[/CODE]after");
        let code = first(&root);
        assert!(code.is(tag::CODE));
        assert_eq!(code.attrs.get(attr::LANG), Some("rust"));
        assert_eq!(code.children, vec![Content::Text("let a = [b]x[/b];\n".into())]);
        assert_eq!(root.children.last(), Some(&Content::Text("after".into())));
    }

    #[test]
    fn test_quote_forms() {
        let q = first(&root(r#"[quote="John Smith" post_id=12 user_id=3]x[/quote]"#)).clone();
        assert_eq!(q.attrs.get(attr::AUTHOR), Some("John Smith"));
        assert_eq!(q.attrs.get_number(attr::POST_ID), Some(12));
        assert_eq!(q.attrs.get_number(attr::USER_ID), Some(3));

        let q = first(&root("[quote=John Smith]x[/quote]")).clone();
        assert_eq!(q.attrs.get(attr::AUTHOR), Some("John Smith"));

        let q = first(&root("[quote]x[/quote]")).clone();
        assert!(q.attrs.is_empty());
    }

    #[test]
    fn test_embeds() {
        let root = root(
            "[img]http://x/a.png[/img][youtube]https://www.youtube.com/watch?v=abc_1-2&t=3[/youtube]\
             [attachment=2]cat.png[/attachment][size=150]big[/size][color=red]r[/color]",
        );
        let elements: Vec<_> = root.child_elements().collect();
        assert_eq!(elements[0].attrs.get(attr::SRC), Some("http://x/a.png"));
        assert_eq!(elements[1].attrs.get(attr::ID), Some("abc_1-2"));
        assert_eq!(elements[2].attrs.get(attr::FILENAME), Some("cat.png"));
        assert_eq!(elements[2].attrs.get_number(attr::INDEX), Some(2));
        assert_eq!(elements[3].attrs.get_number(attr::SIZE), Some(150));
        assert_eq!(elements[4].attrs.get(attr::COLOR), Some("red"));
    }

    #[test]
    fn test_unknown_tags_stay_literal() {
        let result = parse("[spoiler]x[/spoiler] [ b] [").unwrap();
        assert!(result.value.child_elements().next().is_none());
        assert_eq!(result.value.text_content(), "[spoiler]x[/spoiler] [ b] [");
    }

    #[test]
    fn test_unmatched_close_kept_with_warning() {
        let result = parse("a[/b]c").unwrap();
        assert_eq!(result.value.text_content(), "a[/b]c");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnmatchedClose("b".into()));
        assert_eq!(result.warnings[0].offset, Some(1));
    }

    #[test]
    fn test_unclosed_closed_at_end_with_warning() {
        let result = parse("[b]bold [i]both").unwrap();
        let bold = first(&result.value);
        assert!(bold.is(tag::BOLD));
        assert!(first(bold).is(tag::ITALIC));
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_misnested_close_repairs() {
        let result = parse("[b][i]x[/b]y").unwrap();
        let bold = first(&result.value);
        assert_eq!(bold.text_content(), "x");
        assert_eq!(
            result.warnings[0].kind,
            WarningKind::UnclosedTag("i".into())
        );
    }

    #[test]
    fn test_item_outside_list() {
        let result = parse("[*]x").unwrap();
        assert_eq!(result.value.text_content(), "[*]x");
        assert_eq!(result.warnings[0].kind, WarningKind::Misplaced("*".into()));
    }

    #[test]
    fn test_smilies() {
        let options = ReaderOptions::default().with_smilies([":)", ":-)"]);
        let root = parse_with_options("hi :-) there :)", &options).unwrap().value;
        let codes: Vec<_> = root
            .child_elements()
            .filter(|e| e.is(tag::EMOTICON))
            .map(|e| e.text_content())
            .collect();
        assert_eq!(codes, vec![":-)", ":)"]);
    }

    #[test]
    fn test_reader_trait() {
        let reader = BbcodeReader::default();
        assert!(reader.formats().contains(&"bbcode"));
        assert!(Reader::parse(&reader, "[u]x[/u]").is_ok());
    }
}
