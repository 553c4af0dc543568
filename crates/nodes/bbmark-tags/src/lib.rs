//! Tag and attribute vocabulary for bbmark.
//!
//! Element trees use the naming of the stored forum XML: BBCode tags are
//! upper-case elements, while line breaks and the bracket marker elements
//! are lower-case. This crate re-exports `bbmark-core` so users only need
//! one import.

pub use bbmark_core::*;

pub mod builder;

/// Tag name constants.
pub mod tag {
    // Roots
    /// Root of a post containing markup.
    pub const RICH_ROOT: &str = "r";
    /// Root of a post containing plain text only.
    pub const PLAIN_ROOT: &str = "t";

    // Inline formatting
    /// Bold text.
    pub const BOLD: &str = "B";
    /// Italic text.
    pub const ITALIC: &str = "I";
    /// Underlined text.
    pub const UNDERLINE: &str = "U";
    /// Strikethrough text. No Markdown rule; passes through.
    pub const STRIKE: &str = "S";
    /// Colored text. No Markdown rule; passes through.
    pub const COLOR: &str = "COLOR";
    /// Font-size hint (use `size` attribute).
    pub const SIZE: &str = "SIZE";
    /// Monospace / code (optional `lang` attribute).
    pub const CODE: &str = "CODE";

    // Blocks
    /// A list; a `type` attribute makes it ordered.
    pub const LIST: &str = "LIST";
    /// An item in a list.
    pub const LIST_ITEM: &str = "LI";
    /// Quoted content (`post_id`, `user_id`, `author` attributes).
    pub const QUOTE: &str = "QUOTE";

    // Embeds and references
    /// An image (use `src` attribute).
    pub const IMAGE: &str = "IMG";
    /// A hyperlink (use `url` attribute).
    pub const URL: &str = "URL";
    /// A plain-text email address.
    pub const EMAIL: &str = "EMAIL";
    /// A smilie; the element text is the smilie code.
    pub const EMOTICON: &str = "E";
    /// An embedded video (use `id` attribute).
    pub const YOUTUBE: &str = "YOUTUBE";
    /// An inline attachment (`filename`, `index` attributes).
    pub const ATTACHMENT: &str = "ATTACHMENT";
    /// A line break.
    pub const LINE_BREAK: &str = "br";

    // Markers
    /// Start marker holding the opening bracket text, e.g. `[b]`.
    pub const START_MARKER: &str = "s";
    /// End marker holding the closing bracket text, e.g. `[/b]`.
    pub const END_MARKER: &str = "e";
    /// Ignored source text, e.g. whitespace swallowed by a tag.
    pub const IGNORED: &str = "i";
}

/// Attribute name constants.
pub mod attr {
    /// Link target of `URL`.
    pub const URL: &str = "url";
    /// Image source of `IMG`.
    pub const SRC: &str = "src";
    /// Address of `EMAIL`.
    pub const EMAIL: &str = "email";
    /// List style of `LIST`; present means ordered.
    pub const TYPE: &str = "type";
    /// Quoted post id of `QUOTE`.
    pub const POST_ID: &str = "post_id";
    /// Quoted user id of `QUOTE`.
    pub const USER_ID: &str = "user_id";
    /// Literal author name of `QUOTE`.
    pub const AUTHOR: &str = "author";
    /// Attachment filename.
    pub const FILENAME: &str = "filename";
    /// Attachment index.
    pub const INDEX: &str = "index";
    /// Size of `SIZE`.
    pub const SIZE: &str = "size";
    /// Video id of `YOUTUBE`.
    pub const ID: &str = "id";
    /// Language of `CODE`.
    pub const LANG: &str = "lang";
    /// Color of `COLOR`.
    pub const COLOR: &str = "color";
}

/// Marker elements stripped before conversion.
pub const MARKERS: [&str; 3] = [tag::START_MARKER, tag::END_MARKER, tag::IGNORED];

/// Containers whose first text child loses its leading whitespace.
pub const NO_LEADING_WHITESPACE: [&str; 2] = [tag::LIST, tag::LIST_ITEM];

/// Emphasis tags inside which repeated line breaks become hard breaks.
pub const HARD_BREAK_PARENTS: [&str; 3] = [tag::BOLD, tag::ITALIC, tag::UNDERLINE];
