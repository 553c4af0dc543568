//! bbmark - bulletin-board markup to Markdown
//!
//! bbmark converts forum posts into Markdown for import into a new forum:
//! - Stored forum XML (`<r>`/`<t>` roots) or raw BBCode as input
//! - Whitespace kept outside of emphasis markers
//! - Line-break runs merged and spelled so Markdown keeps them
//! - Users, quoted posts, uploads and smilies resolved through a pluggable
//!   [`Resolver`]
//!
//! # Quick Start
//!
//! ```rust
//! use bbmark::prelude::*;
//!
//! let root = bbmark::bbcode::parse("[b]Hello[/b] world").unwrap().value;
//! let markdown = bbmark::markdown::convert_plain(&root, &ConvertOptions::default());
//!
//! assert_eq!(markdown, "**Hello** world");
//! ```
//!
//! # Features
//!
//! - `xml` - stored forum XML reader (default)
//! - `bbcode` - raw BBCode reader (default)
//! - `all` - enable all readers
//!
//! # Architecture
//!
//! Readers turn input into an [`Element`] tree whose element names follow
//! the stored XML (`B`, `LIST`, `QUOTE`, `br`, ...). The Markdown writer
//! walks that tree into an intermediate tree of prefixes, postfixes and
//! line-break requirements, then renders it to text.

// Re-export core types
pub use bbmark_core::*;

/// Tag and attribute names and the element builder.
pub mod tags {
    pub use bbmark_tags::{HARD_BREAK_PARENTS, MARKERS, NO_LEADING_WHITESPACE, attr, builder, tag};
}

/// Stored forum XML reader.
#[cfg(feature = "xml")]
pub mod xml {
    pub use bbmark_read_xml::{XmlReader, parse};
}

/// Raw BBCode reader.
#[cfg(feature = "bbcode")]
pub mod bbcode {
    pub use bbmark_read_bbcode::{BbcodeReader, ReaderOptions, parse, parse_with_options};
}

/// Markdown writer.
pub mod markdown {
    pub use bbmark_write_markdown::{
        IrNode, IrTree, LinebreakType, NodeId, Origin, Rule, build_ir, convert, convert_plain,
        preprocess, render,
    };
}

/// Look up a reader by format name (`xml`, `bbcode`, `bb`).
///
/// Unknown names and formats whose feature is disabled are
/// [`ParseError::UnsupportedFormat`].
pub fn reader_for(format: &str) -> Result<Box<dyn Reader>, ParseError> {
    match format.to_ascii_lowercase().as_str() {
        #[cfg(feature = "xml")]
        "xml" => Ok(Box::new(xml::XmlReader)),
        #[cfg(feature = "bbcode")]
        "bbcode" | "bb" => Ok(Box::new(bbcode::BbcodeReader::default())),
        _ => Err(ParseError::UnsupportedFormat(format.to_string())),
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ConversionResult, ConvertOptions, Element, LookupTables, NoResolver, Resolver, Warning,
    };

    pub use crate::tags::{attr, builder, tag};
}
