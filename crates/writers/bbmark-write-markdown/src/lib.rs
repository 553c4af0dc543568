//! Markdown writer for bbmark.
//!
//! Converts a parsed BBCode element tree into Markdown in two passes. The
//! walker builds an intermediate tree where every recognized element is a
//! node carrying prefix/postfix strings and line-break requirements; the
//! renderer then serializes that tree, merging line-break runs and moving
//! boundary whitespace outside of formatting markers.
//!
//! ```
//! use bbmark_core::ConvertOptions;
//! use bbmark_tags::builder::post;
//!
//! let root = post(|p| p.text("Hello").bold(|b| b.text(" world")));
//! let markdown = bbmark_write_markdown::convert_plain(&root, &ConvertOptions::default());
//! assert_eq!(markdown, "Hello **world**");
//! ```

pub mod ir;
pub mod render;
pub mod rules;
pub mod walker;

use bbmark_core::{ConvertOptions, Element, NoResolver, Resolver};

pub use ir::{IrNode, IrTree, LinebreakType, NodeId, Origin};
pub use render::render;
pub use rules::Rule;
pub use walker::{build_ir, preprocess};

/// Convert an element tree to Markdown.
///
/// Lookups go through `resolver`; the first lookup error aborts the
/// conversion and is returned as is.
pub fn convert<R: Resolver>(
    root: &Element,
    resolver: &R,
    options: &ConvertOptions,
) -> Result<String, R::Error> {
    let tree = walker::build_ir(root, resolver, options)?;
    tracing::debug!(nodes = tree.node_count(), "built intermediate tree");
    Ok(render::render(&tree, options))
}

/// Convert an element tree to Markdown without any lookups.
pub fn convert_plain(root: &Element, options: &ConvertOptions) -> String {
    match convert(root, &NoResolver, options) {
        Ok(markdown) => markdown,
        Err(never) => match never {},
    }
}
