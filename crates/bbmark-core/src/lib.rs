//! bbmark-core: the parsed bulletin-board element tree.
//!
//! This crate provides the types shared by readers (which turn stored forum
//! markup into an [`Element`] tree) and the Markdown converter (which walks
//! that tree): attributes, injected lookups via [`Resolver`], conversion
//! options and reader diagnostics.

mod attributes;
mod diagnostics;
mod element;
mod options;
mod resolve;
mod traits;

pub use attributes::*;
pub use diagnostics::*;
pub use element::*;
pub use options::*;
pub use resolve::*;
pub use traits::*;
