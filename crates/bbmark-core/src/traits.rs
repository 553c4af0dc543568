//! Reader trait and errors.

use crate::{ConversionResult, Element};

/// Error while reading stored markup into an element tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid input: {0}")]
    Invalid(String),
    /// No reader is available for the named format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Read a stored markup representation into an element tree.
pub trait Reader: Send + Sync {
    /// Format names this reader handles.
    fn formats(&self) -> &[&str];

    /// Parse text into an element tree.
    fn parse(&self, input: &str) -> Result<ConversionResult<Element>, ParseError>;
}
