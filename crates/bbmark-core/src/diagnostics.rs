//! Reader diagnostics - know what a reader had to guess at.

/// Result of a read operation, including non-fatal warnings.
#[derive(Debug)]
pub struct ConversionResult<T> {
    /// The read output.
    pub value: T,
    /// Warnings about markup that was repaired or kept literally.
    pub warnings: Vec<Warning>,
}

impl<T> ConversionResult<T> {
    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Add a warning.
    pub fn warn(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A warning about markup the reader could not take at face value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub severity: Severity,
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
    /// Byte offset in the input, when known.
    pub offset: Option<usize>,
}

impl Warning {
    /// Create a new warning.
    pub fn new(severity: Severity, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            offset: None,
        }
    }

    /// Set the input offset.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Severity of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Information only, output unaffected.
    Info,
    /// Output may differ slightly from what the author saw.
    Minor,
    /// Markup was dropped or reinterpreted.
    Major,
}

/// Kind of reader issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A tag was opened but never closed; it was closed at end of input.
    UnclosedTag(String),
    /// A closing tag had no matching opener; it was kept as text.
    UnmatchedClose(String),
    /// A tag appeared where it is not allowed (e.g. `[*]` outside a list).
    Misplaced(String),
}
