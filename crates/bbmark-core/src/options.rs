//! Conversion options.

/// Options for converting an element tree to Markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    /// Render single-line code as inline code instead of a fenced block.
    pub allow_inline_code: bool,
    /// Emit every inserted line break as an escaped hard break (`\` + newline).
    pub traditional_linebreaks: bool,
    /// Font-size ranges that map to `<small>` and `<big>`.
    pub size_bands: SizeBands,
}

/// Font-size ranges for the size hint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizeBands {
    pub small: SizeBand,
    pub big: SizeBand,
}

impl Default for SizeBands {
    fn default() -> Self {
        Self {
            small: SizeBand { min: 1, max: 99 },
            big: SizeBand { min: 101, max: 200 },
        }
    }
}

/// An inclusive size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeBand {
    pub min: u64,
    pub max: u64,
}

impl SizeBand {
    /// Check whether a size falls inside this band.
    pub fn contains(&self, size: u64) -> bool {
        (self.min..=self.max).contains(&size)
    }
}

impl ConvertOptions {
    /// Allow single-backtick inline code.
    pub fn with_inline_code(mut self, allow: bool) -> Self {
        self.allow_inline_code = allow;
        self
    }

    /// Force escaped hard line breaks.
    pub fn with_traditional_linebreaks(mut self, traditional: bool) -> Self {
        self.traditional_linebreaks = traditional;
        self
    }

    /// Replace the size bands.
    pub fn with_size_bands(mut self, bands: SizeBands) -> Self {
        self.size_bands = bands;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let bands = SizeBands::default();
        assert!(bands.small.contains(1));
        assert!(bands.small.contains(99));
        assert!(!bands.small.contains(100));
        assert!(!bands.big.contains(100));
        assert!(bands.big.contains(200));
        assert!(!bands.big.contains(201));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options: ConvertOptions = toml::from_str("allow_inline_code = true").unwrap();
        assert!(options.allow_inline_code);
        assert!(!options.traditional_linebreaks);
        assert_eq!(options.size_bands, SizeBands::default());
    }
}
