//! Read and write settings

use hercm_core::format::constants::{BXF_VALUES_PER_LINE, MAX_UNMARKED_LINES};
use hercm_core::{BodyLimits, FormatTag, TextLayout};

/// Settings for reading HeRCM files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadConfig {
    /// Lines scanned outside any field before giving up on a marker
    pub max_unmarked_lines: usize,
    /// Recompute and compare the verification sum of COO files
    pub verify: bool,
}

impl ReadConfig {
    /// Set the bounded marker scan length
    pub fn with_max_unmarked_lines(mut self, lines: usize) -> Self {
        self.max_unmarked_lines = lines;
        self
    }

    /// Enable or disable verification sum checks
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Limits handed to the body parser
    pub fn limits(&self) -> BodyLimits {
        BodyLimits::default().with_max_unmarked_lines(self.max_unmarked_lines)
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            max_unmarked_lines: MAX_UNMARKED_LINES,
            verify: true,
        }
    }
}

/// Settings for writing HeRCM files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteConfig {
    /// Scalars per line; 0 writes every field on one line
    pub values_per_line: usize,
    /// Replace an existing file at the destination
    pub overwrite: bool,
    /// Leading tag of COO variant files
    pub coo_tag: FormatTag,
}

impl WriteConfig {
    /// Layout used by the BXF tooling: `BXF` tag, nine values per line
    pub fn bxf() -> Self {
        Self {
            values_per_line: BXF_VALUES_PER_LINE,
            coo_tag: FormatTag::Bxf,
            ..Self::default()
        }
    }

    /// Set line wrapping
    pub fn with_values_per_line(mut self, values_per_line: usize) -> Self {
        self.values_per_line = values_per_line;
        self
    }

    /// Allow or refuse replacing an existing file
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the COO variant tag
    pub fn with_coo_tag(mut self, coo_tag: FormatTag) -> Self {
        self.coo_tag = coo_tag;
        self
    }

    /// Text layout handed to the serializer
    pub fn layout(&self) -> TextLayout {
        TextLayout::wrapped(self.values_per_line)
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            values_per_line: 0,
            overwrite: true,
            coo_tag: FormatTag::Hercm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config_builders() {
        let config = ReadConfig::default()
            .with_max_unmarked_lines(5)
            .with_verify(false);
        assert_eq!(config.limits().max_unmarked_lines, 5);
        assert!(!config.verify);
        assert_eq!(ReadConfig::default().max_unmarked_lines, 10_000);
    }

    #[test]
    fn test_write_config_builders() {
        let config = WriteConfig::bxf();
        assert_eq!(config.coo_tag, FormatTag::Bxf);
        assert_eq!(config.layout(), TextLayout::wrapped(9));
        assert!(config.overwrite);

        let config = WriteConfig::default().with_overwrite(false).with_values_per_line(4);
        assert!(!config.overwrite);
        assert_eq!(config.values_per_line, 4);
    }
}
