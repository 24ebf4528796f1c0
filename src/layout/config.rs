/// Configuration for the text layout pass.
///
/// Every constant the renderer uses to size fill-in lines and table borders
/// lives here, so callers can tune the output without touching the walkers.
use serde::{Deserialize, Serialize};

/// Sizing options for rendered text.
///
/// Missing fields deserialize to their defaults.
///
/// # Examples
///
/// ```rust
/// use longan::layout::LayoutConfig;
///
/// // Create with defaults
/// let config = LayoutConfig::default();
/// assert_eq!(config.blank_line_width, 80);
///
/// // Or customize
/// let config = LayoutConfig::new()
///     .with_blank_line_width(60)
///     .with_min_column_width(8);
/// assert_eq!(config.min_column_width, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the underscore line that replaces a blank-underline paragraph
    pub blank_line_width: usize,
    /// Smallest width of a data table column
    pub min_column_width: usize,
    /// Smallest line width of a single-column essay table
    pub essay_min_line_width: usize,
    /// Padding added on each side of the widest essay line
    pub essay_side_padding: usize,
    /// Smallest number of underscores trailing an essay content line
    pub underline_text_padding: usize,
    /// Emit an empty line before and after each table
    pub separate_tables: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            blank_line_width: 80,
            min_column_width: 10,
            essay_min_line_width: 70,
            essay_side_padding: 3,
            underline_text_padding: 3,
            separate_tables: false,
        }
    }
}

impl LayoutConfig {
    /// Create a new `LayoutConfig` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of fill-in underscore lines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::layout::LayoutConfig;
    ///
    /// let config = LayoutConfig::new().with_blank_line_width(40);
    /// assert_eq!(config.blank_line_width, 40);
    /// ```
    #[inline]
    pub fn with_blank_line_width(mut self, width: usize) -> Self {
        self.blank_line_width = width;
        self
    }

    /// Set the minimum data table column width.
    #[inline]
    pub fn with_min_column_width(mut self, width: usize) -> Self {
        self.min_column_width = width;
        self
    }

    /// Set the minimum essay table line width.
    #[inline]
    pub fn with_essay_min_line_width(mut self, width: usize) -> Self {
        self.essay_min_line_width = width;
        self
    }

    /// Set the padding added on each side of the widest essay line.
    #[inline]
    pub fn with_essay_side_padding(mut self, padding: usize) -> Self {
        self.essay_side_padding = padding;
        self
    }

    /// Set the minimum trailing underscores on essay content lines.
    #[inline]
    pub fn with_underline_text_padding(mut self, padding: usize) -> Self {
        self.underline_text_padding = padding;
        self
    }

    /// Set whether tables are surrounded by empty lines.
    ///
    /// Off by default, so a table's border follows the preceding paragraph
    /// directly.
    #[inline]
    pub fn with_separate_tables(mut self, separate: bool) -> Self {
        self.separate_tables = separate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::new();
        assert_eq!(config.blank_line_width, 80);
        assert_eq!(config.min_column_width, 10);
        assert_eq!(config.essay_min_line_width, 70);
        assert_eq!(config.essay_side_padding, 3);
        assert_eq!(config.underline_text_padding, 3);
        assert!(!config.separate_tables);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "blank_line_width: 64\nseparate_tables: true\n";
        let config: LayoutConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.blank_line_width, 64);
        assert!(config.separate_tables);
        assert_eq!(config.min_column_width, 10);
    }
}
