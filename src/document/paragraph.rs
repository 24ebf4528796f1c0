//! Paragraphs and runs of the format-neutral model.

use smallvec::SmallVec;

/// The smallest span of text sharing one formatting state.
///
/// Only the underline flag survives from the source formatting. Adjacent
/// runs with the same flag stay separate objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Visible text of the run
    pub text: String,
    /// Whether any underline style is applied
    pub underlined: bool,
}

impl Run {
    /// Create a run.
    #[inline]
    pub fn new(text: impl Into<String>, underlined: bool) -> Self {
        Self {
            text: text.into(),
            underlined,
        }
    }

    /// Create a run without underline.
    #[inline]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// Create an underlined run.
    #[inline]
    pub fn underlined(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

/// An ordered sequence of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    runs: SmallVec<[Run; 4]>,
}

impl Paragraph {
    /// Create an empty paragraph.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from runs.
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            runs: runs.into_iter().collect(),
        }
    }

    /// Append a run.
    #[inline]
    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// The runs, in order.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Whether the paragraph has no runs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenated run text without any markup.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl FromIterator<Run> for Paragraph {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        Self::from_runs(iter)
    }
}
