//! Extraction orchestration.
//!
//! [`Extractor`] picks a walker from the file name and signature, runs it, and
//! lays the resulting model out as text. XML packages get one automatic retry
//! through a second, lower-level access path when the primary walk fails.

use crate::common::detection::{Detection, FileFormat, detect_format};
use crate::common::error::{AttemptFailure, Error, ParseError, Result};
use crate::document::Document;
use crate::layout::{LayoutConfig, render_document};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// One way of turning raw file bytes into the document model.
pub trait Strategy: Send + Sync {
    /// Short name used in logs and in [`AttemptFailure`].
    fn name(&self) -> &'static str;

    /// Load and walk the document.
    fn load(&self, bytes: &[u8]) -> std::result::Result<Document, ParseError>;
}

/// Legacy binary (.doc) walker.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyStrategy;

impl Strategy for LegacyStrategy {
    fn name(&self) -> &'static str {
        "legacy"
    }

    #[cfg(feature = "ole")]
    fn load(&self, bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        use crate::document::DocumentWalker;

        let mut package = crate::ole::doc::Package::from_bytes(bytes)?;
        Ok(package.document()?.walk()?)
    }

    #[cfg(not(feature = "ole"))]
    fn load(&self, _bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        Err(ParseError::FeatureDisabled("ole"))
    }
}

/// Structured walk of the main part, resolved through the package metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageStrategy;

impl Strategy for PackageStrategy {
    fn name(&self) -> &'static str {
        "package"
    }

    #[cfg(feature = "ooxml")]
    fn load(&self, bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        use crate::document::DocumentWalker;

        let mut package = crate::ooxml::docx::Package::from_bytes(bytes)?;
        Ok(package.document()?.walk()?)
    }

    #[cfg(not(feature = "ooxml"))]
    fn load(&self, _bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        Err(ParseError::FeatureDisabled("ooxml"))
    }
}

/// Lenient streaming walk of `word/document.xml`, ignoring package metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawXmlStrategy;

impl Strategy for RawXmlStrategy {
    fn name(&self) -> &'static str {
        "raw-xml"
    }

    #[cfg(feature = "ooxml")]
    fn load(&self, bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        use crate::document::DocumentWalker;

        Ok(crate::ooxml::docx::RawDocument::from_bytes(bytes)?.walk()?)
    }

    #[cfg(not(feature = "ooxml"))]
    fn load(&self, _bytes: &[u8]) -> std::result::Result<Document, ParseError> {
        Err(ParseError::FeatureDisabled("ooxml"))
    }
}

/// The strategies an [`Extractor`] runs.
pub struct Strategies {
    /// Used for OLE2 compound files
    pub legacy: Box<dyn Strategy>,
    /// First attempt for ZIP packages
    pub primary: Box<dyn Strategy>,
    /// Retry for ZIP packages after the primary attempt failed
    pub fallback: Box<dyn Strategy>,
}

impl Default for Strategies {
    fn default() -> Self {
        Self {
            legacy: Box::new(LegacyStrategy),
            primary: Box::new(PackageStrategy),
            fallback: Box::new(RawXmlStrategy),
        }
    }
}

impl fmt::Debug for Strategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategies")
            .field("legacy", &self.legacy.name())
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

/// Extracted text and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub strategy: &'static str,
}

/// Turns Word files into exam-paper text.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::Extractor;
///
/// let data = std::fs::read("paper.docx")?;
/// let text = Extractor::new().extract_bytes(&data, "paper.docx")?;
/// print!("{text}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    config: LayoutConfig,
    strategies: Strategies,
}

impl Extractor {
    /// Extractor with the default layout and strategies.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            strategies: Strategies::default(),
        }
    }

    /// Extractor with custom strategies, e.g. to stand in for a failing walker.
    pub fn with_strategies(config: LayoutConfig, strategies: Strategies) -> Self {
        Self { config, strategies }
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Extract text from an in-memory file.
    pub fn extract_bytes(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        self.extract_detailed(bytes, file_name).map(|e| e.text)
    }

    /// Read `reader` to the end, release it, then extract.
    pub fn extract_reader<R: Read>(&self, mut reader: R, file_name: &str) -> Result<String> {
        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        drop(reader);
        read?;
        self.extract_bytes(&bytes, file_name)
    }

    /// Extract text from a file on disk.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.extract_bytes(&bytes, &name)
    }

    /// Extract text and report which strategy succeeded.
    pub fn extract_detailed(&self, bytes: &[u8], file_name: &str) -> Result<Extraction> {
        if bytes.is_empty() {
            return Err(Error::EmptyInput);
        }

        let format = match detect_format(bytes, file_name) {
            Detection::Supported(format) => format,
            Detection::UnsupportedExtension => {
                return Err(Error::UnsupportedFormat(format!(
                    "extension of '{file_name}' is not a Word format"
                )));
            },
            Detection::UnknownSignature => {
                return Err(Error::UnsupportedFormat(format!(
                    "'{file_name}' is neither an OLE2 compound file nor a ZIP package"
                )));
            },
        };
        log::debug!("{file_name}: detected {format}");

        let (document, strategy) = self.load(format, bytes)?;
        log::debug!(
            "{file_name}: {} walked {} paragraphs, {} tables",
            strategy,
            document.paragraph_count(),
            document.table_count()
        );

        let text = render_document(&document, &self.config);
        if text.trim().is_empty() {
            return Err(Error::EmptyResult);
        }
        Ok(Extraction { text, strategy })
    }

    fn load(&self, format: FileFormat, bytes: &[u8]) -> Result<(Document, &'static str)> {
        let plan: Vec<&dyn Strategy> = match format {
            FileFormat::Doc => vec![self.strategies.legacy.as_ref()],
            FileFormat::Docx => vec![
                self.strategies.primary.as_ref(),
                self.strategies.fallback.as_ref(),
            ],
        };

        let planned = plan.len();
        let mut attempts = Vec::with_capacity(planned);
        for strategy in plan {
            match strategy.load(bytes) {
                Ok(document) => return Ok((document, strategy.name())),
                Err(error) => {
                    if attempts.len() + 1 < planned {
                        log::warn!("{} walk failed, retrying: {error}", strategy.name());
                    }
                    attempts.push(AttemptFailure {
                        strategy: strategy.name(),
                        error,
                    });
                },
            }
        }
        Err(Error::ParseFailure { format, attempts })
    }
}

/// Extract text with the default configuration.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String> {
    Extractor::new().extract_bytes(bytes, file_name)
}
