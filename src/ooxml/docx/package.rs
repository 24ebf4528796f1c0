use crate::ooxml::docx::document::Document;
/// Package implementation for Word documents.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::{PackURI, PackageReader, PhysPkgReader};

/// A Word (.docx) package.
///
/// Resolves the main document part the way a conforming consumer does:
/// package relationships first, then the content type of the target.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::document::DocumentWalker;
/// use longan::ooxml::docx::Package;
///
/// let data = std::fs::read("paper.docx")?;
/// let mut pkg = Package::from_bytes(&data)?;
/// let doc = pkg.document()?.walk()?;
/// println!("{} blocks", doc.blocks().len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package<'data> {
    reader: PackageReader<'data>,
    main_part: PackURI,
}

impl<'data> Package<'data> {
    /// Open a .docx package held in memory.
    ///
    /// Fails when the archive lacks `[Content_Types].xml` or the package
    /// relationships, when no office-document relationship exists, or when
    /// its target is not a WordprocessingML main part.
    pub fn from_bytes(data: &'data [u8]) -> Result<Self> {
        let reader = PackageReader::new(PhysPkgReader::new(data)?)?;
        let main_part = reader
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;

        let content_type = reader.content_type(&main_part)?;
        if !ct::WML_MAIN_PARTS.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        log::debug!("main document part {} ({})", main_part, content_type);
        Ok(Self { reader, main_part })
    }

    /// Name of the main document part, usually `/word/document.xml`.
    #[inline]
    pub fn main_part_name(&self) -> &PackURI {
        &self.main_part
    }

    /// Load the main document part.
    pub fn document(&mut self) -> Result<Document> {
        let xml = self.reader.blob_for(&self.main_part)?;
        Ok(Document::new(xml))
    }
}
