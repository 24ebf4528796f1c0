/// Word (.docx) document support.
///
/// Two ways into the same main part:
/// - [`Package`] follows `[Content_Types].xml` and the package relationships
///   to the main part and walks it as a strict element tree.
/// - [`RawDocument`] reads `word/document.xml` straight from the archive and
///   streams it leniently, keeping what it read when the XML breaks off.
///
/// Both lower the body into the shared [`crate::document::Document`] model.
///
/// # Example
///
/// ```rust,no_run
/// use longan::document::DocumentWalker;
/// use longan::ooxml::docx::{Package, RawDocument};
///
/// let data = std::fs::read("paper.docx")?;
/// let doc = match Package::from_bytes(&data).and_then(|mut p| p.document()?.walk()) {
///     Ok(doc) => doc,
///     Err(_) => RawDocument::from_bytes(&data)?.walk()?,
/// };
/// println!("{} tables", doc.table_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
mod body;
pub mod document;
pub mod package;
pub mod raw;
pub(crate) mod wml;
pub mod xml;

pub use document::Document;
pub use package::Package;
pub use raw::RawDocument;
