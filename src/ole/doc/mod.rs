/// Word (.doc) binary document support.
///
/// A .doc file is a compound file holding several streams:
/// - **WordDocument**: the FIB, the text and the formatting pages
/// - **1Table** or **0Table**: the piece table and the bin tables
///
/// The walker reads the main story in CP order, keeps the underline flag of
/// each character run, and rebuilds tables from the in-table flags of
/// paragraph marks.
///
/// # Example
///
/// ```rust,no_run
/// use longan::document::DocumentWalker;
/// use longan::ole::doc::Package;
///
/// let bytes = std::fs::read("paper.doc")?;
/// let mut package = Package::from_bytes(&bytes)?;
/// let doc = package.document()?;
/// println!("{}", doc.text()?);
/// let model = doc.walk()?;
/// println!("{} tables", model.table_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod document;
pub mod package;
pub mod parts;
mod table;

pub use document::Document;
pub use package::{DocError, Package};
