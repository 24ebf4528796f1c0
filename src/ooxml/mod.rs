//! Office Open XML (OOXML) support for WordprocessingML packages.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): ZIP access, content types and relationships
//! 2. **WordprocessingML** (`docx`): the two walkers over `document.xml`
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::document::DocumentWalker;
//! use longan::ooxml::docx::Package;
//!
//! let bytes = std::fs::read("paper.docx")?;
//! let mut pkg = Package::from_bytes(&bytes)?;
//! let doc = pkg.document()?;
//! println!("{} blocks", doc.walk()?.blocks().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

pub use error::{OoxmlError, Result};
