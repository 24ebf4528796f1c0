/// Open Packaging Conventions (OPC) support.
///
/// Just enough of the packaging layer to locate the main part of a
/// WordprocessingML package:
///
/// - ZIP-based physical packaging
/// - Content type lookup
/// - Package relationships
pub mod constants;
pub mod error;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgreader;

pub use error::OpcError;
pub use packuri::PackURI;
pub use phys_pkg::PhysPkgReader;
pub use pkgreader::{ContentTypeMap, PackageReader, SerializedRelationship};
