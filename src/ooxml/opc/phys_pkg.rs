//! Physical access to an OPC package stored as a ZIP archive.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

/// Reads part blobs out of an in-memory ZIP archive.
pub struct PhysPkgReader<'data> {
    archive: ZipArchive<Cursor<&'data [u8]>>,
}

impl<'data> PhysPkgReader<'data> {
    /// Open the archive; fails when `data` is not a readable ZIP file.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Whether the archive has a member for `uri`.
    #[inline]
    pub fn contains(&self, uri: &PackURI) -> bool {
        self.archive.index_for_name(uri.membername()).is_some()
    }

    /// Number of archive members.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Decompressed contents of the part at `uri`.
    pub fn blob_for(&mut self, uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(uri.membername()) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(OpcError::PartNotFound(uri.to_string())),
            Err(e) => return Err(e.into()),
        };
        let mut blob = Vec::with_capacity(file.size().min(64 << 20) as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Relationships part of `source`, or `None` when it has none.
    pub fn rels_xml_for(&mut self, source: &PackURI) -> Result<Option<Vec<u8>>> {
        match self.blob_for(&source.rels_uri()?) {
            Ok(xml) => Ok(Some(xml)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
