/// Content types, relationships and main-part resolution.
///
/// Reads `[Content_Types].xml` and the package relationships, then follows
/// the office-document relationship to the main part.
use super::constants::{part_name, relationship_type, target_mode};
use super::error::{OpcError, Result};
use super::packuri::PackURI;
use super::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::collections::HashMap;

/// A relationship as read from a .rels part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedRelationship {
    /// Directory of the source part
    pub base_uri: String,
    pub r_id: String,
    pub reltype: String,
    pub target_ref: String,
    pub target_mode: String,
}

impl SerializedRelationship {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }

    /// Absolute part name of the target.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external() {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets an external resource",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref)
    }
}

/// Extension defaults and part overrides from `[Content_Types].xml`.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeMap {
    /// Lowercased extension to content type
    defaults: HashMap<String, String>,
    /// Lowercased part name to content type
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"Default" => {
                        if let (Some(ext), Some(ct)) =
                            (attr(e, b"Extension")?, attr(e, b"ContentType")?)
                        {
                            map.defaults.insert(ext.to_lowercase(), ct);
                        }
                    },
                    b"Override" => {
                        if let (Some(name), Some(ct)) =
                            (attr(e, b"PartName")?, attr(e, b"ContentType")?)
                        {
                            map.overrides.insert(name.to_lowercase(), ct);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!("Content types parse error: {e}")));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Content type of a part: override first, then extension default.
    pub fn get(&self, uri: &PackURI) -> Result<&str> {
        self.overrides
            .get(&uri.as_str().to_lowercase())
            .or_else(|| self.defaults.get(&uri.ext().to_lowercase()))
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(uri.to_string()))
    }
}

/// Unescaped value of the attribute with local name `key`.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| OpcError::XmlError(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a .rels part.
pub fn parse_rels_xml(
    rels_xml: &[u8],
    base_uri: &str,
) -> Result<SmallVec<[SerializedRelationship; 8]>> {
    let mut srels = SmallVec::new();
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr(e, b"Id")?;
                let reltype = attr(e, b"Type")?;
                let target = attr(e, b"Target")?;
                if let (Some(r_id), Some(reltype), Some(target_ref)) = (id, reltype, target) {
                    srels.push(SerializedRelationship {
                        base_uri: base_uri.to_string(),
                        r_id,
                        reltype,
                        target_ref,
                        target_mode: attr(e, b"TargetMode")?
                            .unwrap_or_else(|| target_mode::INTERNAL.to_string()),
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }

    Ok(srels)
}

/// Package-level view: content types plus package relationships.
pub struct PackageReader<'data> {
    phys: PhysPkgReader<'data>,
    content_types: ContentTypeMap,
    pkg_rels: SmallVec<[SerializedRelationship; 8]>,
}

impl<'data> PackageReader<'data> {
    /// Read `[Content_Types].xml` and `/_rels/.rels`; both must exist.
    pub fn new(mut phys: PhysPkgReader<'data>) -> Result<Self> {
        let content_types = ContentTypeMap::from_xml(
            &phys.blob_for(&PackURI::new(part_name::CONTENT_TYPES)?)?,
        )?;
        let pkg_rels = match phys.rels_xml_for(&PackURI::new("/")?)? {
            Some(xml) => parse_rels_xml(&xml, "/")?,
            None => return Err(OpcError::PartNotFound(part_name::PACKAGE_RELS.to_string())),
        };
        Ok(Self {
            phys,
            content_types,
            pkg_rels,
        })
    }

    #[inline]
    pub fn pkg_rels(&self) -> &[SerializedRelationship] {
        &self.pkg_rels
    }

    /// Content type of the part at `uri`.
    #[inline]
    pub fn content_type(&self, uri: &PackURI) -> Result<&str> {
        self.content_types.get(uri)
    }

    /// Part name of the target of the office-document relationship.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.pkg_rels
            .iter()
            .find(|rel| {
                rel.reltype == relationship_type::OFFICE_DOCUMENT
                    || rel.reltype == relationship_type::OFFICE_DOCUMENT_STRICT
            })
            .ok_or_else(|| OpcError::RelationshipNotFound("officeDocument".to_string()))?
            .target_partname()
    }

    /// Decompressed contents of a part.
    #[inline]
    pub fn blob_for(&mut self, uri: &PackURI) -> Result<Vec<u8>> {
        self.phys.blob_for(uri)
    }
}
