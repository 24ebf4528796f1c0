/// Part names within an OPC package.
use super::error::{OpcError, Result};

/// A part name: an absolute, slash-separated path inside the package.
///
/// # Examples
///
/// ```
/// use longan::ooxml::opc::PackURI;
///
/// let uri = PackURI::from_rel_ref("/word", "../customXml/item1.xml").unwrap();
/// assert_eq!(uri.as_str(), "/customXml/item1.xml");
/// assert_eq!(uri.membername(), "customXml/item1.xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a PackURI; it must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPackUri(format!(
                "PackURI must begin with slash, got '{uri}'"
            )));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relationship target against the source part's directory.
    ///
    /// Absolute targets (starting with `/`) ignore the base.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{base_uri}{relative_ref}")
        } else {
            format!("{base_uri}/{relative_ref}")
        };
        Self::new(normalize_path(&joined))
    }

    /// Directory portion, for example "/word" for "/word/document.xml".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Filename portion.
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map_or("", |pos| &self.uri[pos + 1..])
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        filename.rfind('.').map_or("", |pos| &filename[pos + 1..])
    }

    /// The ZIP member name (leading slash stripped).
    #[inline]
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Relationships part of this part, for example
    /// "/word/_rels/document.xml.rels".
    pub fn rels_uri(&self) -> Result<PackURI> {
        let base = self.base_uri();
        let filename = self.filename();
        if base == "/" {
            Self::new(format!("/_rels/{filename}.rels"))
        } else {
            Self::new(format!("{base}/_rels/{filename}.rels"))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

/// Resolve "." and ".." segments.
fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            _ => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}
