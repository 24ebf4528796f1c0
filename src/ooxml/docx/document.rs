/// The main document part, walked through a strict element tree.
use super::body::walk_body;
use super::xml;
use crate::document::{self as model, DocumentWalker};
use crate::ooxml::error::{OoxmlError, Result};

/// A WordprocessingML main part reached through the package relationships.
#[derive(Debug, Clone)]
pub struct Document {
    xml: Vec<u8>,
}

impl Document {
    pub(crate) fn new(xml: Vec<u8>) -> Self {
        Self { xml }
    }
}

impl DocumentWalker for Document {
    type Error = OoxmlError;

    fn walk(&self) -> Result<model::Document> {
        let root = xml::parse(&self.xml)?;
        if root.name != "document" {
            return Err(OoxmlError::InvalidFormat(format!(
                "main part root is <{}>, expected <document>",
                root.name
            )));
        }
        let body = root
            .child("body")
            .ok_or_else(|| OoxmlError::InvalidFormat("document has no body".to_string()))?;
        let blocks = walk_body(body);
        log::debug!("docx: {} body blocks", blocks.len());
        Ok(model::Document::from_blocks(blocks))
    }
}
