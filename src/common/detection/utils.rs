//! Signature constants and extension tables for format detection.

/// OLE2 compound file magic.
pub const OLE2_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// Local file header of a ZIP archive.
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Extensions of legacy binary Word files (documents and templates).
pub const LEGACY_EXTENSIONS: &[&str] = &["doc", "dot"];
/// Extensions of Word XML packages (documents, macro-enabled files, templates).
pub const PACKAGE_EXTENSIONS: &[&str] = &["docx", "docm", "dotx", "dotm"];

/// Lower-cased extension of `file_name`, if it has one.
pub fn extension_of(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
