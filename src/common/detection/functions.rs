//! Core file format detection functions.

use super::types::FileFormat;
use super::utils::{
    LEGACY_EXTENSIONS, OLE2_SIGNATURE, PACKAGE_EXTENSIONS, ZIP_SIGNATURE, extension_of,
};

/// Detect the container format from the leading bytes of a file.
///
/// # Examples
///
/// ```
/// use longan::common::detection::{FileFormat, detect_file_format_from_bytes};
///
/// assert_eq!(detect_file_format_from_bytes(b"PK\x03\x04rest"), Some(FileFormat::Docx));
/// assert_eq!(detect_file_format_from_bytes(b"%PDF-1.7"), None);
/// ```
pub fn detect_file_format_from_bytes(bytes: &[u8]) -> Option<FileFormat> {
    if bytes.starts_with(OLE2_SIGNATURE) {
        Some(FileFormat::Doc)
    } else if bytes.starts_with(ZIP_SIGNATURE) {
        Some(FileFormat::Docx)
    } else {
        None
    }
}

/// Detect the container format from a file name's extension alone.
pub fn detect_file_format_from_name(file_name: &str) -> Option<FileFormat> {
    let ext = extension_of(file_name)?;
    if LEGACY_EXTENSIONS.contains(&ext.as_str()) {
        Some(FileFormat::Doc)
    } else if PACKAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(FileFormat::Docx)
    } else {
        None
    }
}

/// Outcome of combining the file name with the file signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The walker to run.
    Supported(FileFormat),
    /// Extension names a format outside the supported Word family.
    UnsupportedExtension,
    /// Neither an OLE2 compound file nor a ZIP package.
    UnknownSignature,
}

/// Decide which walker handles a file.
///
/// An extension outside the Word family rejects the file outright. A Word
/// extension (or no extension) defers to the signature, so a `.doc` that is
/// really a ZIP package is walked as a package.
pub fn detect_format(bytes: &[u8], file_name: &str) -> Detection {
    if extension_of(file_name).is_some() && detect_file_format_from_name(file_name).is_none() {
        return Detection::UnsupportedExtension;
    }
    match detect_file_format_from_bytes(bytes) {
        Some(format) => Detection::Supported(format),
        None => Detection::UnknownSignature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0, 0];

    #[test]
    fn test_extension_table() {
        assert_eq!(detect_file_format_from_name("paper.DOC"), Some(FileFormat::Doc));
        assert_eq!(detect_file_format_from_name("dir.v2/paper.docx"), Some(FileFormat::Docx));
        assert_eq!(detect_file_format_from_name("tmpl.dotm"), Some(FileFormat::Docx));
        assert_eq!(detect_file_format_from_name("paper.pdf"), None);
        assert_eq!(detect_file_format_from_name("README"), None);
        assert_eq!(detect_file_format_from_name(".docx"), None);
    }

    #[test]
    fn test_signature_decides_within_word_family() {
        assert_eq!(
            detect_format(b"PK\x03\x04", "mislabelled.doc"),
            Detection::Supported(FileFormat::Docx)
        );
        assert_eq!(
            detect_format(OLE, "old.docx"),
            Detection::Supported(FileFormat::Doc)
        );
        assert_eq!(detect_format(OLE, "upload"), Detection::Supported(FileFormat::Doc));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            detect_format(b"PK\x03\x04", "sheet.xlsx"),
            Detection::UnsupportedExtension
        );
        assert_eq!(
            detect_format(b"plain text", "notes.doc"),
            Detection::UnknownSignature
        );
    }
}
