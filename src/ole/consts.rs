//! Compound file binary format constants.

/// Magic bytes that identify a compound file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Smallest possible compound file: header, one FAT sector, one directory sector
pub const MINIMAL_OLEFILE_SIZE: usize = 1536;

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Size of the header block in bytes
pub const HEADER_SIZE: usize = 512;

/// Number of FAT sector locations stored in the header
pub const HEADER_DIFAT_ENTRIES: usize = 109;

// Special sector IDs
/// Highest regular sector ID
pub const MAXREGSECT: u32 = 0xFFFFFFFA;
/// Sector holds part of the DIFAT
pub const DIFSECT: u32 = 0xFFFFFFFC;
/// Sector holds part of the FAT
pub const FATSECT: u32 = 0xFFFFFFFD;
/// End of a sector chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE;
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF;

/// No sibling or child in the directory tree
pub const NOSTREAM: u32 = 0xFFFFFFFF;

// Directory entry types
pub const STGTY_STREAM: u8 = 2;
pub const STGTY_ROOT: u8 = 5;
