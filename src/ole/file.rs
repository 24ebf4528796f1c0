//! Compound file (OLE2 structured storage) reader.
//!
//! A compound file is a FAT-style filesystem packed into one file: a 512-byte
//! header, a sector allocation table, a directory of named streams arranged as
//! red-black trees, and a mini stream for small streams. Word documents keep
//! their text in the `WordDocument` stream and their formatting tables in
//! `0Table` or `1Table`.

use super::consts::*;
use std::collections::HashSet;
use std::io::{self, Read, Seek, SeekFrom};
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// On-disk header block (512 bytes).
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawHeader {
    signature: [u8; 8],
    clsid: [u8; 16],
    minor_version: U16<LE>,
    major_version: U16<LE>,
    byte_order: U16<LE>,
    sector_shift: U16<LE>,
    mini_sector_shift: U16<LE>,
    reserved: [u8; 6],
    num_dir_sectors: U32<LE>,
    num_fat_sectors: U32<LE>,
    first_dir_sector: U32<LE>,
    transaction_signature: U32<LE>,
    mini_stream_cutoff: U32<LE>,
    first_minifat_sector: U32<LE>,
    num_minifat_sectors: U32<LE>,
    first_difat_sector: U32<LE>,
    num_difat_sectors: U32<LE>,
    /// First FAT sector locations
    difat: [U32<LE>; HEADER_DIFAT_ENTRIES],
}

/// On-disk directory entry (128 bytes).
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE, null-padded
    name: [u8; 64],
    /// Length of name in bytes including the terminator
    name_len: U16<LE>,
    entry_type: u8,
    node_color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    start_sector: U32<LE>,
    stream_size: U64<LE>,
}

/// Errors raised while reading a compound file.
#[derive(Debug, thiserror::Error)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Not an OLE file")]
    NotOleFile,
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}

/// A stream or storage in the directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Index in the directory
    pub sid: u32,
    pub name: String,
    pub entry_type: u8,
    pub sid_left: u32,
    pub sid_right: u32,
    pub sid_child: u32,
    pub start_sector: u32,
    /// Stream length in bytes
    pub size: u64,
    /// Whether the stream lives in the mini stream
    pub is_minifat: bool,
}

impl DirectoryEntry {
    #[inline]
    pub fn is_stream(&self) -> bool {
        self.entry_type == STGTY_STREAM
    }
}

/// A parsed compound file.
///
/// # Examples
///
/// ```rust,no_run
/// use std::io::Cursor;
/// use longan::ole::OleFile;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("paper.doc")?;
/// let mut ole = OleFile::open(Cursor::new(bytes))?;
/// let word = ole.open_stream(&["WordDocument"])?;
/// println!("{} bytes of text stream", word.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    reader: R,
    sector_size: usize,
    mini_sector_size: usize,
    mini_stream_cutoff: u32,
    /// Maps each sector to the next sector of its chain
    fat: Vec<u32>,
    minifat: Vec<u32>,
    root: Option<DirectoryEntry>,
    /// Entries reachable from the root, indexed by SID
    dir_entries: Vec<Option<DirectoryEntry>>,
    /// Mini stream contents, loaded on first use
    ministream: Option<Vec<u8>>,
}

impl<R: Read + Seek> OleFile<R> {
    /// Parse the header, allocation tables and directory.
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        let mut block = [0u8; HEADER_SIZE];
        reader.read_exact(&mut block)?;
        let header = RawHeader::read_from_bytes(&block[..])
            .map_err(|_| OleError::InvalidFormat("short header".to_string()))?;

        if &header.signature != MAGIC {
            return Err(OleError::NotOleFile);
        }
        if header.byte_order.get() != 0xFFFE {
            return Err(OleError::InvalidFormat("Invalid byte order".to_string()));
        }

        let sector_shift = header.sector_shift.get();
        let mini_sector_shift = header.mini_sector_shift.get();
        if !(7..=16).contains(&sector_shift) || mini_sector_shift >= sector_shift {
            return Err(OleError::InvalidFormat(format!(
                "Unsupported sector shift {sector_shift}/{mini_sector_shift}"
            )));
        }
        let sector_size = 1usize << sector_shift;
        let major = header.major_version.get();
        if (major == 3 && sector_size != 512) || (major == 4 && sector_size != 4096) {
            return Err(OleError::InvalidFormat("Sector size mismatch".to_string()));
        }

        let mut ole = OleFile {
            reader,
            sector_size,
            mini_sector_size: 1usize << mini_sector_shift,
            mini_stream_cutoff: header.mini_stream_cutoff.get(),
            fat: Vec::new(),
            minifat: Vec::new(),
            root: None,
            dir_entries: Vec::new(),
            ministream: None,
        };

        ole.load_fat(&header, file_size)?;
        ole.load_directory(header.first_dir_sector.get())?;
        if header.num_minifat_sectors.get() > 0 {
            ole.load_minifat(header.first_minifat_sector.get())?;
        }

        Ok(ole)
    }

    /// Collect FAT sector locations from the header and the DIFAT chain,
    /// then read every FAT sector.
    ///
    /// No file holds more FAT sectors than it has sectors, which bounds both
    /// the DIFAT walk and the table size.
    fn load_fat(&mut self, header: &RawHeader, file_size: u64) -> Result<(), OleError> {
        let max_sectors =
            usize::try_from(file_size / self.sector_size as u64).unwrap_or(usize::MAX);
        let mut fat_sectors: Vec<u32> = header
            .difat
            .iter()
            .map(|v| v.get())
            .take_while(|&s| s != FREESECT && s != ENDOFCHAIN)
            .collect();

        let per_difat = self.sector_size / 4 - 1;
        let mut visited = HashSet::new();
        let mut difat_sector = header.first_difat_sector.get();
        for _ in 0..header.num_difat_sectors.get() {
            if difat_sector > MAXREGSECT {
                break;
            }
            if !visited.insert(difat_sector) || visited.len() > max_sectors {
                return Err(OleError::CorruptedFile("cyclic DIFAT chain".to_string()));
            }
            let data = self.read_sector(difat_sector)?;
            let entries = sector_u32s(&data);
            fat_sectors.extend(
                entries[..per_difat]
                    .iter()
                    .copied()
                    .take_while(|&s| s != FREESECT && s != ENDOFCHAIN),
            );
            if fat_sectors.len() > max_sectors {
                return Err(OleError::CorruptedFile(format!(
                    "{} FAT sectors in a {file_size}-byte file",
                    fat_sectors.len()
                )));
            }
            difat_sector = entries[per_difat];
        }

        self.fat.reserve(fat_sectors.len() * self.sector_size / 4);
        for sector in fat_sectors {
            let data = self.read_sector(sector)?;
            self.fat.extend(sector_u32s(&data));
        }
        Ok(())
    }

    fn load_minifat(&mut self, first_sector: u32) -> Result<(), OleError> {
        let data = self.read_chain(first_sector)?;
        self.minifat = sector_u32s(&data);
        Ok(())
    }

    /// Read the directory and index every entry reachable from the root.
    fn load_directory(&mut self, first_sector: u32) -> Result<(), OleError> {
        let dir_data = self.read_chain(first_sector)?;
        let count = dir_data.len() / DIRENTRY_SIZE;
        if count == 0 {
            return Err(OleError::CorruptedFile("empty directory".to_string()));
        }
        self.dir_entries = vec![None; count];

        let root = self.parse_entry(&dir_data, 0)?;
        if root.entry_type != STGTY_ROOT {
            return Err(OleError::CorruptedFile("missing root entry".to_string()));
        }
        let child = root.sid_child;
        self.dir_entries[0] = Some(root.clone());
        self.root = Some(root);

        // Walk the tree iteratively; a corrupt file may contain cycles.
        let mut pending = vec![child];
        while let Some(sid) = pending.pop() {
            if sid == NOSTREAM {
                continue;
            }
            let index = sid as usize;
            if index >= count {
                return Err(OleError::CorruptedFile(format!(
                    "directory entry {sid} out of range"
                )));
            }
            if self.dir_entries[index].is_some() {
                continue;
            }
            let entry = self.parse_entry(&dir_data, sid)?;
            pending.extend([entry.sid_left, entry.sid_right, entry.sid_child]);
            self.dir_entries[index] = Some(entry);
        }
        Ok(())
    }

    fn parse_entry(&self, dir_data: &[u8], sid: u32) -> Result<DirectoryEntry, OleError> {
        let offset = sid as usize * DIRENTRY_SIZE;
        let raw = dir_data
            .get(offset..offset + DIRENTRY_SIZE)
            .and_then(|bytes| RawDirectoryEntry::read_from_bytes(bytes).ok())
            .ok_or_else(|| OleError::CorruptedFile(format!("bad directory entry {sid}")))?;

        let name_len = (raw.name_len.get() as usize).saturating_sub(2).min(64);
        let name = crate::common::binary::decode_utf16le(&raw.name[..name_len]);

        // Version 3 files only use the low 32 bits of the size.
        let size = if self.sector_size == 512 {
            raw.stream_size.get() & 0xFFFF_FFFF
        } else {
            raw.stream_size.get()
        };

        Ok(DirectoryEntry {
            sid,
            name,
            entry_type: raw.entry_type,
            sid_left: raw.sid_left.get(),
            sid_right: raw.sid_right.get(),
            sid_child: raw.sid_child.get(),
            start_sector: raw.start_sector.get(),
            size,
            is_minifat: raw.entry_type == STGTY_STREAM
                && size < u64::from(self.mini_stream_cutoff),
        })
    }

    fn read_sector(&mut self, sector: u32) -> Result<Vec<u8>, OleError> {
        let position = (u64::from(sector) + 1) * self.sector_size as u64;
        self.reader.seek(SeekFrom::Start(position))?;
        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Concatenate the sectors of a FAT chain.
    fn read_chain(&mut self, start: u32) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start;
        let mut remaining = self.fat.len();
        while sector != ENDOFCHAIN {
            let next = *self.fat.get(sector as usize).ok_or_else(|| {
                OleError::CorruptedFile(format!("sector {sector} outside the FAT"))
            })?;
            if remaining == 0 {
                return Err(OleError::CorruptedFile("cyclic FAT chain".to_string()));
            }
            remaining -= 1;
            data.extend_from_slice(&self.read_sector(sector)?);
            sector = next;
        }
        Ok(data)
    }

    /// Concatenate the mini sectors of a MiniFAT chain.
    fn read_mini_chain(&mut self, start: u32, size: u64) -> Result<Vec<u8>, OleError> {
        if self.ministream.is_none() {
            let root_start = self
                .root
                .as_ref()
                .map(|r| r.start_sector)
                .ok_or_else(|| OleError::CorruptedFile("No root entry".to_string()))?;
            self.ministream = Some(self.read_chain(root_start)?);
        }
        let ministream = self.ministream.as_deref().unwrap_or_default();

        let mut data = Vec::with_capacity(size as usize);
        let mut sector = start;
        let mut remaining = self.minifat.len();
        while sector != ENDOFCHAIN && (data.len() as u64) < size {
            let next = *self.minifat.get(sector as usize).ok_or_else(|| {
                OleError::CorruptedFile(format!("mini sector {sector} outside the MiniFAT"))
            })?;
            if remaining == 0 {
                return Err(OleError::CorruptedFile("cyclic MiniFAT chain".to_string()));
            }
            remaining -= 1;
            let position = sector as usize * self.mini_sector_size;
            let chunk = ministream
                .get(position..position + self.mini_sector_size)
                .ok_or_else(|| OleError::CorruptedFile("Mini sector out of bounds".to_string()))?;
            data.extend_from_slice(chunk);
            sector = next;
        }
        data.truncate(size as usize);
        Ok(data)
    }

    /// Read a whole stream by path, for example `&["WordDocument"]`.
    ///
    /// Names are matched case-insensitively.
    pub fn open_stream(&mut self, path: &[&str]) -> Result<Vec<u8>, OleError> {
        let entry = self.find_entry(path)?;
        if !entry.is_stream() {
            return Err(OleError::InvalidFormat(format!(
                "{} is not a stream",
                path.join("/")
            )));
        }
        if entry.is_minifat {
            self.read_mini_chain(entry.start_sector, entry.size)
        } else {
            let mut data = self.read_chain(entry.start_sector)?;
            data.truncate(entry.size as usize);
            Ok(data)
        }
    }

    /// Whether an entry exists at `path`.
    #[inline]
    pub fn exists(&self, path: &[&str]) -> bool {
        self.find_entry(path).is_ok()
    }

    /// Names of the streams directly under the root, in tree order.
    pub fn root_streams(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(root) = &self.root {
            self.collect_children(root.sid_child, &mut |entry| {
                if entry.is_stream() {
                    names.push(entry.name.clone());
                }
            });
        }
        names
    }

    fn collect_children(&self, sid: u32, visit: &mut dyn FnMut(&DirectoryEntry)) {
        let mut stack = vec![sid];
        let mut seen = vec![false; self.dir_entries.len()];
        while let Some(sid) = stack.pop() {
            let Some(Some(entry)) = self.dir_entries.get(sid as usize) else {
                continue;
            };
            if std::mem::replace(&mut seen[sid as usize], true) {
                continue;
            }
            visit(entry);
            stack.extend([entry.sid_right, entry.sid_left]);
        }
    }

    fn find_entry(&self, path: &[&str]) -> Result<DirectoryEntry, OleError> {
        let not_found = || OleError::StreamNotFound(path.join("/"));
        let mut current = self.root.clone().ok_or_else(not_found)?;
        for name in path {
            let mut found = None;
            self.collect_children(current.sid_child, &mut |entry| {
                if found.is_none() && entry.name.eq_ignore_ascii_case(name) {
                    found = Some(entry.clone());
                }
            });
            current = found.ok_or_else(not_found)?;
        }
        Ok(current)
    }
}

/// Split a sector into little-endian u32 values.
fn sector_u32s(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(4)
        .filter_map(|c| U32::<LE>::read_from_bytes(c).ok())
        .map(|v| v.get())
        .collect()
}

/// Whether `data` starts with the compound file signature.
#[inline]
pub fn is_ole_file(data: &[u8]) -> bool {
    data.len() >= MINIMAL_OLEFILE_SIZE && data.starts_with(MAGIC)
}
