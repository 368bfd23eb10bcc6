//! A library for reading legacy Excel spreadsheets stored in the binary
//! BIFF format (`.xls` files, Excel 95 through 2003).
//!
//! Such a file is a [Compound File Binary](
//! https://en.wikipedia.org/wiki/Compound_File_Binary_Format) container (see
//! [MS-CFB](https://msdn.microsoft.com/en-us/library/dd942138.aspx)) holding
//! a `Workbook` stream, which in turn is a sequence of BIFF records (see
//! [MS-XLS](https://learn.microsoft.com/en-us/openspecs/office_file_formats/ms-xls/)).
//! This crate reads both layers and produces the list of sheets together
//! with a sparse grid of cell values for every worksheet.
//!
//! Only cell values are decoded: text (inline and shared strings), numbers,
//! booleans and error literals.  Formulas, formatting and styles are
//! skipped.
//!
//! # Example usage
//!
//! ```no_run
//! use xlsread::CellValue;
//!
//! let workbook = xlsread::open("path/to/book.xls").unwrap();
//! for sheet in workbook.worksheets() {
//!     println!("{} ({:?})", sheet.name(), sheet.state());
//!     for (row, col, value) in sheet.grid().cells() {
//!         if let CellValue::Number(number) = value {
//!             println!("  R{}C{} = {}", row + 1, col + 1, number);
//!         }
//!     }
//! }
//! ```
//!
//! The container can also be read on its own:
//!
//! ```no_run
//! let data = std::fs::read("path/to/book.xls").unwrap();
//! let comp = xlsread::CompoundFile::open(data).unwrap();
//! for entry in comp.entries() {
//!     println!("{:?}: {} bytes", entry.name(), entry.len());
//! }
//! ```

#![warn(missing_docs)]

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use fnv::FnvHashSet;
use thiserror::Error;

use crate::internal::consts;
use crate::internal::{DirEntry, Header, SectorChain, Sectors};
pub use crate::internal::{
    BiffVersion, CellKind, CellSink, CellValue, Entries, Entry, EntryKind,
    ErrorCode, Grid, Row, Sheet, SheetKind, SheetState, Transcoder, Version,
    Workbook,
};

#[macro_use]
mod internal;

//===========================================================================//

/// Low-level decoding of BIFF records, strings and numbers.
///
/// These are the building blocks used by [`Workbook`]; they are exposed for
/// tools that need to walk a workbook stream themselves.
pub mod biff {
    pub use crate::internal::{
        decode_shared_strings, read_byte_string_long, read_byte_string_short,
        read_unicode_run, read_unicode_string_long, read_unicode_string_short,
        rk_to_f64, split_words_to_f64, Record, RecordCursor, Splice,
    };
}

//===========================================================================//

/// A problem that prevents a workbook from being decoded at all.
#[derive(Debug, Error)]
pub enum Error {
    /// The data does not start with the compound file signature.
    #[error("not a compound file (wrong magic number)")]
    NotCompoundFile,
    /// The compound file has no non-empty `Workbook` or `Book` stream.
    #[error("compound file has no Workbook stream")]
    MissingWorkbookStream,
    /// Reading the underlying file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A problem that was worked around while decoding.
///
/// Warnings are collected on the [`CompoundFile`] and the [`Workbook`] and
/// are also logged through the `log` crate.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Warning {
    /// A fixed-size structure was cut short; missing bytes were read as
    /// zero or the structure was skipped.
    #[error("truncated structure: {what}")]
    TruncatedStructure {
        /// Description of the structure and where it was found.
        what: String,
    },
    /// The workbook globals declare a BIFF version other than BIFF7 or
    /// BIFF8.
    #[error("unsupported BIFF version 0x{0:04X}")]
    UnsupportedVersion(u16),
    /// A cell referred to a shared string that does not exist.
    #[error("shared string index {index} is out of range (table has {len})")]
    OutOfRangeReference {
        /// The index found in the cell record.
        index: usize,
        /// The number of entries in the shared string table.
        len: usize,
    },
}

//===========================================================================//

/// Opens and decodes the workbook at the given path with default options.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Workbook, Error> {
    OpenOptions::new().open(path)
}

//===========================================================================//

/// Options for opening a workbook.
#[derive(Clone, Debug)]
pub struct OpenOptions {
    pub(crate) default_codepage: u16,
}

impl OpenOptions {
    /// Creates a new `OpenOptions` with default settings.
    pub fn new() -> Self {
        OpenOptions::default()
    }

    /// Sets the codepage used for byte strings when the file does not
    /// declare one (or declares one that is not supported).  Defaults to
    /// Windows-1252.
    pub fn default_codepage(mut self, codepage: u16) -> Self {
        self.default_codepage = codepage;
        self
    }

    /// Reads and decodes the workbook at the given path.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Workbook, Error> {
        self.open_bytes(fs::read(path)?)
    }

    /// Reads the whole of `reader` and decodes it as a workbook.
    pub fn open_with<R: Read>(self, mut reader: R) -> Result<Workbook, Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.open_bytes(data)
    }

    /// Decodes a workbook held in memory.
    pub fn open_bytes(self, data: Vec<u8>) -> Result<Workbook, Error> {
        let comp = CompoundFile::open(data)?;
        Workbook::from_compound_file(&comp, self.default_codepage)
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        OpenOptions { default_codepage: consts::DEFAULT_CODEPAGE }
    }
}

//===========================================================================//

/// A compound file held in memory, with its allocation tables and directory
/// parsed.
///
/// Opening never fails on a damaged container once the signature matches:
/// unreadable fields read as zero, broken sector chains end early, and
/// problems are reported through [`warnings`](CompoundFile::warnings).
pub struct CompoundFile {
    data: Vec<u8>,
    version: Version,
    fat: SectorChain,
    minifat: SectorChain,
    directory: Vec<DirEntry>,
    mini_stream: Vec<u8>,
    warnings: Vec<Warning>,
}

impl CompoundFile {
    /// Parses the compound file in `data`.
    pub fn open(data: Vec<u8>) -> Result<CompoundFile, Error> {
        if data.len() < consts::MAGIC_NUMBER.len()
            || data[..consts::MAGIC_NUMBER.len()] != consts::MAGIC_NUMBER
        {
            return Err(Error::NotCompoundFile);
        }
        let mut warnings = Vec::new();
        if data.len() < consts::HEADER_LEN {
            truncated!(warnings, "header is only {} bytes", data.len());
        }
        let header = Header::parse(&data)?;
        let version = match header.version() {
            Some(version) => version,
            None => {
                truncated!(
                    warnings,
                    "unrecognized CFB version {} (byte order 0x{:04X}); \
                     assuming 512-byte sectors",
                    header.version_number,
                    header.byte_order_mark
                );
                Version::V3
            }
        };
        let sectors = Sectors::file_body(&data, version.sector_len());

        let fat_sectors = CompoundFile::fat_sector_ids(
            &header,
            version,
            &sectors,
            &mut warnings,
        );
        let mut fat_entries = Vec::new();
        let entries_per_sector = version.sector_len() / 4;
        for &sector_id in fat_sectors.iter() {
            // An invalid slot still occupies its place in the table.
            if sector_id > consts::MAX_REGULAR_SECTOR {
                fat_entries.extend(
                    std::iter::repeat(consts::FREE_SECTOR)
                        .take(entries_per_sector),
                );
                continue;
            }
            if !sectors.is_complete(sector_id) {
                truncated!(warnings, "FAT sector {} is incomplete", sector_id);
            }
            fat_entries.extend(sectors.u32_entries(sector_id));
        }
        let fat = SectorChain::new(fat_entries);

        let minifat = {
            let mut chain = fat.walk(header.first_minifat_sector);
            let mut entries = Vec::new();
            for sector_id in &mut chain {
                entries.extend(sectors.u32_entries(sector_id));
            }
            if chain.hit_cycle() {
                truncated!(warnings, "MiniFAT sector chain loops");
            }
            SectorChain::new(entries)
        };

        let directory = {
            let data = fat.read(&sectors, header.first_dir_sector);
            DirEntry::read_all(&data, version)
        };
        if directory.is_empty() {
            truncated!(
                warnings,
                "directory at sector {} is empty",
                header.first_dir_sector
            );
        }

        let mut comp = CompoundFile {
            data: Vec::new(),
            version,
            fat,
            minifat,
            directory,
            mini_stream: Vec::new(),
            warnings,
        };
        if let Some(root) = comp.root_entry_index() {
            let start = comp.directory[root].start_sector;
            comp.mini_stream = comp.fat.read(&sectors, start);
        }
        log::debug!(
            "opened CFB v{} with {} FAT entries, {} MiniFAT entries, {} \
             directory entries",
            version.number(),
            comp.fat.len(),
            comp.minifat.len(),
            comp.directory.len()
        );
        comp.data = data;
        Ok(comp)
    }

    /// Collects the FAT sector indices from the header and the chain of
    /// DIFAT extension sectors.
    fn fat_sector_ids(
        header: &Header,
        version: Version,
        sectors: &Sectors,
        warnings: &mut Vec<Warning>,
    ) -> Vec<u32> {
        let declared = header.num_fat_sectors as usize;
        let mut ids: Vec<u32> = header.direct_fat_sectors().to_vec();
        let per_sector = version.difat_entries_per_sector();
        let mut difat_sector = header.first_difat_sector;
        let mut seen = FnvHashSet::default();
        let mut remaining = header.num_difat_sectors;
        while ids.len() < declared
            && remaining > 0
            && difat_sector <= consts::MAX_REGULAR_SECTOR
            && seen.insert(difat_sector)
        {
            let entries = sectors.u32_entries(difat_sector);
            for &sector_id in entries[..per_sector].iter() {
                if ids.len() >= declared {
                    break;
                }
                ids.push(sector_id);
            }
            difat_sector = entries[per_sector];
            remaining -= 1;
        }
        if ids.len() < declared {
            truncated!(
                warnings,
                "found {} of {} declared FAT sectors",
                ids.len(),
                declared
            );
        }
        while ids.last().map_or(false, |&id| id > consts::MAX_REGULAR_SECTOR) {
            ids.pop();
        }
        ids
    }

    /// Returns the CFB format version used for this compound file.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the problems found while parsing the container.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns an iterator over the allocated directory entries, in
    /// directory order.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(&self.directory)
    }

    /// Returns the directory entry at `index`, if it exists.
    pub fn entry(&self, index: usize) -> Option<Entry> {
        self.directory.get(index).map(|dir_entry| Entry::new(index, dir_entry))
    }

    /// Returns the index of the first allocated entry whose name matches
    /// `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.directory.iter().position(|dir_entry| {
            !dir_entry.is_unallocated()
                && internal::names_match(&dir_entry.name, name)
        })
    }

    /// Returns the indices of the entries held directly by the storage at
    /// `index`, in directory tree order.  Streams have no children.
    pub fn children(&self, index: usize) -> Vec<usize> {
        let mut children = Vec::new();
        let mut current = match self.directory.get(index) {
            Some(dir_entry) => dir_entry.child,
            None => return children,
        };
        let mut seen = FnvHashSet::default();
        let mut stack = Vec::new();
        loop {
            while current != consts::NO_STREAM && seen.insert(current) {
                match self.directory.get(current as usize) {
                    Some(dir_entry) => {
                        stack.push(current as usize);
                        current = dir_entry.left_sibling;
                    }
                    None => break,
                }
            }
            let node = match stack.pop() {
                Some(node) => node,
                None => break,
            };
            children.push(node);
            current = self.directory[node].right_sibling;
        }
        children
    }

    fn find_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.find(name))
    }

    /// Returns the index of the `Workbook` stream, or of the `Book` stream
    /// used by older writers.
    pub fn workbook_stream_index(&self) -> Option<usize> {
        self.find_any(&consts::WORKBOOK_STREAM_NAMES)
    }

    /// Returns the index of the root entry, which holds the mini stream.
    pub fn root_entry_index(&self) -> Option<usize> {
        self.find_any(&consts::ROOT_ENTRY_NAMES).or_else(|| {
            self.directory.iter().position(|dir_entry| {
                dir_entry.obj_type == consts::OBJ_TYPE_ROOT
            })
        })
    }

    /// Returns the index of the `\u{5}SummaryInformation` stream.
    pub fn summary_information_index(&self) -> Option<usize> {
        self.find(consts::SUMMARY_INFORMATION_NAME)
    }

    /// Returns the index of the `\u{5}DocumentSummaryInformation` stream.
    pub fn document_summary_information_index(&self) -> Option<usize> {
        self.find(consts::DOCUMENT_SUMMARY_INFORMATION_NAME)
    }

    /// Reads the data of the entry at `index`.
    ///
    /// Entries smaller than 4096 bytes are read from the mini stream, others
    /// from regular sectors.  The result is cut to the entry's declared
    /// size, and is shorter (possibly empty) when the sector chain is broken
    /// or runs past the end of the file.  An index with no entry yields an
    /// empty vector.
    pub fn read_stream(&self, index: usize) -> Vec<u8> {
        let dir_entry = match self.directory.get(index) {
            Some(dir_entry) => dir_entry,
            None => return Vec::new(),
        };
        let entry = Entry::new(index, dir_entry);
        let mut data = if entry.in_mini_stream() {
            let sectors = Sectors::mini_stream(
                &self.mini_stream,
                consts::MINI_SECTOR_LEN,
            );
            self.minifat.read(&sectors, entry.start_sector())
        } else {
            let sectors =
                Sectors::file_body(&self.data, self.version.sector_len());
            self.fat.read(&sectors, entry.start_sector())
        };
        if entry.len() < data.len() as u64 {
            data.truncate(entry.len() as usize);
        }
        data
    }

    /// Reads the data of the first entry named `name`, ignoring case.
    pub fn read_named_stream(&self, name: &str) -> Option<Vec<u8>> {
        self.find(name).map(|index| self.read_stream(index))
    }
}

//===========================================================================//


//===========================================================================//
