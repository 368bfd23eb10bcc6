// ========================================================================= //

/// The CFB container version, which fixes the sector size.
///
/// Spreadsheets written by Excel almost always use version 3.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Version {
    /// Version 3: 512-byte sectors, 32-bit stream sizes.
    V3,
    /// Version 4: 4096-byte sectors, 64-bit stream sizes.
    V4,
}

impl Version {
    /// Maps the major version field of the header (offset 0x1A).
    pub fn from_number(number: u16) -> Option<Version> {
        match number {
            3 => Some(Version::V3),
            4 => Some(Version::V4),
            _ => None,
        }
    }

    /// Returns the major version field value.
    pub fn number(self) -> u16 {
        match self {
            Version::V3 => 3,
            Version::V4 => 4,
        }
    }

    /// Returns the base-2 logarithm of the sector size.
    pub fn sector_shift(self) -> u32 {
        match self {
            Version::V3 => 9,
            Version::V4 => 12,
        }
    }

    /// Returns the sector size in bytes.
    ///
    /// ```
    /// use xlsread::Version;
    /// assert_eq!(Version::V3.sector_len(), 512);
    /// assert_eq!(Version::V4.sector_len(), 4096);
    /// ```
    pub fn sector_len(self) -> usize {
        1 << self.sector_shift()
    }

    /// Number of FAT sector indices in one DIFAT extension sector; its last
    /// slot links to the next extension sector instead.
    pub fn difat_entries_per_sector(self) -> usize {
        self.sector_len() / 4 - 1
    }

    /// Interprets the raw size field of a directory entry.  Version 3 files
    /// may leave garbage in the high half.
    pub fn stream_len(self, raw: u64) -> u64 {
        match self {
            Version::V3 => raw & 0xffff_ffff,
            Version::V4 => raw,
        }
    }
}

// ========================================================================= //


// ========================================================================= //
