// ========================================================================= //
// Compound file container

pub const HEADER_LEN: usize = 512; // length of CFB file header, in bytes
pub const DIR_ENTRY_LEN: usize = 128; // length of directory entry, in bytes
pub const NUM_DIFAT_ENTRIES_IN_HEADER: usize = 109;

pub const MAGIC_NUMBER: [u8; 8] =
    [0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];
pub const BYTE_ORDER_MARK: u16 = 0xfffe;
pub const MINI_SECTOR_LEN: usize = 64;
pub const MINI_STREAM_CUTOFF: u64 = 4096;

// Constants for FAT entries:
pub const MAX_REGULAR_SECTOR: u32 = 0xfffffffa;
pub const END_OF_CHAIN: u32 = 0xfffffffe;
pub const FREE_SECTOR: u32 = 0xffffffff;

// Constants for directory entries:
pub const OBJ_TYPE_UNALLOCATED: u8 = 0;
pub const OBJ_TYPE_STORAGE: u8 = 1;
pub const OBJ_TYPE_STREAM: u8 = 2;
pub const OBJ_TYPE_ROOT: u8 = 5;
pub const NO_STREAM: u32 = 0xffffffff;

// Well-known stream names:
pub const WORKBOOK_STREAM_NAMES: [&str; 2] = ["Workbook", "Book"];
pub const ROOT_ENTRY_NAMES: [&str; 2] = ["Root Entry", "R"];
pub const SUMMARY_INFORMATION_NAME: &str = "\u{5}SummaryInformation";
pub const DOCUMENT_SUMMARY_INFORMATION_NAME: &str =
    "\u{5}DocumentSummaryInformation";

// ========================================================================= //
// BIFF record stream

pub const RECORD_HEADER_LEN: usize = 4;

pub const RECORD_BOF: u16 = 0x0809;
pub const RECORD_EOF: u16 = 0x000a;
pub const RECORD_CONTINUE: u16 = 0x003c;
pub const RECORD_SHEET: u16 = 0x0085;
pub const RECORD_SST: u16 = 0x00fc;
pub const RECORD_LABELSST: u16 = 0x00fd;
pub const RECORD_RK: u16 = 0x027e;
pub const RECORD_NUMBER: u16 = 0x0203;
pub const RECORD_LABEL: u16 = 0x0204;
pub const RECORD_BOOLERR: u16 = 0x0205;

pub const BIFF8_VERSION: u16 = 0x0600;
pub const BIFF7_VERSION: u16 = 0x0500;

pub const SUBSTREAM_WORKBOOK_GLOBALS: u16 = 0x0005;
pub const SUBSTREAM_WORKSHEET: u16 = 0x0010;

pub const SHEET_STATE_HIDDEN: u8 = 1;
pub const SHEET_STATE_VERY_HIDDEN: u8 = 2;

pub const SHEET_TYPE_WORKSHEET: u8 = 0;
pub const SHEET_TYPE_MACRO_SHEET: u8 = 1;
pub const SHEET_TYPE_CHART: u8 = 2;
pub const SHEET_TYPE_VB_MODULE: u8 = 6;

// String option flags:
pub const STRING_FLAG_UNCOMPRESSED: u8 = 0x01;
pub const STRING_FLAG_ASIAN_PHONETIC: u8 = 0x04;
pub const STRING_FLAG_RICH_TEXT: u8 = 0x08;

// ========================================================================= //
// Property sets

pub const PROPERTY_CODEPAGE: u32 = 1;
pub const PROPERTY_TYPE_I2: u32 = 2;

pub const DEFAULT_CODEPAGE: u16 = 1252;

// ========================================================================= //
