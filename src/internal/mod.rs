#[macro_use]
mod macros;

mod bytes;
mod chain;
mod codepage;
pub mod consts;
mod direntry;
mod driver;
mod entry;
mod grid;
mod header;
mod name;
mod number;
mod record;
mod sector;
mod sst;
mod strings;
mod summary;
mod version;
mod workbook;

pub use self::chain::SectorChain;
pub use self::codepage::Transcoder;
pub use self::direntry::DirEntry;
pub use self::entry::{Entries, Entry, EntryKind};
pub use self::grid::{CellKind, CellSink, CellValue, ErrorCode, Grid, Row};
pub use self::header::Header;
pub use self::name::names_match;
pub use self::number::{rk_to_f64, split_words_to_f64};
pub use self::record::{Record, RecordCursor, Splice};
pub use self::sector::Sectors;
pub use self::strings::{
    read_byte_string_long, read_byte_string_short, read_unicode_run,
    read_unicode_string_long, read_unicode_string_short,
};
pub use self::version::Version;
pub use self::workbook::{BiffVersion, Sheet, SheetKind, SheetState, Workbook};

pub use self::sst::decode_shared_strings;
