use std::fmt;

use crate::internal::{consts, driver, summary, Grid, Transcoder};
use crate::{CompoundFile, Error, Warning};

//===========================================================================//

/// The BIFF version declared by the workbook globals BOF record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BiffVersion {
    /// BIFF8, written by Excel 97 and later.
    Biff8,
    /// BIFF7, written by Excel 95.
    Biff7,
    /// Any other version number.  Decoding still proceeds, treating text
    /// as byte strings.
    Unknown(u16),
}

impl BiffVersion {
    /// Returns the version for the version field of a BOF record.
    pub fn from_number(number: u16) -> BiffVersion {
        match number {
            consts::BIFF8_VERSION => BiffVersion::Biff8,
            consts::BIFF7_VERSION => BiffVersion::Biff7,
            other => BiffVersion::Unknown(other),
        }
    }

    /// Returns the version field value.
    pub fn number(self) -> u16 {
        match self {
            BiffVersion::Biff8 => consts::BIFF8_VERSION,
            BiffVersion::Biff7 => consts::BIFF7_VERSION,
            BiffVersion::Unknown(number) => number,
        }
    }

    /// Returns true if text is stored as Unicode strings.
    pub fn is_biff8(self) -> bool {
        self == BiffVersion::Biff8
    }
}

impl fmt::Display for BiffVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BiffVersion::Biff8 => f.write_str("BIFF8"),
            BiffVersion::Biff7 => f.write_str("BIFF7"),
            BiffVersion::Unknown(number) => {
                write!(f, "unknown BIFF version 0x{:04X}", number)
            }
        }
    }
}

//===========================================================================//

/// Visibility of a sheet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SheetState {
    /// Shown normally.
    Visible,
    /// Hidden, but can be unhidden by the user.
    Hidden,
    /// Hidden, and can only be unhidden programmatically.
    VeryHidden,
}

impl SheetState {
    pub(crate) fn from_byte(byte: u8) -> SheetState {
        match byte {
            consts::SHEET_STATE_HIDDEN => SheetState::Hidden,
            consts::SHEET_STATE_VERY_HIDDEN => SheetState::VeryHidden,
            _ => SheetState::Visible,
        }
    }
}

/// What a sheet contains.  Only worksheets have their cells decoded.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SheetKind {
    /// A worksheet or dialog sheet.
    Worksheet,
    /// An Excel 4.0 macro sheet.
    MacroSheet,
    /// A chart sheet.
    Chart,
    /// A Visual Basic module.
    MacroModule,
    /// Any other sheet type byte.
    Other(u8),
}

impl SheetKind {
    pub(crate) fn from_byte(byte: u8) -> SheetKind {
        match byte {
            consts::SHEET_TYPE_WORKSHEET => SheetKind::Worksheet,
            consts::SHEET_TYPE_MACRO_SHEET => SheetKind::MacroSheet,
            consts::SHEET_TYPE_CHART => SheetKind::Chart,
            consts::SHEET_TYPE_VB_MODULE => SheetKind::MacroModule,
            other => SheetKind::Other(other),
        }
    }
}

//===========================================================================//

/// One sheet of a workbook, as listed in the workbook globals.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub(crate) name: String,
    pub(crate) offset: u32,
    pub(crate) state: SheetState,
    pub(crate) kind: SheetKind,
    pub(crate) grid: Grid,
}

impl Sheet {
    pub(crate) fn new(
        name: String,
        offset: u32,
        state: SheetState,
        kind: SheetKind,
    ) -> Sheet {
        Sheet { name, offset, state, kind, grid: Grid::new() }
    }

    /// Returns the sheet's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of the sheet's BOF record in the workbook
    /// stream.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns the sheet's visibility.
    pub fn state(&self) -> SheetState {
        self.state
    }

    /// Returns the sheet's kind.
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// Returns true if the sheet is a worksheet.
    pub fn is_worksheet(&self) -> bool {
        self.kind == SheetKind::Worksheet
    }

    /// Returns the decoded cells.  Always empty for sheets that are not
    /// worksheets.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

//===========================================================================//

/// A decoded workbook.
#[derive(Clone, Debug, PartialEq)]
pub struct Workbook {
    pub(crate) sheets: Vec<Sheet>,
    pub(crate) shared_strings: Vec<String>,
    pub(crate) version: BiffVersion,
    pub(crate) codepage: u16,
    pub(crate) warnings: Vec<Warning>,
}

impl Workbook {
    /// Decodes the workbook stored in an opened compound file.
    ///
    /// The codepage for byte strings is taken from the document summary
    /// streams when they declare one, and otherwise from
    /// `default_codepage`.
    pub fn from_compound_file(
        comp: &CompoundFile,
        default_codepage: u16,
    ) -> Result<Workbook, Error> {
        let index =
            comp.workbook_stream_index().ok_or(Error::MissingWorkbookStream)?;
        let stream = comp.read_stream(index);
        if stream.is_empty() {
            return Err(Error::MissingWorkbookStream);
        }
        let declared = comp
            .document_summary_information_index()
            .into_iter()
            .chain(comp.summary_information_index())
            .find_map(|index| {
                summary::declared_codepage(&comp.read_stream(index))
            });
        let transcoder =
            Transcoder::for_codepage(declared.unwrap_or(0), default_codepage);
        log::debug!(
            "decoding {} byte workbook stream with codepage {} ({})",
            stream.len(),
            transcoder.codepage(),
            transcoder.encoding_name()
        );
        Ok(driver::decode(&stream, transcoder, comp.warnings().to_vec()))
    }

    /// Returns all sheets, in workbook order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Returns the first sheet with the given name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Iterates over the sheet names, in workbook order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    /// Iterates over the sheets whose cells were decoded.
    pub fn worksheets(&self) -> impl Iterator<Item = &Sheet> + '_ {
        self.sheets.iter().filter(|sheet| sheet.is_worksheet())
    }

    /// Returns the shared string table.
    pub fn shared_strings(&self) -> &[String] {
        &self.shared_strings
    }

    /// Returns the BIFF version of the workbook globals.
    pub fn version(&self) -> BiffVersion {
        self.version
    }

    /// Returns the codepage used for byte strings.
    pub fn codepage(&self) -> u16 {
        self.codepage
    }

    /// Returns the problems that were worked around while decoding.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

//===========================================================================//


//===========================================================================//
