use std::mem;

use crate::internal::strings::{
    read_byte_string_long, read_byte_string_short, read_unicode_string_long,
    read_unicode_string_short,
};
use crate::internal::{
    bytes, consts, number, sst, BiffVersion, CellSink, CellValue, ErrorCode,
    Record, RecordCursor, Sheet, SheetKind, SheetState, Splice, Transcoder,
    Workbook,
};
use crate::Warning;

// ========================================================================= //

/// Where the decoder is in the workbook stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Reading the workbook globals substream from offset 0.
    Globals,
    /// Reading the cells of the sheet with this directory index.
    Worksheet(usize),
    Done,
}

/// Decodes a BIFF workbook stream.
///
/// `warnings` holds problems already found in the container; decoding
/// problems are appended to it.
pub fn decode(
    stream: &[u8],
    transcoder: Transcoder,
    warnings: Vec<Warning>,
) -> Workbook {
    let mut decoder = Decoder {
        cursor: RecordCursor::new(stream),
        transcoder,
        version: BiffVersion::Unknown(0),
        sheets: Vec::new(),
        shared_strings: Vec::new(),
        sst_seen: false,
        warnings,
    };
    let mut state = State::Globals;
    while state != State::Done {
        state = decoder.step(state);
    }
    Workbook {
        sheets: decoder.sheets,
        shared_strings: decoder.shared_strings,
        version: decoder.version,
        codepage: decoder.transcoder.codepage(),
        warnings: decoder.warnings,
    }
}

// ========================================================================= //

struct Decoder<'a> {
    cursor: RecordCursor<'a>,
    transcoder: Transcoder,
    version: BiffVersion,
    sheets: Vec<Sheet>,
    shared_strings: Vec<String>,
    sst_seen: bool,
    warnings: Vec<Warning>,
}

impl<'a> Decoder<'a> {
    fn step(&mut self, state: State) -> State {
        match state {
            State::Globals => self.scan_globals(),
            State::Worksheet(index) => self.scan_sheet(index),
            State::Done => State::Done,
        }
    }

    /// Returns the state for the first worksheet at or after `index`.
    fn next_worksheet(&self, index: usize) -> State {
        let next = self.sheets[index.min(self.sheets.len())..]
            .iter()
            .position(|sheet| sheet.kind == SheetKind::Worksheet);
        match next {
            Some(position) => State::Worksheet(index + position),
            None => State::Done,
        }
    }

    // ===================================================================== //

    fn scan_globals(&mut self) -> State {
        self.cursor.seek(0);
        loop {
            match self.cursor.peek_opcode() {
                None => {
                    truncated!(
                        self.warnings,
                        "workbook globals end without an EOF record"
                    );
                    break;
                }
                Some(consts::RECORD_SST) => {
                    if let Some(splice) = self.cursor.splice() {
                        self.read_sst(&splice);
                    }
                    continue;
                }
                Some(_) => {}
            }
            let record = match self.cursor.next_record() {
                Some(record) => record,
                None => break,
            };
            log::trace!(
                "globals record 0x{:04X} at {}",
                record.opcode,
                record.offset
            );
            match record.opcode {
                consts::RECORD_EOF => break,
                consts::RECORD_BOF => self.read_globals_bof(&record),
                consts::RECORD_SHEET => self.read_sheet_entry(&record),
                _ => {}
            }
        }
        self.next_worksheet(0)
    }

    fn read_globals_bof(&mut self, record: &Record) {
        let version = bytes::read_u16(record.payload, 0);
        let substream = bytes::read_u16(record.payload, 2);
        match substream {
            consts::SUBSTREAM_WORKBOOK_GLOBALS => {
                self.version = BiffVersion::from_number(version);
                log::debug!("workbook globals declare {}", self.version);
                if let BiffVersion::Unknown(number) = self.version {
                    degrade!(
                        self.warnings,
                        Warning::UnsupportedVersion(number)
                    );
                }
            }
            // The version field of a worksheet BOF is not reliable here.
            consts::SUBSTREAM_WORKSHEET => {}
            other => {
                log::debug!(
                    "skipping embedded substream 0x{:04X} at {}",
                    other,
                    record.offset
                );
                self.cursor.skip_substream();
            }
        }
    }

    fn read_sheet_entry(&mut self, record: &Record) {
        let payload = record.payload;
        if payload.len() < 6 {
            truncated!(
                self.warnings,
                "sheet record at {} is only {} bytes",
                record.offset,
                payload.len()
            );
            return;
        }
        let offset = bytes::read_u32(payload, 0);
        let state = SheetState::from_byte(payload[4]);
        let kind = SheetKind::from_byte(payload[5]);
        let (name, _) = if self.version.is_biff8() {
            read_unicode_string_short(&payload[6..])
        } else {
            read_byte_string_short(&payload[6..], &self.transcoder)
        };
        log::debug!(
            "sheet {:?} at {} ({:?}, {:?})",
            name,
            offset,
            state,
            kind
        );
        self.sheets.push(Sheet::new(name, offset, state, kind));
    }

    fn read_sst(&mut self, splice: &Splice) {
        if self.sst_seen {
            log::debug!("ignoring repeated SST record");
            return;
        }
        self.sst_seen = true;
        self.shared_strings =
            sst::decode_shared_strings(splice, &self.transcoder);
        log::debug!(
            "shared string table holds {} strings in {} fragments",
            self.shared_strings.len(),
            splice.boundaries.len().saturating_sub(1)
        );
    }

    // ===================================================================== //

    fn scan_sheet(&mut self, index: usize) -> State {
        let offset = self.sheets[index].offset as usize;
        self.cursor.seek(offset);
        match self.cursor.peek_opcode() {
            Some(consts::RECORD_BOF) => {
                self.cursor.next_record();
            }
            Some(opcode) => {
                truncated!(
                    self.warnings,
                    "sheet {:?} starts with record 0x{:04X} instead of BOF",
                    self.sheets[index].name,
                    opcode
                );
            }
            None => {
                truncated!(
                    self.warnings,
                    "sheet {:?} offset {} is past the end of the stream",
                    self.sheets[index].name,
                    offset
                );
                return self.next_worksheet(index + 1);
            }
        }
        let mut grid = mem::take(&mut self.sheets[index].grid);
        self.read_cells(&mut grid);
        self.sheets[index].grid = grid;
        self.next_worksheet(index + 1)
    }

    fn read_cells<S: CellSink>(&mut self, sink: &mut S) {
        while let Some(record) = self.cursor.next_record() {
            match record.opcode {
                consts::RECORD_EOF => return,
                consts::RECORD_BOF => {
                    log::debug!(
                        "skipping embedded substream at {}",
                        record.offset
                    );
                    self.cursor.skip_substream();
                }
                _ => {
                    if let Some(value) = self.read_cell(&record) {
                        let (row, col) = record.cell_address();
                        sink.set_cell(row, col, value);
                    }
                }
            }
        }
        truncated!(self.warnings, "sheet substream ends without EOF record");
    }

    /// Decodes a value-bearing cell record.  Returns `None` for every other
    /// record, and for cell records that carry nothing to write.
    fn read_cell(&mut self, record: &Record) -> Option<CellValue> {
        let min_len = match record.opcode {
            consts::RECORD_RK => 10,
            consts::RECORD_NUMBER => 14,
            consts::RECORD_LABEL => 8,
            consts::RECORD_LABELSST => 10,
            consts::RECORD_BOOLERR => 8,
            _ => return None,
        };
        let payload = record.payload;
        if payload.len() < min_len {
            truncated!(
                self.warnings,
                "cell record 0x{:04X} at {} is only {} bytes",
                record.opcode,
                record.offset,
                payload.len()
            );
            return None;
        }
        match record.opcode {
            consts::RECORD_RK => {
                let rk = bytes::read_i32(payload, 6);
                Some(CellValue::Number(number::rk_to_f64(rk)))
            }
            consts::RECORD_NUMBER => Some(CellValue::Number(
                number::split_words_to_f64(&payload[6..14]),
            )),
            consts::RECORD_LABEL => {
                let (text, _) = if self.version.is_biff8() {
                    read_unicode_string_long(&payload[6..])
                } else {
                    read_byte_string_long(&payload[6..], &self.transcoder)
                };
                Some(CellValue::Text(text))
            }
            consts::RECORD_LABELSST => {
                let index = bytes::read_u32(payload, 6) as usize;
                match self.shared_strings.get(index) {
                    Some(text) => Some(CellValue::Text(text.clone())),
                    None => {
                        degrade!(
                            self.warnings,
                            Warning::OutOfRangeReference {
                                index,
                                len: self.shared_strings.len(),
                            }
                        );
                        None
                    }
                }
            }
            consts::RECORD_BOOLERR => match payload[7] {
                0 => Some(CellValue::Bool(payload[6] != 0)),
                1 => Some(CellValue::Error(ErrorCode::from_byte(payload[6]))),
                _ => None,
            },
            _ => None,
        }
    }
}

// ========================================================================= //


// ========================================================================= //
