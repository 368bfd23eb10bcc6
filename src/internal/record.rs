use crate::internal::{bytes, consts};

// ========================================================================= //

/// One physical BIFF record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'a> {
    /// Record type from the header.
    pub opcode: u16,
    /// Absolute position of the record header in the stream.
    pub offset: usize,
    /// Bytes following the four-byte header.
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    /// Returns the physical length declared in the record header.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the record carries no payload.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Returns the first two u16 fields of a cell record: row, column.
    pub fn cell_address(&self) -> (u16, u16) {
        (bytes::read_u16(self.payload, 0), bytes::read_u16(self.payload, 2))
    }
}

// ========================================================================= //

/// A logical record reassembled from a primary record and the CONTINUE
/// records following it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Splice {
    /// Concatenated fragment payloads.
    pub data: Vec<u8>,
    /// Offsets in `data` where each physical fragment ends, starting
    /// with 0.  Ascending.
    pub boundaries: Vec<usize>,
}

impl Splice {
    fn new() -> Splice {
        Splice { data: Vec::new(), boundaries: vec![0] }
    }

    fn push_fragment(&mut self, payload: &[u8]) {
        self.data.extend_from_slice(payload);
        self.boundaries.push(self.data.len());
    }

    /// Returns the first boundary at or after `pos`.
    pub fn boundary_at_or_after(&self, pos: usize) -> Option<usize> {
        self.boundaries.iter().copied().find(|&boundary| boundary >= pos)
    }

    /// Returns the first boundary strictly after `pos`.
    pub fn boundary_after(&self, pos: usize) -> Option<usize> {
        self.boundaries.iter().copied().find(|&boundary| boundary > pos)
    }
}

// ========================================================================= //

/// A forward-only cursor over the records of a BIFF stream.
///
/// The position only moves forward, except through [`seek`](Self::seek)
/// which starts a new substream scan.  A record whose header or payload is
/// cut off by the end of the buffer ends the stream.
#[derive(Clone)]
pub struct RecordCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordCursor<'a> {
    /// Starts a cursor at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> RecordCursor<'a> {
        RecordCursor { data, pos: 0 }
    }

    /// Returns the offset of the next record header.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute stream offset.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns true if no complete record remains.
    pub fn is_at_end(&self) -> bool {
        self.peek_record().is_none()
    }

    fn peek_record(&self) -> Option<Record<'a>> {
        let header_end = self.pos.checked_add(consts::RECORD_HEADER_LEN)?;
        if header_end > self.data.len() {
            return None;
        }
        let opcode = bytes::read_u16(self.data, self.pos);
        let len = bytes::read_u16(self.data, self.pos + 2) as usize;
        let payload = self.data.get(header_end..header_end + len)?;
        Some(Record { opcode, offset: self.pos, payload })
    }

    /// Returns the opcode of the next complete record without consuming it.
    pub fn peek_opcode(&self) -> Option<u16> {
        self.peek_record().map(|record| record.opcode)
    }

    /// Reads the next record and advances past it.
    pub fn next_record(&mut self) -> Option<Record<'a>> {
        let record = self.peek_record()?;
        self.pos += consts::RECORD_HEADER_LEN + record.len();
        Some(record)
    }

    /// Reads the next record together with every CONTINUE record directly
    /// after it.  The cursor is left on the first record that was not
    /// merged.
    pub fn splice(&mut self) -> Option<Splice> {
        let first = self.next_record()?;
        let mut splice = Splice::new();
        splice.push_fragment(first.payload);
        while self.peek_opcode() == Some(consts::RECORD_CONTINUE) {
            if let Some(record) = self.next_record() {
                splice.push_fragment(record.payload);
            }
        }
        Some(splice)
    }

    /// Skips records up to and including the next EOF record.  Nested BOF
    /// records are not tracked.
    pub fn skip_substream(&mut self) {
        while let Some(record) = self.next_record() {
            if record.opcode == consts::RECORD_EOF {
                break;
            }
        }
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        self.next_record()
    }
}

// ========================================================================= //


// ========================================================================= //
