use std::collections::BTreeMap;
use std::fmt;

// ========================================================================= //

/// A spreadsheet error literal stored in an error cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    /// `#NULL!`
    Null,
    /// `#DIV/0!`
    Div0,
    /// `#VALUE!`
    Value,
    /// `#REF!`
    Ref,
    /// `#NAME?`
    Name,
    /// `#NUM!`
    Num,
    /// `#N/A`
    NA,
}

impl ErrorCode {
    /// Maps the value byte of a BOOLERR record to an error code.
    ///
    /// The native BIFF codes are recognized first; the small values 1
    /// through 6 then select the codes in table order, starting from
    /// `#NULL!`.  Anything else is reported as `#NULL!`.
    ///
    /// ```
    /// use xlsread::ErrorCode;
    /// assert_eq!(ErrorCode::from_byte(0x07), ErrorCode::Div0);
    /// assert_eq!(ErrorCode::from_byte(2), ErrorCode::Div0);
    /// assert_eq!(ErrorCode::from_byte(0x2a), ErrorCode::NA);
    /// ```
    pub fn from_byte(byte: u8) -> ErrorCode {
        match byte {
            0x00 | 0x01 => ErrorCode::Null,
            0x07 | 0x02 => ErrorCode::Div0,
            0x0f | 0x03 => ErrorCode::Value,
            0x17 | 0x04 => ErrorCode::Ref,
            0x1d | 0x05 => ErrorCode::Name,
            0x24 | 0x06 => ErrorCode::Num,
            0x2a => ErrorCode::NA,
            _ => ErrorCode::Null,
        }
    }

    /// Returns the literal shown for this error in a spreadsheet.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Null => "#NULL!",
            ErrorCode::Div0 => "#DIV/0!",
            ErrorCode::Value => "#VALUE!",
            ErrorCode::Ref => "#REF!",
            ErrorCode::Name => "#NAME?",
            ErrorCode::Num => "#NUM!",
            ErrorCode::NA => "#N/A",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================================================= //

/// The kind of value held by a cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellKind {
    /// No value has been written.
    Empty,
    /// Text, from a LABEL or LABELSST record.
    String,
    /// A number, from an RK or NUMBER record.
    Numeric,
    /// A boolean, from a BOOLERR record.
    Boolean,
    /// An error literal, from a BOOLERR record.
    Error,
}

/// The value of one cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// No value has been written.
    Empty,
    /// A text value.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// An error value.
    Error(ErrorCode),
}

impl CellValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::Text(_) => CellKind::String,
            CellValue::Number(_) => CellKind::Numeric,
            CellValue::Bool(_) => CellKind::Boolean,
            CellValue::Error(_) => CellKind::Error,
        }
    }

    /// Returns true if no value has been written to the cell.
    pub fn is_empty(&self) -> bool {
        *self == CellValue::Empty
    }

    /// Returns the text of a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the value of a numeric cell.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            CellValue::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Returns the value of a boolean cell.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            CellValue::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> CellValue {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Error(code) => f.write_str(code.as_str()),
        }
    }
}

// ========================================================================= //

/// Receives decoded cell values.
pub trait CellSink {
    /// Stores `value` at the given zero-based row and column, replacing any
    /// previous value.
    fn set_cell(&mut self, row: u16, col: u16, value: CellValue);
}

// ========================================================================= //

/// One row of a grid: the written cells, keyed by column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<u16, CellValue>,
}

impl Row {
    /// Returns the cell at `col`, or an empty value if none was written.
    pub fn get(&self, col: u16) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(&col).unwrap_or(&EMPTY)
    }

    /// Iterates over the written cells of the row in column order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, &CellValue)> + '_ {
        self.cells.iter().map(|(&col, value)| (col, value))
    }

    /// Returns the number of written cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no written cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ========================================================================= //

/// Sparse cell storage for one worksheet.
///
/// Rows are created on first write.  Reading any position that was never
/// written yields [`CellValue::Empty`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: BTreeMap<u16, Row>,
    max_row: Option<u16>,
    max_col: Option<u16>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Returns the value at the given position.
    pub fn get(&self, row: u16, col: u16) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        match self.rows.get(&row) {
            Some(cells) => cells.get(col),
            None => &EMPTY,
        }
    }

    /// Returns the row at `row`, if any cell in it was written.
    pub fn row(&self, row: u16) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Iterates over the rows that have written cells, in row order.
    pub fn rows_iter(&self) -> impl Iterator<Item = (u16, &Row)> + '_ {
        self.rows.iter().map(|(&index, row)| (index, row))
    }

    /// Iterates over every written cell in row-major order.
    pub fn cells(
        &self,
    ) -> impl Iterator<Item = (u16, u16, &CellValue)> + '_ {
        self.rows.iter().flat_map(|(&row, cells)| {
            cells.cells().map(move |(col, value)| (row, col, value))
        })
    }

    /// Returns one more than the highest written row index, or zero.
    pub fn rows(&self) -> usize {
        self.max_row.map_or(0, |row| row as usize + 1)
    }

    /// Returns one more than the highest written column index, or zero.
    pub fn cols(&self) -> usize {
        self.max_col.map_or(0, |col| col as usize + 1)
    }

    /// Returns the number of written cells.
    pub fn len(&self) -> usize {
        self.rows.values().map(Row::len).sum()
    }

    /// Returns true if no cell was written.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CellSink for Grid {
    fn set_cell(&mut self, row: u16, col: u16, value: CellValue) {
        self.rows.entry(row).or_default().cells.insert(col, value);
        self.max_row = self.max_row.max(Some(row));
        self.max_col = self.max_col.max(Some(col));
    }
}

// ========================================================================= //

#[cfg(test)]
mod tests {
    use super::{CellKind, CellSink, CellValue, ErrorCode, Grid};

    #[test]
    fn unwritten_cells_are_empty() {
        let mut grid = Grid::new();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.cols(), 0);
        grid.set_cell(4, 2, CellValue::Number(1.5));
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 0), &CellValue::Empty);
        assert_eq!(grid.get(4, 1).kind(), CellKind::Empty);
        assert_eq!(grid.get(4, 2).as_f64(), Some(1.5));
        assert!(grid.row(3).is_none());
    }

    #[test]
    fn later_write_replaces_earlier() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, CellValue::Text("a".to_string()));
        grid.set_cell(0, 0, CellValue::Bool(true));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(0, 0).as_bool(), Some(true));
    }

    #[test]
    fn cells_in_row_major_order() {
        let mut grid = Grid::new();
        grid.set_cell(2, 0, CellValue::Number(3.0));
        grid.set_cell(0, 9, CellValue::Number(2.0));
        grid.set_cell(0, 1, CellValue::Number(1.0));
        let order: Vec<(u16, u16)> =
            grid.cells().map(|(row, col, _)| (row, col)).collect();
        assert_eq!(order, vec![(0, 1), (0, 9), (2, 0)]);
    }

    #[test]
    fn rows_skip_gaps() {
        let mut grid = Grid::new();
        grid.set_cell(5, 1, CellValue::Number(1.0));
        grid.set_cell(1, 3, CellValue::Bool(false));
        let rows: Vec<u16> =
            grid.rows_iter().map(|(index, _)| index).collect();
        assert_eq!(rows, vec![1, 5]);
    }

    #[test]
    fn error_table() {
        assert_eq!(ErrorCode::from_byte(0x00).as_str(), "#NULL!");
        assert_eq!(ErrorCode::from_byte(0x0f).as_str(), "#VALUE!");
        assert_eq!(ErrorCode::from_byte(0x17).as_str(), "#REF!");
        assert_eq!(ErrorCode::from_byte(0x1d).as_str(), "#NAME?");
        assert_eq!(ErrorCode::from_byte(0x24).as_str(), "#NUM!");
        assert_eq!(ErrorCode::from_byte(2).as_str(), "#DIV/0!");
        assert_eq!(ErrorCode::from_byte(6).as_str(), "#NUM!");
        assert_eq!(ErrorCode::from_byte(0xee), ErrorCode::Null);
    }

    #[test]
    fn display_values() {
        assert_eq!(CellValue::Number(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
        assert_eq!(CellValue::Error(ErrorCode::NA).to_string(), "#N/A");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}

// ========================================================================= //
