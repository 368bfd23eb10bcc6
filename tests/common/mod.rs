#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

//===========================================================================//

pub const END_OF_CHAIN: u32 = 0xfffffffe;
pub const FREE_SECTOR: u32 = 0xffffffff;
const FAT_SECTOR: u32 = 0xfffffffd;
const NO_STREAM: u32 = 0xffffffff;
const MINI_SECTOR_LEN: usize = 64;
const MINI_STREAM_CUTOFF: usize = 4096;
const DIR_ENTRY_LEN: usize = 128;

fn div_ceil(len: usize, unit: usize) -> usize {
    (len + unit - 1) / unit
}

/// Writes a minimal compound file holding a flat list of streams under the
/// root storage.  The layout is fixed: header, FAT sectors, directory,
/// MiniFAT, mini stream, then each regular-sized stream in order.
pub struct CfbBuilder {
    sector_len: usize,
    root_name: String,
    streams: Vec<(String, Vec<u8>)>,
}

impl CfbBuilder {
    pub fn new() -> CfbBuilder {
        CfbBuilder {
            sector_len: 512,
            root_name: "Root Entry".to_string(),
            streams: Vec::new(),
        }
    }

    /// Uses 4096-byte sectors (CFB version 4).
    pub fn version4(mut self) -> CfbBuilder {
        self.sector_len = 4096;
        self
    }

    pub fn root_name(mut self, name: &str) -> CfbBuilder {
        self.root_name = name.to_string();
        self
    }

    pub fn stream(mut self, name: &str, data: &[u8]) -> CfbBuilder {
        self.streams.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let sector_len = self.sector_len;
        let entries_per_fat_sector = sector_len / 4;

        let mut mini_stream = Vec::new();
        let mut minifat = Vec::<u32>::new();
        let mut mini_starts = Vec::new();
        for (_, data) in self.streams.iter() {
            if data.len() >= MINI_STREAM_CUTOFF {
                mini_starts.push(None);
            } else if data.is_empty() {
                mini_starts.push(Some(END_OF_CHAIN));
            } else {
                let first = minifat.len() as u32;
                let count = div_ceil(data.len(), MINI_SECTOR_LEN);
                for index in 0..count {
                    minifat.push(if index + 1 == count {
                        END_OF_CHAIN
                    } else {
                        first + index as u32 + 1
                    });
                }
                mini_stream.extend_from_slice(data);
                mini_stream.resize(minifat.len() * MINI_SECTOR_LEN, 0);
                mini_starts.push(Some(first));
            }
        }

        let num_entries = self.streams.len() + 1;
        let mut regions = vec![
            div_ceil(num_entries * DIR_ENTRY_LEN, sector_len),
            div_ceil(minifat.len() * 4, sector_len),
            div_ceil(mini_stream.len(), sector_len),
        ];
        for (_, data) in self.streams.iter() {
            if data.len() >= MINI_STREAM_CUTOFF {
                regions.push(div_ceil(data.len(), sector_len));
            }
        }
        let content: usize = regions.iter().sum();
        let mut num_fat_sectors = 1;
        while num_fat_sectors * entries_per_fat_sector
            < content + num_fat_sectors
        {
            num_fat_sectors += 1;
        }
        assert!(num_fat_sectors <= 109, "test file needs a DIFAT");

        let mut fat = vec![FAT_SECTOR; num_fat_sectors];
        let mut region_starts = Vec::new();
        for &len in regions.iter() {
            if len == 0 {
                region_starts.push(END_OF_CHAIN);
                continue;
            }
            let first = fat.len() as u32;
            for index in 0..len {
                fat.push(if index + 1 == len {
                    END_OF_CHAIN
                } else {
                    first + index as u32 + 1
                });
            }
            region_starts.push(first);
        }
        fat.resize(num_fat_sectors * entries_per_fat_sector, FREE_SECTOR);
        let mut big_starts = region_starts[3..].iter();
        let starts: Vec<u32> = mini_starts
            .into_iter()
            .map(|start| match start {
                Some(start) => start,
                None => *big_starts.next().unwrap(),
            })
            .collect();

        let mut data = Vec::new();
        self.write_header(
            &mut data,
            num_fat_sectors,
            regions[0],
            region_starts[0],
            region_starts[1],
            regions[1],
        );
        for &entry in fat.iter() {
            data.write_u32::<LittleEndian>(entry).unwrap();
        }

        let mut dir = Vec::new();
        let root_child = if self.streams.is_empty() { NO_STREAM } else { 1 };
        write_dir_entry(
            &mut dir,
            &self.root_name,
            5,
            root_child,
            NO_STREAM,
            region_starts[2],
            mini_stream.len() as u64,
        );
        for (index, (name, stream)) in self.streams.iter().enumerate() {
            let right = if index + 2 < num_entries {
                index as u32 + 2
            } else {
                NO_STREAM
            };
            write_dir_entry(
                &mut dir,
                name,
                2,
                NO_STREAM,
                right,
                starts[index],
                stream.len() as u64,
            );
        }
        while dir.len() < regions[0] * sector_len {
            write_dir_entry(&mut dir, "", 0, NO_STREAM, NO_STREAM, 0, 0);
        }
        data.extend(dir);

        for &entry in minifat.iter() {
            data.write_u32::<LittleEndian>(entry).unwrap();
        }
        pad_to(&mut data, sector_len, 0xff);
        data.extend_from_slice(&mini_stream);
        pad_to(&mut data, sector_len, 0);
        for (_, stream) in self.streams.iter() {
            if stream.len() >= MINI_STREAM_CUTOFF {
                data.extend_from_slice(stream);
                pad_to(&mut data, sector_len, 0);
            }
        }
        data
    }

    fn write_header(
        &self,
        data: &mut Vec<u8>,
        num_fat_sectors: usize,
        num_dir_sectors: usize,
        first_dir_sector: u32,
        first_minifat_sector: u32,
        num_minifat_sectors: usize,
    ) {
        let version4 = self.sector_len == 4096;
        data.extend_from_slice(&[
            0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1,
        ]);
        data.extend_from_slice(&[0; 16]); // header CLSID
        data.write_u16::<LittleEndian>(0x3e).unwrap();
        data.write_u16::<LittleEndian>(if version4 { 4 } else { 3 }).unwrap();
        data.write_u16::<LittleEndian>(0xfffe).unwrap();
        data.write_u16::<LittleEndian>(if version4 { 12 } else { 9 }).unwrap();
        data.write_u16::<LittleEndian>(6).unwrap();
        data.extend_from_slice(&[0; 6]);
        let num_dir_sectors = if version4 { num_dir_sectors } else { 0 };
        data.write_u32::<LittleEndian>(num_dir_sectors as u32).unwrap();
        data.write_u32::<LittleEndian>(num_fat_sectors as u32).unwrap();
        data.write_u32::<LittleEndian>(first_dir_sector).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap(); // transaction signature
        data.write_u32::<LittleEndian>(MINI_STREAM_CUTOFF as u32).unwrap();
        data.write_u32::<LittleEndian>(first_minifat_sector).unwrap();
        data.write_u32::<LittleEndian>(num_minifat_sectors as u32).unwrap();
        data.write_u32::<LittleEndian>(END_OF_CHAIN).unwrap(); // no DIFAT
        data.write_u32::<LittleEndian>(0).unwrap();
        for index in 0..109 {
            let entry = if index < num_fat_sectors {
                index as u32
            } else {
                FREE_SECTOR
            };
            data.write_u32::<LittleEndian>(entry).unwrap();
        }
        pad_to(data, self.sector_len, 0);
    }
}

fn write_dir_entry(
    data: &mut Vec<u8>,
    name: &str,
    obj_type: u8,
    child: u32,
    right_sibling: u32,
    start_sector: u32,
    stream_len: u64,
) {
    let mut units: Vec<u16> = name.encode_utf16().take(31).collect();
    let name_len = if units.is_empty() { 0 } else { (units.len() + 1) * 2 };
    units.resize(32, 0);
    for unit in units {
        data.write_u16::<LittleEndian>(unit).unwrap();
    }
    data.write_u16::<LittleEndian>(name_len as u16).unwrap();
    data.push(obj_type);
    data.push(1); // black
    data.write_u32::<LittleEndian>(NO_STREAM).unwrap();
    data.write_u32::<LittleEndian>(right_sibling).unwrap();
    data.write_u32::<LittleEndian>(child).unwrap();
    data.extend_from_slice(&[0; 16]); // CLSID
    data.write_u32::<LittleEndian>(0).unwrap(); // state bits
    data.extend_from_slice(&[0; 16]); // timestamps
    data.write_u32::<LittleEndian>(start_sector).unwrap();
    data.write_u64::<LittleEndian>(stream_len).unwrap();
}

/// Returns one 128-byte directory entry with no siblings.
pub fn dir_entry(
    name: &str,
    obj_type: u8,
    child: u32,
    start_sector: u32,
    stream_len: u64,
) -> Vec<u8> {
    let mut data = Vec::new();
    write_dir_entry(
        &mut data,
        name,
        obj_type,
        child,
        NO_STREAM,
        start_sector,
        stream_len,
    );
    data
}

fn pad_to(data: &mut Vec<u8>, multiple: usize, byte: u8) {
    let len = div_ceil(data.len(), multiple) * multiple;
    data.resize(len, byte);
}

//===========================================================================//

/// Returns the sector length declared in a compound file header.
pub fn sector_len(data: &[u8]) -> usize {
    1 << u16::from_le_bytes([data[0x1e], data[0x1f]])
}

/// Returns the byte offset of directory entry `index`, assuming the
/// directory fits in consecutive sectors (as `CfbBuilder` writes it).
pub fn dir_entry_offset(data: &[u8], index: usize) -> usize {
    let first_dir = read_u32(data, 0x30) as usize;
    (first_dir + 1) * sector_len(data) + index * DIR_ENTRY_LEN
}

/// Returns the byte offset of FAT entry `sector_id`, assuming the FAT is
/// held in consecutive sectors starting at sector 0.
pub fn fat_entry_offset(data: &[u8], sector_id: u32) -> usize {
    sector_len(data) + 4 * sector_id as usize
}

pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

pub fn patch_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

//===========================================================================//

pub const BIFF8: u16 = 0x0600;
pub const BIFF7: u16 = 0x0500;

pub const SST: u16 = 0x00fc;
pub const CONTINUE: u16 = 0x003c;

pub fn record(opcode: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + payload.len());
    data.write_u16::<LittleEndian>(opcode).unwrap();
    data.write_u16::<LittleEndian>(payload.len() as u16).unwrap();
    data.extend_from_slice(payload);
    data
}

pub fn bof(version: u16, substream: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u16::<LittleEndian>(version).unwrap();
    payload.write_u16::<LittleEndian>(substream).unwrap();
    payload.extend_from_slice(&[0; 12]);
    record(0x0809, &payload)
}

pub fn eof() -> Vec<u8> {
    record(0x000a, &[])
}

fn cell(opcode: u16, row: u16, col: u16, rest: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u16::<LittleEndian>(row).unwrap();
    payload.write_u16::<LittleEndian>(col).unwrap();
    payload.write_u16::<LittleEndian>(0x0f).unwrap(); // XF index
    payload.extend_from_slice(rest);
    record(opcode, &payload)
}

pub fn rk(row: u16, col: u16, rk: i32) -> Vec<u8> {
    cell(0x027e, row, col, &rk.to_le_bytes())
}

pub fn number(row: u16, col: u16, value: f64) -> Vec<u8> {
    cell(0x0203, row, col, &value.to_le_bytes())
}

/// A LABEL cell with compressed BIFF8 text.
pub fn label(row: u16, col: u16, text: &str) -> Vec<u8> {
    let mut rest = Vec::new();
    rest.write_u16::<LittleEndian>(text.len() as u16).unwrap();
    rest.push(0);
    rest.extend_from_slice(text.as_bytes());
    cell(0x0204, row, col, &rest)
}

/// A LABEL cell with BIFF7 codepage text.
pub fn label_bytes(row: u16, col: u16, text: &[u8]) -> Vec<u8> {
    let mut rest = Vec::new();
    rest.write_u16::<LittleEndian>(text.len() as u16).unwrap();
    rest.extend_from_slice(text);
    cell(0x0204, row, col, &rest)
}

pub fn label_sst(row: u16, col: u16, index: u32) -> Vec<u8> {
    cell(0x00fd, row, col, &index.to_le_bytes())
}

pub fn boolean(row: u16, col: u16, value: bool) -> Vec<u8> {
    cell(0x0205, row, col, &[value as u8, 0])
}

pub fn error(row: u16, col: u16, code: u8) -> Vec<u8> {
    cell(0x0205, row, col, &[code, 1])
}

/// Builds an SST payload of compressed strings.
pub fn sst_payload(strings: &[&str]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u32::<LittleEndian>(strings.len() as u32).unwrap();
    payload.write_u32::<LittleEndian>(strings.len() as u32).unwrap();
    for text in strings {
        payload.write_u16::<LittleEndian>(text.len() as u16).unwrap();
        payload.push(0);
        payload.extend_from_slice(text.as_bytes());
    }
    payload
}

//===========================================================================//

/// Assembles a workbook stream: globals listing every sheet, then one
/// substream per sheet.  Sheet offsets are filled in automatically.
pub struct BookBuilder {
    version: u16,
    globals: Vec<u8>,
    sheets: Vec<(String, u8, u8, Vec<u8>)>,
}

impl BookBuilder {
    pub fn new(version: u16) -> BookBuilder {
        BookBuilder { version, globals: Vec::new(), sheets: Vec::new() }
    }

    /// Appends raw records to the globals, after the sheet list.
    pub fn global(mut self, records: &[u8]) -> BookBuilder {
        self.globals.extend_from_slice(records);
        self
    }

    pub fn worksheet(self, name: &str, body: &[u8]) -> BookBuilder {
        self.sheet(name, 0, 0, body)
    }

    pub fn sheet(
        mut self,
        name: &str,
        state: u8,
        kind: u8,
        body: &[u8],
    ) -> BookBuilder {
        self.sheets.push((name.to_string(), state, kind, body.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut stream = bof(self.version, 0x0005);
        let mut offset_positions = Vec::new();
        for (name, state, kind, _) in self.sheets.iter() {
            let mut payload = vec![0, 0, 0, 0, *state, *kind];
            payload.push(name.len() as u8);
            if self.version == BIFF8 {
                payload.push(0);
            }
            payload.extend_from_slice(name.as_bytes());
            offset_positions.push(stream.len() + 4);
            stream.extend(record(0x0085, &payload));
        }
        stream.extend_from_slice(&self.globals);
        stream.extend(eof());
        for (index, (_, _, _, body)) in self.sheets.iter().enumerate() {
            let offset = stream.len() as u32;
            patch_u32(&mut stream, offset_positions[index], offset);
            stream.extend(bof(self.version, 0x0010));
            stream.extend_from_slice(body);
            stream.extend(eof());
        }
        stream
    }

    /// Wraps the workbook stream in a compound file.
    pub fn build_file(&self) -> Vec<u8> {
        CfbBuilder::new().stream("Workbook", &self.build()).build()
    }
}

/// Builds a property set stream whose first section declares `codepage`.
pub fn summary_with_codepage(codepage: u16) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u16::<LittleEndian>(0xfffe).unwrap(); // byte order
    data.write_u16::<LittleEndian>(0).unwrap(); // format version
    data.write_u32::<LittleEndian>(0x0002_0006).unwrap(); // system id
    data.extend_from_slice(&[0; 16]); // CLSID
    data.write_u32::<LittleEndian>(1).unwrap(); // number of sections
    data.extend_from_slice(&[0; 16]); // FMTID
    data.write_u32::<LittleEndian>(48).unwrap(); // section offset
    data.write_u32::<LittleEndian>(24).unwrap(); // section size
    data.write_u32::<LittleEndian>(1).unwrap(); // number of properties
    data.write_u32::<LittleEndian>(1).unwrap(); // PID_CODEPAGE
    data.write_u32::<LittleEndian>(16).unwrap();
    data.write_u32::<LittleEndian>(2).unwrap(); // VT_I2
    data.write_u16::<LittleEndian>(codepage).unwrap();
    data.write_u16::<LittleEndian>(0).unwrap();
    data
}

//===========================================================================//
