use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use uuid::Uuid;

use crate::internal::{consts, Version};

// ========================================================================= //

#[derive(Clone)]
pub struct DirEntry {
    pub name: String,
    pub obj_type: u8,
    pub left_sibling: u32,
    pub right_sibling: u32,
    pub child: u32,
    pub clsid: Uuid,
    pub state_bits: u32,
    pub start_sector: u32,
    pub stream_len: u64,
}

impl DirEntry {
    pub fn read_clsid<R: Read>(reader: &mut R) -> io::Result<Uuid> {
        let d1 = reader.read_u32::<LittleEndian>()?;
        let d2 = reader.read_u16::<LittleEndian>()?;
        let d3 = reader.read_u16::<LittleEndian>()?;
        let mut d4 = [0u8; 8];
        reader.read_exact(&mut d4)?;
        Ok(Uuid::from_fields(d1, d2, d3, &d4))
    }

    /// Reads one 128-byte entry.  Nothing is validated here: an odd or
    /// oversized name length is clamped, and NUL code units are dropped.
    pub fn read_from<R: Read>(
        reader: &mut R,
        version: Version,
    ) -> io::Result<DirEntry> {
        let mut name_chars = [0u16; 32];
        for chr in name_chars.iter_mut() {
            *chr = reader.read_u16::<LittleEndian>()?;
        }
        let name_len_bytes = reader.read_u16::<LittleEndian>()? as usize;
        let name_len_chars = (name_len_bytes / 2).min(name_chars.len());
        let name: String =
            String::from_utf16_lossy(&name_chars[..name_len_chars])
                .chars()
                .filter(|&chr| chr != '\0')
                .collect();
        let obj_type = reader.read_u8()?;
        let _color = reader.read_u8()?;
        let left_sibling = reader.read_u32::<LittleEndian>()?;
        let right_sibling = reader.read_u32::<LittleEndian>()?;
        let child = reader.read_u32::<LittleEndian>()?;
        let clsid = DirEntry::read_clsid(reader)?;
        let state_bits = reader.read_u32::<LittleEndian>()?;
        let _creation_time = reader.read_u64::<LittleEndian>()?;
        let _modified_time = reader.read_u64::<LittleEndian>()?;
        let start_sector = reader.read_u32::<LittleEndian>()?;
        let stream_len =
            version.stream_len(reader.read_u64::<LittleEndian>()?);
        Ok(DirEntry {
            name,
            obj_type,
            left_sibling,
            right_sibling,
            child,
            clsid,
            state_bits,
            start_sector,
            stream_len,
        })
    }

    /// Parses every complete entry in a directory stream; a trailing partial
    /// entry is ignored.
    pub fn read_all(data: &[u8], version: Version) -> Vec<DirEntry> {
        data.chunks_exact(consts::DIR_ENTRY_LEN)
            .filter_map(|mut chunk| {
                DirEntry::read_from(&mut chunk, version).ok()
            })
            .collect()
    }

    pub fn is_unallocated(&self) -> bool {
        self.obj_type == consts::OBJ_TYPE_UNALLOCATED
    }
}

// ========================================================================= //

#[cfg(test)]
mod tests {
    use byteorder::{LittleEndian, WriteBytesExt};

    use super::DirEntry;
    use crate::internal::{consts, Version};

    fn make_entry_data(
        name: &str,
        obj_type: u8,
        start: u32,
        len: u64,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        let name_utf16: Vec<u16> = name.encode_utf16().collect();
        for &chr in name_utf16.iter() {
            data.write_u16::<LittleEndian>(chr).unwrap();
        }
        for _ in name_utf16.len()..32 {
            data.write_u16::<LittleEndian>(0).unwrap();
        }
        data.write_u16::<LittleEndian>((name_utf16.len() as u16 + 1) * 2)
            .unwrap();
        data.push(obj_type);
        data.push(1);
        data.write_u32::<LittleEndian>(consts::NO_STREAM).unwrap();
        data.write_u32::<LittleEndian>(consts::NO_STREAM).unwrap();
        data.write_u32::<LittleEndian>(consts::NO_STREAM).unwrap();
        data.write_u32::<LittleEndian>(0x00020820).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap();
        data.write_u16::<LittleEndian>(0).unwrap();
        data.extend_from_slice(&[0xc0, 0, 0, 0, 0, 0, 0, 0x46]);
        data.write_u32::<LittleEndian>(0).unwrap();
        data.write_u64::<LittleEndian>(0).unwrap();
        data.write_u64::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(start).unwrap();
        data.write_u64::<LittleEndian>(len).unwrap();
        assert_eq!(data.len(), consts::DIR_ENTRY_LEN);
        data
    }

    #[test]
    fn parse_entry() {
        let data = make_entry_data("Workbook", 2, 9, 0x1_0000_1234);
        let entry =
            DirEntry::read_from(&mut data.as_slice(), Version::V3).unwrap();
        assert_eq!(entry.name, "Workbook");
        assert_eq!(entry.obj_type, consts::OBJ_TYPE_STREAM);
        assert_eq!(entry.start_sector, 9);
        // Version 3 only uses the low 32 bits of the size.
        assert_eq!(entry.stream_len, 0x1234);
        assert_eq!(
            entry.clsid.to_string(),
            "00020820-0000-0000-c000-000000000046"
        );
        let entry =
            DirEntry::read_from(&mut data.as_slice(), Version::V4).unwrap();
        assert_eq!(entry.stream_len, 0x1_0000_1234);
    }

    #[test]
    fn oversized_name_length_is_clamped() {
        let mut data = make_entry_data("Book", 2, 0, 10);
        data[0x40] = 0xff;
        let entry =
            DirEntry::read_from(&mut data.as_slice(), Version::V3).unwrap();
        assert_eq!(entry.name, "Book");
    }

    #[test]
    fn read_all_ignores_trailing_partial_entry() {
        let mut data = make_entry_data("Root Entry", 5, 3, 128);
        data.extend(make_entry_data("Book", 2, 0, 10));
        data.extend_from_slice(&[0u8; 40]);
        let entries = DirEntry::read_all(&data, Version::V3);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Root Entry");
        assert_eq!(entries[1].name, "Book");
        assert!(!entries[1].is_unallocated());
    }
}

// ========================================================================= //
