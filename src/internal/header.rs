use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::internal::{consts, Version};

//===========================================================================//

pub struct Header {
    pub version_number: u16,
    pub byte_order_mark: u16,
    pub num_fat_sectors: u32,
    pub first_dir_sector: u32,
    pub first_minifat_sector: u32,
    pub first_difat_sector: u32,
    pub num_difat_sectors: u32,
    pub initial_difat_entries: [u32; consts::NUM_DIFAT_ENTRIES_IN_HEADER],
}

impl Header {
    /// Parses the header from the start of `data`.  A file shorter than one
    /// header block is read as if it were padded with zeros.
    pub fn parse(data: &[u8]) -> io::Result<Header> {
        let mut block = [0u8; consts::HEADER_LEN];
        let len = data.len().min(consts::HEADER_LEN);
        block[..len].copy_from_slice(&data[..len]);
        Header::read_from(&mut &block[..])
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Header> {
        reader.read_exact(&mut [0u8; 8])?; // magic number, checked by caller
        reader.read_exact(&mut [0u8; 16])?; // reserved field
        let _minor_version = reader.read_u16::<LittleEndian>()?;
        let version_number = reader.read_u16::<LittleEndian>()?;
        let byte_order_mark = reader.read_u16::<LittleEndian>()?;
        let _sector_shift = reader.read_u16::<LittleEndian>()?;
        let _mini_sector_shift = reader.read_u16::<LittleEndian>()?;
        reader.read_exact(&mut [0u8; 6])?; // reserved field
        let _num_dir_sectors = reader.read_u32::<LittleEndian>()?;
        let num_fat_sectors = reader.read_u32::<LittleEndian>()?;
        let first_dir_sector = reader.read_u32::<LittleEndian>()?;
        let _transaction_signature = reader.read_u32::<LittleEndian>()?;
        let _mini_stream_cutoff = reader.read_u32::<LittleEndian>()?;
        let first_minifat_sector = reader.read_u32::<LittleEndian>()?;
        let _num_minifat_sectors = reader.read_u32::<LittleEndian>()?;
        let mut first_difat_sector = reader.read_u32::<LittleEndian>()?;
        let num_difat_sectors = reader.read_u32::<LittleEndian>()?;

        // Some writers use FREE_SECTOR to indicate END_OF_CHAIN.
        if first_difat_sector == consts::FREE_SECTOR {
            first_difat_sector = consts::END_OF_CHAIN;
        }

        let mut initial_difat_entries =
            [consts::FREE_SECTOR; consts::NUM_DIFAT_ENTRIES_IN_HEADER];
        for entry in initial_difat_entries.iter_mut() {
            *entry = reader.read_u32::<LittleEndian>()?;
        }

        Ok(Header {
            version_number,
            byte_order_mark,
            num_fat_sectors,
            first_dir_sector,
            first_minifat_sector,
            first_difat_sector,
            num_difat_sectors,
            initial_difat_entries,
        })
    }

    /// Returns the declared format version, if it is one this crate knows
    /// and the byte order mark is intact.
    pub fn version(&self) -> Option<Version> {
        if self.byte_order_mark != consts::BYTE_ORDER_MARK {
            return None;
        }
        Version::from_number(self.version_number)
    }

    /// Returns the FAT sector indices stored directly in the header.
    pub fn direct_fat_sectors(&self) -> &[u32] {
        let count = (self.num_fat_sectors as usize)
            .min(consts::NUM_DIFAT_ENTRIES_IN_HEADER);
        &self.initial_difat_entries[..count]
    }
}

//===========================================================================//


//===========================================================================//
