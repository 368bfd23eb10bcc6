use crate::internal::bytes;

//===========================================================================//

/// A read-only view of a buffer as a sequence of fixed-length sectors.
///
/// For the file body, sector N begins one sector after the header, i.e. at
/// byte `(N + 1) * sector_len`.  For the mini stream, sector N begins at
/// `N * sector_len`.  Sectors that run past the end of the buffer are
/// clipped, and sectors that lie wholly outside it are empty.
#[derive(Clone, Copy)]
pub struct Sectors<'a> {
    data: &'a [u8],
    sector_len: usize,
    base: usize,
}

impl<'a> Sectors<'a> {
    /// Views a whole compound file, skipping its header sector.
    pub fn file_body(data: &'a [u8], sector_len: usize) -> Sectors<'a> {
        Sectors { data, sector_len, base: sector_len }
    }

    /// Views the mini stream as 64-byte sectors.
    pub fn mini_stream(data: &'a [u8], sector_len: usize) -> Sectors<'a> {
        Sectors { data, sector_len, base: 0 }
    }

    /// Returns the bytes of the given sector that exist in the buffer.
    pub fn sector(&self, sector_id: u32) -> &'a [u8] {
        let start = (sector_id as usize)
            .checked_mul(self.sector_len)
            .and_then(|offset| offset.checked_add(self.base));
        match start {
            Some(start) => bytes::slice(self.data, start, self.sector_len),
            None => &[],
        }
    }

    /// Returns true if the whole sector lies within the buffer.
    pub fn is_complete(&self, sector_id: u32) -> bool {
        self.sector(sector_id).len() == self.sector_len
    }

    /// Reads the sector as a table of `sector_len / 4` little-endian u32
    /// entries; entries past the end of the buffer read as zero.
    pub fn u32_entries(&self, sector_id: u32) -> Vec<u32> {
        let sector = self.sector(sector_id);
        (0..self.sector_len / 4)
            .map(|index| bytes::read_u32(sector, index * 4))
            .collect()
    }
}

//===========================================================================//


//===========================================================================//
