use byteorder::{ByteOrder, LittleEndian};

// ========================================================================= //

/// Copies up to `N` bytes starting at `pos` into a zero-padded array.
fn padded<const N: usize>(data: &[u8], pos: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    if pos < data.len() {
        let available = &data[pos..];
        let len = available.len().min(N);
        buf[..len].copy_from_slice(&available[..len]);
    }
    buf
}

pub fn read_u8(data: &[u8], pos: usize) -> u8 {
    data.get(pos).copied().unwrap_or(0)
}

pub fn read_u16(data: &[u8], pos: usize) -> u16 {
    LittleEndian::read_u16(&padded::<2>(data, pos))
}

pub fn read_u32(data: &[u8], pos: usize) -> u32 {
    LittleEndian::read_u32(&padded::<4>(data, pos))
}

/// Reads a little-endian two's-complement 32-bit integer.
///
/// Missing trailing bytes read as zero and a position past the end of the
/// buffer yields zero.  The sign is taken from the top bit of the fourth
/// byte regardless of the host integer width.
pub fn read_i32(data: &[u8], pos: usize) -> i32 {
    LittleEndian::read_i32(&padded::<4>(data, pos))
}

/// Returns the sub-slice `data[start..start + len]`, clipped to the buffer.
pub fn slice(data: &[u8], start: usize, len: usize) -> &[u8] {
    let start = start.min(data.len());
    let end = start.saturating_add(len).min(data.len());
    &data[start..end]
}

// ========================================================================= //


// ========================================================================= //
