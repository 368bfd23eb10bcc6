use crate::internal::{bytes, consts, Transcoder};

// ========================================================================= //

/// Decodes a run of 16-bit little-endian code units.  A trailing odd byte
/// is dropped and unpaired surrogates become U+FFFD.
pub fn decode_utf16le(data: &[u8]) -> String {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn read_byte_string(
    data: &[u8],
    prefix_len: usize,
    count: usize,
    transcoder: &Transcoder,
) -> (String, usize) {
    let chars = bytes::slice(data, prefix_len, count);
    (transcoder.decode(chars), prefix_len + chars.len())
}

/// Reads a byte string with a one-byte character count.
pub fn read_byte_string_short(
    data: &[u8],
    transcoder: &Transcoder,
) -> (String, usize) {
    let count = bytes::read_u8(data, 0) as usize;
    read_byte_string(data, 1, count, transcoder)
}

/// Reads a byte string with a two-byte character count.
pub fn read_byte_string_long(
    data: &[u8],
    transcoder: &Transcoder,
) -> (String, usize) {
    let count = bytes::read_u16(data, 0) as usize;
    read_byte_string(data, 2, count, transcoder)
}

/// Reads an option byte followed by `count` characters.
///
/// Only the compression bit of the option byte is honoured: any rich-text
/// or phonetic blocks announced by the other bits are left unconsumed.
pub fn read_unicode_run(data: &[u8], count: usize) -> (String, usize) {
    if data.is_empty() {
        return (String::new(), 0);
    }
    let options = data[0];
    if options & consts::STRING_FLAG_UNCOMPRESSED == 0 {
        let chars = bytes::slice(data, 1, count);
        let text = chars.iter().map(|&byte| char::from(byte)).collect();
        (text, 1 + chars.len())
    } else {
        let chars = bytes::slice(data, 1, count.saturating_mul(2));
        (decode_utf16le(chars), 1 + chars.len())
    }
}

/// Reads a Unicode string with a one-byte character count.
pub fn read_unicode_string_short(data: &[u8]) -> (String, usize) {
    let count = bytes::read_u8(data, 0) as usize;
    let rest = data.get(1..).unwrap_or(&[]);
    let (text, consumed) = read_unicode_run(rest, count);
    (text, 1 + consumed)
}

/// Reads a Unicode string with a two-byte character count.
pub fn read_unicode_string_long(data: &[u8]) -> (String, usize) {
    let count = bytes::read_u16(data, 0) as usize;
    let rest = data.get(2..).unwrap_or(&[]);
    let (text, consumed) = read_unicode_run(rest, count);
    (text, 2 + consumed)
}

// ========================================================================= //


// ========================================================================= //
