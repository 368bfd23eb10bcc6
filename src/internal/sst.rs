use crate::internal::strings::decode_utf16le;
use crate::internal::{bytes, consts, Splice, Transcoder};

// ========================================================================= //

/// Decodes the shared string table from a spliced SST record.
///
/// The payload starts with the total number of string references and the
/// number of unique strings that follow.  Character arrays may be split
/// across CONTINUE boundaries; each continued fragment starts with its own
/// option byte, which may switch between 8-bit and 16-bit characters.
pub fn decode_shared_strings(
    splice: &Splice,
    transcoder: &Transcoder,
) -> Vec<String> {
    let data = &splice.data;
    let unique = bytes::read_u32(data, 4) as usize;
    let mut strings = Vec::with_capacity(unique.min(data.len() / 3));
    let mut pos = 8;
    for _ in 0..unique {
        if pos + 3 > data.len() {
            log::debug!(
                "SST ended after {} of {} strings",
                strings.len(),
                unique
            );
            break;
        }
        let (text, next) = decode_entry(splice, pos, transcoder);
        strings.push(text);
        pos = next;
    }
    strings
}

/// Decodes the string starting at `pos`, returning it with the position
/// just past its trailing blocks.
fn decode_entry(
    splice: &Splice,
    mut pos: usize,
    transcoder: &Transcoder,
) -> (String, usize) {
    let data = &splice.data;
    let num_chars = bytes::read_u16(data, pos) as usize;
    let options = bytes::read_u8(data, pos + 2);
    pos += 3;
    let mut compressed = options & consts::STRING_FLAG_UNCOMPRESSED == 0;
    let has_asian = options & consts::STRING_FLAG_ASIAN_PHONETIC != 0;
    let has_rich_text = options & consts::STRING_FLAG_RICH_TEXT != 0;

    let mut formatting_runs = 0;
    if has_rich_text {
        formatting_runs = bytes::read_u16(data, pos) as usize;
        pos += 2;
    }
    let mut phonetic_len = 0;
    if has_asian {
        phonetic_len = bytes::read_u32(data, pos) as usize;
        pos += 4;
    }

    let expected_len = if compressed { num_chars } else { num_chars * 2 };
    let limit = splice.boundary_at_or_after(pos).unwrap_or(data.len());
    let mut chars: Vec<u8>;
    if pos + expected_len <= limit {
        chars = bytes::slice(data, pos, expected_len).to_vec();
        pos += expected_len;
    } else {
        chars = bytes::slice(data, pos, limit.saturating_sub(pos)).to_vec();
        let mut chars_read = chars.len();
        if !compressed {
            chars_read /= 2;
        }
        let mut chars_left = num_chars.saturating_sub(chars_read);
        pos = limit.max(pos);
        while chars_left > 0 && pos < data.len() {
            let limit = splice.boundary_after(pos).unwrap_or(data.len());
            let segment_compressed =
                data[pos] & consts::STRING_FLAG_UNCOMPRESSED == 0;
            pos += 1;
            let room = limit.saturating_sub(pos);
            let len = match (compressed, segment_compressed) {
                (true, true) | (false, false) => {
                    let len = if compressed {
                        chars_left.min(room)
                    } else {
                        (chars_left * 2).min(room)
                    };
                    chars.extend_from_slice(&data[pos..pos + len]);
                    chars_left -= if compressed { len } else { len / 2 };
                    len
                }
                (false, true) => {
                    let len = chars_left.min(room);
                    for &byte in &data[pos..pos + len] {
                        chars.extend_from_slice(&[byte, 0]);
                    }
                    chars_left -= len;
                    len
                }
                (true, false) => {
                    let mut widened = Vec::with_capacity(chars.len() * 2);
                    for &byte in &chars {
                        widened.extend_from_slice(&[byte, 0]);
                    }
                    chars = widened;
                    compressed = false;
                    let len = (chars_left * 2).min(room);
                    chars.extend_from_slice(&data[pos..pos + len]);
                    chars_left -= len / 2;
                    len
                }
            };
            pos += len;
        }
    }

    let text = if compressed {
        transcoder.decode(&chars)
    } else {
        decode_utf16le(&chars)
    };
    pos += 4 * formatting_runs;
    pos += phonetic_len;
    (text, pos)
}

// ========================================================================= //


// ========================================================================= //
