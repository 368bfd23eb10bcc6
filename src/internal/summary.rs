use crate::internal::{bytes, consts};

// ========================================================================= //

/// A typed value from a property set stream.  Only the scalar types that
/// summary streams use for simple metadata are decoded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    I2(i16),
    I4(i32),
    Bool(bool),
    Other(u32),
}

/// Iterates over the `(property id, value)` pairs of the first section of a
/// property set stream such as `\u{5}DocumentSummaryInformation`.
pub fn properties(
    data: &[u8],
) -> impl Iterator<Item = (u32, PropertyValue)> + '_ {
    let section = bytes::read_u32(data, 44) as usize;
    let declared = bytes::read_u32(data, section.saturating_add(4)) as usize;
    // Each property needs an eight-byte id/offset pair.
    let count = declared.min(data.len() / 8);
    (0..count).map(move |index| {
        let entry = section.saturating_add(8 + 8 * index);
        let id = bytes::read_u32(data, entry);
        let offset = bytes::read_u32(data, entry.saturating_add(4)) as usize;
        let value_pos = section.saturating_add(offset);
        let type_id = bytes::read_u32(data, value_pos);
        let value_pos = value_pos.saturating_add(4);
        let value = match type_id {
            consts::PROPERTY_TYPE_I2 => {
                PropertyValue::I2(bytes::read_u16(data, value_pos) as i16)
            }
            0x03 => PropertyValue::I4(bytes::read_i32(data, value_pos)),
            0x0b => {
                PropertyValue::Bool(bytes::read_u16(data, value_pos) != 0)
            }
            other => PropertyValue::Other(other),
        };
        (id, value)
    })
}

/// Returns the codepage declared by a property set stream, if any.
pub fn declared_codepage(data: &[u8]) -> Option<u16> {
    properties(data).find_map(|(id, value)| match value {
        PropertyValue::I2(codepage) if id == consts::PROPERTY_CODEPAGE => {
            Some(codepage as u16)
        }
        _ => None,
    })
}

// ========================================================================= //


// ========================================================================= //
