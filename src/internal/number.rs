use crate::internal::bytes;

// ========================================================================= //

fn pow2(exp: i32) -> f64 {
    2f64.powi(exp)
}

/// Decodes a packed RK number.
///
/// Bit 1 selects a 30-bit signed integer, otherwise the top 30 bits are the
/// most significant bits of an IEEE-754 double.  Bit 0 divides the result
/// by 100.
pub fn rk_to_f64(rk: i32) -> f64 {
    let bits = rk as u32;
    let mut value = if bits & 0x02 != 0 {
        f64::from(rk >> 2)
    } else {
        let exp = ((bits & 0x7ff00000) >> 20) as i32 - 1023;
        let mantissa = f64::from(0x100000 | (bits & 0x000ffffc));
        let value = mantissa / pow2(20 - exp);
        if bits & 0x80000000 != 0 {
            -value
        } else {
            value
        }
    };
    if bits & 0x01 != 0 {
        value /= 100.0;
    }
    value
}

/// Rebuilds an IEEE-754 double from eight little-endian bytes, treating them
/// as a low and a high 32-bit word and accumulating the two halves of the
/// mantissa separately.
pub fn split_words_to_f64(data: &[u8]) -> f64 {
    let low = bytes::read_u32(data, 0);
    let high = bytes::read_u32(data, 4);
    let exp = ((high & 0x7ff00000) >> 20) as i32 - 1023;
    let mantissa = f64::from(0x100000 | (high & 0x000fffff));
    let mut value = mantissa / pow2(20 - exp);
    if low & 0x80000000 != 0 {
        value += 1.0 / pow2(21 - exp);
    }
    value += f64::from(low & 0x7fffffff) / pow2(52 - exp);
    if high & 0x80000000 != 0 {
        -value
    } else {
        value
    }
}

// ========================================================================= //


// ========================================================================= //
