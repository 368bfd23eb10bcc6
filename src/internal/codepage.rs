use encoding_rs::{
    Encoding, BIG5, EUC_KR, GBK, IBM866, ISO_8859_10, ISO_8859_13,
    ISO_8859_14, ISO_8859_15, ISO_8859_16, ISO_8859_2, ISO_8859_3,
    ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7, ISO_8859_8, KOI8_R,
    KOI8_U, MACINTOSH, SHIFT_JIS, UTF_16LE, UTF_8, WINDOWS_1250,
    WINDOWS_1251, WINDOWS_1252, WINDOWS_1253, WINDOWS_1254, WINDOWS_1255,
    WINDOWS_1256, WINDOWS_1257, WINDOWS_1258, WINDOWS_874, X_MAC_CYRILLIC,
};

use crate::internal::consts;

// ========================================================================= //

/// Maps a Windows codepage identifier to the matching encoding, if one is
/// supported.
pub fn encoding_for_codepage(codepage: u16) -> Option<&'static Encoding> {
    Some(match codepage {
        367 => WINDOWS_1252, // US-ASCII
        866 => IBM866,
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        // Some writers declare 21010 when they mean UTF-16LE.
        1200 | 21010 => UTF_16LE,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        1252 | 32769 => WINDOWS_1252,
        1253 => WINDOWS_1253,
        1254 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        10000 | 32768 => MACINTOSH,
        10007 => X_MAC_CYRILLIC,
        20866 => KOI8_R,
        21866 => KOI8_U,
        28591 => WINDOWS_1252,
        28592 => ISO_8859_2,
        28593 => ISO_8859_3,
        28594 => ISO_8859_4,
        28595 => ISO_8859_5,
        28596 => ISO_8859_6,
        28597 => ISO_8859_7,
        28598 => ISO_8859_8,
        28600 => ISO_8859_10,
        28603 => ISO_8859_13,
        28604 => ISO_8859_14,
        28605 => ISO_8859_15,
        28606 => ISO_8859_16,
        65001 => UTF_8,
        _ => return None,
    })
}

// ========================================================================= //

/// Decodes codepage-encoded byte strings into Unicode text.
#[derive(Clone, Copy, Debug)]
pub struct Transcoder {
    codepage: u16,
    encoding: &'static Encoding,
}

impl Transcoder {
    /// Creates a transcoder for `codepage`.  Zero and unsupported
    /// identifiers use `fallback` instead, and Windows-1252 if the fallback
    /// is itself unsupported.
    pub fn for_codepage(codepage: u16, fallback: u16) -> Transcoder {
        if let Some(encoding) = encoding_for_codepage(codepage) {
            return Transcoder { codepage, encoding };
        }
        if codepage != 0 {
            log::warn!(
                "unsupported codepage {}; decoding byte strings with \
                 codepage {}",
                codepage,
                fallback
            );
        }
        match encoding_for_codepage(fallback) {
            Some(encoding) => Transcoder { codepage: fallback, encoding },
            None => Transcoder {
                codepage: consts::DEFAULT_CODEPAGE,
                encoding: WINDOWS_1252,
            },
        }
    }

    /// Returns the codepage actually used for decoding.
    pub fn codepage(&self) -> u16 {
        self.codepage
    }

    /// Returns the WHATWG name of the encoding used for decoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, _had_errors) =
            self.encoding.decode_without_bom_handling(bytes);
        text.into_owned()
    }
}

impl Default for Transcoder {
    fn default() -> Transcoder {
        Transcoder::for_codepage(consts::DEFAULT_CODEPAGE, 0)
    }
}

// ========================================================================= //


// ========================================================================= //
