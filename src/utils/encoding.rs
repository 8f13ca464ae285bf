// Text encoding handling for ID3v2 frame payloads

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// ID3v2 text encoding selector byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf16Be = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => TextEncoding::Latin1,
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16Be,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Latin1,
        }
    }

    /// Width of the null terminator for strings in this encoding
    pub fn terminator_width(self) -> usize {
        match self {
            TextEncoding::Utf16 | TextEncoding::Utf16Be => 2,
            TextEncoding::Latin1 | TextEncoding::Utf8 => 1,
        }
    }
}

/// Decode text with the specified encoding
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Latin1 => WINDOWS_1252.decode(data).0.to_string(),
        TextEncoding::Utf16 => {
            // BOM decides the byte order; default to little-endian without one
            if data.len() >= 2 && data[0..2] == [0xFF, 0xFE] {
                UTF_16LE.decode(&data[2..]).0.to_string()
            } else if data.len() >= 2 && data[0..2] == [0xFE, 0xFF] {
                UTF_16BE.decode(&data[2..]).0.to_string()
            } else {
                UTF_16LE.decode(data).0.to_string()
            }
        }
        TextEncoding::Utf16Be => UTF_16BE.decode(data).0.to_string(),
        TextEncoding::Utf8 => UTF_8.decode(data).0.to_string(),
    }
}
