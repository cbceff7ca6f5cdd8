use encoding_rs::{Encoding, EUC_KR, UTF_16BE, UTF_16LE, UTF_8};
use serde::Serialize;

/// Fallback order used when reading a dictionary file.
pub const DECODE_ORDER: [TextEncoding; 4] = [
    TextEncoding::Utf8Sig,
    TextEncoding::Utf8,
    TextEncoding::Utf16,
    TextEncoding::Cp949,
];

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    #[serde(rename = "utf-8-sig")]
    Utf8Sig,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16")]
    Utf16,
    #[serde(rename = "cp949")]
    Cp949,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Cp949 => "cp949",
        }
    }

    /// Strict decode: any malformed sequence is a failure, never a replacement char.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                strict(UTF_8, body)
            }
            TextEncoding::Utf8 => strict(UTF_8, bytes),
            TextEncoding::Utf16 => {
                // BOM picks the byte order, little endian otherwise
                if let Some(body) = bytes.strip_prefix(&[0xFF, 0xFE]) {
                    strict(UTF_16LE, body)
                } else if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
                    strict(UTF_16BE, body)
                } else {
                    strict(UTF_16LE, bytes)
                }
            }
            // encoding_rs' EUC-KR is the windows-949 superset
            TextEncoding::Cp949 => strict(EUC_KR, bytes),
        }
    }
}

#[derive(Debug)]
pub struct Decoded {
    pub text: String,
    pub encoding: TextEncoding,
}

#[derive(Debug)]
pub struct DecodeFailure {
    pub tried: Vec<&'static str>,
    pub last: String,
}

/// Tries each encoding of [`DECODE_ORDER`] and returns the first clean decode.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeFailure> {
    let mut tried = Vec::with_capacity(DECODE_ORDER.len());
    let mut last = String::new();

    for encoding in DECODE_ORDER {
        tried.push(encoding.name());
        match encoding.decode(bytes) {
            Some(text) => {
                if tried.len() > 1 {
                    log::warn!("decoded as {} after trying {}", encoding.name(), tried.join(", "));
                }
                return Ok(Decoded { text, encoding });
            }
            None => {
                last = format!("malformed {} data", encoding.name());
                log::debug!("{last}");
            }
        }
    }

    Err(DecodeFailure { tried, last })
}

fn strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}
