//! Latin-1 text encoding for the base-14 fonts.
//!
//! Every character in `U+0000..=U+00FF` maps to the byte of the same value;
//! anything else is rejected with [`RenderError::Encoding`].

use crate::error::{RenderError, RenderResult};

/// Encodes `text` to single-byte Latin-1.
///
/// ## Example
/// ```rust
/// use invoice_pdf::encoding::encode_latin1;
///
/// assert_eq!(encode_latin1("Café").unwrap(), b"Caf\xe9".to_vec());
/// assert!(encode_latin1("₹ 100").is_err());
/// ```
pub fn encode_latin1(text: &str) -> RenderResult<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(u32::from(character)).map_err(|_| RenderError::Encoding {
                character,
                code_point: u32::from(character),
                position,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Decodes Latin-1 bytes. Cannot fail: every byte is a character.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_latin1("INR 1,234.50").unwrap(), b"INR 1,234.50");
    }

    #[test]
    fn test_latin1_upper_half() {
        assert_eq!(encode_latin1("Müller ©").unwrap(), vec![b'M', 0xFC, b'l', b'l', b'e', b'r', b' ', 0xA9]);
    }

    #[test]
    fn test_rejects_first_bad_character() {
        let err = encode_latin1("Tea – 2 cups ☕").unwrap_err();
        assert_eq!(
            err,
            RenderError::Encoding {
                character: '–',
                code_point: 0x2013,
                position: 4,
                text: "Tea – 2 cups ☕".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_round_trips_latin1() {
        let text = "Straße 12\nÅrhus";
        assert_eq!(decode_latin1(&encode_latin1(text).unwrap()), text);
    }
}
