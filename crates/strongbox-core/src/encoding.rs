//! Printable encoding for binary envelope values.
//!
//! Salts and ciphertexts are embedded in the JSON envelope as standard,
//! padded base64. The alphabet (`A-Z a-z 0-9 + /` and `=`) needs no JSON
//! escaping and contains no control characters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, VaultError};

/// Encode raw bytes as padded base64 text.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded base64 text back into raw bytes.
///
/// # Errors
///
/// Returns `VaultError::MalformedEncoding` if the text contains a character
/// outside the alphabet or its length/padding breaks the 4-character block rule.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| VaultError::MalformedEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_arbitrary_bytes() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_all_zero_and_empty() {
        let zeros = [0u8; 16];
        assert_eq!(decode(&encode(&zeros)).unwrap(), zeros);
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_large_input() {
        let bytes = vec![0xA5u8; 1024 * 1024 + 1];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_output_is_json_safe() {
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        let text = encode(&bytes);
        assert!(text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn test_rejects_character_outside_alphabet() {
        let result = decode("ab$d");
        assert!(matches!(result, Err(VaultError::MalformedEncoding(_))));
        assert!(matches!(decode("ab\ncd"), Err(VaultError::MalformedEncoding(_))));
    }

    #[test]
    fn test_rejects_bad_length() {
        assert!(matches!(decode("abcde"), Err(VaultError::MalformedEncoding(_))));
        assert!(matches!(decode("abc"), Err(VaultError::MalformedEncoding(_))));
    }
}
