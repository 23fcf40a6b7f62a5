//! Binary-to-text codec for payloads crossing a string-only channel.
//!
//! # Design
//! Request and response bodies are arbitrary bytes, but the boundary this
//! crate serves (a serialized message channel, a C string, a JSON field)
//! only carries text. Bodies travel as standard base64 with padding
//! (RFC 4648), so the peer on the other side of the channel can decode them
//! with any stock base64 implementation.
//!
//! Both functions are pure and stateless; concurrent calls need no
//! coordination.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::CourierError;

/// Encode a byte sequence as base64 text.
///
/// Total over any input, including the empty slice (which encodes to `""`).
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode base64 text back into bytes.
///
/// Strict inverse of [`encode`]: input with malformed padding or characters
/// outside the standard alphabet fails with `CourierError::Decode`.
pub fn decode(payload: &str) -> Result<Vec<u8>, CourierError> {
    BASE64
        .decode(payload)
        .map_err(|e| CourierError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_round_trips() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn hello_encodes_to_known_vector() {
        assert_eq!(encode(&[72, 101, 108, 108, 111]), "SGVsbG8=");
    }

    #[test]
    fn known_vector_decodes_to_hello() {
        assert_eq!(decode("SGVsbG8=").unwrap(), vec![72, 101, 108, 108, 111]);
    }

    #[test]
    fn all_byte_values_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn lengths_straddling_padding_round_trip() {
        for len in 0..8 {
            let bytes = vec![0xAB; len];
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn invalid_characters_are_rejected() {
        let err = decode("not-valid-base64!!").unwrap_err();
        assert!(matches!(err, CourierError::Decode(_)));
    }

    #[test]
    fn malformed_padding_is_rejected() {
        assert!(decode("SGVsbG8").is_err());
        assert!(decode("SGVsbG8==").is_err());
        assert!(decode("=").is_err());
    }
}
