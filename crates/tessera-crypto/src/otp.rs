//! One-time-pad XOR.
//!
//! Each identity share pair is a one-time pad: either half alone is uniformly
//! random, and XOR of the two halves yields the embedded plaintext.

use crate::{CryptoError, Result};

/// How [`decrypt`] renders the recovered plaintext.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Interpret the plaintext as UTF-8 text.
    Utf8,
    /// Lowercase hex of the raw plaintext bytes.
    Hex,
}

/// Byte-wise XOR of two equal-length operands.
///
/// # Errors
///
/// - [`CryptoError::LengthMismatch`] if the operands differ in length
pub fn xor(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if key.len() != ciphertext.len() {
        return Err(CryptoError::LengthMismatch {
            key: key.len(),
            ciphertext: ciphertext.len(),
        });
    }
    Ok(key.iter().zip(ciphertext).map(|(k, c)| k ^ c).collect())
}

/// XOR-decrypt `ciphertext` with `key` and render the result.
///
/// # Errors
///
/// - [`CryptoError::LengthMismatch`] if the operands differ in length
/// - [`CryptoError::InvalidInput`] if `Utf8` is requested and the plaintext is not UTF-8
pub fn decrypt(key: &[u8], ciphertext: &[u8], encoding: OutputEncoding) -> Result<String> {
    let plain = xor(key, ciphertext)?;
    match encoding {
        OutputEncoding::Utf8 => String::from_utf8(plain)
            .map_err(|e| CryptoError::InvalidInput(format!("plaintext is not UTF-8: {e}"))),
        OutputEncoding::Hex => Ok(hex::encode(plain)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_inverts() {
        let pad = [0x5Au8, 0x00, 0xFF, 0x13];
        let plain = *b"abcd";
        let cipher = xor(&pad, &plain).expect("xor");
        assert_eq!(xor(&pad, &cipher).expect("xor back"), plain);
    }

    #[test]
    fn test_xor_self_is_zero() {
        let share = [0xAB; 12];
        assert_eq!(xor(&share, &share).expect("xor"), vec![0u8; 12]);
    }

    #[test]
    fn test_xor_length_mismatch() {
        let err = xor(&[1, 2, 3], &[1, 2]).expect_err("lengths differ");
        assert!(matches!(
            err,
            CryptoError::LengthMismatch { key: 3, ciphertext: 2 }
        ));
    }

    #[test]
    fn test_decrypt_utf8() {
        let pad = [0x11u8; 5];
        let cipher = xor(&pad, b"alice").expect("xor");
        let text = decrypt(&pad, &cipher, OutputEncoding::Utf8).expect("decrypt");
        assert_eq!(text, "alice");
    }

    #[test]
    fn test_decrypt_hex() {
        let text = decrypt(&[0x0F], &[0xF0], OutputEncoding::Hex).expect("decrypt");
        assert_eq!(text, "ff");
    }

    #[test]
    fn test_decrypt_invalid_utf8() {
        let result = decrypt(&[0x00], &[0xFF], OutputEncoding::Utf8);
        assert!(matches!(result, Err(CryptoError::InvalidInput(_))));
    }
}
