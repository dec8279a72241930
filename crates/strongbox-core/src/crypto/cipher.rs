//! XChaCha20-Poly1305 field encryption.
//!
//! Each call draws a random 192-bit nonce, so a single derived key can seal
//! any number of fields. The nonce travels in front of the ciphertext:
//!
//! ```text
//! [nonce (24 bytes)][ciphertext][tag (16 bytes)]
//! ```

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

/// Size of the XChaCha20 nonce in bytes.
pub const NONCE_LENGTH: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

fn generate_nonce() -> Result<[u8; NONCE_LENGTH]> {
    let mut nonce = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| VaultError::Crypto(format!("Failed to generate nonce: {}", e)))?;
    Ok(nonce)
}

/// Encrypt a text field, binding it to `associated_data`.
///
/// The same `associated_data` must be presented to [`open`].
pub fn seal(plaintext: &str, key: &DerivedKey, associated_data: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let nonce_bytes = generate_nonce()?;
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext.as_bytes(),
                aad: associated_data,
            },
        )
        .map_err(|e| VaultError::Crypto(format!("Encryption failed: {}", e)))?;

    let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a text field sealed by [`seal`].
///
/// # Errors
///
/// Returns `VaultError::DecryptionFailed` if:
/// - The ciphertext is shorter than nonce + tag
/// - Authentication fails (wrong key, wrong associated data, or tampered data)
/// - The authenticated plaintext is not valid UTF-8
pub fn open(sealed: &[u8], key: &DerivedKey, associated_data: &[u8]) -> Result<String> {
    if sealed.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(VaultError::DecryptionFailed);
    }

    let cipher = XChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LENGTH);

    let plaintext = cipher
        .decrypt(
            XNonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad: associated_data,
            },
        )
        .map_err(|_| VaultError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| VaultError::DecryptionFailed)
}

/// Encrypt a text field with no associated data.
///
/// # Examples
///
/// ```
/// use strongbox_core::crypto::{decrypt, encrypt, DerivedKey};
///
/// let key = DerivedKey::from_bytes([7u8; 32]);
/// let sealed = encrypt("helloworld123", &key).unwrap();
/// assert_eq!(decrypt(&sealed, &key).unwrap(), "helloworld123");
/// ```
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<Vec<u8>> {
    seal(plaintext, key, &[])
}

/// Decrypt a text field produced by [`encrypt`].
pub fn decrypt(sealed: &[u8], key: &DerivedKey) -> Result<String> {
    open(sealed, key, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; 32])
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = "Hello, World! This is secret data.";

        let sealed = encrypt(plaintext, &key(1)).unwrap();
        let decrypted = decrypt(&sealed, &key(1)).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_ciphertext_layout() {
        let sealed = encrypt("hello", &key(1)).unwrap();
        assert_eq!(sealed.len(), NONCE_LENGTH + "hello".len() + TAG_LENGTH);
        assert!(!sealed
            .windows("hello".len())
            .any(|window| window == b"hello"));
    }

    #[test]
    fn test_same_key_fresh_nonce_per_call() {
        let sealed1 = encrypt("same input twice", &key(1)).unwrap();
        let sealed2 = encrypt("same input twice", &key(1)).unwrap();

        assert_ne!(sealed1[..NONCE_LENGTH], sealed2[..NONCE_LENGTH]);
        assert_ne!(sealed1, sealed2);
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let sealed = encrypt("secret data", &key(1)).unwrap();
        let result = decrypt(&sealed, &key(2));
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn test_wrong_associated_data_fails() {
        let sealed = seal("a@outlook.com", &key(1), b"username").unwrap();
        assert_eq!(open(&sealed, &key(1), b"username").unwrap(), "a@outlook.com");
        assert!(matches!(
            open(&sealed, &key(1), b"password"),
            Err(VaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_every_byte_flip_detected() {
        let sealed = encrypt("do not tamper", &key(1)).unwrap();

        for position in 0..sealed.len() {
            let mut corrupted = sealed.clone();
            corrupted[position] ^= 0x01;
            assert!(
                matches!(
                    decrypt(&corrupted, &key(1)),
                    Err(VaultError::DecryptionFailed)
                ),
                "flip at byte {} was not detected",
                position
            );
        }
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let sealed = encrypt("secret", &key(1)).unwrap();
        assert!(matches!(
            decrypt(&sealed[..NONCE_LENGTH + TAG_LENGTH - 1], &key(1)),
            Err(VaultError::DecryptionFailed)
        ));
        assert!(matches!(
            decrypt(&sealed[..sealed.len() - 1], &key(1)),
            Err(VaultError::DecryptionFailed)
        ));
        assert!(matches!(
            decrypt(&[], &key(1)),
            Err(VaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let sealed = encrypt("", &key(1)).unwrap();
        assert_eq!(sealed.len(), NONCE_LENGTH + TAG_LENGTH);
        assert_eq!(decrypt(&sealed, &key(1)).unwrap(), "");
    }

    #[test]
    fn test_unicode_round_trip() {
        let plaintext = "pässwörd 🔐 密码";
        let sealed = encrypt(plaintext, &key(3)).unwrap();
        assert_eq!(decrypt(&sealed, &key(3)).unwrap(), plaintext);
    }
}
