//! RSA-OAEP with SHA-256 or SHA-512 and an empty label.
//!
//! The digest is not recorded in the ciphertext; both sides must select
//! the same [`HashAlgorithm`] on their handles.

use rand::rngs::OsRng;
use rsa::{traits::PublicKeyParts, Oaep};
use sha2::{Sha256, Sha512};
use tracing::debug;

use sealkit_core::{CryptError, CryptResult, HashAlgorithm};

use crate::keys::{PrivateKeyHandle, PublicKeyHandle};
use crate::symmetric::utf8_plaintext;

/// OAEP plaintext bound: `key_bytes - 2*hash_len - 2`.
///
/// `None` when the modulus is too small to hold any OAEP block.
pub fn max_plaintext_len(key_bytes: usize, hash: HashAlgorithm) -> Option<usize> {
    key_bytes.checked_sub(2 * hash.digest_len() + 2)
}

fn padding(hash: HashAlgorithm) -> Oaep {
    match hash {
        HashAlgorithm::Sha256 => Oaep::new::<Sha256>(),
        HashAlgorithm::Sha512 => Oaep::new::<Sha512>(),
    }
}

/// Encrypt `plaintext` to `public` with RSA-OAEP.
///
/// Oversized input fails with [`CryptError::Encoding`] before the RSA
/// operation runs.
pub fn encrypt_oaep(public: &PublicKeyHandle, plaintext: &[u8]) -> CryptResult<Vec<u8>> {
    let key = public.rsa_key()?;
    let hash = public.hash();
    let modulus = key.size();

    let limit = max_plaintext_len(modulus, hash).ok_or_else(|| {
        CryptError::Encoding(format!(
            "{modulus}-byte RSA key is too small for OAEP/{hash}"
        ))
    })?;
    if plaintext.len() > limit {
        return Err(CryptError::Encoding(format!(
            "plaintext is {} bytes; OAEP/{hash} with a {modulus}-byte key allows at most {limit}",
            plaintext.len()
        )));
    }

    let ciphertext = key
        .encrypt(&mut OsRng, padding(hash), plaintext)
        .map_err(|e| CryptError::Encoding(format!("RSA-OAEP encryption failed: {e}")))?;

    debug!(hash = hash.name(), modulus_bytes = modulus, "RSA-OAEP encrypted");
    Ok(ciphertext)
}

/// Decrypt an RSA-OAEP ciphertext with `private`.
///
/// A wrong key, a digest mismatch, or a damaged ciphertext all surface as
/// [`CryptError::Authentication`].
pub fn decrypt_oaep(private: &PrivateKeyHandle, ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
    let key = private.rsa_key()?;
    let hash = private.hash();

    let plaintext = key
        .decrypt_blinded(&mut OsRng, padding(hash), ciphertext)
        .map_err(|_| CryptError::Authentication)?;

    debug!(hash = hash.name(), modulus_bytes = key.size(), "RSA-OAEP decrypted");
    Ok(plaintext)
}

pub fn encrypt_oaep_str(public: &PublicKeyHandle, text: &str) -> CryptResult<Vec<u8>> {
    encrypt_oaep(public, text.as_bytes())
}

pub fn decrypt_oaep_to_string(private: &PrivateKeyHandle, ciphertext: &[u8]) -> CryptResult<String> {
    utf8_plaintext(decrypt_oaep(private, ciphertext)?)
}
