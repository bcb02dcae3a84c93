//! Config-driven facade: one cipher family, one base64 variant, one OAEP
//! digest, applied consistently to every call.

use sealkit_core::{Base64Variant, CipherFamily, CryptResult, HashAlgorithm, SealkitConfig};

use crate::encoding;
use crate::keys::{self, PrivateKeyHandle, PublicKeyHandle};
use crate::oaep;
use crate::symmetric::SymmetricCipher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    cipher: SymmetricCipher,
    variant: Base64Variant,
    oaep_hash: HashAlgorithm,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::from_config(&SealkitConfig::default())
    }
}

impl Envelope {
    pub fn new(family: CipherFamily, variant: Base64Variant, oaep_hash: HashAlgorithm) -> Self {
        Self {
            cipher: SymmetricCipher::new(family),
            variant,
            oaep_hash,
        }
    }

    pub fn from_config(config: &SealkitConfig) -> Self {
        Self::new(
            config.symmetric.cipher,
            config.encoding.variant,
            config.asymmetric.oaep_hash,
        )
    }

    pub fn cipher(&self) -> SymmetricCipher {
        self.cipher
    }

    pub fn variant(&self) -> Base64Variant {
        self.variant
    }

    pub fn oaep_hash(&self) -> HashAlgorithm {
        self.oaep_hash
    }

    /// Combined-format encrypt, then base64.
    pub fn seal_to_text(&self, key: &[u8], plaintext: &[u8]) -> CryptResult<String> {
        let combined = self.cipher.encrypt_combined(key, plaintext)?;
        Ok(encoding::encode(self.variant, combined))
    }

    /// Inverse of [`Envelope::seal_to_text`].
    pub fn open_text(&self, key: &[u8], text: &str) -> CryptResult<Vec<u8>> {
        let combined = encoding::decode(self.variant, text)?;
        self.cipher.decrypt_combined(key, &combined)
    }

    /// Load a public key with this envelope's OAEP digest.
    pub fn load_public(&self, pem: &str) -> CryptResult<PublicKeyHandle> {
        Ok(keys::load_public(pem)?.with_hash(self.oaep_hash))
    }

    /// Load a private key with this envelope's OAEP digest.
    pub fn load_private(&self, pem: &str) -> CryptResult<PrivateKeyHandle> {
        Ok(keys::load_private(pem)?.with_hash(self.oaep_hash))
    }

    /// RSA-OAEP encrypt, then base64. Uses the handle's own digest.
    pub fn wrap_to_text(&self, public: &PublicKeyHandle, plaintext: &[u8]) -> CryptResult<String> {
        let ciphertext = oaep::encrypt_oaep(public, plaintext)?;
        Ok(encoding::encode(self.variant, ciphertext))
    }

    /// Inverse of [`Envelope::wrap_to_text`].
    pub fn unwrap_text(&self, private: &PrivateKeyHandle, text: &str) -> CryptResult<Vec<u8>> {
        let ciphertext = encoding::decode(self.variant, text)?;
        oaep::decrypt_oaep(private, &ciphertext)
    }
}
