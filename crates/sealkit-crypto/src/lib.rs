//! sealkit-crypto: uniform envelopes over AEAD ciphers and RSA-OAEP
//!
//! Symmetric suites:
//! ```text
//! AES-128/192/256-GCM       key 16/24/32 bytes, nonce 12 bytes
//! ChaCha20-Poly1305         key 32 bytes,       nonce 12 bytes
//! XChaCha20-Poly1305        key 32 bytes,       nonce 24 bytes
//! ```
//!
//! Combined wire format (no version tag, no AAD):
//! ```text
//! [nonce (12 or 24 bytes)][ciphertext][16-byte tag]
//! ```
//!
//! Asymmetric: RSA-OAEP (SHA-256 or SHA-512, empty label) over SPKI/PKCS8
//! PEM keys. Binary output travels as one of four RFC 4648 base64 variants.

pub mod encoding;
pub mod envelope;
pub mod keys;
pub mod oaep;
pub mod suite;
pub mod symmetric;

pub use encoding::{decode, encode};
pub use envelope::Envelope;
pub use keys::{load_private, load_public, PrivateKeyHandle, PublicKeyHandle};
pub use oaep::{
    decrypt_oaep, decrypt_oaep_to_string, encrypt_oaep, encrypt_oaep_str, max_plaintext_len,
};
pub use sealkit_core::{
    Base64Variant, CipherFamily, CryptError, CryptResult, HashAlgorithm, SealkitConfig,
};
pub use suite::CipherSuite;
pub use symmetric::{Sealed, SymmetricCipher};

/// Key size for ChaCha20-Poly1305, XChaCha20-Poly1305 and AES-256-GCM (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM or ChaCha20-Poly1305 nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const XNONCE_SIZE: usize = 24;

/// Size of a GCM or Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
