//! Cipher-suite table: the single source of key and nonce sizes.

use std::fmt;

use sealkit_core::{CipherFamily, CryptError, CryptResult};

use crate::{KEY_SIZE, NONCE_SIZE, XNONCE_SIZE};

/// A concrete AEAD construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    Aes128Gcm,
    Aes192Gcm,
    Aes256Gcm,
    ChaCha20Poly1305,
    XChaCha20Poly1305,
}

impl CipherSuite {
    pub const ALL: [CipherSuite; 5] = [
        CipherSuite::Aes128Gcm,
        CipherSuite::Aes192Gcm,
        CipherSuite::Aes256Gcm,
        CipherSuite::ChaCha20Poly1305,
        CipherSuite::XChaCha20Poly1305,
    ];

    pub const fn key_size(self) -> usize {
        match self {
            CipherSuite::Aes128Gcm => 16,
            CipherSuite::Aes192Gcm => 24,
            CipherSuite::Aes256Gcm => KEY_SIZE,
            CipherSuite::ChaCha20Poly1305 => KEY_SIZE,
            CipherSuite::XChaCha20Poly1305 => KEY_SIZE,
        }
    }

    pub const fn nonce_size(self) -> usize {
        match self {
            CipherSuite::Aes128Gcm
            | CipherSuite::Aes192Gcm
            | CipherSuite::Aes256Gcm
            | CipherSuite::ChaCha20Poly1305 => NONCE_SIZE,
            CipherSuite::XChaCha20Poly1305 => XNONCE_SIZE,
        }
    }

    pub const fn family(self) -> CipherFamily {
        match self {
            CipherSuite::Aes128Gcm | CipherSuite::Aes192Gcm | CipherSuite::Aes256Gcm => {
                CipherFamily::AesGcm
            }
            CipherSuite::ChaCha20Poly1305 => CipherFamily::ChaCha20Poly1305,
            CipherSuite::XChaCha20Poly1305 => CipherFamily::XChaCha20Poly1305,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CipherSuite::Aes128Gcm => "AES-128-GCM",
            CipherSuite::Aes192Gcm => "AES-192-GCM",
            CipherSuite::Aes256Gcm => "AES-256-GCM",
            CipherSuite::ChaCha20Poly1305 => "ChaCha20-Poly1305",
            CipherSuite::XChaCha20Poly1305 => "XChaCha20-Poly1305",
        }
    }

    /// Pick the suite for `family` that accepts a key of `key.len()` bytes.
    ///
    /// AES-GCM selects 128/192/256 from the length. The ChaCha variants take
    /// exactly 32 bytes. Anything else is rejected, never padded or truncated.
    pub fn resolve(family: CipherFamily, key: &[u8]) -> CryptResult<Self> {
        let suite = match (family, key.len()) {
            (CipherFamily::AesGcm, 16) => CipherSuite::Aes128Gcm,
            (CipherFamily::AesGcm, 24) => CipherSuite::Aes192Gcm,
            (CipherFamily::AesGcm, 32) => CipherSuite::Aes256Gcm,
            (CipherFamily::ChaCha20Poly1305, KEY_SIZE) => CipherSuite::ChaCha20Poly1305,
            (CipherFamily::XChaCha20Poly1305, KEY_SIZE) => CipherSuite::XChaCha20Poly1305,
            (family, actual) => {
                return Err(CryptError::Construction {
                    cipher: family.name(),
                    actual,
                    expected: accepted_key_sizes(family),
                })
            }
        };
        Ok(suite)
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nonce size shared by every suite of `family`.
pub const fn family_nonce_size(family: CipherFamily) -> usize {
    match family {
        CipherFamily::AesGcm => CipherSuite::Aes256Gcm.nonce_size(),
        CipherFamily::ChaCha20Poly1305 => CipherSuite::ChaCha20Poly1305.nonce_size(),
        CipherFamily::XChaCha20Poly1305 => CipherSuite::XChaCha20Poly1305.nonce_size(),
    }
}

const fn accepted_key_sizes(family: CipherFamily) -> &'static str {
    match family {
        CipherFamily::AesGcm => "16, 24 or 32",
        CipherFamily::ChaCha20Poly1305 | CipherFamily::XChaCha20Poly1305 => "32",
    }
}
