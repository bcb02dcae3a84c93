use serde::{Deserialize, Serialize};
use std::fmt;

/// Digest used for the OAEP mask generation function and label hash.
///
/// Not embedded in the ciphertext: encryptor and decryptor must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha256, HashAlgorithm::Sha512];

    /// Digest output length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RFC 4648 base64 alphabets, with and without padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Base64Variant {
    /// RFC 4648 section 4, `=` padded
    #[default]
    Standard,
    /// RFC 4648 section 4, no padding
    StandardNoPad,
    /// RFC 4648 section 5 (`-` and `_`), `=` padded
    UrlSafe,
    /// RFC 4648 section 5, no padding
    UrlSafeNoPad,
}

impl Base64Variant {
    pub const ALL: [Base64Variant; 4] = [
        Base64Variant::Standard,
        Base64Variant::StandardNoPad,
        Base64Variant::UrlSafe,
        Base64Variant::UrlSafeNoPad,
    ];

    pub const fn is_padded(self) -> bool {
        matches!(self, Base64Variant::Standard | Base64Variant::UrlSafe)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Base64Variant::Standard => "standard",
            Base64Variant::StandardNoPad => "standard-no-pad",
            Base64Variant::UrlSafe => "url-safe",
            Base64Variant::UrlSafeNoPad => "url-safe-no-pad",
        }
    }
}

impl fmt::Display for Base64Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// AEAD entry point chosen by the caller.
///
/// AES-GCM picks its key size from the key length; the two ChaCha variants
/// both take 32-byte keys and are never inferred from ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CipherFamily {
    #[serde(rename = "aes-gcm")]
    AesGcm,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    #[default]
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
}

impl CipherFamily {
    pub const ALL: [CipherFamily; 3] = [
        CipherFamily::AesGcm,
        CipherFamily::ChaCha20Poly1305,
        CipherFamily::XChaCha20Poly1305,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CipherFamily::AesGcm => "AES-GCM",
            CipherFamily::ChaCha20Poly1305 => "ChaCha20-Poly1305",
            CipherFamily::XChaCha20Poly1305 => "XChaCha20-Poly1305",
        }
    }
}

impl fmt::Display for CipherFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
