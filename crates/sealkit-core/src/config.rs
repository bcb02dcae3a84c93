use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CryptError, CryptResult};
use crate::types::{Base64Variant, CipherFamily, HashAlgorithm};

/// Top-level configuration (loaded from sealkit.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealkitConfig {
    pub symmetric: SymmetricConfig,
    pub asymmetric: AsymmetricConfig,
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetricConfig {
    /// AEAD entry point (default: xchacha20-poly1305)
    pub cipher: CipherFamily,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsymmetricConfig {
    /// OAEP digest applied to freshly loaded key handles (default: sha256)
    pub oaep_hash: HashAlgorithm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Base64 alphabet for text transport (default: standard)
    pub variant: Base64Variant,
}

impl SealkitConfig {
    pub fn from_toml_str(s: &str) -> CryptResult<Self> {
        toml::from_str(s).map_err(|e| CryptError::Config(e.to_string()))
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: &Path) -> CryptResult<SealkitConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CryptError::Config(format!("parsing {}: {e}", path.display())))
    } else {
        tracing::warn!(
            "config file not found: {}  (using defaults)",
            path.display()
        );
        Ok(SealkitConfig::default())
    }
}
