pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, SealkitConfig};
pub use error::{CryptError, CryptResult};
pub use types::{Base64Variant, CipherFamily, HashAlgorithm};
