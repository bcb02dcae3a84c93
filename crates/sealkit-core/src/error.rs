use thiserror::Error;

pub type CryptResult<T> = Result<T, CryptError>;

#[derive(Debug, Error)]
pub enum CryptError {
    #[error("invalid key length for {cipher}: {actual} bytes (expected {expected})")]
    Construction {
        cipher: &'static str,
        actual: usize,
        expected: &'static str,
    },

    #[error("entropy source failed: {0}")]
    Randomness(String),

    /// Tag or OAEP integrity check failed. Carries no cause on purpose.
    #[error("message authentication failed")]
    Authentication,

    #[error("{what} has wrong length: {actual} bytes (expected {expected})")]
    Length {
        what: &'static str,
        actual: usize,
        expected: String,
    },

    #[error("key parse error: {0}")]
    KeyParse(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("plaintext is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
