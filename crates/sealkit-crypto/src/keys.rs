//! PEM key loading: SPKI `PUBLIC KEY` and PKCS#8 `PRIVATE KEY` blocks.
//!
//! Loading returns a handle or a typed error; there is no half-built
//! handle to check later. Keys of other algorithms (e.g. EC) load, but
//! RSA-OAEP refuses them with [`CryptError::TypeMismatch`].

use rsa::{
    pkcs1,
    pkcs8::{
        der::Decode, spki::SubjectPublicKeyInfoRef, DecodePrivateKey, ObjectIdentifier,
        PrivateKeyInfo,
    },
    traits::PublicKeyParts,
    BigUint, RsaPrivateKey, RsaPublicKey,
};
use tracing::debug;
use zeroize::Zeroizing;

use sealkit_core::{CryptError, CryptResult, HashAlgorithm};

use crate::oaep;

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Largest RSA modulus accepted from a `PUBLIC KEY` block, in bits.
pub const MAX_PUBLIC_MODULUS_BITS: usize = 16384;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const KNOWN_ALGORITHMS: [(ObjectIdentifier, &str); 6] = [
    (RSA_ENCRYPTION, "RSA"),
    (ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10"), "RSASSA-PSS"),
    (ObjectIdentifier::new_unwrap("1.2.840.10045.2.1"), "EC"),
    (ObjectIdentifier::new_unwrap("1.3.101.110"), "X25519"),
    (ObjectIdentifier::new_unwrap("1.3.101.112"), "Ed25519"),
    (ObjectIdentifier::new_unwrap("1.2.840.10040.4.1"), "DSA"),
];

fn algorithm_name(oid: ObjectIdentifier) -> &'static str {
    KNOWN_ALGORITHMS
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, name)| *name)
        .unwrap_or("unknown")
}

/// A parsed public key plus the OAEP digest to use with it.
///
/// Immutable once built; share freely across threads.
#[derive(Debug, Clone)]
pub struct PublicKeyHandle {
    rsa: Option<RsaPublicKey>,
    algorithm: ObjectIdentifier,
    hash: HashAlgorithm,
}

impl PublicKeyHandle {
    pub fn from_pem(pem: &str) -> CryptResult<Self> {
        load_public(pem)
    }

    /// Select the OAEP digest. Consumes the handle so the choice is fixed
    /// before first use.
    #[must_use]
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    pub fn algorithm_name(&self) -> &'static str {
        algorithm_name(self.algorithm)
    }

    pub fn is_rsa(&self) -> bool {
        self.rsa.is_some()
    }

    /// RSA modulus size in bytes, if this is an RSA key.
    pub fn modulus_bytes(&self) -> Option<usize> {
        self.rsa.as_ref().map(|k| k.size())
    }

    /// Largest plaintext OAEP accepts with this key and digest.
    pub fn max_plaintext_len(&self) -> Option<usize> {
        self.modulus_bytes()
            .and_then(|n| oaep::max_plaintext_len(n, self.hash))
    }

    pub fn rsa_key(&self) -> CryptResult<&RsaPublicKey> {
        self.rsa
            .as_ref()
            .ok_or_else(|| not_rsa(self.algorithm))
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> CryptResult<Vec<u8>> {
        oaep::encrypt_oaep(self, plaintext)
    }

    pub fn encrypt_str(&self, text: &str) -> CryptResult<Vec<u8>> {
        oaep::encrypt_oaep_str(self, text)
    }
}

/// A parsed private key plus the OAEP digest to use with it.
#[derive(Clone)]
pub struct PrivateKeyHandle {
    rsa: Option<RsaPrivateKey>,
    algorithm: ObjectIdentifier,
    hash: HashAlgorithm,
}

impl PrivateKeyHandle {
    pub fn from_pem(pem: &str) -> CryptResult<Self> {
        load_private(pem)
    }

    #[must_use]
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    pub fn algorithm_name(&self) -> &'static str {
        algorithm_name(self.algorithm)
    }

    pub fn is_rsa(&self) -> bool {
        self.rsa.is_some()
    }

    pub fn modulus_bytes(&self) -> Option<usize> {
        self.rsa.as_ref().map(|k| k.size())
    }

    /// The matching public key, carrying the same OAEP digest.
    pub fn public_key(&self) -> CryptResult<PublicKeyHandle> {
        let key = self.rsa_key()?;
        Ok(PublicKeyHandle {
            rsa: Some(key.to_public_key()),
            algorithm: self.algorithm,
            hash: self.hash,
        })
    }

    pub fn rsa_key(&self) -> CryptResult<&RsaPrivateKey> {
        self.rsa
            .as_ref()
            .ok_or_else(|| not_rsa(self.algorithm))
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
        oaep::decrypt_oaep(self, ciphertext)
    }

    pub fn decrypt_to_string(&self, ciphertext: &[u8]) -> CryptResult<String> {
        oaep::decrypt_oaep_to_string(self, ciphertext)
    }
}

impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("algorithm", &self.algorithm_name())
            .field("modulus_bytes", &self.modulus_bytes())
            .field("hash", &self.hash)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Parse one `PUBLIC KEY` PEM block (SubjectPublicKeyInfo).
pub fn load_public(pem: &str) -> CryptResult<PublicKeyHandle> {
    let der = decode_pem(pem, PUBLIC_KEY_LABEL)?;

    let spki = SubjectPublicKeyInfoRef::from_der(&der)
        .map_err(|e| CryptError::KeyParse(format!("SubjectPublicKeyInfo: {e}")))?;
    let algorithm = spki.algorithm.oid;

    let rsa = if algorithm == RSA_ENCRYPTION {
        let key = rsa_public_from_spki(spki.subject_public_key.as_bytes())?;
        debug!(algorithm = "RSA", modulus_bytes = key.size(), "loaded public key");
        Some(key)
    } else {
        debug!(algorithm = algorithm_name(algorithm), oid = %algorithm, "loaded non-RSA public key");
        None
    };

    Ok(PublicKeyHandle {
        rsa,
        algorithm,
        hash: HashAlgorithm::default(),
    })
}

/// Build an RSA public key from the PKCS#1 body of an SPKI block.
///
/// `from_public_key_der` caps the modulus at 4096 bits while PKCS#8
/// private keys load at any size, so the SPKI path builds the key itself.
fn rsa_public_from_spki(body: Option<&[u8]>) -> CryptResult<RsaPublicKey> {
    let body = body.ok_or_else(|| {
        CryptError::KeyParse("RSA public key: subject key is not octet aligned".into())
    })?;
    let parts = pkcs1::RsaPublicKey::from_der(body)
        .map_err(|err| CryptError::KeyParse(format!("RSA public key: {err}")))?;
    let n = BigUint::from_bytes_be(parts.modulus.as_bytes());
    let e = BigUint::from_bytes_be(parts.public_exponent.as_bytes());
    RsaPublicKey::new_with_max_size(n, e, MAX_PUBLIC_MODULUS_BITS)
        .map_err(|err| CryptError::KeyParse(format!("RSA public key: {err}")))
}

/// Parse one `PRIVATE KEY` PEM block (PKCS#8 PrivateKeyInfo).
pub fn load_private(pem: &str) -> CryptResult<PrivateKeyHandle> {
    let der = decode_pem(pem, PRIVATE_KEY_LABEL)?;

    let info = PrivateKeyInfo::from_der(&der)
        .map_err(|e| CryptError::KeyParse(format!("PKCS#8 PrivateKeyInfo: {e}")))?;
    let algorithm = info.algorithm.oid;

    let rsa = if algorithm == RSA_ENCRYPTION {
        let key = RsaPrivateKey::from_pkcs8_der(&der)
            .map_err(|e| CryptError::KeyParse(format!("RSA private key: {e}")))?;
        debug!(algorithm = "RSA", modulus_bytes = key.size(), "loaded private key");
        Some(key)
    } else {
        debug!(algorithm = algorithm_name(algorithm), oid = %algorithm, "loaded non-RSA private key");
        None
    };

    Ok(PrivateKeyHandle {
        rsa,
        algorithm,
        hash: HashAlgorithm::default(),
    })
}

/// Decode a single PEM block and check its label.
fn decode_pem(input: &str, expected: &str) -> CryptResult<Zeroizing<Vec<u8>>> {
    let (label, der) = pem_rfc7468::decode_vec(input.trim().as_bytes())
        .map_err(|e| CryptError::KeyParse(format!("PEM: {e}")))?;
    let der = Zeroizing::new(der);

    if label != expected {
        return Err(CryptError::TypeMismatch {
            expected: format!("PEM label \"{expected}\""),
            found: format!("\"{label}\""),
        });
    }
    Ok(der)
}

fn not_rsa(algorithm: ObjectIdentifier) -> CryptError {
    CryptError::TypeMismatch {
        expected: "RSA key".into(),
        found: format!("{} key ({algorithm})", algorithm_name(algorithm)),
    }
}
