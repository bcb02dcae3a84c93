//! AEAD encryption/decryption over the suites in [`CipherSuite`].
//!
//! Every encrypt call draws a fresh random nonce. Nothing is bound as
//! associated data.
//!
//! Combined format (binary):
//! ```text
//! [nonce: 12 or 24 bytes][ciphertext][16 bytes: tag]
//! ```

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, Nonce},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm,
};
use chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroize;

use sealkit_core::{CipherFamily, CryptError, CryptResult};

use crate::suite::{family_nonce_size, CipherSuite};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Output of a split-form encrypt: ciphertext (with trailing tag) and the
/// nonce it was sealed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

impl Sealed {
    /// `nonce || ciphertext`
    pub fn into_combined(self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.nonce.len() + self.ciphertext.len());
        result.extend_from_slice(&self.nonce);
        result.extend_from_slice(&self.ciphertext);
        result
    }
}

/// AEAD entry point for one cipher family.
///
/// AES-GCM resolves its key size per call from the key length; the ChaCha
/// variants must be picked explicitly since both take 32-byte keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetricCipher {
    family: CipherFamily,
}

impl SymmetricCipher {
    pub const AES_GCM: Self = Self::new(CipherFamily::AesGcm);
    pub const CHACHA20_POLY1305: Self = Self::new(CipherFamily::ChaCha20Poly1305);
    pub const XCHACHA20_POLY1305: Self = Self::new(CipherFamily::XChaCha20Poly1305);

    pub const fn new(family: CipherFamily) -> Self {
        Self { family }
    }

    pub const fn family(&self) -> CipherFamily {
        self.family
    }

    pub const fn nonce_size(&self) -> usize {
        family_nonce_size(self.family)
    }

    /// Encrypt `plaintext` under `key` with a nonce from the OS RNG.
    pub fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> CryptResult<Sealed> {
        self.encrypt_with_rng(&mut OsRng, key, plaintext)
    }

    /// Encrypt with a caller-supplied RNG for the nonce.
    ///
    /// An RNG failure aborts the call with [`CryptError::Randomness`].
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        key: &[u8],
        plaintext: &[u8],
    ) -> CryptResult<Sealed> {
        let suite = CipherSuite::resolve(self.family, key)?;

        let mut nonce = vec![0u8; suite.nonce_size()];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|e| CryptError::Randomness(e.to_string()))?;

        let ciphertext = seal(suite, key, &nonce, plaintext)?;
        debug!(
            suite = suite.name(),
            plaintext_len = plaintext.len(),
            "sealed"
        );
        Ok(Sealed { ciphertext, nonce })
    }

    /// Decrypt and authenticate `ciphertext` (tag trailing).
    ///
    /// Any tag failure, whether from tampering, the wrong key or the wrong
    /// nonce, is reported as [`CryptError::Authentication`].
    pub fn decrypt(&self, key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
        let suite = CipherSuite::resolve(self.family, key)?;
        if nonce.len() != suite.nonce_size() {
            return Err(CryptError::Length {
                what: "nonce",
                actual: nonce.len(),
                expected: suite.nonce_size().to_string(),
            });
        }

        let plaintext = open(suite, key, nonce, ciphertext)?;
        debug!(
            suite = suite.name(),
            ciphertext_len = ciphertext.len(),
            "opened"
        );
        Ok(plaintext)
    }

    /// Encrypt and return `nonce || ciphertext`.
    pub fn encrypt_combined(&self, key: &[u8], plaintext: &[u8]) -> CryptResult<Vec<u8>> {
        Ok(self.encrypt(key, plaintext)?.into_combined())
    }

    /// Split `nonce || ciphertext` and decrypt.
    ///
    /// Input shorter than the nonce fails with [`CryptError::Length`] before
    /// the key is looked at.
    pub fn decrypt_combined(&self, key: &[u8], combined: &[u8]) -> CryptResult<Vec<u8>> {
        let nonce_size = self.nonce_size();
        if combined.len() < nonce_size {
            return Err(CryptError::Length {
                what: "combined ciphertext",
                actual: combined.len(),
                expected: format!("at least {nonce_size}"),
            });
        }

        let (nonce, ciphertext) = combined.split_at(nonce_size);
        self.decrypt(key, nonce, ciphertext)
    }

    pub fn encrypt_str(&self, key: &[u8], text: &str) -> CryptResult<Sealed> {
        self.encrypt(key, text.as_bytes())
    }

    pub fn decrypt_to_string(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
    ) -> CryptResult<String> {
        utf8_plaintext(self.decrypt(key, nonce, ciphertext)?)
    }

    pub fn encrypt_combined_str(&self, key: &[u8], text: &str) -> CryptResult<Vec<u8>> {
        self.encrypt_combined(key, text.as_bytes())
    }

    pub fn decrypt_combined_to_string(&self, key: &[u8], combined: &[u8]) -> CryptResult<String> {
        utf8_plaintext(self.decrypt_combined(key, combined)?)
    }
}

impl From<CipherFamily> for SymmetricCipher {
    fn from(family: CipherFamily) -> Self {
        Self::new(family)
    }
}

/// Convert decrypted bytes to a `String`, wiping them if they are not UTF-8.
pub(crate) fn utf8_plaintext(bytes: Vec<u8>) -> CryptResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        let cause = e.utf8_error();
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptError::Utf8(cause)
    })
}

fn seal(suite: CipherSuite, key: &[u8], nonce: &[u8], plaintext: &[u8]) -> CryptResult<Vec<u8>> {
    match suite {
        CipherSuite::Aes128Gcm => seal_with::<Aes128Gcm>(suite, key, nonce, plaintext),
        CipherSuite::Aes192Gcm => seal_with::<Aes192Gcm>(suite, key, nonce, plaintext),
        CipherSuite::Aes256Gcm => seal_with::<Aes256Gcm>(suite, key, nonce, plaintext),
        CipherSuite::ChaCha20Poly1305 => {
            seal_with::<ChaCha20Poly1305>(suite, key, nonce, plaintext)
        }
        CipherSuite::XChaCha20Poly1305 => {
            seal_with::<XChaCha20Poly1305>(suite, key, nonce, plaintext)
        }
    }
}

fn open(suite: CipherSuite, key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
    match suite {
        CipherSuite::Aes128Gcm => open_with::<Aes128Gcm>(suite, key, nonce, ciphertext),
        CipherSuite::Aes192Gcm => open_with::<Aes192Gcm>(suite, key, nonce, ciphertext),
        CipherSuite::Aes256Gcm => open_with::<Aes256Gcm>(suite, key, nonce, ciphertext),
        CipherSuite::ChaCha20Poly1305 => {
            open_with::<ChaCha20Poly1305>(suite, key, nonce, ciphertext)
        }
        CipherSuite::XChaCha20Poly1305 => {
            open_with::<XChaCha20Poly1305>(suite, key, nonce, ciphertext)
        }
    }
}

// Callers guarantee `nonce.len() == suite.nonce_size()`.
fn seal_with<C: Aead + KeyInit>(
    suite: CipherSuite,
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
) -> CryptResult<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| invalid_key(suite, key))?;
    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|_| CryptError::Encoding(format!("{suite} seal failed: plaintext too long")))
}

fn open_with<C: Aead + KeyInit>(
    suite: CipherSuite,
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> CryptResult<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| invalid_key(suite, key))?;
    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), ciphertext)
        .map_err(|_| CryptError::Authentication)
}

fn invalid_key(suite: CipherSuite, key: &[u8]) -> CryptError {
    CryptError::Construction {
        cipher: suite.name(),
        actual: key.len(),
        expected: match suite {
            CipherSuite::Aes128Gcm => "16",
            CipherSuite::Aes192Gcm => "24",
            _ => "32",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NONCE_SIZE, TAG_SIZE, XNONCE_SIZE};
    use proptest::prelude::*;

    /// Always reports entropy failure; `fill_bytes` would hand out zeros.
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    fn key_for(suite: CipherSuite) -> Vec<u8> {
        (0..suite.key_size()).map(|i| i as u8).collect()
    }

    fn cipher_for(suite: CipherSuite) -> SymmetricCipher {
        SymmetricCipher::new(suite.family())
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip_all_suites() {
        for suite in CipherSuite::ALL {
            let cipher = cipher_for(suite);
            let key = key_for(suite);
            let plaintext = b"hello, sealed world!";

            let sealed = cipher.encrypt(&key, plaintext).unwrap();
            assert_eq!(sealed.nonce.len(), suite.nonce_size(), "{suite}");

            let decrypted = cipher.decrypt(&key, &sealed.nonce, &sealed.ciphertext).unwrap();
            assert_eq!(&decrypted, plaintext, "{suite}");
        }
    }

    #[test]
    fn test_encrypt_decrypt_empty() {
        for suite in CipherSuite::ALL {
            let cipher = cipher_for(suite);
            let key = key_for(suite);

            let combined = cipher.encrypt_combined(&key, b"").unwrap();
            assert_eq!(combined.len(), suite.nonce_size() + TAG_SIZE);
            assert_eq!(cipher.decrypt_combined(&key, &combined).unwrap(), b"");
        }
    }

    #[test]
    fn test_chacha_hello_world_combined_layout() {
        let key = [0u8; 32];
        let cipher = SymmetricCipher::CHACHA20_POLY1305;

        let combined = cipher.encrypt_combined_str(&key, "Hello world").unwrap();
        assert_eq!(combined.len(), 12 + 11 + 16);

        let (nonce, ciphertext) = combined.split_at(NONCE_SIZE);
        assert_eq!(ciphertext.len(), 27);
        let text = cipher.decrypt_to_string(&key, nonce, ciphertext).unwrap();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_xchacha_combined_uses_24_byte_nonce() {
        let key = [7u8; 32];
        let cipher = SymmetricCipher::XCHACHA20_POLY1305;

        let combined = cipher.encrypt_combined(&key, b"abc").unwrap();
        assert_eq!(combined.len(), XNONCE_SIZE + 3 + TAG_SIZE);
        assert_eq!(cipher.decrypt_combined(&key, &combined).unwrap(), b"abc");
    }

    #[test]
    fn test_short_combined_input_is_length_error() {
        let key = [0u8; 32];
        let err = SymmetricCipher::AES_GCM
            .decrypt_combined(&key, &[1, 2, 3, 4, 5])
            .unwrap_err();
        assert!(
            matches!(err, CryptError::Length { actual: 5, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_length_check_precedes_key_validation() {
        // A bad key would be a Construction error; the length check runs first.
        let err = SymmetricCipher::AES_GCM
            .decrypt_combined(&[0u8; 7], &[0u8; 5])
            .unwrap_err();
        assert!(matches!(err, CryptError::Length { .. }), "got {err:?}");
    }

    #[test]
    fn test_combined_exactly_nonce_sized_is_authentication_error() {
        let key = [0u8; 32];
        let err = SymmetricCipher::CHACHA20_POLY1305
            .decrypt_combined(&key, &[0u8; NONCE_SIZE])
            .unwrap_err();
        assert!(matches!(err, CryptError::Authentication), "got {err:?}");
    }

    #[test]
    fn test_split_nonce_wrong_length() {
        let key = [0u8; 32];
        let cipher = SymmetricCipher::XCHACHA20_POLY1305;
        let sealed = cipher.encrypt(&key, b"data").unwrap();

        let err = cipher
            .decrypt(&key, &sealed.nonce[..NONCE_SIZE], &sealed.ciphertext)
            .unwrap_err();
        assert!(matches!(err, CryptError::Length { what: "nonce", .. }));
    }

    #[test]
    fn test_invalid_key_length_on_encrypt_and_decrypt() {
        let bad_key = [0u8; 20];
        for cipher in [
            SymmetricCipher::AES_GCM,
            SymmetricCipher::CHACHA20_POLY1305,
            SymmetricCipher::XCHACHA20_POLY1305,
        ] {
            let err = cipher.encrypt(&bad_key, b"x").unwrap_err();
            assert!(matches!(err, CryptError::Construction { actual: 20, .. }));

            let nonce = vec![0u8; cipher.nonce_size()];
            let err = cipher.decrypt(&bad_key, &nonce, &[0u8; 32]).unwrap_err();
            assert!(matches!(err, CryptError::Construction { .. }));
        }
    }

    #[test]
    fn test_randomness_failure_aborts() {
        for suite in CipherSuite::ALL {
            let err = cipher_for(suite)
                .encrypt_with_rng(&mut FailingRng, &key_for(suite), b"secret")
                .unwrap_err();
            assert!(matches!(err, CryptError::Randomness(_)), "{suite}: {err:?}");
        }
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let key = [9u8; 32];
        let cipher = SymmetricCipher::AES_GCM;
        let a = cipher.encrypt(&key, b"same").unwrap();
        let b = cipher.encrypt(&key, b"same").unwrap();

        assert_ne!(a.nonce, b.nonce, "nonces must not repeat");
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_decrypt_wrong_key() {
        for suite in CipherSuite::ALL {
            let cipher = cipher_for(suite);
            let combined = cipher.encrypt_combined(&key_for(suite), b"secret data").unwrap();
            let other = vec![0xEEu8; suite.key_size()];

            let err = cipher.decrypt_combined(&other, &combined).unwrap_err();
            assert!(matches!(err, CryptError::Authentication), "{suite}");
        }
    }

    #[test]
    fn test_aes_key_size_mismatch_between_calls() {
        // Sealed under AES-128, opened with a 256-bit key: different suite, so
        // the tag cannot verify.
        let cipher = SymmetricCipher::AES_GCM;
        let combined = cipher.encrypt_combined(&[1u8; 16], b"payload").unwrap();
        let err = cipher.decrypt_combined(&[1u8; 32], &combined).unwrap_err();
        assert!(matches!(err, CryptError::Authentication));
    }

    #[test]
    fn test_chacha_variants_not_interchangeable() {
        let key = [3u8; 32];
        let combined = SymmetricCipher::XCHACHA20_POLY1305
            .encrypt_combined(&key, b"payload")
            .unwrap();
        let err = SymmetricCipher::CHACHA20_POLY1305
            .decrypt_combined(&key, &combined)
            .unwrap_err();
        assert!(matches!(err, CryptError::Authentication));
    }

    #[test]
    fn test_every_bit_flip_is_rejected() {
        for suite in CipherSuite::ALL {
            let cipher = cipher_for(suite);
            let key = key_for(suite);
            let combined = cipher.encrypt_combined(&key, b"tamper me").unwrap();

            for bit in 0..combined.len() * 8 {
                let mut tampered = combined.clone();
                tampered[bit / 8] ^= 1 << (bit % 8);
                let err = cipher.decrypt_combined(&key, &tampered).unwrap_err();
                assert!(
                    matches!(err, CryptError::Authentication),
                    "{suite}: flipping bit {bit} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_truncated_tag_rejected() {
        let key = [0u8; 32];
        let cipher = SymmetricCipher::CHACHA20_POLY1305;
        let mut combined = cipher.encrypt_combined(&key, b"truncate").unwrap();
        combined.pop();
        assert!(matches!(
            cipher.decrypt_combined(&key, &combined),
            Err(CryptError::Authentication)
        ));
    }

    #[test]
    fn test_non_utf8_plaintext() {
        let key = [0u8; 32];
        let cipher = SymmetricCipher::XCHACHA20_POLY1305;
        let combined = cipher.encrypt_combined(&key, &[0xFF, 0xFE, 0x00]).unwrap();

        let err = cipher.decrypt_combined_to_string(&key, &combined).unwrap_err();
        assert!(matches!(err, CryptError::Utf8(_)));
    }

    #[test]
    fn test_into_combined_layout() {
        let sealed = Sealed {
            ciphertext: vec![4, 5, 6],
            nonce: vec![1, 2, 3],
        };
        assert_eq!(sealed.into_combined(), vec![1, 2, 3, 4, 5, 6]);
    }

    fn suite_strategy() -> impl Strategy<Value = CipherSuite> {
        proptest::sample::select(CipherSuite::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn split_roundtrip(
            suite in suite_strategy(),
            data in proptest::collection::vec(any::<u8>(), 0..=4096),
        ) {
            let cipher = cipher_for(suite);
            let key = key_for(suite);
            let sealed = cipher.encrypt(&key, &data).unwrap();
            prop_assert_eq!(sealed.ciphertext.len(), data.len() + TAG_SIZE);
            let back = cipher.decrypt(&key, &sealed.nonce, &sealed.ciphertext).unwrap();
            prop_assert_eq!(back, data);
        }

        #[test]
        fn combined_roundtrip(
            suite in suite_strategy(),
            data in proptest::collection::vec(any::<u8>(), 0..=4096),
        ) {
            let cipher = cipher_for(suite);
            let key = key_for(suite);
            let combined = cipher.encrypt_combined(&key, &data).unwrap();
            prop_assert_eq!(combined.len(), suite.nonce_size() + data.len() + TAG_SIZE);
            let back = cipher.decrypt_combined(&key, &combined).unwrap();
            prop_assert_eq!(back, data);
        }

        #[test]
        fn short_combined_never_panics(
            suite in suite_strategy(),
            data in proptest::collection::vec(any::<u8>(), 0..24),
        ) {
            let cipher = cipher_for(suite);
            let result = cipher.decrypt_combined(&key_for(suite), &data);
            if data.len() < suite.nonce_size() {
                prop_assert!(
                    matches!(result, Err(CryptError::Length { .. })),
                    "expected Length error"
                );
            } else {
                prop_assert!(
                    matches!(result, Err(CryptError::Authentication)),
                    "expected Authentication error"
                );
            }
        }
    }
}
