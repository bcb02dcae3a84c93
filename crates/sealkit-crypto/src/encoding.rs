//! RFC 4648 base64 transport encoding.
//!
//! Decoding is strict per variant: padded variants require canonical `=`
//! padding, unpadded variants reject it, and each alphabet rejects the
//! other's `+/` or `-_` characters.

use base64::{
    engine::{
        general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
        GeneralPurpose,
    },
    Engine,
};

use sealkit_core::{Base64Variant, CryptError, CryptResult};

fn engine(variant: Base64Variant) -> &'static GeneralPurpose {
    match variant {
        Base64Variant::Standard => &STANDARD,
        Base64Variant::StandardNoPad => &STANDARD_NO_PAD,
        Base64Variant::UrlSafe => &URL_SAFE,
        Base64Variant::UrlSafeNoPad => &URL_SAFE_NO_PAD,
    }
}

pub fn encode(variant: Base64Variant, bytes: impl AsRef<[u8]>) -> String {
    engine(variant).encode(bytes)
}

pub fn decode(variant: Base64Variant, text: impl AsRef<[u8]>) -> CryptResult<Vec<u8>> {
    engine(variant)
        .decode(text)
        .map_err(|e| CryptError::Decoding(format!("{variant} base64: {e}")))
}
