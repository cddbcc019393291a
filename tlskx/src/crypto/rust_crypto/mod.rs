use std::error::Error as StdError;
use std::sync::Arc;

use pki_types::{PrivateKeyDer, SubjectPublicKeyInfoDer};
use rand_core::RngCore;

use crate::crypto::{
    hash, hmac, CryptoProvider, GetRandomFailed, HashProvider, KeyProvider, RsaDecryptingKey,
    RsaEncryptingKey, SecureRandom,
};
use crate::error::{Error, OtherError};

mod ffdhe;
mod hash_impl;
mod hmac_impl;
mod rsa;

/// A `CryptoProvider` backed by the RustCrypto crates.
///
/// RSA comes from `rsa`, finite field Diffie-Hellman from `num-bigint`,
/// hashes from `sha2`, `sha1` and `md-5`, and randomness from the operating
/// system via `rand_core::OsRng`.
pub fn default_provider() -> CryptoProvider {
    CryptoProvider {
        secure_random: &Provider,
        key_provider: &Provider,
        dhe: &ffdhe::Ffdhe,
        hash_provider: &Provider,
    }
}

#[derive(Debug)]
struct Provider;

impl SecureRandom for Provider {
    fn fill(&self, bytes: &mut [u8]) -> Result<(), GetRandomFailed> {
        rand_core::OsRng
            .try_fill_bytes(bytes)
            .map_err(|_| GetRandomFailed)
    }
}

impl KeyProvider for Provider {
    fn load_rsa_private_key(
        &self,
        key_der: PrivateKeyDer<'static>,
    ) -> Result<Arc<dyn RsaDecryptingKey>, Error> {
        Ok(Arc::new(rsa::RsaDecrypter::try_from(&key_der)?))
    }

    fn load_rsa_public_key(
        &self,
        spki: SubjectPublicKeyInfoDer<'_>,
    ) -> Result<Box<dyn RsaEncryptingKey>, Error> {
        Ok(Box::new(rsa::RsaEncrypter::try_from(&spki)?))
    }
}

impl HashProvider for Provider {
    fn hash(&self, algorithm: hash::HashAlgorithm) -> Option<&'static dyn hash::Hash> {
        match algorithm {
            hash::HashAlgorithm::MD5 => Some(&hash_impl::MD5),
            hash::HashAlgorithm::SHA1 => Some(&hash_impl::SHA1),
            hash::HashAlgorithm::SHA256 => Some(&hash_impl::SHA256),
            hash::HashAlgorithm::SHA384 => Some(&hash_impl::SHA384),
            _ => None,
        }
    }

    fn hmac(&self, algorithm: hash::HashAlgorithm) -> Option<&'static dyn hmac::Hmac> {
        match algorithm {
            hash::HashAlgorithm::MD5 => Some(&hmac_impl::HMAC_MD5),
            hash::HashAlgorithm::SHA1 => Some(&hmac_impl::HMAC_SHA1),
            hash::HashAlgorithm::SHA256 => Some(&hmac_impl::HMAC_SHA256),
            hash::HashAlgorithm::SHA384 => Some(&hmac_impl::HMAC_SHA384),
            _ => None,
        }
    }
}

fn other_err(err: impl StdError + Send + Sync + 'static) -> Error {
    Error::Other(OtherError(Arc::new(err)))
}
