use core::fmt::Debug;
use std::sync::Arc;

use pki_types::{PrivateKeyDer, SubjectPublicKeyInfoDer};

use crate::error::Error;

/// RustCrypto-based CryptoProvider.
#[cfg(feature = "rust_crypto")]
pub mod rust_crypto;

/// Hashing interfaces.
pub mod hash;

/// HMAC interfaces.
pub mod hmac;

mod kx;
mod rsa;

pub use crate::msgs::ffdhe_groups::FfdheGroup;
pub use crate::rand::GetRandomFailed;
pub use kx::{ActiveKeyExchange, SharedSecret, SupportedDhe};
pub use rsa::{RsaDecryptingKey, RsaEncryptingKey};

/// Controls core cryptography used by the key exchange.
///
/// This crate doesn't implement RSA, Diffie-Hellman, hashing or random number
/// generation itself: it reaches for them through the fields of this struct.
/// One `CryptoProvider` is shared (behind an `Arc`) by every connection using
/// a [`KxConfig`](crate::KxConfig), so each implementation must be safe for
/// concurrent use without serializing handshakes.
///
/// [`rust_crypto::default_provider()`] returns one built on the RustCrypto crates.
#[derive(Debug, Clone)]
pub struct CryptoProvider {
    /// Source of cryptographically secure random numbers.
    pub secure_random: &'static dyn SecureRandom,

    /// Provider for loading RSA keys from DER.
    pub key_provider: &'static dyn KeyProvider,

    /// Finite field Diffie-Hellman.
    pub dhe: &'static dyn SupportedDhe,

    /// Hash functions and HMAC, for master secret derivation.
    pub hash_provider: &'static dyn HashProvider,
}

/// A source of cryptographically secure randomness.
pub trait SecureRandom: Send + Sync + Debug {
    /// Fill the given buffer with random bytes.
    ///
    /// The bytes must be sourced from a cryptographically secure random number
    /// generator seeded with good quality, secret entropy.
    ///
    /// This is used for the premaster secret, including the one substituted
    /// when an RSA premaster secret fails to decrypt.
    fn fill(&self, buf: &mut [u8]) -> Result<(), GetRandomFailed>;
}

/// A mechanism for loading RSA keys from their DER encodings.
pub trait KeyProvider: Send + Sync + Debug {
    /// Decode and validate an RSA private key from `key_der`.
    ///
    /// Return an error if the key type encoding is not supported, or if the key fails
    /// validation.
    fn load_rsa_private_key(
        &self,
        key_der: PrivateKeyDer<'static>,
    ) -> Result<Arc<dyn RsaDecryptingKey>, Error>;

    /// Decode an RSA public key from a `SubjectPublicKeyInfo`.
    ///
    /// The client gets this from the server's certificate.
    fn load_rsa_public_key(
        &self,
        spki: SubjectPublicKeyInfoDer<'_>,
    ) -> Result<Box<dyn RsaEncryptingKey>, Error>;
}

/// Hash functions and HMACs, looked up by algorithm.
pub trait HashProvider: Send + Sync + Debug {
    /// The hash function `algorithm`, or `None` if it isn't supported.
    fn hash(&self, algorithm: hash::HashAlgorithm) -> Option<&'static dyn hash::Hash>;

    /// HMAC over the hash function `algorithm`, or `None` if it isn't supported.
    fn hmac(&self, algorithm: hash::HashAlgorithm) -> Option<&'static dyn hmac::Hmac>;
}
