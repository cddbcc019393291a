use core::fmt;
use std::sync::Arc;

use pki_types::PrivateKeyDer;

use crate::crypto::{CryptoProvider, RsaDecryptingKey};
use crate::error::Error;
use crate::tls12::{MasterSecretDeriver, PrfMasterSecret};

/// Configuration shared by the key exchange of many connections.
///
/// Make one with [`KxConfig::builder()`], wrap it in an `Arc`, and hand that
/// to each [`HandshakeContext`](crate::HandshakeContext).  Nothing in here is
/// mutated by a handshake.
#[derive(Clone, Debug)]
pub struct KxConfig {
    pub(crate) provider: Arc<CryptoProvider>,
    pub(crate) rsa_private_key: Option<Arc<dyn RsaDecryptingKey>>,
    pub(crate) master_secret_deriver: Arc<dyn MasterSecretDeriver>,
}

impl KxConfig {
    /// Start building a `KxConfig` that uses `provider` for its cryptography.
    pub fn builder(provider: Arc<CryptoProvider>) -> KxConfigBuilder {
        KxConfigBuilder {
            provider,
            rsa_private_key: None,
            master_secret_deriver: None,
        }
    }

    /// The cryptography provider.
    pub fn provider(&self) -> &Arc<CryptoProvider> {
        &self.provider
    }

    /// Whether a server RSA private key was configured.
    pub fn has_rsa_private_key(&self) -> bool {
        self.rsa_private_key.is_some()
    }
}

/// A builder for [`KxConfig`].
///
/// ```no_run
/// # #[cfg(feature = "rust_crypto")] {
/// # use std::sync::Arc;
/// # let key_der: tlskx::pki_types::PrivateKeyDer<'static> = panic!();
/// let provider = Arc::new(tlskx::crypto::rust_crypto::default_provider());
/// let config = tlskx::KxConfig::builder(provider)
///     .with_rsa_private_key(key_der)
///     .unwrap()
///     .build();
/// # }
/// ```
pub struct KxConfigBuilder {
    provider: Arc<CryptoProvider>,
    rsa_private_key: Option<Arc<dyn RsaDecryptingKey>>,
    master_secret_deriver: Option<Arc<dyn MasterSecretDeriver>>,
}

impl KxConfigBuilder {
    /// Use the RSA private key in `key_der` (PKCS#8 or PKCS#1) to receive RSA
    /// key transport.
    ///
    /// The key is decoded by the provider's [`KeyProvider`](crate::crypto::KeyProvider),
    /// which fails if it doesn't understand the encoding.
    pub fn with_rsa_private_key(mut self, key_der: PrivateKeyDer<'static>) -> Result<Self, Error> {
        self.rsa_private_key = Some(
            self.provider
                .key_provider
                .load_rsa_private_key(key_der)?,
        );
        Ok(self)
    }

    /// Use an already loaded RSA private key.
    pub fn with_rsa_decrypting_key(mut self, key: Arc<dyn RsaDecryptingKey>) -> Self {
        self.rsa_private_key = Some(key);
        self
    }

    /// Replace the default master secret derivation.
    ///
    /// Without this, [`PrfMasterSecret`] over the same provider is used.
    pub fn with_master_secret_deriver(mut self, deriver: Arc<dyn MasterSecretDeriver>) -> Self {
        self.master_secret_deriver = Some(deriver);
        self
    }

    /// Finish building.
    pub fn build(self) -> KxConfig {
        let master_secret_deriver = match self.master_secret_deriver {
            Some(deriver) => deriver,
            None => Arc::new(PrfMasterSecret::new(Arc::clone(&self.provider))),
        };
        KxConfig {
            provider: self.provider,
            rsa_private_key: self.rsa_private_key,
            master_secret_deriver,
        }
    }
}

impl fmt::Debug for KxConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KxConfigBuilder")
            .field("provider", &self.provider)
            .field("rsa_private_key", &self.rsa_private_key.is_some())
            .finish_non_exhaustive()
    }
}
