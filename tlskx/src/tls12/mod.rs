use core::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::conn::ConnectionRandoms;
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::{hash, hmac, CryptoProvider};
use crate::enums::ProtocolVersion;
use crate::error::Error;
use crate::log::trace;
use crate::suites::SupportedCipherSuite;

mod prf;

/// Length of a master secret, in every protocol version.
pub const MASTER_SECRET_LEN: usize = 48;

/// The master secret of a connection.
///
/// The bytes are zeroed when this is dropped.  Comparison runs in constant time.
pub struct MasterSecret([u8; MASTER_SECRET_LEN]);

impl MasterSecret {
    /// Wrap `bytes` as a master secret.
    pub fn new(bytes: [u8; MASTER_SECRET_LEN]) -> Self {
        Self(bytes)
    }

    /// The secret bytes.
    pub fn secret_bytes(&self) -> &[u8; MASTER_SECRET_LEN] {
        &self.0
    }
}

impl PartialEq for MasterSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for MasterSecret {}

impl Drop for MasterSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecret").finish_non_exhaustive()
    }
}

/// Everything besides the premaster secret that goes into the master secret.
#[derive(Debug, Clone, Copy)]
pub struct MasterSecretInput<'a> {
    /// The negotiated protocol version, which selects the PRF.
    pub version: ProtocolVersion,
    /// The negotiated cipher suite; its PRF hash is used in TLS1.2.
    pub suite: &'a SupportedCipherSuite,
    /// The hello randoms.
    pub randoms: &'a ConnectionRandoms,
    /// The session hash, if the extended master secret (RFC 7627) was negotiated.
    pub session_hash: Option<&'a [u8]>,
}

/// Turns a premaster secret into a master secret.
///
/// The key exchange calls this exactly once per handshake, with the same
/// arguments shape whether or not an RSA premaster secret decrypted correctly.
pub trait MasterSecretDeriver: Send + Sync + fmt::Debug {
    /// Derive the master secret from `premaster`.
    fn derive(
        &self,
        input: &MasterSecretInput<'_>,
        premaster: &[u8],
    ) -> Result<MasterSecret, Error>;
}

/// The standard master secret derivation of SSLv3, TLS1.0, TLS1.1 and TLS1.2,
/// including the extended master secret.
#[derive(Debug)]
pub struct PrfMasterSecret {
    provider: Arc<CryptoProvider>,
}

impl PrfMasterSecret {
    /// Derive master secrets with the hashes and HMACs of `provider`.
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Result<&'static dyn hash::Hash, Error> {
        self.provider
            .hash_provider
            .hash(algorithm)
            .ok_or_else(|| Error::General(format!("no {:?} hash available", algorithm)))
    }

    fn hmac(&self, algorithm: HashAlgorithm) -> Result<&'static dyn hmac::Hmac, Error> {
        self.provider
            .hash_provider
            .hmac(algorithm)
            .ok_or_else(|| Error::General(format!("no HMAC-{:?} available", algorithm)))
    }
}

impl MasterSecretDeriver for PrfMasterSecret {
    fn derive(
        &self,
        input: &MasterSecretInput<'_>,
        premaster: &[u8],
    ) -> Result<MasterSecret, Error> {
        let mut out = MasterSecret([0u8; MASTER_SECRET_LEN]);

        let randoms = join_randoms(&input.randoms.client, &input.randoms.server);
        let (label, seed) = match input.session_hash {
            Some(hash) => ("extended master secret", Seed::Ems(hash)),
            None => ("master secret", Seed::Randoms(randoms)),
        };
        trace!(
            "deriving master secret for {:?} with label {:?}",
            input.version,
            label
        );

        match input.version {
            ProtocolVersion::SSLv3 => {
                if input.session_hash.is_some() {
                    return Err(Error::General(
                        "extended master secret is not defined for SSLv3".into(),
                    ));
                }
                prf::ssl3_master_secret(
                    &mut out.0,
                    self.hash(HashAlgorithm::MD5)?,
                    self.hash(HashAlgorithm::SHA1)?,
                    premaster,
                    &input.randoms.client,
                    &input.randoms.server,
                )?;
            }
            ProtocolVersion::TLSv1_0 | ProtocolVersion::TLSv1_1 => prf::tls10_prf(
                &mut out.0,
                self.hmac(HashAlgorithm::MD5)?,
                self.hmac(HashAlgorithm::SHA1)?,
                premaster,
                label.as_bytes(),
                seed.as_ref(),
            )?,
            ProtocolVersion::TLSv1_2 => prf::prf(
                &mut out.0,
                self.hmac(input.suite.prf_hash)?
                    .with_key(premaster)?
                    .as_ref(),
                label.as_bytes(),
                seed.as_ref(),
            ),
            version => {
                return Err(Error::General(format!(
                    "no master secret derivation for {:?}",
                    version
                )))
            }
        }

        Ok(out)
    }
}

enum Seed<'a> {
    Ems(&'a [u8]),
    Randoms([u8; 64]),
}

impl AsRef<[u8]> for Seed<'_> {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Ems(seed) => seed,
            Self::Randoms(randoms) => randoms.as_ref(),
        }
    }
}

fn join_randoms(first: &[u8; 32], second: &[u8; 32]) -> [u8; 64] {
    let mut randoms = [0u8; 64];
    randoms[..32].copy_from_slice(first);
    randoms[32..].copy_from_slice(second);
    randoms
}
