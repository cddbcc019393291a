use core::fmt;

use crate::enums::CipherSuite;
use crate::msgs::enums::HashAlgorithm;

/// Describes supported key exchange mechanisms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyExchangeAlgorithm {
    /// RSA key transport: the client encrypts the premaster secret to the
    /// server's public key.
    RSA,
    /// Diffie-Hellman Key exchange (with only known parameters as defined in [RFC 7919]).
    ///
    /// [RFC 7919]: https://datatracker.ietf.org/doc/html/rfc7919
    DHE,
    /// Key exchange performed via elliptic curve Diffie-Hellman.
    ///
    /// This crate doesn't implement it; it is listed so that a suite
    /// negotiated elsewhere can be named and refused.
    ECDHE,
}

/// A cipher suite, reduced to what the key exchange step needs to know about it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SupportedCipherSuite {
    /// The TLS enumeration naming this cipher suite.
    pub suite: CipherSuite,

    /// How the premaster secret is established.
    pub kx: KeyExchangeAlgorithm,

    /// The hash underlying the TLS1.2 PRF for this suite.
    ///
    /// Earlier protocol versions ignore this: their PRF is fixed.
    pub prf_hash: HashAlgorithm,
}

impl SupportedCipherSuite {
    /// The cipher suite's identifier
    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    /// The suite's key exchange algorithm.
    pub fn kx(&self) -> KeyExchangeAlgorithm {
        self.kx
    }
}

impl fmt::Debug for SupportedCipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.suite.fmt(f)
    }
}

macro_rules! suite {
    ($name:ident, $kx:ident, $hash:ident) => {
        #[allow(missing_docs)]
        pub static $name: SupportedCipherSuite = SupportedCipherSuite {
            suite: CipherSuite::$name,
            kx: KeyExchangeAlgorithm::$kx,
            prf_hash: HashAlgorithm::$hash,
        };
    };
}

suite!(TLS_RSA_WITH_3DES_EDE_CBC_SHA, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_128_CBC_SHA, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_256_CBC_SHA, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_128_CBC_SHA256, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_256_CBC_SHA256, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_128_GCM_SHA256, RSA, SHA256);
suite!(TLS_RSA_WITH_AES_256_GCM_SHA384, RSA, SHA384);
suite!(TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_128_CBC_SHA, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_256_CBC_SHA, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_128_CBC_SHA256, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_256_CBC_SHA256, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_128_GCM_SHA256, DHE, SHA256);
suite!(TLS_DHE_RSA_WITH_AES_256_GCM_SHA384, DHE, SHA384);
suite!(TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256, ECDHE, SHA256);
suite!(TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384, ECDHE, SHA384);

/// Every cipher suite this crate knows about, including the ECDHE
/// ones whose key exchange it refuses.
pub static ALL_CIPHER_SUITES: &[&SupportedCipherSuite] = &[
    &TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    &TLS_RSA_WITH_AES_128_CBC_SHA,
    &TLS_RSA_WITH_AES_256_CBC_SHA,
    &TLS_RSA_WITH_AES_128_CBC_SHA256,
    &TLS_RSA_WITH_AES_256_CBC_SHA256,
    &TLS_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_RSA_WITH_AES_256_GCM_SHA384,
    &TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA,
    &TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
    &TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
    &TLS_DHE_RSA_WITH_AES_128_CBC_SHA256,
    &TLS_DHE_RSA_WITH_AES_256_CBC_SHA256,
    &TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
    &TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
];

/// Find the `SupportedCipherSuite` for a suite identifier.
pub fn lookup(suite: CipherSuite) -> Option<&'static SupportedCipherSuite> {
    ALL_CIPHER_SUITES
        .iter()
        .find(|cs| cs.suite == suite)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_names_match_key_exchange() {
        for cs in ALL_CIPHER_SUITES {
            let name = format!("{:?}", cs);
            let expected = match cs.kx {
                KeyExchangeAlgorithm::RSA => "TLS_RSA_",
                KeyExchangeAlgorithm::DHE => "TLS_DHE_",
                KeyExchangeAlgorithm::ECDHE => "TLS_ECDHE_",
            };
            assert!(name.starts_with(expected), "{}", name);

            let hash = if name.ends_with("SHA384") {
                HashAlgorithm::SHA384
            } else {
                HashAlgorithm::SHA256
            };
            assert_eq!(cs.prf_hash, hash, "{}", name);
        }
    }

    #[test]
    fn lookup_finds_known_suites() {
        assert_eq!(
            lookup(CipherSuite::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256),
            Some(&TLS_DHE_RSA_WITH_AES_128_GCM_SHA256)
        );
        assert_eq!(lookup(CipherSuite::Unknown(0x1301)), None);
    }
}
