#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub use std::sync::Arc;

use tlskx::crypto::rust_crypto::default_provider;
use tlskx::crypto::{
    CryptoProvider, GetRandomFailed, RsaDecryptingKey, RsaEncryptingKey, SecureRandom,
};
use tlskx::pki_types::pem::PemObject;
use tlskx::pki_types::{PrivateKeyDer, SubjectPublicKeyInfoDer};
use tlskx::{
    ConnectionRandoms, Error, HandshakeContext, KxConfig, MasterSecret, MasterSecretDeriver,
    MasterSecretInput, PrfMasterSecret, ProtocolVersion, Side, SupportedCipherSuite,
};

pub const CLIENT_RANDOM: [u8; 32] = [0xc1; 32];
pub const SERVER_RANDOM: [u8; 32] = [0x5e; 32];

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .try_init();
}

pub fn server_private_key() -> PrivateKeyDer<'static> {
    PrivateKeyDer::from_pem_slice(include_bytes!("../../testdata/rsa-2048.key.pem")).unwrap()
}

pub fn server_spki() -> SubjectPublicKeyInfoDer<'static> {
    SubjectPublicKeyInfoDer::from_pem_slice(include_bytes!("../../testdata/rsa-2048.spki.pem"))
        .unwrap()
}

pub fn randoms() -> ConnectionRandoms {
    ConnectionRandoms::new(CLIENT_RANDOM, SERVER_RANDOM)
}

/// Counts calls to each collaborator the key exchange uses, so that two runs
/// can be compared call for call.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub random: AtomicUsize,
    pub decrypt: AtomicUsize,
    pub derive: AtomicUsize,
}

impl CallCounts {
    pub fn snapshot(&self) -> (usize, usize, usize) {
        (
            self.random.load(Ordering::SeqCst),
            self.decrypt.load(Ordering::SeqCst),
            self.derive.load(Ordering::SeqCst),
        )
    }
}

#[derive(Debug)]
struct CountingRandom {
    inner: &'static dyn SecureRandom,
    counts: Arc<CallCounts>,
}

impl SecureRandom for CountingRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), GetRandomFailed> {
        self.counts
            .random
            .fetch_add(1, Ordering::SeqCst);
        self.inner.fill(buf)
    }
}

#[derive(Debug)]
struct CountingDecrypter {
    inner: Arc<dyn RsaDecryptingKey>,
    counts: Arc<CallCounts>,
}

impl RsaDecryptingKey for CountingDecrypter {
    fn decrypt(&self, ciphertext: &[u8], out: &mut [u8]) -> Result<(), Error> {
        self.counts
            .decrypt
            .fetch_add(1, Ordering::SeqCst);
        self.inner.decrypt(ciphertext, out)
    }
}

/// Delegates to [`PrfMasterSecret`], keeping a copy of each premaster secret.
#[derive(Debug)]
pub struct RecordingDeriver {
    inner: PrfMasterSecret,
    counts: Arc<CallCounts>,
    pub premasters: Mutex<Vec<Vec<u8>>>,
}

impl RecordingDeriver {
    pub fn last_premaster(&self) -> Vec<u8> {
        self.premasters
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap()
    }
}

impl MasterSecretDeriver for RecordingDeriver {
    fn derive(
        &self,
        input: &MasterSecretInput<'_>,
        premaster: &[u8],
    ) -> Result<MasterSecret, Error> {
        self.counts
            .derive
            .fetch_add(1, Ordering::SeqCst);
        self.premasters
            .lock()
            .unwrap()
            .push(premaster.to_vec());
        self.inner.derive(input, premaster)
    }
}

/// A server or client configuration whose collaborators are all observed.
pub struct Instrumented {
    pub config: Arc<KxConfig>,
    pub counts: Arc<CallCounts>,
    pub deriver: Arc<RecordingDeriver>,
}

pub fn instrumented() -> Instrumented {
    init_logging();
    let counts = Arc::new(CallCounts::default());
    let base = default_provider();
    let provider = Arc::new(CryptoProvider {
        secure_random: Box::leak(Box::new(CountingRandom {
            inner: base.secure_random,
            counts: Arc::clone(&counts),
        })),
        ..base
    });

    let key = provider
        .key_provider
        .load_rsa_private_key(server_private_key())
        .unwrap();
    let deriver = Arc::new(RecordingDeriver {
        inner: PrfMasterSecret::new(Arc::clone(&provider)),
        counts: Arc::clone(&counts),
        premasters: Mutex::new(Vec::new()),
    });

    let config = KxConfig::builder(provider)
        .with_rsa_decrypting_key(Arc::new(CountingDecrypter {
            inner: key,
            counts: Arc::clone(&counts),
        }))
        .with_master_secret_deriver(Arc::clone(&deriver) as Arc<dyn MasterSecretDeriver>)
        .build();

    Instrumented {
        config: Arc::new(config),
        counts,
        deriver,
    }
}

pub fn plain_config() -> Arc<KxConfig> {
    init_logging();
    Arc::new(
        KxConfig::builder(Arc::new(default_provider()))
            .with_rsa_private_key(server_private_key())
            .unwrap()
            .build(),
    )
}

pub fn server_context(
    config: &Arc<KxConfig>,
    suite: &'static SupportedCipherSuite,
    version: ProtocolVersion,
) -> HandshakeContext {
    HandshakeContext::new(
        Arc::clone(config),
        Side::Server,
        suite,
        version,
        version,
        randoms(),
    )
}

pub fn client_context(
    config: &Arc<KxConfig>,
    suite: &'static SupportedCipherSuite,
    version: ProtocolVersion,
) -> HandshakeContext {
    HandshakeContext::new(
        Arc::clone(config),
        Side::Client,
        suite,
        version,
        version,
        randoms(),
    )
}

/// Run the client side of RSA key transport against the test server key.
pub fn rsa_client_body(
    config: &Arc<KxConfig>,
    suite: &'static SupportedCipherSuite,
    version: ProtocolVersion,
) -> (Vec<u8>, HandshakeContext) {
    let mut client = client_context(config, suite, version);
    client
        .set_server_rsa_public_key(server_spki())
        .unwrap();
    tlskx::send(&mut client).unwrap();
    (client.take_handshake_io(), client)
}

/// An RSA public key claiming an impossibly large modulus.
#[derive(Debug)]
pub struct OversizedKey;

impl RsaEncryptingKey for OversizedKey {
    fn encrypted_size(&self) -> usize {
        70_000
    }

    fn encrypt(&self, _plaintext: &[u8], _out: &mut [u8]) -> Result<(), Error> {
        panic!("an oversized key must not be used");
    }
}
