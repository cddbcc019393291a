use core::fmt;
use std::sync::Arc;

use pki_types::SubjectPublicKeyInfoDer;
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

use crate::config::KxConfig;
use crate::crypto::{ActiveKeyExchange, FfdheGroup, RsaEncryptingKey};
use crate::enums::ProtocolVersion;
use crate::error::Error;
use crate::log::debug;
use crate::msgs::handshake::ServerDhParams;
use crate::suites::SupportedCipherSuite;
use crate::tls12::{MasterSecret, MasterSecretInput};

/// Side of the connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// A client initiates the connection.  It sends ClientKeyExchange.
    Client,
    /// A server waits for a client to connect.  It receives ClientKeyExchange.
    Server,
}

/// The hello randoms of a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRandoms {
    /// `ClientHello.random`
    pub client: [u8; 32],
    /// `ServerHello.random`
    pub server: [u8; 32],
}

impl ConnectionRandoms {
    /// Collect the two randoms.
    pub fn new(client: [u8; 32], server: [u8; 32]) -> Self {
        Self { client, server }
    }
}

/// Where the handshake is, as far as the key exchange is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// ClientKeyExchange is the next handshake message.
    AwaitingClientKeyExchange,
    /// The key exchange is done; the client's ChangeCipherSpec comes next.
    AwaitingClientChangeCipherSpec,
}

/// Length of a premaster secret produced by RSA key transport.
pub(crate) const PREMASTER_SECRET_LEN: usize = 48;

/// Fixed-size storage for an RSA premaster secret.
///
/// The contents can't be read from outside this crate.  They are zeroed as
/// soon as the master secret has been derived, and again on drop.
pub struct PremasterSecret([u8; PREMASTER_SECRET_LEN]);

impl PremasterSecret {
    pub(crate) fn zeroed() -> Self {
        Self([0u8; PREMASTER_SECRET_LEN])
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub(crate) fn set_version(&mut self, version: ProtocolVersion) {
        self.0[..2].copy_from_slice(&version.to_array());
    }

    /// Overwrite `self` with `other` if `choice` is set, in constant time.
    pub(crate) fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        for (byte, replacement) in self.0.iter_mut().zip(other.0.iter()) {
            byte.conditional_assign(replacement, choice);
        }
    }

    pub(crate) fn erase(&mut self) {
        self.0.zeroize();
    }

    /// Returns true if no secret is held: every byte is zero.
    pub fn is_erased(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl Drop for PremasterSecret {
    fn drop(&mut self) {
        self.erase();
    }
}

impl fmt::Debug for PremasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PremasterSecret")
            .field("erased", &self.is_erased())
            .finish()
    }
}

/// DHE key material held between ServerKeyExchange and ClientKeyExchange.
pub enum DhParams {
    /// Held by the server: its ephemeral key pair.
    Ephemeral(Box<dyn ActiveKeyExchange>),
    /// Held by the client: the parameters the server sent.
    Peer(ServerDhParams),
}

impl fmt::Debug for DhParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ephemeral(kx) => f
                .debug_tuple("Ephemeral")
                .field(&kx.group().named_group())
                .finish(),
            Self::Peer(params) => f.debug_tuple("Peer").field(params).finish(),
        }
    }
}

/// Key material that lives only until the key exchange consumes it.
pub(crate) struct PendingSecrets {
    pub(crate) server_dh_params: Option<DhParams>,
    pub(crate) server_rsa_public_key: Option<Box<dyn RsaEncryptingKey>>,
    pub(crate) rsa_premaster_secret: PremasterSecret,
    pub(crate) master_secret: Option<MasterSecret>,
}

pub(crate) struct Handshake {
    /// The ClientKeyExchange body: read by receive, written by send.
    pub(crate) io: Vec<u8>,
    pub(crate) next_state: HandshakeState,
    /// Set when the RSA premaster secret was replaced.  Never exposed.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) rsa_failed: Choice,
}

/// The per-connection state the key exchange reads and writes.
///
/// The outer handshake driver creates one of these per connection, feeds it
/// the material negotiated earlier in the handshake, and then calls
/// [`receive()`](crate::receive) (server) or [`send()`](crate::send) (client).
/// Contexts share nothing mutable with each other.
pub struct HandshakeContext {
    pub(crate) config: Arc<KxConfig>,
    pub(crate) side: Side,
    pub(crate) suite: &'static SupportedCipherSuite,
    pub(crate) client_protocol_version: ProtocolVersion,
    pub(crate) actual_protocol_version: ProtocolVersion,
    pub(crate) randoms: ConnectionRandoms,
    pub(crate) session_hash: Option<Vec<u8>>,
    pub(crate) pending: PendingSecrets,
    pub(crate) handshake: Handshake,
}

impl HandshakeContext {
    /// Make a context for a connection that negotiated `suite`.
    ///
    /// `client_protocol_version` is the version the client offered in its
    /// ClientHello; it is what an RSA premaster secret carries.
    /// `actual_protocol_version` is the negotiated one; it decides the wire
    /// framing and the master secret PRF.
    pub fn new(
        config: Arc<KxConfig>,
        side: Side,
        suite: &'static SupportedCipherSuite,
        client_protocol_version: ProtocolVersion,
        actual_protocol_version: ProtocolVersion,
        randoms: ConnectionRandoms,
    ) -> Self {
        Self {
            config,
            side,
            suite,
            client_protocol_version,
            actual_protocol_version,
            randoms,
            session_hash: None,
            pending: PendingSecrets {
                server_dh_params: None,
                server_rsa_public_key: None,
                rsa_premaster_secret: PremasterSecret::zeroed(),
                master_secret: None,
            },
            handshake: Handshake {
                io: Vec::new(),
                next_state: HandshakeState::AwaitingClientKeyExchange,
                rsa_failed: Choice::from(0),
            },
        }
    }

    /// Derive an extended master secret (RFC 7627) over `session_hash`.
    pub fn set_session_hash(&mut self, session_hash: &[u8]) {
        self.session_hash = Some(session_hash.to_vec());
    }

    /// Supply the received ClientKeyExchange body, without its handshake header.
    pub fn set_handshake_io(&mut self, body: Vec<u8>) {
        self.handshake.io = body;
    }

    /// The ClientKeyExchange body: what was supplied, or what `send()` wrote.
    pub fn handshake_io(&self) -> &[u8] {
        &self.handshake.io
    }

    /// Take the ClientKeyExchange body out of the context.
    pub fn take_handshake_io(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.handshake.io)
    }

    /// Client: hold the server's RSA public key, from its certificate.
    ///
    /// The key is used once, by `send()`, and then released.
    pub fn set_server_rsa_public_key(
        &mut self,
        spki: SubjectPublicKeyInfoDer<'_>,
    ) -> Result<(), Error> {
        let key = self
            .config
            .provider
            .key_provider
            .load_rsa_public_key(spki)?;
        self.set_server_rsa_encrypting_key(key);
        Ok(())
    }

    /// Client: hold an already loaded RSA public key for the server.
    pub fn set_server_rsa_encrypting_key(&mut self, key: Box<dyn RsaEncryptingKey>) {
        self.pending.server_rsa_public_key = Some(key);
    }

    /// Client: hold the DHE parameters from the server's ServerKeyExchange.
    pub fn set_server_dh_params(&mut self, params: ServerDhParams) {
        self.pending.server_dh_params = Some(DhParams::Peer(params));
    }

    /// Server: generate an ephemeral DH key pair in `group`.
    ///
    /// The key pair is held for `receive()`; the returned parameters go
    /// into the ServerKeyExchange.
    pub fn start_server_dhe(&mut self, group: FfdheGroup<'_>) -> Result<ServerDhParams, Error> {
        let kx = self
            .config
            .provider
            .dhe
            .start(group, self.config.provider.secure_random)?;
        let params = ServerDhParams::new(kx.group(), kx.pub_key());
        debug!(
            "started DHE in {:?} with a {} byte modulus",
            group.named_group(),
            group.p.len()
        );
        self.pending.server_dh_params = Some(DhParams::Ephemeral(kx));
        Ok(params)
    }

    /// Whether DHE key material is still held.
    pub fn has_dh_params(&self) -> bool {
        self.pending.server_dh_params.is_some()
    }

    /// Whether the server's RSA public key is still held.
    pub fn has_server_rsa_public_key(&self) -> bool {
        self.pending.server_rsa_public_key.is_some()
    }

    /// The premaster secret storage.
    pub fn premaster_secret(&self) -> &PremasterSecret {
        &self.pending.rsa_premaster_secret
    }

    /// The master secret, once the key exchange has completed.
    pub fn master_secret(&self) -> Option<&MasterSecret> {
        self.pending.master_secret.as_ref()
    }

    /// Take the master secret, once the key exchange has completed.
    pub fn take_master_secret(&mut self) -> Option<MasterSecret> {
        self.pending.master_secret.take()
    }

    /// The state the handshake moves to next.
    pub fn next_state(&self) -> HandshakeState {
        self.handshake.next_state
    }

    /// Which side of the connection this is.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The negotiated cipher suite.
    pub fn suite(&self) -> &'static SupportedCipherSuite {
        self.suite
    }

    /// The version the client offered.
    pub fn client_protocol_version(&self) -> ProtocolVersion {
        self.client_protocol_version
    }

    /// The negotiated version.
    pub fn actual_protocol_version(&self) -> ProtocolVersion {
        self.actual_protocol_version
    }

    pub(crate) fn derive_master_secret(&self, premaster: &[u8]) -> Result<MasterSecret, Error> {
        let input = MasterSecretInput {
            version: self.actual_protocol_version,
            suite: self.suite,
            randoms: &self.randoms,
            session_hash: self.session_hash.as_deref(),
        };
        self.config
            .master_secret_deriver
            .derive(&input, premaster)
    }

    pub(crate) fn finish_key_exchange(&mut self, master_secret: MasterSecret) {
        self.pending.master_secret = Some(master_secret);
        self.handshake.next_state = HandshakeState::AwaitingClientChangeCipherSpec;
        debug!("key exchange complete; awaiting client ChangeCipherSpec");
    }

    #[cfg(test)]
    pub(crate) fn rsa_failed(&self) -> bool {
        self.handshake.rsa_failed.into()
    }
}

impl fmt::Debug for HandshakeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakeContext")
            .field("side", &self.side)
            .field("suite", &self.suite)
            .field("client_protocol_version", &self.client_protocol_version)
            .field("actual_protocol_version", &self.actual_protocol_version)
            .field("dh_params", &self.pending.server_dh_params)
            .field(
                "server_rsa_public_key",
                &self.pending.server_rsa_public_key.is_some(),
            )
            .field("next_state", &self.handshake.next_state)
            .finish_non_exhaustive()
    }
}
