//! # tlskx - the ClientKeyExchange step of a TLS handshake
//!
//! This crate implements the part of a TLS (SSLv3 through TLS1.2) handshake that
//! establishes the premaster secret: the server parsing the client's
//! `ClientKeyExchange` message, and the client producing it.  Two key exchange
//! kinds are supported:
//!
//! * RSA key transport, where the client encrypts a random premaster secret under
//!   the server's RSA public key.
//! * Finite-field ephemeral Diffie-Hellman (DHE), where both sides contribute an
//!   ephemeral public value.
//!
//! ## Bleichenbacher hardening
//!
//! The RSA receive path never reports whether decryption or the embedded client
//! version check failed.  A failure is folded into a freshly generated premaster
//! secret that carries the expected version prefix, and the handshake carries on
//! through master secret derivation and into the next state exactly as it would
//! have done on success.  The tampered connection fails later, when its records
//! don't authenticate.  The success and failure paths execute the same calls in
//! the same order; the choice between the decrypted and the random premaster is a
//! constant-time select.
//!
//! ## What this crate does not do
//!
//! It doesn't do record framing, message sequencing, cipher suite negotiation or
//! certificate handling.  The RSA and DH primitives, hashing and randomness come
//! from a [`crypto::CryptoProvider`]; the `rust_crypto` feature supplies one built
//! on the RustCrypto crates.
//!
//! ## Getting started
//!
//! ```rust,no_run
//! # #[cfg(feature = "rust_crypto")] {
//! use std::sync::Arc;
//! use tlskx::{ConnectionRandoms, HandshakeContext, KxConfig, ProtocolVersion, Side};
//! use tlskx::suites::TLS_RSA_WITH_AES_128_GCM_SHA256;
//! # let key_der: pki_types::PrivateKeyDer<'static> = panic!();
//! # let client_key_exchange_body: Vec<u8> = panic!();
//! # let randoms: ConnectionRandoms = panic!();
//!
//! let provider = Arc::new(tlskx::crypto::rust_crypto::default_provider());
//! let config = Arc::new(
//!     KxConfig::builder(provider)
//!         .with_rsa_private_key(key_der)
//!         .unwrap()
//!         .build(),
//! );
//!
//! let mut server = HandshakeContext::new(
//!     config,
//!     Side::Server,
//!     &TLS_RSA_WITH_AES_128_GCM_SHA256,
//!     ProtocolVersion::TLSv1_2,
//!     ProtocolVersion::TLSv1_2,
//!     randoms,
//! );
//! server.set_handshake_io(client_key_exchange_body);
//! tlskx::receive(&mut server).unwrap();
//! assert!(server.master_secret().is_some());
//! # }
//! ```
//!
//! # Crate features
//!
//! - `logging`: this makes the crate depend on the `log` crate.  Protocol-level
//!   messages are output at `trace!` and `debug!` level, and framing errors at
//!   `warn!` level.  The log messages never contain secret key data or the outcome
//!   of RSA decryption.  This feature is in the default set.
//!
//! - `rust_crypto`: provides [`crypto::rust_crypto`], a [`crypto::CryptoProvider`]
//!   using `rsa`, `num-bigint`, `sha2`, `sha1`, `md-5`, `hmac` and `rand_core`.
//!   This feature is in the default set.

// Require docs for public APIs, deny unsafe code, etc.
#![forbid(unsafe_code, unused_must_use)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::use_self,
    trivial_casts,
    trivial_numeric_casts,
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_extern_crates,
    unused_qualifications
)]
// Relax these clippy lints:
// - new_without_default: for internal constructors, the indirection is not
//   helpful
#![allow(clippy::new_without_default)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    macro_rules! trace    ( ($($tt:tt)*) => {{}} );
    macro_rules! debug    ( ($($tt:tt)*) => {{}} );
    macro_rules! warn     ( ($($tt:tt)*) => {{}} );
    #[allow(unused_imports)]
    pub(crate) use {debug, trace, warn};
}

#[macro_use]
mod msgs;
mod config;
mod conn;
mod enums;
mod error;
mod kx;
mod rand;

/// Cryptography primitives consumed by the key exchange, and the provider that bundles them.
pub mod crypto;

/// Cipher suites and their key exchange algorithms.
pub mod suites;

/// TLS1.2 and earlier master secret derivation.
pub mod tls12;

/// Internal classes which may be useful outside the library.
/// The contents of this section DO NOT form part of the stable interface.
#[doc(hidden)]
pub mod internal {
    /// Low-level TLS message parsing and encoding functions.
    pub mod msgs {
        pub use crate::msgs::*;
    }
}

// The public interface is:
pub use crate::config::{KxConfig, KxConfigBuilder};
pub use crate::conn::{
    ConnectionRandoms, DhParams, HandshakeContext, HandshakeState, PremasterSecret, Side,
};
pub use crate::enums::{CipherSuite, ProtocolVersion};
pub use crate::error::{Error, InvalidMessage, OtherError, PeerMisbehaved};
pub use crate::kx::{client_key_recv as receive, client_key_send as send};
pub use crate::msgs::enums::NamedGroup;
pub use crate::msgs::ffdhe_groups;
pub use crate::msgs::handshake::ServerDhParams;
pub use crate::suites::{KeyExchangeAlgorithm, SupportedCipherSuite, ALL_CIPHER_SUITES};
pub use crate::tls12::{MasterSecret, MasterSecretDeriver, MasterSecretInput, PrfMasterSecret};

/// Re-export of the `rustls-pki-types` crate, used for key material inputs.
pub use pki_types;
