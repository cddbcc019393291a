use core::fmt;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::conn::HandshakeState;
use crate::rand;
use crate::suites::KeyExchangeAlgorithm;

/// tlskx reports key exchange errors using this type.
///
/// Every variant is fatal to the handshake it came from.  Note that there is
/// no variant for "the RSA premaster secret failed to decrypt": that outcome
/// is never reported.
#[non_exhaustive]
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The ClientKeyExchange (or the DH parameters it is checked against)
    /// could not be decoded.  The connection must be aborted.
    InvalidMessage(InvalidMessage),

    /// A locally produced value doesn't fit the length field the protocol
    /// gives it.
    SizeMismatch {
        /// The size that was produced.
        size: usize,
        /// The largest size the wire format can carry.
        limit: usize,
    },

    /// The negotiated cipher suite uses a key exchange algorithm that isn't
    /// carried in ClientKeyExchange by this crate.
    UnsupportedKeyExchange(KeyExchangeAlgorithm),

    /// The peer deviated from the standard TLS protocol.
    /// The parameter gives a hint where.
    PeerMisbehaved(PeerMisbehaved),

    /// The handshake context lacks the key or parameters the selected
    /// key exchange needs.  The parameter names what is missing.
    MissingKeyMaterial(&'static str),

    /// The key exchange was driven while the handshake was in some other state.
    UnexpectedState {
        /// The state the key exchange runs in.
        expected: HandshakeState,
        /// The state the handshake was actually in.
        got: HandshakeState,
    },

    /// We couldn't decrypt something.
    DecryptError,

    /// We couldn't encrypt something.
    EncryptError,

    /// The system random number generator failed.
    FailedToGetRandomBytes,

    /// A catch-all error for unlikely errors.
    General(String),

    /// Any other error.
    ///
    /// This variant should only be used when the error is not better described by a more
    /// specific variant. For example, if a custom crypto provider returns a
    /// provider specific error.
    ///
    /// Enums holding this variant will never compare equal to each other.
    Other(OtherError),
}

/// A corrupt TLS message payload that resulted in an error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidMessage {
    /// A peer's DH params or public value could not be decoded
    InvalidDhParams,
    /// Message is shorter than the expected length
    MessageTooShort,
    /// Missing data for the named handshake payload value
    MissingData(&'static str),
    /// Trailing data found for the named handshake payload value
    TrailingData(&'static str),
}

impl From<InvalidMessage> for Error {
    #[inline]
    fn from(e: InvalidMessage) -> Self {
        Self::InvalidMessage(e)
    }
}

/// The set of cases where we failed to make a connection because we thought
/// the peer was misbehaving.
///
/// This is `non_exhaustive`: we might add or stop using items here in minor
/// versions.
#[non_exhaustive]
#[derive(Debug, PartialEq, Clone)]
#[allow(missing_docs)]
pub enum PeerMisbehaved {
    InvalidDhPublicValue,
}

impl From<PeerMisbehaved> for Error {
    #[inline]
    fn from(e: PeerMisbehaved) -> Self {
        Self::PeerMisbehaved(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidMessage(ref typ) => {
                write!(f, "received corrupt message of type {:?}", typ)
            }
            Self::SizeMismatch { size, limit } => {
                write!(f, "value of {} bytes exceeds the limit of {}", size, limit)
            }
            Self::UnsupportedKeyExchange(ref kx) => {
                write!(f, "key exchange algorithm {:?} is not supported", kx)
            }
            Self::PeerMisbehaved(ref why) => write!(f, "peer misbehaved: {:?}", why),
            Self::MissingKeyMaterial(what) => write!(f, "missing key material: {}", what),
            Self::UnexpectedState {
                ref expected,
                ref got,
            } => write!(
                f,
                "key exchange attempted in state {:?} when expecting {:?}",
                got, expected
            ),
            Self::DecryptError => write!(f, "cannot decrypt peer's message"),
            Self::EncryptError => write!(f, "cannot encrypt message"),
            Self::FailedToGetRandomBytes => write!(f, "failed to get random bytes"),
            Self::General(ref err) => write!(f, "unexpected error: {}", err),
            Self::Other(ref err) => write!(f, "other error: {}", err),
        }
    }
}

impl StdError for Error {}

impl From<rand::GetRandomFailed> for Error {
    fn from(_: rand::GetRandomFailed) -> Self {
        Self::FailedToGetRandomBytes
    }
}

/// Any other error that cannot be expressed by a more specific [`Error`] variant.
///
/// For example, an `OtherError` could be produced by a custom crypto provider
/// exposing a provider specific error.
///
/// Enums holding this type will never compare equal to each other.
#[derive(Debug, Clone)]
pub struct OtherError(pub Arc<dyn StdError + Send + Sync>);

impl PartialEq<Self> for OtherError {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl From<OtherError> for Error {
    fn from(value: OtherError) -> Self {
        Self::Other(value)
    }
}

impl fmt::Display for OtherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for OtherError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, InvalidMessage, OtherError, PeerMisbehaved};
    use crate::conn::HandshakeState;
    use crate::suites::KeyExchangeAlgorithm;
    use std::sync::Arc;

    #[test]
    fn other_error_equality() {
        let other_error = OtherError(Arc::from(Box::from("")));
        assert_ne!(other_error, other_error);
        let other: Error = other_error.into();
        assert_ne!(other, other);
    }

    #[test]
    fn smoke() {
        let all = vec![
            Error::InvalidMessage(InvalidMessage::MessageTooShort),
            InvalidMessage::TrailingData("ClientKeyExchange").into(),
            Error::SizeMismatch {
                size: 70000,
                limit: 65535,
            },
            Error::UnsupportedKeyExchange(KeyExchangeAlgorithm::ECDHE),
            PeerMisbehaved::InvalidDhPublicValue.into(),
            Error::MissingKeyMaterial("server RSA public key"),
            Error::UnexpectedState {
                expected: HandshakeState::AwaitingClientKeyExchange,
                got: HandshakeState::AwaitingClientChangeCipherSpec,
            },
            Error::DecryptError,
            Error::EncryptError,
            Error::FailedToGetRandomBytes,
            Error::General("undocumented error".to_string()),
            Error::Other(OtherError(Arc::from(Box::from("")))),
        ];

        for err in all {
            println!("{:?}:", err);
            println!("  fmt '{}'", err);
        }
    }

    #[test]
    fn size_mismatch_display() {
        let err = Error::SizeMismatch {
            size: 70000,
            limit: 65535,
        };
        assert_eq!(
            err.to_string(),
            "value of 70000 bytes exceeds the limit of 65535"
        );
    }

    #[test]
    fn rand_error_mapping() {
        use super::rand;
        let err: Error = rand::GetRandomFailed.into();
        assert_eq!(err, Error::FailedToGetRandomBytes);
    }
}
