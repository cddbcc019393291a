//! The ClientKeyExchange step: dispatch on the negotiated key exchange.

use crate::conn::{HandshakeContext, HandshakeState, Side};
use crate::error::Error;
use crate::log::{debug, warn};
use crate::suites::KeyExchangeAlgorithm;

mod dhe;
mod rsa;

/// Process the client's ClientKeyExchange, in the server role.
///
/// The message body must have been supplied with
/// [`HandshakeContext::set_handshake_io()`].  On success the context holds
/// the master secret and has moved to
/// [`HandshakeState::AwaitingClientChangeCipherSpec`].
///
/// For RSA key transport, a ciphertext that fails to decrypt, or that
/// decrypts to a premaster secret with the wrong version, is *not* an error:
/// the handshake carries on with a random premaster secret instead, and
/// fails later when the peer's Finished message doesn't verify.
///
/// Errors are fatal to the connection.
pub fn client_key_recv(ctx: &mut HandshakeContext) -> Result<(), Error> {
    check_entry(ctx, Side::Server)?;

    let result = match ctx.suite.kx {
        KeyExchangeAlgorithm::RSA => rsa::recv(ctx),
        KeyExchangeAlgorithm::DHE => dhe::recv(ctx),
        other => return Err(unsupported(other)),
    };

    if let Err(Error::InvalidMessage(err)) = &result {
        warn!("rejecting ClientKeyExchange: {:?}", err);
    }
    result
}

/// Produce the ClientKeyExchange, in the client role.
///
/// The message body is left in [`HandshakeContext::handshake_io()`].  On
/// success the context holds the master secret and has moved to
/// [`HandshakeState::AwaitingClientChangeCipherSpec`].  The server's RSA key
/// or DHE parameters are consumed.
pub fn client_key_send(ctx: &mut HandshakeContext) -> Result<(), Error> {
    check_entry(ctx, Side::Client)?;

    match ctx.suite.kx {
        KeyExchangeAlgorithm::RSA => rsa::send(ctx),
        KeyExchangeAlgorithm::DHE => dhe::send(ctx),
        other => Err(unsupported(other)),
    }
}

fn check_entry(ctx: &HandshakeContext, side: Side) -> Result<(), Error> {
    if ctx.handshake.next_state != HandshakeState::AwaitingClientKeyExchange {
        return Err(Error::UnexpectedState {
            expected: HandshakeState::AwaitingClientKeyExchange,
            got: ctx.handshake.next_state,
        });
    }

    if ctx.side != side {
        return Err(Error::General(format!(
            "ClientKeyExchange cannot be processed this way by the {:?} side",
            ctx.side
        )));
    }

    debug!(
        "ClientKeyExchange for {:?} ({:?} key exchange, {:?})",
        ctx.suite.suite, ctx.suite.kx, ctx.actual_protocol_version
    );
    Ok(())
}

fn unsupported(kx: KeyExchangeAlgorithm) -> Error {
    warn!("no ClientKeyExchange handler for {:?}", kx);
    Error::UnsupportedKeyExchange(kx)
}
