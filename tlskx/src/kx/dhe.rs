//! Finite field ephemeral Diffie-Hellman.

use crate::conn::{DhParams, HandshakeContext};
use crate::error::{Error, InvalidMessage};
use crate::log::trace;
use crate::msgs::base::PayloadU16;
use crate::msgs::codec::{Codec, Reader};
use crate::msgs::handshake::ClientDhParams;

pub(super) fn recv(ctx: &mut HandshakeContext) -> Result<(), Error> {
    let mut rd = Reader::init(&ctx.handshake.io);
    let client_params = ClientDhParams::read(&mut rd)?;
    rd.expect_empty("ClientDhParams")?;
    let yc = client_params.public.bytes();
    trace!("ClientKeyExchange carries a {} byte DH public value", yc.len());

    let modulus_len = match &ctx.pending.server_dh_params {
        Some(DhParams::Ephemeral(kx)) => kx.group().modulus_len(),
        _ => return Err(Error::MissingKeyMaterial("server ephemeral DH key")),
    };
    check_public_value(yc, modulus_len)?;

    let kx = match ctx.pending.server_dh_params.take() {
        Some(DhParams::Ephemeral(kx)) => kx,
        _ => return Err(Error::MissingKeyMaterial("server ephemeral DH key")),
    };
    let shared_secret = kx.complete_unpadded(yc)?;

    let master_secret = ctx.derive_master_secret(shared_secret.secret_bytes());
    drop(shared_secret);

    ctx.finish_key_exchange(master_secret?);
    Ok(())
}

pub(super) fn send(ctx: &mut HandshakeContext) -> Result<(), Error> {
    match &ctx.pending.server_dh_params {
        Some(DhParams::Peer(params)) => {
            check_public_value(params.dh_Ys.bytes(), params.as_ffdhe_group().modulus_len())?
        }
        _ => return Err(Error::MissingKeyMaterial("server DH parameters")),
    }

    let params = match ctx.pending.server_dh_params.take() {
        Some(DhParams::Peer(params)) => params,
        _ => return Err(Error::MissingKeyMaterial("server DH parameters")),
    };

    let kx = ctx
        .config
        .provider
        .dhe
        .start(params.as_ffdhe_group(), ctx.config.provider.secure_random)?;

    let mut body = Vec::new();
    ClientDhParams {
        public: PayloadU16::borrowed(kx.pub_key()),
    }
    .encode(&mut body);
    trace!("sending a {} byte DH ClientKeyExchange", body.len());

    let shared_secret = kx.complete_unpadded(params.dh_Ys.bytes())?;
    ctx.handshake.io = body;

    let master_secret = ctx.derive_master_secret(shared_secret.secret_bytes());
    drop(shared_secret);

    ctx.finish_key_exchange(master_secret?);
    Ok(())
}

/// A DH public value must be present, and no longer than the group's modulus.
fn check_public_value(public: &[u8], modulus_len: usize) -> Result<(), InvalidMessage> {
    match public.len() {
        0 => Err(InvalidMessage::InvalidDhParams),
        len if len > modulus_len => Err(InvalidMessage::InvalidDhParams),
        _ => Ok(()),
    }
}
