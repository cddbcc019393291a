//! RSA key transport.

use std::sync::Arc;

use subtle::{Choice, ConstantTimeEq};

use crate::conn::HandshakeContext;
use crate::error::Error;
use crate::log::trace;
use crate::msgs::base::Payload;
use crate::msgs::codec::Reader;
use crate::msgs::handshake::EncryptedPreMasterSecret;
use crate::rand;

/// Largest ciphertext a ClientKeyExchange carries.
const MAX_CIPHERTEXT_LEN: usize = 0xffff;

pub(super) fn recv(ctx: &mut HandshakeContext) -> Result<(), Error> {
    let config = Arc::clone(&ctx.config);

    let mut rd = Reader::init(&ctx.handshake.io);
    let encrypted = EncryptedPreMasterSecret::read_for_version(&mut rd, ctx.actual_protocol_version)?;
    rd.expect_empty("EncryptedPreMasterSecret")?;
    trace!(
        "ClientKeyExchange carries a {} byte RSA ciphertext",
        encrypted.ciphertext().len()
    );

    let key = config
        .rsa_private_key
        .as_ref()
        .ok_or(Error::MissingKeyMaterial("server RSA private key"))?;

    // Made whatever the outcome of decryption, and before it.
    let fallback = rand::random_premaster(
        config.provider.secure_random,
        ctx.client_protocol_version,
    )?;

    let pms = &mut ctx.pending.rsa_premaster_secret;
    let decrypted = Choice::from(u8::from(
        key.decrypt(encrypted.ciphertext(), pms.as_mut_bytes())
            .is_ok(),
    ));

    let expected_version = ctx.client_protocol_version.to_array();
    let version_ok = pms.as_bytes()[..2].ct_eq(&expected_version[..]);

    let failed = !(decrypted & version_ok);
    pms.conditional_assign(&fallback, failed);
    ctx.handshake.rsa_failed = failed;
    drop(fallback);

    let master_secret = ctx.derive_master_secret(ctx.pending.rsa_premaster_secret.as_bytes());
    ctx.pending.rsa_premaster_secret.erase();

    ctx.finish_key_exchange(master_secret?);
    Ok(())
}

pub(super) fn send(ctx: &mut HandshakeContext) -> Result<(), Error> {
    let key = ctx
        .pending
        .server_rsa_public_key
        .take()
        .ok_or(Error::MissingKeyMaterial("server RSA public key"))?;

    let size = key.encrypted_size();
    if size > MAX_CIPHERTEXT_LEN {
        return Err(Error::SizeMismatch {
            size,
            limit: MAX_CIPHERTEXT_LEN,
        });
    }

    ctx.pending.rsa_premaster_secret = rand::random_premaster(
        ctx.config.provider.secure_random,
        ctx.client_protocol_version,
    )?;

    let mut ciphertext = vec![0u8; size];
    let encrypted = key.encrypt(
        ctx.pending.rsa_premaster_secret.as_bytes(),
        &mut ciphertext,
    );
    drop(key);
    if let Err(err) = encrypted {
        ctx.pending.rsa_premaster_secret.erase();
        return Err(err);
    }

    let mut body = Vec::with_capacity(size + 2);
    EncryptedPreMasterSecret::new(Payload::new(ciphertext))
        .encode_for_version(ctx.actual_protocol_version, &mut body);
    trace!("sending a {} byte RSA ClientKeyExchange", body.len());
    ctx.handshake.io = body;

    let master_secret = ctx.derive_master_secret(ctx.pending.rsa_premaster_secret.as_bytes());
    ctx.pending.rsa_premaster_secret.erase();

    ctx.finish_key_exchange(master_secret?);
    Ok(())
}
