//! The single place where we generate random material for our own use.

use crate::conn::PremasterSecret;
use crate::crypto::SecureRandom;
use crate::enums::ProtocolVersion;

/// Make a [`Vec<u8>`] of the given size containing random material.
pub(crate) fn random_vec(
    secure_random: &dyn SecureRandom,
    len: usize,
) -> Result<Vec<u8>, GetRandomFailed> {
    let mut v = vec![0; len];
    secure_random.fill(&mut v)?;
    Ok(v)
}

/// Make a premaster secret carrying `version` in its first two bytes,
/// with the rest random.
pub(crate) fn random_premaster(
    secure_random: &dyn SecureRandom,
    version: ProtocolVersion,
) -> Result<PremasterSecret, GetRandomFailed> {
    let mut pms = PremasterSecret::zeroed();
    secure_random.fill(&mut pms.as_mut_bytes()[2..])?;
    pms.set_version(version);
    Ok(pms)
}

/// Random material generation failed.
#[derive(Debug)]
pub struct GetRandomFailed;
