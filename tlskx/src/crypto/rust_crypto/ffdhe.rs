use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::crypto::{ActiveKeyExchange, FfdheGroup, SecureRandom, SharedSecret, SupportedDhe};
use crate::error::{Error, InvalidMessage, PeerMisbehaved};
use crate::rand;

/// Length of the private exponent, in bytes.
const EXPONENT_LEN: usize = 64;

#[derive(Debug)]
pub(super) struct Ffdhe;

impl SupportedDhe for Ffdhe {
    fn start(
        &self,
        group: FfdheGroup<'_>,
        secure_random: &dyn SecureRandom,
    ) -> Result<Box<dyn ActiveKeyExchange>, Error> {
        let p = BigUint::from_bytes_be(group.p);
        let g = BigUint::from_bytes_be(group.g);
        let one = BigUint::from(1u8);
        if p <= BigUint::from(3u8) || g <= one || g >= &p - &one {
            return Err(InvalidMessage::InvalidDhParams.into());
        }

        let mut x = rand::random_vec(secure_random, EXPONENT_LEN)?;
        let exponent = BigUint::from_bytes_be(&x);
        x.zeroize();

        let x_pub = g.modpow(&exponent, &p);
        let x_pub = to_bytes_be_with_len(x_pub, group.p.len());

        Ok(Box::new(ActiveFfdheKx {
            x_pub,
            x: exponent,
            p,
            group_p: group.p.to_vec(),
            group_g: group.g.to_vec(),
        }))
    }
}

struct ActiveFfdheKx {
    x_pub: Vec<u8>,
    x: BigUint,
    p: BigUint,
    group_p: Vec<u8>,
    group_g: Vec<u8>,
}

impl ActiveKeyExchange for ActiveFfdheKx {
    fn complete(self: Box<Self>, peer_pub_key: &[u8]) -> Result<SharedSecret, Error> {
        let peer_pub = BigUint::from_bytes_be(peer_pub_key);
        let one = BigUint::from(1u8);
        if peer_pub <= one || peer_pub >= &self.p - &one {
            return Err(PeerMisbehaved::InvalidDhPublicValue.into());
        }

        let secret = peer_pub.modpow(&self.x, &self.p);
        let secret = to_bytes_be_with_len(secret, self.group_p.len());

        Ok(SharedSecret::from(secret))
    }

    fn pub_key(&self) -> &[u8] {
        &self.x_pub
    }

    fn group(&self) -> FfdheGroup<'_> {
        FfdheGroup {
            p: &self.group_p,
            g: &self.group_g,
        }
    }
}

fn to_bytes_be_with_len(n: BigUint, len_bytes: usize) -> Vec<u8> {
    let mut bytes = n.to_bytes_le();
    bytes.resize(len_bytes, 0);
    bytes.reverse();
    bytes
}
