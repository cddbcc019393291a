use core::marker::PhantomData;

use ::hmac::digest::core_api::BlockSizeUser;
use ::hmac::digest::{Digest, KeyInit};
use ::hmac::{Mac, SimpleHmac};

use crate::crypto::hmac;
use crate::error::Error;

pub(super) static HMAC_MD5: Hmac<md5::Md5> = Hmac(PhantomData);
pub(super) static HMAC_SHA1: Hmac<sha1::Sha1> = Hmac(PhantomData);
pub(super) static HMAC_SHA256: Hmac<sha2::Sha256> = Hmac(PhantomData);
pub(super) static HMAC_SHA384: Hmac<sha2::Sha384> = Hmac(PhantomData);

pub(super) struct Hmac<D>(PhantomData<fn() -> D>);

impl<D> hmac::Hmac for Hmac<D>
where
    D: Digest + BlockSizeUser + Clone + Send + Sync + 'static,
{
    fn with_key(&self, key: &[u8]) -> Result<Box<dyn hmac::Key>, Error> {
        let mac = <SimpleHmac<D> as KeyInit>::new_from_slice(key)
            .map_err(|_| Error::General("invalid HMAC key".into()))?;
        Ok(Box::new(Key(mac)))
    }
}

struct Key<D: Digest + BlockSizeUser>(SimpleHmac<D>);

impl<D> hmac::Key for Key<D>
where
    D: Digest + BlockSizeUser + Clone + Send + Sync + 'static,
{
    fn sign_concat(&self, first: &[u8], middle: &[&[u8]], last: &[u8]) -> hmac::Tag {
        let mut ctx = self.0.clone();
        Mac::update(&mut ctx, first);
        for m in middle {
            Mac::update(&mut ctx, m);
        }
        Mac::update(&mut ctx, last);
        hmac::Tag::new(&Mac::finalize(ctx).into_bytes()[..])
    }

    fn tag_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}
