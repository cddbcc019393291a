use core::marker::PhantomData;

use sha2::Digest;

use crate::crypto::hash;

pub(super) static MD5: Hash<md5::Md5> = Hash(PhantomData);
pub(super) static SHA1: Hash<sha1::Sha1> = Hash(PhantomData);
pub(super) static SHA256: Hash<sha2::Sha256> = Hash(PhantomData);
pub(super) static SHA384: Hash<sha2::Sha384> = Hash(PhantomData);

pub(super) struct Hash<D>(PhantomData<fn() -> D>);

impl<D> hash::Hash for Hash<D>
where
    D: Digest + Send + Sync + 'static,
{
    fn start(&self) -> Box<dyn hash::Context> {
        Box::new(Context(D::new()))
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}

struct Context<D>(D);

impl<D> hash::Context for Context<D>
where
    D: Digest + Send + Sync,
{
    fn finish(self: Box<Self>) -> hash::Output {
        hash::Output::new(&self.0.finalize()[..])
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }
}
