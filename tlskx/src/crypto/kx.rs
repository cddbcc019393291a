use core::fmt::Debug;

use zeroize::Zeroize;

use crate::crypto::SecureRandom;
use crate::error::Error;
use crate::msgs::ffdhe_groups::FfdheGroup;

/// Finite field Diffie-Hellman over caller-chosen parameters.
pub trait SupportedDhe: Send + Sync + Debug {
    /// Start a key exchange in `group`.
    ///
    /// This will prepare an ephemeral secret key in the group, and a corresponding
    /// public key. The key exchange can be completed by calling [`ActiveKeyExchange::complete()`]
    /// or discarded.
    ///
    /// # Errors
    ///
    /// This can fail if the group parameters are unusable, or if `secure_random`
    /// fails during ephemeral key generation.
    fn start(
        &self,
        group: FfdheGroup<'_>,
        secure_random: &dyn SecureRandom,
    ) -> Result<Box<dyn ActiveKeyExchange>, Error>;
}

/// An in-progress key exchange originating from a [`SupportedDhe`].
pub trait ActiveKeyExchange: Send + Sync {
    /// Completes the key exchange, given the peer's public key.
    ///
    /// This method must return an error if `peer_pub_key` is invalid: either
    /// misencoded, or outside the range `1 < y < p - 1`.
    ///
    /// The result must be left-padded with zeros to the length of the group modulus
    /// (see [`complete_unpadded()`](Self::complete_unpadded) for more details).
    ///
    /// This consumes and so terminates the [`ActiveKeyExchange`].
    fn complete(self: Box<Self>, peer_pub_key: &[u8]) -> Result<SharedSecret, Error>;

    /// Completes the key exchange, given the peer's public key, and strips the
    /// leading zeros from the result.
    ///
    /// SSL 3.0 through TLS 1.2 use the calculated secret stripped of leading zeros
    /// as the premaster secret
    /// [(RFC 5246)](https://www.rfc-editor.org/rfc/rfc5246#section-8.1.2).
    ///
    /// The default implementation delegates to [`complete()`](Self::complete).
    ///
    /// This consumes and so terminates the [`ActiveKeyExchange`].
    fn complete_unpadded(self: Box<Self>, peer_pub_key: &[u8]) -> Result<SharedSecret, Error> {
        let mut complete_res = self.complete(peer_pub_key)?;
        complete_res.strip_leading_zeros();
        Ok(complete_res)
    }

    /// Return the public key being used, left-padded to the modulus length.
    fn pub_key(&self) -> &[u8];

    /// The group the key exchange runs in.
    fn group(&self) -> FfdheGroup<'_>;
}

/// The result from [`ActiveKeyExchange::complete()`].
///
/// The bytes are zeroed when this is dropped.
pub struct SharedSecret {
    buf: Vec<u8>,
    offset: usize,
}

impl SharedSecret {
    /// Returns the shared secret as a slice of bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.buf[self.offset..]
    }

    /// Removes leading zeros from `secret_bytes()` by adjusting the `offset`.
    ///
    /// This function does not re-allocate.
    fn strip_leading_zeros(&mut self) {
        let start = self
            .secret_bytes()
            .iter()
            .position(|x| *x != 0)
            .unwrap_or_else(|| self.secret_bytes().len());
        self.offset += start;
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

impl From<&[u8]> for SharedSecret {
    fn from(source: &[u8]) -> Self {
        Self {
            buf: source.to_vec(),
            offset: 0,
        }
    }
}

impl From<Vec<u8>> for SharedSecret {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf, offset: 0 }
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
