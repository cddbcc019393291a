use core::fmt::Debug;

use crate::error::Error;

/// An RSA private key that can decrypt PKCS#1 v1.5 `EncryptedPreMasterSecret`s.
///
/// Implementations should make the running time independent of whether the
/// padding was valid.
pub trait RsaDecryptingKey: Send + Sync + Debug {
    /// Decrypt `ciphertext`, writing the plaintext to `out`.
    ///
    /// Fails with [`Error::DecryptError`] if the ciphertext doesn't decrypt, or
    /// if the plaintext is not exactly `out.len()` bytes long.  The caller never
    /// reports this failure to the peer, and on failure the contents of `out`
    /// are unspecified.
    fn decrypt(&self, ciphertext: &[u8], out: &mut [u8]) -> Result<(), Error>;
}

/// The server's RSA public key, as the client uses it to send the premaster secret.
pub trait RsaEncryptingKey: Send + Sync + Debug {
    /// The length of every ciphertext this key produces: the modulus size in bytes.
    fn encrypted_size(&self) -> usize;

    /// Encrypt `plaintext` with PKCS#1 v1.5 padding, writing the ciphertext to `out`.
    ///
    /// `out` is exactly [`Self::encrypted_size()`] bytes long.
    fn encrypt(&self, plaintext: &[u8], out: &mut [u8]) -> Result<(), Error>;
}
