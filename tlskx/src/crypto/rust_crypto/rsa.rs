use core::fmt;

use ::rsa::pkcs1::DecodeRsaPrivateKey;
use ::rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use ::rsa::traits::PublicKeyParts;
use ::rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use pki_types::{PrivateKeyDer, SubjectPublicKeyInfoDer};
use zeroize::Zeroize;

use super::other_err;
use crate::crypto::{RsaDecryptingKey, RsaEncryptingKey};
use crate::error::Error;

pub(super) struct RsaDecrypter(RsaPrivateKey);

impl TryFrom<&PrivateKeyDer<'_>> for RsaDecrypter {
    type Error = Error;

    fn try_from(key_der: &PrivateKeyDer<'_>) -> Result<Self, Self::Error> {
        let key = match key_der {
            PrivateKeyDer::Pkcs8(der) => {
                RsaPrivateKey::from_pkcs8_der(der.secret_pkcs8_der()).map_err(other_err)?
            }
            PrivateKeyDer::Pkcs1(der) => {
                RsaPrivateKey::from_pkcs1_der(der.secret_pkcs1_der()).map_err(other_err)?
            }
            _ => {
                return Err(Error::General(
                    "only PKCS#8 and PKCS#1 RSA private keys are supported".into(),
                ))
            }
        };
        Ok(Self(key))
    }
}

impl RsaDecryptingKey for RsaDecrypter {
    fn decrypt(&self, ciphertext: &[u8], out: &mut [u8]) -> Result<(), Error> {
        let mut plaintext = self
            .0
            .decrypt_blinded(&mut rand_core::OsRng, Pkcs1v15Encrypt, ciphertext)
            .map_err(|_| Error::DecryptError)?;

        let result = match plaintext.len() == out.len() {
            true => {
                out.copy_from_slice(&plaintext);
                Ok(())
            }
            false => Err(Error::DecryptError),
        };
        plaintext.zeroize();
        result
    }
}

impl fmt::Debug for RsaDecrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaDecrypter")
            .field("modulus_len", &self.0.size())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub(super) struct RsaEncrypter(RsaPublicKey);

impl TryFrom<&SubjectPublicKeyInfoDer<'_>> for RsaEncrypter {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfoDer<'_>) -> Result<Self, Self::Error> {
        Ok(Self(
            RsaPublicKey::from_public_key_der(spki.as_ref()).map_err(other_err)?,
        ))
    }
}

impl RsaEncryptingKey for RsaEncrypter {
    fn encrypted_size(&self) -> usize {
        self.0.size()
    }

    fn encrypt(&self, plaintext: &[u8], out: &mut [u8]) -> Result<(), Error> {
        let ciphertext = self
            .0
            .encrypt(&mut rand_core::OsRng, Pkcs1v15Encrypt, plaintext)
            .map_err(|_| Error::EncryptError)?;
        if ciphertext.len() != out.len() {
            return Err(Error::EncryptError);
        }
        out.copy_from_slice(&ciphertext);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pki_types::pem::PemObject;
    use pki_types::PrivatePkcs1KeyDer;

    fn pair() -> (RsaDecrypter, RsaEncrypter) {
        let key = PrivateKeyDer::from_pem_slice(include_bytes!("../../../testdata/rsa-2048.key.pem"))
            .unwrap();
        let spki =
            SubjectPublicKeyInfoDer::from_pem_slice(include_bytes!("../../../testdata/rsa-2048.spki.pem"))
                .unwrap();
        (
            RsaDecrypter::try_from(&key).unwrap(),
            RsaEncrypter::try_from(&spki).unwrap(),
        )
    }

    #[test]
    fn encrypt_then_decrypt() {
        let (private, public) = pair();
        assert_eq!(public.encrypted_size(), 256);

        let plaintext = [0x42u8; 48];
        let mut ciphertext = vec![0u8; public.encrypted_size()];
        public.encrypt(&plaintext, &mut ciphertext).unwrap();

        let mut out = [0u8; 48];
        private.decrypt(&ciphertext, &mut out).unwrap();
        assert_eq!(out, plaintext);
    }

    #[test]
    fn decrypt_rejects_wrong_length_plaintext() {
        let (private, public) = pair();
        let mut ciphertext = vec![0u8; public.encrypted_size()];
        public.encrypt(&[1u8; 47], &mut ciphertext).unwrap();

        let mut out = [0u8; 48];
        assert_eq!(
            private.decrypt(&ciphertext, &mut out),
            Err(Error::DecryptError)
        );
    }

    #[test]
    fn decrypt_rejects_garbage() {
        let (private, _) = pair();
        let mut out = [0u8; 48];
        assert_eq!(private.decrypt(&[0u8; 48], &mut out), Err(Error::DecryptError));
        assert_eq!(private.decrypt(&[0xffu8; 256], &mut out), Err(Error::DecryptError));
        assert_eq!(private.decrypt(&[], &mut out), Err(Error::DecryptError));
    }

    #[test]
    fn pkcs1_keys_load() {
        let der = include_bytes!("../../../testdata/rsa-2048.key.der");
        let pkcs1 = PrivateKeyDer::Pkcs1(PrivatePkcs1KeyDer::from(&der[..]));
        let private = RsaDecrypter::try_from(&pkcs1).unwrap();
        let (_, public) = pair();

        let mut ciphertext = vec![0u8; public.encrypted_size()];
        public.encrypt(&[9u8; 48], &mut ciphertext).unwrap();
        let mut out = [0u8; 48];
        private.decrypt(&ciphertext, &mut out).unwrap();
        assert_eq!(out, [9u8; 48]);
    }

    #[test]
    fn bad_key_encodings_are_errors() {
        let pkcs1 = PrivateKeyDer::Pkcs1(PrivatePkcs1KeyDer::from(&[0x30u8, 0x00][..]));
        assert!(RsaDecrypter::try_from(&pkcs1).is_err());
        let spki = SubjectPublicKeyInfoDer::from(&[0x30u8, 0x01, 0x00][..]);
        assert!(RsaEncrypter::try_from(&spki).is_err());
    }
}
