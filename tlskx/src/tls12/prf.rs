use zeroize::Zeroize;

use crate::crypto::{hash, hmac};
use crate::error::Error;

/// The TLS1.2 PRF, `P_hash(secret, label + seed)`.
///
/// `hmac_key` is the secret, keyed into the HMAC of the hash function.
pub(crate) fn prf(out: &mut [u8], hmac_key: &dyn hmac::Key, label: &[u8], seed: &[u8]) {
    // A(1)
    let mut current_a = hmac_key.sign(&[label, seed]);

    let chunk_size = hmac_key.tag_len();
    for chunk in out.chunks_mut(chunk_size) {
        // P_hash[i] = HMAC_hash(secret, A(i) + seed)
        let p_term = hmac_key.sign(&[current_a.as_ref(), label, seed]);
        chunk.copy_from_slice(&p_term.as_ref()[..chunk.len()]);

        // A(i+1) = HMAC_hash(secret, A(i))
        current_a = hmac_key.sign(&[current_a.as_ref()]);
    }
}

/// The TLS1.0 and TLS1.1 PRF: `P_MD5(S1, label + seed) XOR P_SHA1(S2, label + seed)`.
///
/// S1 and S2 are the first and second halves of `secret`; they share the
/// middle byte when its length is odd.
pub(crate) fn tls10_prf(
    out: &mut [u8],
    md5: &dyn hmac::Hmac,
    sha1: &dyn hmac::Hmac,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
) -> Result<(), Error> {
    let half = (secret.len() + 1) / 2;
    let (s1, s2) = (&secret[..half], &secret[secret.len() - half..]);

    prf(out, md5.with_key(s1)?.as_ref(), label, seed);

    let mut sha1_out = vec![0u8; out.len()];
    prf(&mut sha1_out, sha1.with_key(s2)?.as_ref(), label, seed);
    for (o, s) in out.iter_mut().zip(sha1_out.iter()) {
        *o ^= s;
    }
    sha1_out.zeroize();
    Ok(())
}

/// The SSLv3 master secret:
///
/// ```text
/// MD5(pms + SHA1('A' + pms + randoms)) +
/// MD5(pms + SHA1('BB' + pms + randoms)) +
/// MD5(pms + SHA1('CCC' + pms + randoms))
/// ```
pub(crate) fn ssl3_master_secret(
    out: &mut [u8; 48],
    md5: &dyn hash::Hash,
    sha1: &dyn hash::Hash,
    premaster: &[u8],
    client_random: &[u8],
    server_random: &[u8],
) -> Result<(), Error> {
    let chunk_size = md5.output_len();
    if chunk_size * 3 != out.len() {
        return Err(Error::General(format!(
            "SSLv3 master secret needs a {} byte inner hash, not {}",
            out.len() / 3,
            chunk_size
        )));
    }

    for (i, chunk) in out.chunks_mut(chunk_size).enumerate() {
        let salt = [b'A' + i as u8; 3];

        let mut inner = sha1.start();
        inner.update(&salt[..i + 1]);
        inner.update(premaster);
        inner.update(client_random);
        inner.update(server_random);
        let inner = inner.finish();

        let mut outer = md5.start();
        outer.update(premaster);
        outer.update(inner.as_ref());
        chunk.copy_from_slice(outer.finish().as_ref());
    }
    Ok(())
}

#[cfg(all(test, feature = "rust_crypto"))]
mod tests {
    use crate::crypto::hash::HashAlgorithm;
    use crate::crypto::rust_crypto::default_provider;
    use crate::crypto::HashProvider;

    fn hashes() -> &'static dyn HashProvider {
        default_provider().hash_provider
    }

    #[test]
    fn check_sha256() {
        let secret = b"\x9b\xbe\x43\x6b\xa9\x40\xf0\x17\xb1\x76\x52\x84\x9a\x71\xdb\x35";
        let seed = b"\xa0\xba\x9f\x93\x6c\xda\x31\x18\x27\xa6\xf7\x96\xff\xd5\x19\x8c";
        let label = b"test label";
        let expect = include_bytes!("../testdata/prf-result.1.bin");
        let mut output = [0u8; 100];

        super::prf(
            &mut output,
            hashes()
                .hmac(HashAlgorithm::SHA256)
                .unwrap()
                .with_key(secret)
                .unwrap()
                .as_ref(),
            label,
            seed,
        );
        assert_eq!(expect.len(), output.len());
        assert_eq!(expect.to_vec(), output.to_vec());
    }

    #[test]
    fn check_sha384() {
        let secret = b"\xb0\x32\x35\x23\xc1\x85\x35\x99\x58\x4d\x88\x56\x8b\xbb\x05\xeb";
        let seed = b"\xd4\x64\x0e\x12\xe4\xbc\xdb\xfb\x43\x7f\x03\xe6\xae\x41\x8e\xe5";
        let label = b"test label";
        let expect = include_bytes!("../testdata/prf-result.2.bin");
        let mut output = [0u8; 148];

        super::prf(
            &mut output,
            hashes()
                .hmac(HashAlgorithm::SHA384)
                .unwrap()
                .with_key(secret)
                .unwrap()
                .as_ref(),
            label,
            seed,
        );
        assert_eq!(expect.to_vec(), output.to_vec());
    }

    #[test]
    fn check_tls10_odd_length_secret() {
        let seed = b"\xa0\xba\x9f\x93\x6c\xda\x31\x18\x27\xa6\xf7\x96\xff\xd5\x19\x8c";
        let expect = include_bytes!("../testdata/prf-result.4.bin");
        let mut output = [0u8; 40];

        super::tls10_prf(
            &mut output,
            hashes().hmac(HashAlgorithm::MD5).unwrap(),
            hashes().hmac(HashAlgorithm::SHA1).unwrap(),
            &[1, 2, 3, 4, 5, 6, 7],
            b"test label",
            seed,
        )
        .unwrap();
        assert_eq!(expect.to_vec(), output.to_vec());
    }

    #[test]
    fn check_ssl3() {
        let mut premaster = [0u8; 48];
        premaster[..2].copy_from_slice(&[3, 0]);
        for (i, b) in premaster[2..].iter_mut().enumerate() {
            *b = i as u8;
        }
        let expect = include_bytes!("../testdata/ssl3-master-secret.bin");
        let mut output = [0u8; 48];

        super::ssl3_master_secret(
            &mut output,
            hashes().hash(HashAlgorithm::MD5).unwrap(),
            hashes().hash(HashAlgorithm::SHA1).unwrap(),
            &premaster,
            &[0x11; 32],
            &[0x22; 32],
        )
        .unwrap();
        assert_eq!(expect, &output);
    }

    #[test]
    fn ssl3_refuses_mismatched_inner_hash() {
        let mut output = [0u8; 48];
        let sha1 = hashes().hash(HashAlgorithm::SHA1).unwrap();
        assert!(super::ssl3_master_secret(
            &mut output,
            sha1,
            sha1,
            &[3, 0],
            &[0x11; 32],
            &[0x22; 32],
        )
        .is_err());
        assert_eq!(output, [0u8; 48]);
    }
}
