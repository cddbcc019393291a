#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate tlskx;

use std::sync::{Arc, OnceLock};

use tlskx::crypto::rust_crypto::default_provider;
use tlskx::ffdhe_groups::FFDHE2048;
use tlskx::pki_types::pem::PemObject;
use tlskx::pki_types::PrivateKeyDer;
use tlskx::suites::{TLS_DHE_RSA_WITH_AES_128_GCM_SHA256, TLS_RSA_WITH_AES_128_GCM_SHA256};
use tlskx::{ConnectionRandoms, HandshakeContext, KxConfig, ProtocolVersion, Side};

fn config() -> Arc<KxConfig> {
    static CONFIG: OnceLock<Arc<KxConfig>> = OnceLock::new();
    CONFIG
        .get_or_init(|| {
            let key = PrivateKeyDer::from_pem_slice(include_bytes!(
                "../../tlskx/testdata/rsa-1024.key.pem"
            ))
            .unwrap();
            Arc::new(
                KxConfig::builder(Arc::new(default_provider()))
                    .with_rsa_private_key(key)
                    .unwrap()
                    .build(),
            )
        })
        .clone()
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };

    let (suite, version) = match selector % 3 {
        0 => (&TLS_RSA_WITH_AES_128_GCM_SHA256, ProtocolVersion::TLSv1_2),
        1 => (&TLS_RSA_WITH_AES_128_GCM_SHA256, ProtocolVersion::SSLv3),
        _ => (&TLS_DHE_RSA_WITH_AES_128_GCM_SHA256, ProtocolVersion::TLSv1_2),
    };

    let mut server = HandshakeContext::new(
        config(),
        Side::Server,
        suite,
        version,
        version,
        ConnectionRandoms::new([0; 32], [0; 32]),
    );
    if selector % 3 == 2 {
        server
            .start_server_dhe(FFDHE2048)
            .unwrap();
    }
    server.set_handshake_io(body.to_vec());

    if tlskx::receive(&mut server).is_ok() {
        assert!(server.master_secret().is_some());
        assert!(server.premaster_secret().is_erased());
    }
});
