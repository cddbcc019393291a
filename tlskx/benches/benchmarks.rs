use core::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use tlskx::crypto::rust_crypto::default_provider;
use tlskx::ffdhe_groups::FFDHE2048;
use tlskx::pki_types::pem::PemObject;
use tlskx::pki_types::{PrivateKeyDer, SubjectPublicKeyInfoDer};
use tlskx::suites::{TLS_DHE_RSA_WITH_AES_128_GCM_SHA256, TLS_RSA_WITH_AES_128_GCM_SHA256};
use tlskx::{
    ConnectionRandoms, HandshakeContext, KxConfig, ProtocolVersion, Side, SupportedCipherSuite,
};

fn config() -> Arc<KxConfig> {
    let key =
        PrivateKeyDer::from_pem_slice(include_bytes!("../testdata/rsa-2048.key.pem")).unwrap();
    Arc::new(
        KxConfig::builder(Arc::new(default_provider()))
            .with_rsa_private_key(key)
            .unwrap()
            .build(),
    )
}

fn context(
    config: &Arc<KxConfig>,
    side: Side,
    suite: &'static SupportedCipherSuite,
) -> HandshakeContext {
    HandshakeContext::new(
        Arc::clone(config),
        side,
        suite,
        ProtocolVersion::TLSv1_2,
        ProtocolVersion::TLSv1_2,
        ConnectionRandoms::new([1; 32], [2; 32]),
    )
}

fn rsa_body(config: &Arc<KxConfig>) -> Vec<u8> {
    let spki =
        SubjectPublicKeyInfoDer::from_pem_slice(include_bytes!("../testdata/rsa-2048.spki.pem"))
            .unwrap();
    let mut client = context(config, Side::Client, &TLS_RSA_WITH_AES_128_GCM_SHA256);
    client
        .set_server_rsa_public_key(spki)
        .unwrap();
    tlskx::send(&mut client).unwrap();
    client.take_handshake_io()
}

fn bench_rsa_receive(c: &mut Criterion) {
    let config = config();
    let valid = rsa_body(&config);
    let mut invalid_padding = valid.clone();
    invalid_padding[10] ^= 0xff;
    let mut zeros = vec![0x01, 0x00];
    zeros.extend_from_slice(&[0u8; 256]);

    let mut group = c.benchmark_group("rsa_receive");
    group.throughput(Throughput::Elements(1));

    for (name, body) in [
        ("valid", valid),
        ("invalid_padding", invalid_padding),
        ("zeros", zeros),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut server = context(&config, Side::Server, &TLS_RSA_WITH_AES_128_GCM_SHA256);
                server.set_handshake_io(body.clone());
                tlskx::receive(&mut server).unwrap();
                black_box(server.take_master_secret())
            })
        });
    }
}

fn bench_dhe(c: &mut Criterion) {
    let config = config();

    let mut group = c.benchmark_group("dhe");
    group.throughput(Throughput::Elements(1));

    group.bench_function("FFDHE2048", |b| {
        b.iter(|| {
            let mut server = context(&config, Side::Server, &TLS_DHE_RSA_WITH_AES_128_GCM_SHA256);
            let params = server
                .start_server_dhe(FFDHE2048)
                .unwrap();
            let mut client = context(&config, Side::Client, &TLS_DHE_RSA_WITH_AES_128_GCM_SHA256);
            client.set_server_dh_params(params);
            tlskx::send(&mut client).unwrap();
            server.set_handshake_io(client.take_handshake_io());
            tlskx::receive(&mut server).unwrap();
            black_box(server.take_master_secret())
        })
    });
}

criterion_group!(benches, bench_rsa_receive, bench_dhe);
criterion_main!(benches);
