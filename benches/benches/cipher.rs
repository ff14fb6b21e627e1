use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tapdance::{CipherSuite, force_supported_ciphers_first, force_supported_ciphers_first_u16};

// roughly what a current browser offers
const BROWSER_SUITES: [u16; 15] = [
    0x1301, 0x1302, 0x1303, 0xc02b, 0xc02f, 0xc02c, 0xc030, 0xcca9, 0xcca8, 0xc013, 0xc014,
    0x009c, 0x009d, 0x002f, 0x0035,
];

pub fn cipher_benchmarks(c: &mut Criterion) {
    let suites: Vec<CipherSuite> = BROWSER_SUITES.iter().copied().map(CipherSuite::from).collect();
    c.bench_function("force_supported_ciphers_first, browser list", |b| {
        b.iter(|| force_supported_ciphers_first(black_box(&suites)))
    });

    let tls13_only = [CipherSuite::TLS13_AES_128_GCM_SHA256, CipherSuite::TLS13_AES_256_GCM_SHA384];
    c.bench_function("force_supported_ciphers_first, prepend", |b| {
        b.iter(|| force_supported_ciphers_first(black_box(&tls13_only)))
    });

    c.bench_function("force_supported_ciphers_first_u16, browser list", |b| {
        b.iter(|| force_supported_ciphers_first_u16(black_box(&BROWSER_SUITES)))
    });
}

criterion_group!(benches, cipher_benchmarks);
criterion_main!(benches);
