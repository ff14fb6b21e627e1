use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand_core::RngCore;
use rand_xoshiro::Xoshiro256StarStar;
use rand_xoshiro::rand_core::SeedableRng;
use tapdance::{TimingPolicy, WindowKind, decode_flags};

pub fn timing_rng_source_benchmarks(c: &mut Criterion) {
    let n = 10;
    let policy = TimingPolicy::default();

    c.bench_function("sample all windows 10 times, rand::rng()", |b| {
        let rng = &mut rand::rng();
        b.iter(|| sample_windows(&policy, rng, black_box(n)))
    });
    c.bench_function("sample all windows 10 times, Xoshiro256StarStar", |b| {
        let rng = &mut Xoshiro256StarStar::seed_from_u64(0);
        b.iter(|| sample_windows(&policy, rng, black_box(n)))
    });
}

pub fn flag_benchmarks(c: &mut Criterion) {
    c.bench_function("decode_flags all bytes", |b| {
        b.iter(|| {
            let mut reserved = 0;
            for byte in 0..=u8::MAX {
                if decode_flags(black_box(byte)).reserved_bits_set {
                    reserved += 1;
                }
            }
            reserved
        })
    });
}

fn sample_windows<R: RngCore>(policy: &TimingPolicy, rng: &mut R, n: usize) -> u64 {
    let mut sum = 0;
    for _ in 0..n {
        for kind in WindowKind::iter() {
            sum += policy.sample(*kind, rng);
        }
    }
    sum
}

criterion_group!(benches, timing_rng_source_benchmarks, flag_benchmarks);
criterion_main!(benches);
