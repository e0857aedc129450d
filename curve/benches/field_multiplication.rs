use cn_curve::{FieldElement, Random, Scalar};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_field_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    let b = FieldElement::random(&mut rng);
    c.bench_function("field_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_field_square(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    c.bench_function("field_square", |bencher| {
        bencher.iter(|| black_box(black_box(a).square()))
    });
}

fn bench_field_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng);
    c.bench_function("field_invert", |bencher| {
        bencher.iter(|| black_box(black_box(a).invert()))
    });
}

fn bench_scalar_mul_add(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);
    let d = Scalar::random(&mut rng);
    c.bench_function("scalar_mul_add", |bencher| {
        bencher.iter(|| black_box(Scalar::mul_add(black_box(&a), black_box(&b), black_box(&d))))
    });
}

criterion_group!(
    benches,
    bench_field_mul,
    bench_field_square,
    bench_field_invert,
    bench_scalar_mul_add
);
criterion_main!(benches);
