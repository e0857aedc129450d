use cn_curve::{
    map_to_point, vartime_double_scalar_mul, vartime_double_scalar_mul_basepoint, EdwardsPoint,
    OddMultiples, Random, Scalar,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_point(rng: &mut StdRng) -> EdwardsPoint {
    EdwardsPoint::mul_base(&Scalar::random(rng))
}

fn bench_add(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let q = random_point(&mut rng);
    c.bench_function("edwards_add", |bencher| {
        bencher.iter(|| black_box(black_box(p) + black_box(q)))
    });
}

fn bench_double(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    c.bench_function("edwards_double", |bencher| {
        bencher.iter(|| black_box(black_box(p).double()))
    });
}

fn bench_compress_decompress(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let bytes = p.compress();
    c.bench_function("edwards_compress", |bencher| {
        bencher.iter(|| black_box(black_box(p).compress()))
    });
    c.bench_function("edwards_decompress", |bencher| {
        bencher.iter(|| black_box(EdwardsPoint::decompress(black_box(&bytes))))
    });
}

fn bench_mul_base(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let s = Scalar::random(&mut rng);
    c.bench_function("mul_base", |bencher| {
        bencher.iter(|| black_box(EdwardsPoint::mul_base(black_box(&s))))
    });
}

fn bench_mul_variable(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s = Scalar::random(&mut rng);
    c.bench_function("mul_variable", |bencher| {
        bencher.iter(|| black_box(black_box(&p) * black_box(&s)))
    });
}

fn bench_double_scalar_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let q = random_point(&mut rng);
    let q_table = OddMultiples::new(&q);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    c.bench_function("vartime_double_scalar_mul_basepoint", |bencher| {
        bencher.iter(|| {
            black_box(vartime_double_scalar_mul_basepoint(
                black_box(&a),
                black_box(&p),
                black_box(&b),
            ))
        })
    });
    c.bench_function("vartime_double_scalar_mul", |bencher| {
        bencher.iter(|| {
            black_box(vartime_double_scalar_mul(
                black_box(&a),
                black_box(&p),
                black_box(&b),
                black_box(&q_table),
            ))
        })
    });
}

fn bench_torsion_check(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let table = OddMultiples::new(&random_point(&mut rng));
    c.bench_function("is_torsion_free", |bencher| {
        bencher.iter(|| black_box(black_box(&table).is_torsion_free()))
    });
}

fn bench_map_to_point(c: &mut Criterion) {
    let digest = [0x5au8; 32];
    c.bench_function("map_to_point", |bencher| {
        bencher.iter(|| black_box(map_to_point(black_box(&digest))))
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_double,
    bench_compress_decompress,
    bench_mul_base,
    bench_mul_variable,
    bench_double_scalar_mul,
    bench_torsion_check,
    bench_map_to_point
);
criterion_main!(benches);
