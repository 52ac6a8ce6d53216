use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fish_begol_core::{mpc_and, utils::setup_logger, BitMat, SeededPrng, ShareTriple, View};

const DIMENSIONS: &[usize] = &[128, 192, 256, 384, 512, 1024];

fn bench_xor(c: &mut Criterion) {
    setup_logger();
    let mut group = c.benchmark_group("xor");
    for &bits in DIMENSIONS {
        let mut rng = SeededPrng::new([1u8; 16]);
        let mut a = BitMat::init_vector(bits);
        a.randomize(&mut rng);
        let mut b = BitMat::init_vector(bits);
        b.randomize(&mut rng);
        let mut dst = BitMat::init_vector(bits);

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bencher, _| {
            bencher.iter(|| {
                dst.xor(black_box(&a), black_box(&b));
            });
        });
    }
    group.finish();
}

fn bench_and(c: &mut Criterion) {
    let mut group = c.benchmark_group("and");
    for &bits in DIMENSIONS {
        let mut rng = SeededPrng::new([2u8; 16]);
        let mut a = BitMat::init_vector(bits);
        a.randomize(&mut rng);
        let mut b = BitMat::init_vector(bits);
        b.randomize(&mut rng);
        let mut dst = BitMat::init_vector(bits);

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bencher, _| {
            bencher.iter(|| {
                dst.and(black_box(&a), black_box(&b));
            });
        });
    }
    group.finish();
}

fn bench_mul_v(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul_v");
    for &bits in DIMENSIONS {
        let mut rng = SeededPrng::new([3u8; 16]);
        let mut a = BitMat::init(bits, bits);
        for i in 0..bits {
            let mut row = BitMat::init_vector(bits);
            row.randomize(&mut rng);
            a.row_mut(i).copy_from_slice(row.row(0));
        }
        let mut v = BitMat::init_vector(bits);
        v.randomize(&mut rng);
        let mut c_vec = BitMat::init_vector(bits);

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bencher, _| {
            bencher.iter(|| {
                c_vec.mul_v(black_box(&v), black_box(&a)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_mpc_and(c: &mut Criterion) {
    let mut group = c.benchmark_group("mpc_and");
    for &bits in &[64usize, 256, 1024] {
        let mut rng = SeededPrng::new([4u8; 16]);
        let mut x = BitMat::init_vector(bits);
        x.randomize(&mut rng);
        let mut y = BitMat::init_vector(bits);
        y.randomize(&mut rng);

        let a = ShareTriple::share_secret(&x, &mut rng);
        let b = ShareTriple::share_secret(&y, &mut rng);
        let r = ShareTriple::share_empty(bits);
        let mut view = View::init(bits);
        let mut res = ShareTriple::share_empty(bits);

        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bencher, _| {
            bencher.iter(|| {
                mpc_and(
                    black_box(&mut res),
                    black_box(&a),
                    black_box(&b),
                    black_box(&r),
                    black_box(&mut view),
                    0,
                );
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_xor, bench_and, bench_mul_v, bench_mpc_and);
criterion_main!(benches);
