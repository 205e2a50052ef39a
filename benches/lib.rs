use std::array;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use decnum::{Condition, Context, Decimal};
use rand::{thread_rng, Rng};

const N: usize = 1 << 10;

fn random_pairs() -> [(Decimal, Decimal); N] {
    array::from_fn(|_| {
        let mut rng = thread_rng();
        (rng.gen(), rng.gen())
    })
}

fn bench_divide(c: &mut Criterion) {
    let data = random_pairs();

    let mut group = c.benchmark_group("divide");
    for prec in [9, 34, 100] {
        let ctx = Context::new(prec);
        group.bench_function(format!("prec{prec}"), |b| {
            let mut out = Decimal::zero();
            let mut i = 0;
            b.iter(|| {
                let (lhs, rhs) = &data[i % data.len()];
                let mut status = Condition::empty();
                decnum::divide(&mut out, black_box(lhs), black_box(rhs), &ctx, &mut status);
                black_box((&out, status));
                i += 1;
            });
        });
    }

    // Every first attempt fails and is retried.
    let ctx = Context::new(34).with_alloc_limit(Some(8));
    let data: [_; N] = array::from_fn(|_| {
        let mut rng = thread_rng();
        let lhs = Decimal::new(false, rng.gen_range(1..1000), rng.gen_range(-5..5));
        let rhs = Decimal::new(false, 1u64 << rng.gen_range(0..4u32), 0);
        (lhs, rhs)
    });
    group.bench_function("retry", |b| {
        let mut i = 0;
        b.iter(|| {
            let (lhs, rhs) = &data[i % data.len()];
            black_box(black_box(lhs).div(black_box(rhs), &ctx));
            i += 1;
        });
    });
    group.finish();
}

fn bench_sqrt(c: &mut Criterion) {
    let data = random_pairs().map(|(x, _)| x);

    let mut group = c.benchmark_group("sqrt");
    for prec in [9, 34, 100] {
        let ctx = Context::new(prec);
        group.bench_function(format!("prec{prec}"), |b| {
            let mut out = Decimal::zero();
            let mut i = 0;
            b.iter(|| {
                let x = &data[i % data.len()];
                let mut status = Condition::empty();
                decnum::sqrt(&mut out, black_box(x), &ctx, &mut status);
                black_box((&out, status));
                i += 1;
            });
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let data = random_pairs().map(|(x, _)| x.to_string());

    c.bench_function("parse", |b| {
        let mut i = 0;
        b.iter(|| {
            let s = &data[i % data.len()];
            black_box(black_box(s).parse::<Decimal>()).ok();
            i += 1;
        });
    });
}

criterion_group!(benches, bench_divide, bench_sqrt, bench_parse);
criterion_main!(benches);
