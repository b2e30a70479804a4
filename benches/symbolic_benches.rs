use RustedDerivator::symbolic::symbolic_engine::Expression;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const INPUT: &str = "x^3*sin(x)+ln(x+2)/(x^2+1)-cos(x*x)$";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse expression", |b| {
        b.iter(|| Expression::parse_expression(black_box(INPUT)))
    });
}

fn bench_derive_nth(c: &mut Criterion) {
    let expr = Expression::parse_expression(INPUT).unwrap();
    let mut group = c.benchmark_group("derive_nth");
    for n in [1, 3, 5] {
        group.bench_function(format!("order {}", n), |b| {
            b.iter(|| {
                let mut e = expr.clone();
                e.derive_nth(black_box(n))
            })
        });
    }
    group.finish();
}

fn bench_taylor(c: &mut Criterion) {
    let expr = Expression::parse_expression("sin(x)*cos(x)$").unwrap();
    c.bench_function("taylor series order 7", |b| {
        b.iter(|| {
            let mut e = expr.clone();
            e.taylor_series(black_box(7))
        })
    });
}

criterion_group!(benches, bench_parse, bench_derive_nth, bench_taylor);
criterion_main!(benches);
