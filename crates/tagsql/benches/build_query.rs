use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tagsql::{Builder, Columns, Conditions, Postgres, Query, Value, order_by, params};

#[derive(Columns)]
#[allow(dead_code)]
struct Wide {
    id: i64,
    name: String,
    email: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

/// WHERE col0 = $1 AND col1 = $2 ...
fn conditions(n: usize) -> Conditions {
    let mut conds = Conditions::new();
    for i in 0..n {
        conds = conds.where_(format!("col{i} = %s"), [Value::Int(i as i64)]);
    }
    conds
}

fn bench_build_cached_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_query/cached_shape");
    let builder = Builder::new(Postgres);

    for n in [1, 5, 10, 50] {
        let query = Query::of::<Wide>("t")
            .filter(&conditions(n))
            .order_by(order_by("id").desc())
            .limit(20);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(builder.build(query)));
        });
    }

    group.finish();
}

fn bench_build_raw_select(c: &mut Criterion) {
    let builder = Builder::new(Postgres);
    let query = Query::new("id, name", "t").where_("id = %s", params![1]);
    c.bench_function("build_query/raw_select", |b| {
        b.iter(|| black_box(builder.build(&query)));
    });
}

fn bench_cold_cache(c: &mut Criterion) {
    let query = Query::of::<Wide>("t");
    c.bench_function("build_query/cold_cache", |b| {
        b.iter(|| {
            let builder = Builder::new(Postgres);
            black_box(builder.build(&query))
        });
    });
}

criterion_group!(
    benches,
    bench_build_cached_shape,
    bench_build_raw_select,
    bench_cold_cache
);
criterion_main!(benches);
