/*!
# Category inference benchmarks

Measures the keyword scan behind automatic part categorisation and the
name-suggestion lookup.

## Usage

```bash
cargo bench --bench category_inference

# Quick run with fewer samples
cargo bench --bench category_inference -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use partstock::catalog::suggest;
use partstock::category::infer_category;
use std::hint::black_box;

/// Names spread across the keyword buckets, plus misses that scan every
/// bucket before falling through to `other`.
const SAMPLE_NAMES: &[&str] = &[
    "Двигатель 1.6 бензин",
    "КПП механика 5ст",
    "Амортизатор передний левый",
    "Суппорт тормозной задний",
    "Генератор 90А",
    "Капот в сборе",
    "Руль с подушкой",
    "Фара левая ксенон",
    "Болт М8",
    "Комплект проставок",
];

fn bench_infer_category(c: &mut Criterion) {
    let mut group = c.benchmark_group("Category Inference");

    group.bench_function("single_hit_first_bucket", |b| {
        b.iter(|| infer_category(black_box("Двигатель 1.6 бензин")));
    });

    group.bench_function("single_hit_last_bucket", |b| {
        b.iter(|| infer_category(black_box("Литой диск R16")));
    });

    group.bench_function("single_miss", |b| {
        b.iter(|| infer_category(black_box("Болт М8")));
    });

    group.bench_function("mixed_batch", |b| {
        b.iter(|| {
            for name in SAMPLE_NAMES {
                black_box(infer_category(black_box(name)));
            }
        });
    });

    group.finish();
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("Name Suggestions");

    for (label, query) in [("narrow", "генератор"), ("broad", "а"), ("miss", "qqq")] {
        group.bench_with_input(BenchmarkId::new("suggest", label), &query, |b, query| {
            b.iter(|| suggest(black_box(query), 10));
        });
    }

    group.bench_function("suggest_unbounded", |b| {
        b.iter(|| suggest(black_box("а"), usize::MAX));
    });

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(5))
        .warm_up_time(std::time::Duration::from_secs(1))
        .with_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_infer_category, bench_suggest
}
criterion_main!(benches);
