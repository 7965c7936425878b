use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use smallbank_classifier::{
    ConcurrencyControlClassifier, ConcurrencyFeatures, PartitionFeatures, PartitioningClassifier,
};
use tempfile::tempdir;

const SAMPLE_COUNT: usize = 1_000;

fn training_text() -> String {
    let mut text = String::new();
    for i in 0..SAMPLE_COUNT {
        let conf_rate = (i % 97) as f64 / 97.0;
        let read_rate = (i % 89) as f64 / 89.0;
        let outcome = if conf_rate < 0.3 {
            0
        } else if read_rate < 0.5 {
            1
        } else {
            2
        };
        let _ = writeln!(
            text,
            "{i}\t0\t0\t0\t0\t{:.4}\t{:.4}\t{:.4}\t0.5000\t{read_rate:.4}\t{conf_rate:.4}\t{outcome}",
            (i % 50) as f64,
            (i % 7) as f64 / 7.0,
            (i % 13) as f64,
        );
    }
    text
}

fn bench_predict(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("train.out");
    std::fs::write(&path, training_text()).expect("write training file");
    let partition = PartitioningClassifier::train(&path).expect("train partition");
    let concurrency = ConcurrencyControlClassifier::train(&path).expect("train concurrency");

    let features = PartitionFeatures::new(25.0, 0.4, 6.0, 0.5, 0.7, 0.6);
    c.bench_function("partition_predict", |b| {
        b.iter(|| partition.predict(black_box(features)));
    });
    let features = ConcurrencyFeatures::from(features);
    c.bench_function("concurrency_predict", |b| {
        b.iter(|| concurrency.predict(black_box(features)));
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
