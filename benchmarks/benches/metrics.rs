use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maintenance_model::loss::binary_cross_entropy;
use maintenance_model::{ClassificationMetrics, LabelRule, MaintenanceModel, SyntheticConfig};

fn bench_classification_metrics(c: &mut Criterion) {
    for size in [100, 1000, 10000, 100000].iter() {
        let ds = SyntheticConfig {
            n_samples: *size,
            seed: 7,
            rule: LabelRule::threshold(),
        }
        .generate()
        .expect("Failed to generate dataset");
        let mut model = MaintenanceModel::new();
        model
            .fit(&ds.features(), &ds.targets(), 50, 0.1)
            .expect("Failed to fit model");
        let probs = model.predict_proba(&ds.features()).expect("predict failed");
        let labels = ds.targets();

        c.bench_with_input(BenchmarkId::new("classification_metrics", size), size, |b, _| {
            b.iter(|| {
                let m = ClassificationMetrics::compute(
                    black_box(probs.view()),
                    black_box(labels.view()),
                    0.5,
                )
                .expect("metrics failed");
                black_box(m);
            });
        });

        c.bench_with_input(BenchmarkId::new("log_loss", size), size, |b, _| {
            b.iter(|| black_box(binary_cross_entropy(probs.view(), labels.view())));
        });
    }
}

criterion_group!(benches, bench_classification_metrics);
criterion_main!(benches);
