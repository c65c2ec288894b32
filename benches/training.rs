use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use rand::prelude::*;

use telco_churn::pipeline::FeaturePipeline;
use telco_churn::record::CustomerRecord;
use telco_churn::train::{GradientBoostingClassifier, GradientBoostingConfig};

fn create_customers(n: usize) -> Vec<CustomerRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    let contracts = ["Month-to-month", "One year", "Two year"];
    let services = ["DSL", "Fiber optic", "No"];

    (0..n)
        .map(|i| {
            let tenure = rng.gen_range(0.0..72.0);
            let monthly = rng.gen_range(20.0..120.0);
            CustomerRecord {
                customer_id: format!("C{i}"),
                gender: if rng.gen_bool(0.5) { "Female" } else { "Male" }.into(),
                tenure,
                monthly_charges: monthly,
                total_charges: tenure * monthly,
                contract: contracts[rng.gen_range(0..contracts.len())].into(),
                internet_service: services[rng.gen_range(0..services.len())].into(),
                churn: if tenure < 12.0 && monthly > 80.0 { "Yes" } else { "No" }.into(),
            }
        })
        .collect()
}

fn labels(records: &[CustomerRecord]) -> Array1<f64> {
    records
        .iter()
        .map(|r| if telco_churn::label::churned(&r.churn) { 1.0 } else { 0.0 })
        .collect()
}

fn bench_pipeline_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for n in [1000, 5000].iter() {
        let records = create_customers(*n);
        group.bench_with_input(BenchmarkId::new("fit_transform", n), &records, |b, records| {
            b.iter(|| {
                let mut pipeline = FeaturePipeline::new();
                pipeline.fit(black_box(records)).unwrap();
                pipeline.transform(black_box(records)).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    for n in [1000, 5000].iter() {
        let records = create_customers(*n);
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&records).unwrap();
        let x = pipeline.transform(&records).unwrap();
        let y = labels(&records);

        group.bench_with_input(BenchmarkId::new("fit", n), &(x, y), |b, (x, y)| {
            b.iter(|| {
                let config = GradientBoostingConfig {
                    n_estimators: 20,
                    ..Default::default()
                };
                let mut model = GradientBoostingClassifier::new(config);
                model.fit(black_box(x), black_box(y)).unwrap();
                model
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline_fit, bench_training);
criterion_main!(benches);
