//! Training orchestration.
//!
//! Runs the full batch: resolve the data source, derive labels through
//! the registered contract, split, fit the feature pipeline and
//! classifier, evaluate, and persist the model and metrics artifacts.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::Utc;
use ndarray::{Array1, Array2};
use tracing::{info, warn};

use super::gradient_boosting::{GradientBoostingClassifier, GradientBoostingConfig};
use super::metrics::BinaryMetrics;
use crate::artifact::{MetricsSnapshot, ModelArtifact};
use crate::error::{ChurnError, Result};
use crate::label;
use crate::pipeline::FeaturePipeline;
use crate::record::{CustomerRecord, LabeledExample};
use crate::split::{self, DatasetSplit};

/// Paths and knobs for one training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Cleaned CSV, preferred when it has data rows.
    pub clean_data: PathBuf,
    /// Raw CSV fallback.
    pub raw_data: PathBuf,
    pub model_path: PathBuf,
    pub metrics_path: PathBuf,
    /// Split seed; fixed for reproducible runs.
    pub seed: u64,
    pub boosting: GradientBoostingConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            clean_data: PathBuf::from("artifacts/clean/telco_clean.csv"),
            raw_data: PathBuf::from("data/telco.csv"),
            model_path: PathBuf::from("artifacts/model.json"),
            metrics_path: PathBuf::from("artifacts/metrics.json"),
            seed: split::DEFAULT_SPLIT_SEED,
            boosting: GradientBoostingConfig::default(),
        }
    }
}

/// One-shot training engine.
pub struct TrainEngine {
    config: TrainingConfig,
}

impl TrainEngine {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Run training end to end and return the evaluation snapshot.
    pub fn run(&self) -> Result<MetricsSnapshot> {
        let source = self.resolve_data_source()?;
        info!(source = %source.display(), "loading training data");
        let records = load_records(&source)?;

        let label_fn = label::resolve(label::CHURN_LABEL_CONTRACT).ok_or_else(|| {
            ChurnError::UnknownContract(label::CHURN_LABEL_CONTRACT.to_string())
        })?;
        let examples: Vec<LabeledExample> = records
            .into_iter()
            .map(|record| LabeledExample {
                label: label_fn(&record.churn),
                record,
            })
            .collect();

        let dataset = split::stratified_split(examples, self.config.seed)?;
        info!(
            train = dataset.train.len(),
            test = dataset.test.len(),
            "dataset split"
        );

        let train_records: Vec<CustomerRecord> =
            dataset.train.iter().map(|e| e.record.clone()).collect();
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&train_records)?;

        let x_train = pipeline.transform(&train_records)?;
        let y_train = labels_vector(&dataset.train);

        let mut model = GradientBoostingClassifier::new(self.config.boosting.clone());
        model.fit(&x_train, &y_train)?;

        let metrics = evaluate(&pipeline, &model, &dataset, &x_train, &y_train)?;
        info!(
            auc = metrics.auc,
            accuracy = metrics.accuracy,
            f1 = metrics.f1,
            "evaluation complete"
        );

        let snapshot = MetricsSnapshot {
            area_under_roc_curve: metrics.auc,
            accuracy: metrics.accuracy,
            f1_score: metrics.f1,
            date: Utc::now(),
        };
        ModelArtifact::new(pipeline, model).save(&self.config.model_path)?;
        snapshot.save(&self.config.metrics_path)?;
        info!(
            model = %self.config.model_path.display(),
            metrics = %self.config.metrics_path.display(),
            "artifacts written"
        );

        Ok(snapshot)
    }

    /// Prefer the cleaned CSV when it holds data rows, fall back to the
    /// raw CSV, otherwise fail.
    fn resolve_data_source(&self) -> Result<PathBuf> {
        if has_data_rows(&self.config.clean_data) {
            return Ok(self.config.clean_data.clone());
        }
        if has_data_rows(&self.config.raw_data) {
            warn!(
                clean = %self.config.clean_data.display(),
                "cleaned dataset missing or empty, training on raw data"
            );
            return Ok(self.config.raw_data.clone());
        }
        Err(ChurnError::DataError(format!(
            "no training data: clean='{}', raw='{}'",
            self.config.clean_data.display(),
            self.config.raw_data.display()
        )))
    }
}

/// Evaluate on the test split; when its labels collapse to one class the
/// run degrades to a training-set evaluation instead of failing.
fn evaluate(
    pipeline: &FeaturePipeline,
    model: &GradientBoostingClassifier,
    dataset: &DatasetSplit,
    x_train: &Array2<f64>,
    y_train: &Array1<f64>,
) -> Result<BinaryMetrics> {
    let single_class =
        dataset.test.iter().all(|e| e.label) || dataset.test.iter().all(|e| !e.label);
    if single_class {
        warn!("test set has a single class; evaluating on the training set instead");
        let probs = model.predict_proba(x_train)?;
        return Ok(BinaryMetrics::compute(y_train, &probs));
    }

    let test_records: Vec<CustomerRecord> =
        dataset.test.iter().map(|e| e.record.clone()).collect();
    let x_test = pipeline.transform(&test_records)?;
    let probs = model.predict_proba(&x_test)?;
    Ok(BinaryMetrics::compute(&labels_vector(&dataset.test), &probs))
}

fn labels_vector(examples: &[LabeledExample]) -> Array1<f64> {
    examples
        .iter()
        .map(|e| if e.label { 1.0 } else { 0.0 })
        .collect()
}

/// True when the file exists and has at least one row after the header.
fn has_data_rows(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    BufReader::new(file).lines().nth(1).is_some()
}

/// Load customer records from a CSV, matching columns by header name.
/// Rows that fail to deserialize are skipped with a warning, mirroring
/// the tolerance of the cleaning step.
pub fn load_records(path: &Path) -> Result<Vec<CustomerRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => warn!(error = %e, "skipping unreadable row"),
        }
    }
    Ok(records)
}
