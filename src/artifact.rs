//! Persisted training outputs.
//!
//! The model artifact bundles the fitted feature pipeline and classifier
//! with the label contract name used at training time; loading re-resolves
//! the contract through the label registry so training and scoring can
//! never drift apart. Writes go to a temporary file first and are renamed
//! into place, so a concurrent reader only ever observes a complete file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChurnError, Result};
use crate::label;
use crate::pipeline::FeaturePipeline;
use crate::train::GradientBoostingClassifier;

/// Artifact schema version; bumped when the layout changes.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// The full fitted pipeline persisted by one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    /// Contract name of the label transform used during training.
    pub label_contract: String,
    pub pipeline: FeaturePipeline,
    pub model: GradientBoostingClassifier,
}

impl ModelArtifact {
    pub fn new(pipeline: FeaturePipeline, model: GradientBoostingClassifier) -> Self {
        Self {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            label_contract: label::CHURN_LABEL_CONTRACT.to_string(),
            pipeline,
            model,
        }
    }

    /// Persist as pretty JSON, atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &serde_json::to_string_pretty(self)?)
    }

    /// Load and validate an artifact. Fails when the recorded label
    /// contract is not present in the registry.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let artifact: Self = serde_json::from_str(&json)?;

        if label::resolve(&artifact.label_contract).is_none() {
            return Err(ChurnError::UnknownContract(artifact.label_contract));
        }
        Ok(artifact)
    }
}

/// Metrics snapshot written next to the model, one file replaced per run.
/// Field names match the original metrics schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(rename = "AreaUnderRocCurve")]
    pub area_under_roc_curve: f64,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "F1Score")]
    pub f1_score: f64,
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &serde_json::to_string_pretty(self)?)
    }
}

/// Write-then-rename so no partial file is ever observable at `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
