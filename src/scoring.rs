//! Scoring engine: a loaded artifact ready to serve predictions.

use std::path::Path;

use ndarray::Array2;

use crate::artifact::ModelArtifact;
use crate::error::Result;
use crate::record::{ChurnPrediction, CustomerRecord};

/// A read-only fitted pipeline + classifier. Loaded at most once per
/// process and shared across requests without locking; nothing here
/// mutates after load.
#[derive(Debug)]
pub struct ScoringEngine {
    artifact: ModelArtifact,
}

impl ScoringEngine {
    /// Load an engine from a persisted artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = ModelArtifact::load(path)?;
        Ok(Self { artifact })
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Score one customer record.
    pub fn predict(&self, record: &CustomerRecord) -> Result<ChurnPrediction> {
        let features = self.artifact.pipeline.transform_one(record)?;
        let n = features.len();
        let x = features.into_shape((1, n)).map_err(|e| {
            crate::error::ChurnError::ShapeError {
                expected: format!("1 x {n}"),
                actual: e.to_string(),
            }
        })?;

        let score = self.score_matrix(&x)?;
        Ok(score)
    }

    fn score_matrix(&self, x: &Array2<f64>) -> Result<ChurnPrediction> {
        let raw = self.artifact.model.decision_function(x)?;
        let score = raw[0];
        let probability = 1.0 / (1.0 + (-score).exp());
        Ok(ChurnPrediction {
            predicted: probability >= 0.5,
            probability,
            score,
        })
    }
}
