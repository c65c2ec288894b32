//! Feature pipeline: one-hot encoding plus min-max scaling.
//!
//! The feature vector layout is fixed and must match between training and
//! scoring: gender indicators, then contract indicators, then internet
//! service indicators, then the three numeric fields tenure, monthly
//! charges, total charges. Scaling statistics come from the training set
//! only and are applied unchanged at inference time.

mod encoder;
mod scaler;

pub use encoder::OneHotEncoder;
pub use scaler::MinMaxScaler;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ChurnError, Result};
use crate::record::CustomerRecord;

/// Fitted encoding + scaling for customer records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturePipeline {
    gender: OneHotEncoder,
    contract: OneHotEncoder,
    internet_service: OneHotEncoder,
    scaler: MinMaxScaler,
    is_fitted: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total width of the encoded feature vector.
    pub fn n_features(&self) -> usize {
        self.gender.width() + self.contract.width() + self.internet_service.width() + 3
    }

    /// Fit encoders and scaler on training records.
    pub fn fit(&mut self, records: &[CustomerRecord]) -> Result<&mut Self> {
        if records.is_empty() {
            return Err(ChurnError::DataError(
                "cannot fit feature pipeline on zero records".to_string(),
            ));
        }

        self.gender.fit(records.iter().map(|r| r.gender.as_str()));
        self.contract.fit(records.iter().map(|r| r.contract.as_str()));
        self.internet_service
            .fit(records.iter().map(|r| r.internet_service.as_str()));

        let raw = self.raw_matrix(records)?;
        self.scaler.fit(&raw)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Encode and scale a batch of records.
    pub fn transform(&self, records: &[CustomerRecord]) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }
        let raw = self.raw_matrix(records)?;
        self.scaler.transform(&raw)
    }

    /// Encode and scale a single record.
    pub fn transform_one(&self, record: &CustomerRecord) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }
        let mut row = self.encode_row(record);
        self.scaler.transform_row(&mut row)?;
        Ok(Array1::from_vec(row))
    }

    /// Unscaled feature vector in the documented fixed order.
    fn encode_row(&self, record: &CustomerRecord) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.n_features());
        self.gender.encode_into(&record.gender, &mut row);
        self.contract.encode_into(&record.contract, &mut row);
        self.internet_service
            .encode_into(&record.internet_service, &mut row);
        row.push(record.tenure);
        row.push(record.monthly_charges);
        row.push(record.total_charges);
        row
    }

    fn raw_matrix(&self, records: &[CustomerRecord]) -> Result<Array2<f64>> {
        let n_features = self.n_features();
        let mut flat = Vec::with_capacity(records.len() * n_features);
        for record in records {
            flat.extend(self.encode_row(record));
        }
        Array2::from_shape_vec((records.len(), n_features), flat).map_err(|e| {
            ChurnError::ShapeError {
                expected: format!("{} x {}", records.len(), n_features),
                actual: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, contract: &str, internet: &str, tenure: f64) -> CustomerRecord {
        CustomerRecord {
            customer_id: "C1".into(),
            gender: gender.into(),
            tenure,
            monthly_charges: 50.0,
            total_charges: tenure * 50.0,
            contract: contract.into(),
            internet_service: internet.into(),
            churn: "No".into(),
        }
    }

    #[test]
    fn test_feature_order_and_width() {
        let train = vec![
            record("Female", "Month-to-month", "DSL", 0.0),
            record("Male", "Two year", "Fiber optic", 10.0),
        ];
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&train).unwrap();

        // 2 genders + 2 contracts + 2 internet services + 3 numerics.
        assert_eq!(pipeline.n_features(), 9);

        let row = pipeline.encode_row(&train[0]);
        assert_eq!(row[..6], [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(row[6..], [0.0, 50.0, 0.0]);
    }

    #[test]
    fn test_unseen_category_is_all_zero() {
        let train = vec![
            record("Female", "Month-to-month", "DSL", 0.0),
            record("Male", "Two year", "Fiber optic", 10.0),
        ];
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&train).unwrap();

        let unseen = record("Other", "One year", "No", 5.0);
        let encoded = pipeline.transform_one(&unseen).unwrap();
        // All six indicator positions stay zero.
        assert!(encoded.iter().take(6).all(|&v| v == 0.0));
    }

    #[test]
    fn test_scaling_uses_train_statistics_only() {
        let train = vec![
            record("Female", "Month-to-month", "DSL", 0.0),
            record("Female", "Month-to-month", "DSL", 10.0),
        ];
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&train).unwrap();

        // Tenure 5 is the midpoint of the fitted [0, 10] range.
        let encoded = pipeline
            .transform_one(&record("Female", "Month-to-month", "DSL", 5.0))
            .unwrap();
        let tenure_idx = pipeline.n_features() - 3;
        assert!((encoded[tenure_idx] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let pipeline = FeaturePipeline::new();
        let err = pipeline
            .transform_one(&record("Female", "Month-to-month", "DSL", 1.0))
            .unwrap_err();
        assert!(matches!(err, ChurnError::ModelNotFitted));
    }

    #[test]
    fn test_round_trips_through_json() {
        let train = vec![
            record("Female", "Month-to-month", "DSL", 0.0),
            record("Male", "Two year", "Fiber optic", 10.0),
        ];
        let mut pipeline = FeaturePipeline::new();
        pipeline.fit(&train).unwrap();

        let json = serde_json::to_string(&pipeline).unwrap();
        let restored: FeaturePipeline = serde_json::from_str(&json).unwrap();

        let a = pipeline.transform_one(&train[1]).unwrap();
        let b = restored.transform_one(&train[1]).unwrap();
        assert_eq!(a, b);
    }
}
