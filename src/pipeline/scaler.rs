//! Feature scaling.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ChurnError, Result};

/// Fitted range of one feature dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    center: f64,
    scale: f64,
}

/// Min-max scaler over whole feature vectors: `(x - min) / (max - min)`
/// per dimension, with statistics taken from the training set only.
/// A constant dimension scales by 1.0 rather than dividing by zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxScaler {
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit per-dimension min/max on the training matrix.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(ChurnError::DataError(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        self.params = x
            .columns()
            .into_iter()
            .map(|col| {
                let min = col.iter().copied().fold(f64::INFINITY, f64::min);
                let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let range = max - min;
                ScalerParams {
                    center: min,
                    scale: if range == 0.0 { 1.0 } else { range },
                }
            })
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    /// Scale a matrix with the fitted statistics.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }
        if x.ncols() != self.params.len() {
            return Err(ChurnError::ShapeError {
                expected: format!("{} columns", self.params.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut scaled = x.clone();
        for (j, params) in self.params.iter().enumerate() {
            scaled
                .column_mut(j)
                .mapv_inplace(|v| (v - params.center) / params.scale);
        }
        Ok(scaled)
    }

    /// Scale a single row in place.
    pub fn transform_row(&self, row: &mut [f64]) -> Result<()> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }
        if row.len() != self.params.len() {
            return Err(ChurnError::ShapeError {
                expected: format!("{} features", self.params.len()),
                actual: format!("{} features", row.len()),
            });
        }

        for (value, params) in row.iter_mut().zip(&self.params) {
            *value = (*value - params.center) / params.scale;
        }
        Ok(())
    }
}
