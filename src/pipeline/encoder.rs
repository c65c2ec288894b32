//! Categorical encoding.

use serde::{Deserialize, Serialize};

/// One-hot encoder for a single categorical column.
///
/// Categories are indexed in first-seen order at fit time. A value unseen
/// during fit encodes to the all-zero vector instead of failing, so the
/// scoring path tolerates categories the training data never contained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the category vocabulary from training values.
    pub fn fit<'a, I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.categories.clear();
        for value in values {
            if !self.categories.iter().any(|c| c == value) {
                self.categories.push(value.to_string());
            }
        }
        self
    }

    /// Width of the indicator vector this encoder produces.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Append the indicator vector for `value` to `out`.
    pub fn encode_into(&self, value: &str, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.categories.len(), 0.0);
        if let Some(idx) = self.categories.iter().position(|c| c == value) {
            out[start + idx] = 1.0;
        }
    }
}
