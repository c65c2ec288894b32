//! Binary classification metrics.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Evaluation snapshot for one model: AUC, accuracy and F1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BinaryMetrics {
    pub auc: f64,
    pub accuracy: f64,
    pub f1: f64,
}

impl BinaryMetrics {
    /// Compute metrics from true labels in {0, 1} and predicted
    /// probabilities. Hard labels use the 0.5 threshold.
    pub fn compute(y_true: &Array1<f64>, probs: &Array1<f64>) -> Self {
        let n = y_true.len();
        assert_eq!(n, probs.len(), "label/probability length mismatch");

        let correct = y_true
            .iter()
            .zip(probs.iter())
            .filter(|(t, p)| (**t > 0.5) == (**p >= 0.5))
            .count();
        let accuracy = if n == 0 { 0.0 } else { correct as f64 / n as f64 };

        let (tp, fp, fn_) = confusion_counts(y_true, probs);
        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            auc: auc_roc(y_true, probs),
            accuracy,
            f1,
        }
    }
}

fn confusion_counts(y_true: &Array1<f64>, probs: &Array1<f64>) -> (usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;

    for (t, p) in y_true.iter().zip(probs.iter()) {
        match (*t > 0.5, *p >= 0.5) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    (tp, fp, fn_)
}

/// Rank-based AUC (Mann-Whitney) with midranks for tied scores.
/// Returns 0.5 when either class is absent, where ranking is undefined.
fn auc_roc(y_true: &Array1<f64>, probs: &Array1<f64>) -> f64 {
    let n = y_true.len();
    let n_pos = y_true.iter().filter(|&&t| t > 0.5).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        probs[a]
            .partial_cmp(&probs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Assign 1-based ranks, averaging over ties.
    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && probs[order[j + 1]] == probs[order[i]] {
            j += 1;
        }
        let midrank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = midrank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = y_true
        .iter()
        .zip(ranks.iter())
        .filter(|(t, _)| **t > 0.5)
        .map(|(_, r)| r)
        .sum();

    let u = rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0;
    u / (n_pos * n_neg) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_ranking() {
        let y = array![0.0, 0.0, 1.0, 1.0];
        let p = array![0.1, 0.2, 0.8, 0.9];
        let metrics = BinaryMetrics::compute(&y, &p);
        assert_eq!(metrics.auc, 1.0);
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.f1, 1.0);
    }

    #[test]
    fn test_inverted_ranking() {
        let y = array![1.0, 1.0, 0.0, 0.0];
        let p = array![0.1, 0.2, 0.8, 0.9];
        let metrics = BinaryMetrics::compute(&y, &p);
        assert_eq!(metrics.auc, 0.0);
        assert_eq!(metrics.accuracy, 0.0);
    }

    #[test]
    fn test_tied_scores_use_midranks() {
        let y = array![1.0, 0.0];
        let p = array![0.5, 0.5];
        let metrics = BinaryMetrics::compute(&y, &p);
        assert!((metrics.auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_auc_is_chance() {
        let y = array![1.0, 1.0];
        let p = array![0.6, 0.7];
        let metrics = BinaryMetrics::compute(&y, &p);
        assert_eq!(metrics.auc, 0.5);
        assert_eq!(metrics.accuracy, 1.0);
    }

    #[test]
    fn test_f1_from_mixed_predictions() {
        // tp=2, fp=1, fn=1 -> precision 2/3, recall 2/3, f1 2/3.
        let y = array![1.0, 1.0, 1.0, 0.0, 0.0];
        let p = array![0.9, 0.8, 0.1, 0.7, 0.2];
        let metrics = BinaryMetrics::compute(&y, &p);
        assert!((metrics.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.accuracy - 0.6).abs() < 1e-12);
    }
}
