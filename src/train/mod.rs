//! Model training
//!
//! Gradient boosted trees over the encoded customer features, plus the
//! orchestration that turns a cleaned CSV into persisted model and
//! metrics artifacts.

pub mod decision_tree;
mod engine;
pub mod gradient_boosting;
mod metrics;

pub use decision_tree::{RegressionTree, TreeNode};
pub use engine::{load_records, TrainEngine, TrainingConfig};
pub use gradient_boosting::{GradientBoostingClassifier, GradientBoostingConfig};
pub use metrics::BinaryMetrics;
