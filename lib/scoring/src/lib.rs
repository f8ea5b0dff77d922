//! # LoanScope Scoring
//!
//! Turns one loan application into a probability of default.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌─────────────┐     ┌───────────────┐
//! │   Record    │────>│ FeatureSchema │────>│ Classifier  │────>│ ScoringResult │
//! │ (all cells) │     │ (18, sorted)  │     │ (p default) │     │ (label, p)    │
//! └─────────────┘     └───────────────┘     └─────────────┘     └───────────────┘
//! ```
//!
//! The classifier is injected into the [`Scorer`] at construction; there is
//! no process-wide model.
//!
//! ## Example
//!
//! ```rust
//! use loanscope_scoring::{FeatureSchema, LogisticModel, Scorer};
//! use std::sync::Arc;
//!
//! let features: Vec<serde_json::Value> = FeatureSchema::credit_default()
//!     .features()
//!     .iter()
//!     .map(|f| match f.kind {
//!         loanscope_scoring::FeatureKind::Numeric => serde_json::json!({
//!             "kind": "numeric", "name": f.name, "coefficient": 0.0
//!         }),
//!         loanscope_scoring::FeatureKind::Categorical => serde_json::json!({
//!             "kind": "categorical", "name": f.name, "coefficients": {}
//!         }),
//!     })
//!     .collect();
//! let artifact = serde_json::json!({
//!     "model_name": "flat",
//!     "intercept": 0.0,
//!     "features": features,
//! });
//!
//! let model = LogisticModel::from_json(&artifact.to_string()).unwrap();
//! let scorer = Scorer::new(Arc::new(model), FeatureSchema::credit_default()).unwrap();
//! assert_eq!(scorer.classifier_name(), "flat");
//! ```

pub mod features;
pub mod model;
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use features::{
    FeatureKind, FeatureRow, FeatureSchema, FeatureSpec, FeatureValue, CATEGORICAL_NUMERICS,
    SCORING_FEATURES,
};
pub use model::{sigmoid, Classifier, FeatureWeights, LogisticModel};
pub use scorer::{PredictedLabel, Scorer, ScoringResult, DECISION_THRESHOLD};
