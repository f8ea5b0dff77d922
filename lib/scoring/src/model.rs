//! Binary classifiers producing a probability of default
//!
//! [`Classifier`] is the seam the scorer depends on. [`LogisticModel`] is the
//! shipped backend: a logistic regression over standardised numeric features
//! and one-hot categorical features, deserialised from a JSON artifact.

use crate::features::{FeatureKind, FeatureRow, FeatureSpec, FeatureValue};
use loanscope_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A pre-fitted binary classifier
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Identifier of the fitted model, for logs and responses
    fn name(&self) -> &str;

    /// Input columns in the order `predict_proba` expects them
    fn input_features(&self) -> Vec<FeatureSpec>;

    /// Probability mass of the positive ("default") class
    fn predict_proba(&self, row: &FeatureRow) -> Result<f64>;
}

/// Weights of one logistic-regression input column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureWeights {
    /// Standardised numeric input: `coefficient * (x - mean) / scale`
    Numeric {
        name: String,
        #[serde(default)]
        mean: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        coefficient: f64,
    },
    /// One-hot input; categories missing from the map contribute nothing
    Categorical {
        name: String,
        coefficients: HashMap<String, f64>,
    },
}

fn default_scale() -> f64 {
    1.0
}

impl FeatureWeights {
    pub fn name(&self) -> &str {
        match self {
            FeatureWeights::Numeric { name, .. } | FeatureWeights::Categorical { name, .. } => name,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureWeights::Numeric { .. } => FeatureKind::Numeric,
            FeatureWeights::Categorical { .. } => FeatureKind::Categorical,
        }
    }

    fn contribution(&self, value: &FeatureValue) -> Option<f64> {
        match (self, value) {
            (
                FeatureWeights::Numeric {
                    mean,
                    scale,
                    coefficient,
                    ..
                },
                FeatureValue::Numeric(x),
            ) => {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                Some(coefficient * (x - mean) / scale)
            }
            (FeatureWeights::Categorical { coefficients, .. }, FeatureValue::Category(label)) => {
                Some(coefficients.get(label).copied().unwrap_or(0.0))
            }
            _ => None,
        }
    }
}

/// Logistic regression classifier loaded from a JSON artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticModel {
    pub model_name: String,
    pub intercept: f64,
    pub features: Vec<FeatureWeights>,
}

impl LogisticModel {
    /// Parse and validate an artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Check the weights are usable: at least one feature, unique names,
    /// finite numbers and non-negative scales
    pub fn validate(&self) -> Result<()> {
        if self.features.is_empty() {
            return Err(Error::SchemaMismatch(format!(
                "model '{}' has no features",
                self.model_name
            )));
        }
        if !self.intercept.is_finite() {
            return Err(Error::SchemaMismatch("intercept is not finite".into()));
        }

        let mut seen = HashSet::new();
        for weights in &self.features {
            if !seen.insert(weights.name()) {
                return Err(Error::SchemaMismatch(format!(
                    "feature '{}' appears twice in model",
                    weights.name()
                )));
            }
            let finite = match weights {
                FeatureWeights::Numeric {
                    mean,
                    scale,
                    coefficient,
                    ..
                } => mean.is_finite() && scale.is_finite() && *scale >= 0.0 && coefficient.is_finite(),
                FeatureWeights::Categorical { coefficients, .. } => {
                    coefficients.values().all(|c| c.is_finite())
                }
            };
            if !finite {
                return Err(Error::SchemaMismatch(format!(
                    "feature '{}' has invalid weights",
                    weights.name()
                )));
            }
        }
        Ok(())
    }

    /// Raw decision function: intercept plus all contributions
    pub fn logit(&self, row: &FeatureRow) -> Result<f64> {
        if row.len() != self.features.len() {
            return Err(Error::SchemaMismatch(format!(
                "model expects {} features, row for record {} has {}",
                self.features.len(),
                row.record,
                row.len()
            )));
        }

        let mut z = self.intercept;
        for (weights, value) in self.features.iter().zip(&row.values) {
            z += weights.contribution(value).ok_or_else(|| Error::InvalidFeature {
                feature: weights.name().to_string(),
                record: row.record.clone(),
                reason: format!("model expects a {:?} value", weights.kind()),
            })?;
        }
        Ok(z)
    }
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn input_features(&self) -> Vec<FeatureSpec> {
        self.features
            .iter()
            .map(|w| FeatureSpec {
                name: w.name().to_string(),
                kind: w.kind(),
            })
            .collect()
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64> {
        Ok(sigmoid(self.logit(row)?))
    }
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
