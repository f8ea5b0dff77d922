use crate::features::FeatureSchema;
use crate::model::Classifier;
use loanscope_core::{Error, Record, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Probabilities strictly above this are labelled [`PredictedLabel::Default`]
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Binary outcome predicted for a loan application
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PredictedLabel {
    #[serde(rename = "Default")]
    Default,
    #[serde(rename = "Pay-Off")]
    PayOff,
}

impl std::fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictedLabel::Default => write!(f, "Default"),
            PredictedLabel::PayOff => write!(f, "Pay-Off"),
        }
    }
}

/// Outcome of scoring one record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringResult {
    pub predicted_label: PredictedLabel,
    /// Rounded to three decimals
    pub probability_of_default: f64,
}

impl ScoringResult {
    /// Round a raw probability and apply the decision threshold.
    ///
    /// The label is taken from the rounded value so the two fields can never
    /// disagree; exactly 0.5 is `Pay-Off`.
    pub fn from_probability(p: f64) -> Self {
        let probability_of_default = round3(p);
        let predicted_label = if probability_of_default > DECISION_THRESHOLD {
            PredictedLabel::Default
        } else {
            PredictedLabel::PayOff
        };
        Self {
            predicted_label,
            probability_of_default,
        }
    }
}

/// Three-decimal rounding; exact halves go to the even neighbour
fn round3(p: f64) -> f64 {
    (p * 1000.0).round_ties_even() / 1000.0
}

/// Scores records with an injected classifier.
///
/// Construction checks the classifier's input columns against the feature
/// schema, so a scorer that exists is always consistent with its model.
#[derive(Debug, Clone)]
pub struct Scorer {
    classifier: Arc<dyn Classifier>,
    features: FeatureSchema,
}

impl Scorer {
    pub fn new(classifier: Arc<dyn Classifier>, features: FeatureSchema) -> Result<Self> {
        features.check_matches(&classifier.input_features())?;
        Ok(Self {
            classifier,
            features,
        })
    }

    pub fn features(&self) -> &FeatureSchema {
        &self.features
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Score a record; extra cells are ignored
    pub fn score(&self, record: &Record) -> Result<ScoringResult> {
        let row = self.features.extract(record)?;
        let p = self.classifier.predict_proba(&row)?;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability {
                probability: p,
                record: record.id.to_string(),
            });
        }

        let result = ScoringResult::from_probability(p);
        debug!(
            "Scored record {}: p={} label={}",
            record.id, result.probability_of_default, result.predicted_label
        );
        Ok(result)
    }
}
