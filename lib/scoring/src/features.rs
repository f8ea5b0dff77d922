//! Feature schema for scoring
//!
//! The classifier consumes a fixed, lexicographically sorted subset of the
//! record columns. [`FeatureSchema`] makes that contract explicit: it is
//! checked against the classifier and against every stored record once, at
//! startup, instead of being trusted per request.

use loanscope_core::{schema, Error, Record, RecordStore, Result};
use serde::{Deserialize, Serialize};

/// Columns consumed by the default-probability classifier, sorted
pub const SCORING_FEATURES: [&str; 18] = [
    "checking_status",
    "credit_amount",
    "credit_history",
    "debtors_guarantors",
    "duration_months",
    "foreign_worker",
    "housing",
    "installment_plans",
    "installment_rate",
    "job",
    "number_existing_credits",
    "number_people_liable",
    "present_employment_since",
    "present_residence_since",
    "property",
    "purpose",
    "savings_account",
    "telephone",
];

/// Numeric columns the classifier was fit on as categories.
///
/// `number_people_liable` only takes two values and was one-hot encoded at
/// training time.
pub const CATEGORICAL_NUMERICS: [&str; 1] = ["number_people_liable"];

/// How a feature is presented to the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// One classifier input column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
}

impl FeatureSpec {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Numeric,
        }
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Categorical,
        }
    }
}

/// A coerced classifier input value
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Category(String),
}

/// Classifier input for one record, ordered as the feature schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub record: String,
    pub values: Vec<FeatureValue>,
}

impl FeatureRow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered, validated list of classifier features
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    /// Create a schema, requiring strictly ascending (sorted, unique) names
    pub fn new(features: Vec<FeatureSpec>) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::SchemaMismatch("feature schema cannot be empty".into()));
        }
        for pair in features.windows(2) {
            if pair[0].name >= pair[1].name {
                return Err(Error::SchemaMismatch(format!(
                    "features must be sorted and unique: '{}' precedes '{}'",
                    pair[0].name, pair[1].name
                )));
            }
        }
        Ok(Self { features })
    }

    /// The 18-column schema of the credit default classifier
    pub fn credit_default() -> Self {
        let features = SCORING_FEATURES
            .iter()
            .map(|&name| {
                let numeric = schema::column(name).map(|c| c.is_numeric()).unwrap_or(false);
                if numeric && !CATEGORICAL_NUMERICS.contains(&name) {
                    FeatureSpec::numeric(name)
                } else {
                    FeatureSpec::categorical(name)
                }
            })
            .collect();
        Self { features }
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Require another column list to match this schema exactly, order and
    /// kind included
    pub fn check_matches(&self, other: &[FeatureSpec]) -> Result<()> {
        if other.len() != self.features.len() {
            return Err(Error::SchemaMismatch(format!(
                "expected {} features, classifier has {}",
                self.features.len(),
                other.len()
            )));
        }
        for (position, (expected, actual)) in self.features.iter().zip(other).enumerate() {
            if expected != actual {
                return Err(Error::SchemaMismatch(format!(
                    "feature {} expected {} ({:?}), classifier has {} ({:?})",
                    position, expected.name, expected.kind, actual.name, actual.kind
                )));
            }
        }
        Ok(())
    }

    /// Restrict and order a record's cells into classifier input.
    ///
    /// Absent or null cells are a [`Error::MissingFeature`]; numeric features
    /// must hold a number.
    pub fn extract(&self, record: &Record) -> Result<FeatureRow> {
        let record_id = record.id.to_string();
        let mut values = Vec::with_capacity(self.features.len());

        for feature in &self.features {
            let cell = record
                .get(&feature.name)
                .filter(|v| !v.is_null())
                .ok_or_else(|| Error::MissingFeature {
                    feature: feature.name.clone(),
                    record: record_id.clone(),
                })?;

            let value = match feature.kind {
                FeatureKind::Numeric => {
                    let x = cell.as_f64().ok_or_else(|| Error::InvalidFeature {
                        feature: feature.name.clone(),
                        record: record_id.clone(),
                        reason: format!("expected a number, got {:?}", cell),
                    })?;
                    FeatureValue::Numeric(x)
                }
                FeatureKind::Categorical => {
                    // Non-null cells always have a label
                    FeatureValue::Category(cell.category_label().unwrap_or_default())
                }
            };
            values.push(value);
        }

        Ok(FeatureRow {
            record: record_id,
            values,
        })
    }

    /// Check every stored record can be scored
    pub fn validate_store(&self, store: &RecordStore) -> Result<()> {
        for record in store.records() {
            self.extract(record)?;
        }
        Ok(())
    }
}
