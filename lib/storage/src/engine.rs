use crate::artifact::load_model;
use crate::dataset::read_json_lines;
use loanscope_core::{Error, Record, RecordId, RecordStore, Result};
use loanscope_scoring::{Classifier, FeatureSchema, Scorer, ScoringResult};
use loanscope_similarity::{rank_similar, RankedResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Where the engine finds its startup artifacts
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    /// Relative paths are resolved against `data_dir`
    pub training_data: PathBuf,
    pub testing_data: PathBuf,
    pub model_path: PathBuf,
    pub model_sha256: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/app/data"),
            training_data: PathBuf::from("training_data.json"),
            testing_data: PathBuf::from("testing_data.json"),
            model_path: PathBuf::from("logreg_classifier.json"),
            model_sha256: None,
        }
    }
}

impl EngineConfig {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

/// Scoring and similarity for one looked-up record
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation<'a> {
    pub record: &'a Record,
    #[serde(flatten)]
    pub scoring: ScoringResult,
    pub matches: Vec<RankedResult<'a>>,
}

/// Read-only engine over a loaded record store and classifier.
///
/// Everything is immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct ScoringEngine {
    store: Arc<RecordStore>,
    scorer: Scorer,
}

impl ScoringEngine {
    /// Load datasets and classifier from disk and validate them together
    pub fn open(config: &EngineConfig) -> Result<Self> {
        let artifact = load_model(
            config.resolve(&config.model_path),
            config.model_sha256.as_deref(),
        )?;

        let training = read_json_lines(config.resolve(&config.training_data))?;
        let testing = read_json_lines(config.resolve(&config.testing_data))?;
        let store = RecordStore::load(vec![training, testing])?;

        Self::builder()
            .store(store)
            .classifier(Arc::new(artifact.model))
            .build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    #[inline]
    pub fn lookup(&self, id: RecordId) -> Option<&Record> {
        self.store.find_by_id(id)
    }

    /// Look up an untyped identifier; unparsable ids are not found
    #[inline]
    pub fn lookup_raw(&self, raw: &str) -> Option<&Record> {
        self.store.find_by_raw_id(raw)
    }

    pub fn score(&self, record: &Record) -> Result<ScoringResult> {
        self.scorer.score(record)
    }

    pub fn rank_similar(&self, record: &Record, k: usize) -> Vec<RankedResult<'_>> {
        rank_similar(record, &self.store, k)
    }

    /// Look up, score and rank in that order.
    ///
    /// `Ok(None)` when no record has the identifier; nothing is scored.
    pub fn evaluate(&self, id: RecordId, k: usize) -> Result<Option<Evaluation<'_>>> {
        let Some(record) = self.lookup(id) else {
            return Ok(None);
        };
        let scoring = self.score(record)?;
        let matches = self.rank_similar(record, k);
        Ok(Some(Evaluation {
            record,
            scoring,
            matches,
        }))
    }
}

/// Assembles a [`ScoringEngine`] from already-loaded parts
pub struct EngineBuilder {
    store: Option<RecordStore>,
    classifier: Option<Arc<dyn Classifier>>,
    features: FeatureSchema,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: None,
            classifier: None,
            features: FeatureSchema::credit_default(),
        }
    }
}

impl EngineBuilder {
    pub fn store(mut self, store: RecordStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn features(mut self, features: FeatureSchema) -> Self {
        self.features = features;
        self
    }

    /// Validate the classifier against the feature schema and every stored
    /// record against the classifier's inputs
    pub fn build(self) -> Result<ScoringEngine> {
        let classifier = self.classifier.ok_or(Error::ModelNotLoaded)?;
        let store = self
            .store
            .ok_or_else(|| Error::load("record store", "no datasets were loaded"))?;

        let scorer = Scorer::new(classifier, self.features)?;
        scorer.features().validate_store(&store)?;

        info!(
            "Scoring engine ready: {} records, classifier '{}'",
            store.len(),
            scorer.classifier_name()
        );

        Ok(ScoringEngine {
            store: Arc::new(store),
            scorer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanscope_core::{FieldValue, RECORD_COLUMNS};
    use loanscope_scoring::{FeatureRow, FeatureSpec, PredictedLabel};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        fn input_features(&self) -> Vec<FeatureSpec> {
            FeatureSchema::credit_default().features().to_vec()
        }

        fn predict_proba(&self, _row: &FeatureRow) -> Result<f64> {
            Ok(self.0)
        }
    }

    fn record(id: i64) -> Record {
        RECORD_COLUMNS.iter().skip(1).fold(Record::new(RecordId(id)), |r, c| {
            if c.is_numeric() {
                r.with_field(c.name, id % 3)
            } else {
                r.with_field(c.name, format!("A{}", id % 2))
            }
        })
    }

    fn engine(p: f64) -> ScoringEngine {
        ScoringEngine::builder()
            .store(RecordStore::from_records((1..=6).map(record).collect()))
            .classifier(Arc::new(FixedClassifier(p)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_classifier() {
        let result = ScoringEngine::builder()
            .store(RecordStore::from_records(vec![record(1)]))
            .build();
        assert!(matches!(result, Err(Error::ModelNotLoaded)));
    }

    #[test]
    fn test_build_requires_store() {
        let result = ScoringEngine::builder()
            .classifier(Arc::new(FixedClassifier(0.1)))
            .build();
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn test_build_validates_store_features() {
        let broken = record(2).with_field("purpose", FieldValue::Null);
        let result = ScoringEngine::builder()
            .store(RecordStore::from_records(vec![record(1), broken]))
            .classifier(Arc::new(FixedClassifier(0.1)))
            .build();
        match result {
            Err(Error::MissingFeature { feature, record }) => {
                assert_eq!(feature, "purpose");
                assert_eq!(record, "2");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_evaluate() {
        let engine = engine(0.42);
        let evaluation = engine.evaluate(RecordId(3), 5).unwrap().unwrap();

        assert_eq!(evaluation.record.id, RecordId(3));
        assert_eq!(evaluation.scoring.predicted_label, PredictedLabel::PayOff);
        assert_eq!(evaluation.scoring.probability_of_default, 0.42);
        assert_eq!(evaluation.matches.len(), 5);
        assert!(evaluation.matches.iter().all(|m| m.record.id != RecordId(3)));
    }

    /// Counts every probability request it serves
    #[derive(Debug, Default)]
    struct CountingClassifier {
        calls: AtomicUsize,
    }

    impl Classifier for CountingClassifier {
        fn name(&self) -> &str {
            "counting"
        }

        fn input_features(&self) -> Vec<FeatureSpec> {
            FeatureSchema::credit_default().features().to_vec()
        }

        fn predict_proba(&self, _row: &FeatureRow) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0.3)
        }
    }

    #[test]
    fn test_evaluate_not_found() {
        let classifier = Arc::new(CountingClassifier::default());
        let engine = ScoringEngine::builder()
            .store(RecordStore::from_records((1..=6).map(record).collect()))
            .classifier(classifier.clone())
            .build()
            .unwrap();

        assert!(engine.evaluate(RecordId(999), 5).unwrap().is_none());
        assert!(engine.lookup_raw("nine").is_none());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);

        assert!(engine.evaluate(RecordId(2), 5).unwrap().is_some());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_evaluation_serialization() {
        let engine = engine(0.9);
        let evaluation = engine.evaluate(RecordId(1), 2).unwrap().unwrap();
        let value = serde_json::to_value(&evaluation).unwrap();

        assert_eq!(value["record"]["id"], 1);
        assert_eq!(value["predicted_label"], "Default");
        assert_eq!(value["probability_of_default"], 0.9);
        assert_eq!(value["matches"].as_array().unwrap().len(), 2);
        assert_eq!(value["matches"][0]["agreement"], json!(20));
    }

    #[test]
    fn test_config_resolve() {
        let config = EngineConfig {
            data_dir: PathBuf::from("/srv/data"),
            ..EngineConfig::default()
        };
        assert_eq!(
            config.resolve(&config.training_data),
            PathBuf::from("/srv/data/training_data.json")
        );
        assert_eq!(
            config.resolve(Path::new("/elsewhere/model.json")),
            PathBuf::from("/elsewhere/model.json")
        );
    }
}
