//! # LoanScope
//!
//! Loan application lookup, default-risk scoring and similar-application
//! search over an in-memory record store.
//!
//! Historical applications are loaded once at startup from JSON-lines
//! datasets. Each application can then be:
//!
//! - looked up by identifier,
//! - scored with a pre-fitted binary classifier (`Default` / `Pay-Off`),
//! - compared against every other application by exact column agreement.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install loanscope
//! loanscope --data-dir /app/data --http-port 8050
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use loanscope::prelude::*;
//!
//! let engine = ScoringEngine::open(&EngineConfig::default()).unwrap();
//!
//! if let Some(evaluation) = engine.evaluate(RecordId(3), DEFAULT_TOP_K).unwrap() {
//!     println!(
//!         "{} -> {} ({})",
//!         evaluation.record.id,
//!         evaluation.scoring.predicted_label,
//!         evaluation.scoring.probability_of_default
//!     );
//!     for m in &evaluation.matches {
//!         println!("  {} agrees on {} columns", m.record.id, m.agreement);
//!     }
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`loanscope-core`](https://docs.rs/loanscope-core) - Records, column schema, record store
//! - [`loanscope-scoring`](https://docs.rs/loanscope-scoring) - Feature extraction, classifier, scorer
//! - [`loanscope-similarity`](https://docs.rs/loanscope-similarity) - Agreement counting and top-k ranking
//! - [`loanscope-storage`](https://docs.rs/loanscope-storage) - Dataset and artifact loading, the assembled engine
//! - [`loanscope-api`](https://docs.rs/loanscope-api) - REST API

// Re-export core types
pub use loanscope_core::{
    Column, ColumnKind, Error, FieldValue, Record, RecordId, RecordStore, Result, RECORD_COLUMNS,
};

// Re-export scoring
pub use loanscope_scoring::{
    Classifier, FeatureSchema, LogisticModel, PredictedLabel, Scorer, ScoringResult,
};

// Re-export similarity
pub use loanscope_similarity::{rank_similar, RankedResult, SimilarResponse, DEFAULT_TOP_K};

// Re-export storage
pub use loanscope_storage::{load_model, EngineConfig, Evaluation, ScoringEngine};

// Re-export API
pub use loanscope_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Classifier, EngineConfig, Error, Evaluation, FieldValue, PredictedLabel, RankedResult,
        Record, RecordId, RecordStore, RestApi, Result, ScoringEngine, ScoringResult,
        DEFAULT_TOP_K,
    };
}
