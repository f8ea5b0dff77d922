//! # LoanScope Storage
//!
//! Startup loading for the scoring engine: JSON-lines datasets, the
//! classifier artifact, and the [`ScoringEngine`] that ties them together.

pub mod artifact;
pub mod dataset;
pub mod engine;

pub use artifact::{load_model, sha256_hex, ModelArtifact};
pub use dataset::{parse_json_lines, read_json_lines};
pub use engine::{EngineBuilder, EngineConfig, Evaluation, ScoringEngine};
