//! # LoanScope Similarity
//!
//! Ranks stored loan applications by how many columns they share with a
//! query record.
//!
//! ## Features
//!
//! - **Agreement count**: exact-match count over every store column
//! - **Top-k ranking**: stable descending sort, self-match dropped
//! - **Explainability**: matched and differing columns per result
//!
//! ## Example
//!
//! ```rust
//! use loanscope_core::{Record, RecordId, RecordStore};
//! use loanscope_similarity::{rank_similar, DEFAULT_TOP_K};
//!
//! let store = RecordStore::from_records(vec![
//!     Record::new(RecordId(1)).with_field("purpose", "A43").with_field("housing", "A152"),
//!     Record::new(RecordId(2)).with_field("purpose", "A43").with_field("housing", "A151"),
//!     Record::new(RecordId(3)).with_field("purpose", "A40").with_field("housing", "A151"),
//! ]);
//!
//! let query = store.find_by_id(RecordId(1)).unwrap();
//! let matches = rank_similar(query, &store, DEFAULT_TOP_K);
//! assert_eq!(matches[0].record.id, RecordId(2));
//! assert_eq!(matches[0].agreement, 1);
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│  Agreement  │────>│  Ranking    │
//! │  (record)   │     │ (per record)│     │ (stable, k) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │  Explain    │
//!                                         │  (columns)  │
//!                                         └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod rank;

pub use distance::{agreement_count, column_agrees, partition_columns};
pub use explain::{ExplainedResult, SimilarResponse, SimilarityStats};
pub use rank::{rank_all, rank_similar, RankedResult, DEFAULT_TOP_K};
