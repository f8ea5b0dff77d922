//! # LoanScope Core
//!
//! Core data structures for the LoanScope scoring engine.
//!
//! - [`Record`] - A loan application: integer identifier plus named cells
//! - [`FieldValue`] - A single cell with exact-match agreement semantics
//! - [`RecordStore`] - Read-only, load-once collection of records
//! - [`schema`] - The fixed column schema every record carries
//!
//! ## Example
//!
//! ```rust
//! use loanscope_core::{Record, RecordId, RecordStore};
//!
//! let store = RecordStore::from_records(vec![
//!     Record::new(RecordId(1)).with_field("purpose", "A43"),
//!     Record::new(RecordId(2)).with_field("purpose", "A40"),
//! ]);
//!
//! assert!(store.find_by_id(RecordId(2)).is_some());
//! assert!(store.find_by_raw_id("not-a-number").is_none());
//! ```

pub mod error;
pub mod record;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use record::{FieldValue, Record, RecordId};
pub use schema::{Column, ColumnKind, ID_COLUMN, RECORD_COLUMNS};
pub use store::{Dataset, DatasetRow, RecordStore};
