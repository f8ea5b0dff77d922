//! Top-k similarity ranking
//!
//! Ranking is a pure function of the query record and the store: agreement
//! counts are written into a query-scoped vector, never onto the store.

use crate::distance::agreement_count;
use loanscope_core::{Record, RecordStore};
use rayon::prelude::*;
use serde::Serialize;

/// Number of matches returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 5;

/// A stored record with its agreement count against the query
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedResult<'a> {
    pub record: &'a Record,
    pub agreement: usize,
}

/// Rank every stored record against `query`.
///
/// Sorted by agreement descending; ties keep store order.
pub fn rank_all<'a>(query: &Record, store: &'a RecordStore) -> Vec<RankedResult<'a>> {
    let columns = store.columns();
    let mut ranked: Vec<RankedResult<'a>> = store
        .records()
        .par_iter()
        .map(|record| RankedResult {
            record,
            agreement: agreement_count(query, record, columns),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.agreement.cmp(&a.agreement));
    ranked
}

/// The `k` records most similar to `query`.
///
/// The single highest-ranked record is dropped first: with a unique
/// identifier that is the query's own perfect self-match. Short stores
/// yield short results.
pub fn rank_similar<'a>(query: &Record, store: &'a RecordStore, k: usize) -> Vec<RankedResult<'a>> {
    rank_all(query, store).into_iter().skip(1).take(k).collect()
}
