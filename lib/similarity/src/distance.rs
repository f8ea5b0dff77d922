//! Agreement between records
//!
//! Similarity is the number of columns on which two records hold the same
//! value. Every store column counts once, the identifier included; numeric
//! closeness is not considered.

use loanscope_core::{Record, ID_COLUMN};

/// Whether two records agree on one column.
///
/// A column missing from either record never agrees.
#[inline]
pub fn column_agrees(query: &Record, candidate: &Record, column: &str) -> bool {
    if column == ID_COLUMN {
        return query.id == candidate.id;
    }
    match (query.get(column), candidate.get(column)) {
        (Some(q), Some(c)) => q.agrees_with(c),
        _ => false,
    }
}

/// Number of columns on which `candidate` agrees with `query`
pub fn agreement_count(query: &Record, candidate: &Record, columns: &[String]) -> usize {
    columns
        .iter()
        .filter(|column| column_agrees(query, candidate, column))
        .count()
}

/// Split columns into those the records agree on and those they don't
pub fn partition_columns<'c>(
    query: &Record,
    candidate: &Record,
    columns: &'c [String],
) -> (Vec<&'c str>, Vec<&'c str>) {
    columns
        .iter()
        .map(String::as_str)
        .partition(|column| column_agrees(query, candidate, column))
}
