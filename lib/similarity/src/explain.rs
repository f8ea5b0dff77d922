//! Explainability for similarity results
//!
//! Shows which columns a match shares with the query and which it doesn't.

use crate::distance::partition_columns;
use crate::rank::RankedResult;
use loanscope_core::{Record, RecordId};
use serde::Serialize;

/// A ranked match with its per-column agreement breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult<'a> {
    pub id: RecordId,
    pub agreement: usize,
    pub total_columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a Record>,
    /// Columns holding the same value as the query
    pub matched: Vec<&'a str>,
    /// Columns holding a different (or missing) value
    pub differing: Vec<&'a str>,
}

impl<'a> ExplainedResult<'a> {
    /// Explain a ranked result against the query it was ranked for
    pub fn from_ranked(
        ranked: &RankedResult<'a>,
        query: &Record,
        columns: &'a [String],
        include_record: bool,
    ) -> Self {
        let (matched, differing) = partition_columns(query, ranked.record, columns);
        Self {
            id: ranked.record.id,
            agreement: ranked.agreement,
            total_columns: columns.len(),
            record: include_record.then_some(ranked.record),
            matched,
            differing,
        }
    }

    pub fn from_ranked_list(
        ranked_list: &[RankedResult<'a>],
        query: &Record,
        columns: &'a [String],
        include_record: bool,
    ) -> Vec<Self> {
        ranked_list
            .iter()
            .map(|r| Self::from_ranked(r, query, columns, include_record))
            .collect()
    }
}

/// Summary statistics for a similarity query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarityStats {
    /// Number of stored records compared against the query
    pub candidates_count: usize,
    pub results_count: usize,
    pub best_agreement: usize,
    pub avg_agreement: f32,
    /// Columns on which every returned match agrees with the query
    pub common_columns: Vec<String>,
}

impl SimilarityStats {
    pub fn compute(results: &[ExplainedResult<'_>], candidates_count: usize) -> Self {
        let Some(first) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                best_agreement: 0,
                avg_agreement: 0.0,
                common_columns: Vec::new(),
            };
        };

        let total: usize = results.iter().map(|r| r.agreement).sum();
        let best_agreement = results.iter().map(|r| r.agreement).max().unwrap_or(0);
        let common_columns = first
            .matched
            .iter()
            .filter(|column| results.iter().all(|r| r.matched.contains(*column)))
            .map(|column| column.to_string())
            .collect();

        Self {
            candidates_count,
            results_count: results.len(),
            best_agreement,
            avg_agreement: total as f32 / results.len() as f32,
            common_columns,
        }
    }
}

/// Response body for a similarity query
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse<'a> {
    pub query: RecordId,
    pub result: Vec<ExplainedResult<'a>>,
    pub stats: SimilarityStats,
}

impl<'a> SimilarResponse<'a> {
    pub fn new(
        query: &Record,
        ranked_list: &[RankedResult<'a>],
        columns: &'a [String],
        candidates_count: usize,
        include_record: bool,
    ) -> Self {
        let result = ExplainedResult::from_ranked_list(ranked_list, query, columns, include_record);
        let stats = SimilarityStats::compute(&result, candidates_count);
        Self {
            query: query.id,
            result,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::rank_similar;
    use loanscope_core::RecordStore;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new(RecordId(1))
                .with_field("purpose", "A43")
                .with_field("housing", "A152")
                .with_field("job", "A173"),
            Record::new(RecordId(2))
                .with_field("purpose", "A43")
                .with_field("housing", "A152")
                .with_field("job", "A174"),
            Record::new(RecordId(3))
                .with_field("purpose", "A43")
                .with_field("housing", "A151")
                .with_field("job", "A171"),
        ])
    }

    #[test]
    fn test_explained_result() {
        let store = store();
        let query = store.find_by_id(RecordId(1)).unwrap();
        let ranked = rank_similar(query, &store, 5);
        let explained = ExplainedResult::from_ranked(&ranked[0], query, store.columns(), false);

        assert_eq!(explained.id, RecordId(2));
        assert_eq!(explained.agreement, 2);
        assert_eq!(explained.total_columns, 4);
        assert_eq!(explained.matched, vec!["purpose", "housing"]);
        assert_eq!(explained.differing, vec!["id", "job"]);
        assert!(explained.record.is_none());
    }

    #[test]
    fn test_similarity_stats() {
        let store = store();
        let query = store.find_by_id(RecordId(1)).unwrap();
        let ranked = rank_similar(query, &store, 5);
        let response = SimilarResponse::new(query, &ranked, store.columns(), store.len(), true);

        assert_eq!(response.query, RecordId(1));
        assert_eq!(response.stats.candidates_count, 3);
        assert_eq!(response.stats.results_count, 2);
        assert_eq!(response.stats.best_agreement, 2);
        assert!((response.stats.avg_agreement - 1.5).abs() < 1e-6);
        assert_eq!(response.stats.common_columns, vec!["purpose".to_string()]);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SimilarityStats::compute(&[], 5);
        assert_eq!(stats.candidates_count, 5);
        assert_eq!(stats.results_count, 0);
        assert!(stats.common_columns.is_empty());
    }

    #[test]
    fn test_response_serialization() {
        let store = store();
        let query = store.find_by_id(RecordId(1)).unwrap();
        let ranked = rank_similar(query, &store, 1);
        let response = SimilarResponse::new(query, &ranked, store.columns(), store.len(), true);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["query"], 1);
        assert_eq!(json["result"][0]["id"], 2);
        assert_eq!(json["result"][0]["record"]["job"], "A174");
        assert_eq!(json["stats"]["results_count"], 1);
    }
}
