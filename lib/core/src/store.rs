use ahash::{AHashMap, AHashSet};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::record::{Record, RecordId};
use crate::schema::{ID_COLUMN, RECORD_COLUMNS};
use crate::Result;

/// One row of a tabular dataset, tagged with its 1-based line number
#[derive(Debug, Clone)]
pub struct DatasetRow {
    pub line: usize,
    pub values: Map<String, Value>,
}

/// A named tabular dataset as read from disk
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, line: usize, values: Map<String, Value>) {
        self.rows.push(DatasetRow { line, values });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read-only collection of loan application records.
///
/// Records keep the order of the sources they were loaded from. Nothing
/// mutates the store after construction, so it can be shared behind an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    index: AHashMap<RecordId, usize>,
    columns: Vec<String>,
    duplicate_ids: usize,
}

impl RecordStore {
    /// Concatenate datasets into one store, in the order given
    pub fn load<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = Dataset>,
    {
        let mut records = Vec::new();
        for dataset in sources {
            debug!("Loading {} rows from {}", dataset.len(), dataset.name);
            for row in &dataset.rows {
                let location = format!("{}:{}", dataset.name, row.line);
                records.push(Record::from_row(&row.values, &location)?);
            }
        }

        let store = Self::from_records(records);
        info!(
            "Record store loaded: {} records, {} columns",
            store.len(),
            store.columns.len()
        );
        if store.duplicate_ids > 0 {
            warn!(
                "{} records share an identifier with an earlier record; lookups return the first",
                store.duplicate_ids
            );
        }
        Ok(store)
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let mut index = AHashMap::with_capacity(records.len());
        let mut duplicate_ids = 0;
        let mut seen: AHashSet<&str> = AHashSet::new();

        for (position, record) in records.iter().enumerate() {
            if index.contains_key(&record.id) {
                duplicate_ids += 1;
            } else {
                index.insert(record.id, position);
            }
            for (name, _) in record.fields() {
                seen.insert(name);
            }
        }

        let mut columns = vec![ID_COLUMN.to_string()];
        for column in RECORD_COLUMNS.iter().skip(1) {
            if seen.remove(column.name) {
                columns.push(column.name.to_string());
            }
        }
        let mut extras: Vec<String> = seen.into_iter().map(str::to_string).collect();
        extras.sort();
        columns.extend(extras);

        Self {
            records,
            index,
            columns,
            duplicate_ids,
        }
    }

    /// Find the first record with the given identifier
    #[inline]
    pub fn find_by_id(&self, id: RecordId) -> Option<&Record> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    /// Find a record from an untyped identifier.
    ///
    /// Identifiers that do not parse as integers are treated as unknown.
    pub fn find_by_raw_id(&self, raw: &str) -> Option<&Record> {
        RecordId::parse(raw).and_then(|id| self.find_by_id(id))
    }

    /// All records in load order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Every column held by the store, identifier first
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records whose identifier was already taken
    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
