//! Column schema for loan application records
//!
//! Declares the fixed set of columns every stored record must carry,
//! together with their kind and a human-readable label.

use serde::Serialize;

/// Name of the identifier column
pub const ID_COLUMN: &str = "id";

/// Kind of a record column
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Unique integer identifier
    Identifier,
    /// Numeric quantity (durations, amounts, counts)
    Numeric,
    /// Categorical code or flag
    Categorical,
}

/// Static description of one record column
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    const fn new(name: &'static str, label: &'static str, kind: ColumnKind) -> Self {
        Self { name, label, kind }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// All record columns, identifier first
pub const RECORD_COLUMNS: [Column; 21] = [
    Column::new(ID_COLUMN, "ID", ColumnKind::Identifier),
    Column::new("age_over_forty", "Age Over Forty?", ColumnKind::Categorical),
    Column::new("gender", "Gender", ColumnKind::Categorical),
    Column::new("duration_months", "Duration (months)", ColumnKind::Numeric),
    Column::new("credit_amount", "Credit Amount", ColumnKind::Numeric),
    Column::new("installment_rate", "Installment Rate", ColumnKind::Numeric),
    Column::new("present_residence_since", "Present Residence Since", ColumnKind::Numeric),
    Column::new("number_existing_credits", "Number of Existing Credits", ColumnKind::Numeric),
    Column::new("number_people_liable", "Number of People Liable", ColumnKind::Numeric),
    Column::new("checking_status", "Checking Status", ColumnKind::Categorical),
    Column::new("credit_history", "Credit History", ColumnKind::Categorical),
    Column::new("purpose", "Purpose", ColumnKind::Categorical),
    Column::new("savings_account", "Savings Account", ColumnKind::Categorical),
    Column::new("present_employment_since", "Present Employment Since", ColumnKind::Categorical),
    Column::new("debtors_guarantors", "Debtors Guarantors", ColumnKind::Categorical),
    Column::new("property", "Property", ColumnKind::Categorical),
    Column::new("installment_plans", "Installment Plans", ColumnKind::Categorical),
    Column::new("housing", "Housing", ColumnKind::Categorical),
    Column::new("job", "Job", ColumnKind::Categorical),
    Column::new("telephone", "Telephone", ColumnKind::Categorical),
    Column::new("foreign_worker", "Foreign Worker", ColumnKind::Categorical),
];

/// Look up a column descriptor by name
pub fn column(name: &str) -> Option<&'static Column> {
    RECORD_COLUMNS.iter().find(|c| c.name == name)
}

/// Iterate the names of all non-identifier columns
pub fn field_columns() -> impl Iterator<Item = &'static Column> {
    RECORD_COLUMNS.iter().filter(|c| c.kind != ColumnKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_counts() {
        assert_eq!(RECORD_COLUMNS.len(), 21);
        assert_eq!(field_columns().count(), 20);
        assert_eq!(field_columns().filter(|c| c.is_numeric()).count(), 6);
        assert_eq!(
            field_columns().filter(|c| c.kind == ColumnKind::Categorical).count(),
            14
        );
    }

    #[test]
    fn test_column_lookup() {
        let col = column("checking_status").unwrap();
        assert_eq!(col.label, "Checking Status");
        assert!(column("matches").is_none());
    }

    #[test]
    fn test_column_names_unique() {
        let mut names: Vec<_> = RECORD_COLUMNS.iter().map(|c| c.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RECORD_COLUMNS.len());
    }
}
