use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names of the known columns in the published transaction table.
/// The table carries no schema; any of these may be absent from a given row.
pub mod columns {
    pub const INSIDER_NAME: &str = "Insider Name";
    pub const ISSUER: &str = "Issuer";
    pub const TRANSACTION_CODE: &str = "Transaction Code";
    pub const SHARES: &str = "Shares";
    pub const PRICE_PER_SHARE: &str = "Price per Share";
    pub const OWNERSHIP_TYPE: &str = "Ownership Type";
    pub const INSIDER_ROLE: &str = "Insider Role";
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single transaction row: column name → raw cell text, exactly as parsed.
/// Cells are kept untouched here; trimming, casing and numeric coercion are
/// the normalizer's job.
#[derive(Debug, Clone, Default)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    pub fn from_cells(cells: BTreeMap<String, String>) -> Self {
        Record { cells }
    }

    /// Raw cell for an arbitrary column, `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// True when every cell is empty or whitespace (a blank line in the CSV).
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }

    // -- Typed accessors for the known columns --

    pub fn insider_name(&self) -> Option<&str> {
        self.get(columns::INSIDER_NAME)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.get(columns::ISSUER)
    }

    pub fn transaction_code(&self) -> Option<&str> {
        self.get(columns::TRANSACTION_CODE)
    }

    pub fn shares(&self) -> Option<&str> {
        self.get(columns::SHARES)
    }

    pub fn price_per_share(&self) -> Option<&str> {
        self.get(columns::PRICE_PER_SHARE)
    }

    pub fn ownership_type(&self) -> Option<&str> {
        self.get(columns::OWNERSHIP_TYPE)
    }

    pub fn insider_role(&self) -> Option<&str> {
        self.get(columns::INSIDER_ROLE)
    }
}

// ---------------------------------------------------------------------------
// TransactionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The fully materialized dataset. Built once per successful load, immutable
/// afterwards, replaced wholesale on reload.
#[derive(Debug, Clone, Default)]
pub struct TransactionDataset {
    /// All rows, in file order.
    pub records: Vec<Record>,
    /// Header names, in file order.
    pub headers: Vec<String>,
}

impl TransactionDataset {
    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Self {
        TransactionDataset { records, headers }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// View – one aggregated series, ready for chart rendering
// ---------------------------------------------------------------------------

/// An ordered (label, value) series produced by one aggregation.
/// `labels` and `values` are index-aligned and labels are pairwise distinct.
/// Serializes to the `{ title, unit?, labels, values }` structure the
/// rendering side consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub title: String,
    /// Display unit for the values (e.g. "USD"), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl View {
    pub fn from_pairs(
        title: impl Into<String>,
        unit: Option<&str>,
        pairs: Vec<(String, f64)>,
    ) -> Self {
        let (labels, values): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
        View {
            title: title.into(),
            unit: unit.map(str::to_string),
            labels,
            values,
        }
    }

    /// Number of (label, value) entries.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::from_cells(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn absent_column_is_none() {
        let r = record(&[(columns::ISSUER, "Acme Corp")]);
        assert_eq!(r.issuer(), Some("Acme Corp"));
        assert_eq!(r.insider_name(), None);
        assert_eq!(r.shares(), None);
    }

    #[test]
    fn blank_detection() {
        assert!(record(&[(columns::ISSUER, "  "), (columns::SHARES, "")]).is_blank());
        assert!(!record(&[(columns::ISSUER, "Acme")]).is_blank());
    }

    #[test]
    fn view_from_pairs_keeps_alignment() {
        let v = View::from_pairs(
            "t",
            Some("USD"),
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.0)],
        );
        assert_eq!(v.labels, vec!["a", "b"]);
        assert_eq!(v.values, vec![1.0, 2.0]);
        assert_eq!(v.len(), 2);
    }
}
