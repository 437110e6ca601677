use super::aggregate::{
    self, resolve_numeric, AggregateError, MissingNumeric,
};
use super::buckets::{OWNERSHIP_CATEGORIES, PRICE_BUCKETS, SHARE_BUCKETS};
use super::model::{Record, TransactionDataset, View};
use super::normalize::{clean_code, clean_string, UNKNOWN, UNKNOWN_INSIDER, UNKNOWN_ISSUER};

// ---------------------------------------------------------------------------
// Chart catalog
// ---------------------------------------------------------------------------
//
// One builder per chart. Each builder fixes the per-view policy knobs the
// source charts disagree on (unknown bucket in or out, missing numeric cell
// zeroed or excluded, top-N size) rather than unifying them.

/// How the rendering layer should draw a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Display options handed to the rendering layer along with the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub show_y_axis: bool,
    /// Fixed Y-axis tick step; `None` lets the plot pick one.
    pub y_step: Option<f64>,
}

impl ChartOptions {
    /// Integer counts: Y axis on, ticks every 1.
    const COUNTS: ChartOptions = ChartOptions { show_y_axis: true, y_step: Some(1.0) };
    /// Continuous sums: Y axis on, auto ticks.
    const SUMS: ChartOptions = ChartOptions { show_y_axis: true, y_step: None };
    /// Pies have no axes.
    const PIE: ChartOptions = ChartOptions { show_y_axis: false, y_step: None };
}

/// A fully specified chart: the aggregated series plus how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub view: View,
    pub kind: ChartKind,
    pub options: ChartOptions,
}

// -- Normalized key helpers shared by the builders --

fn insider_key(record: &Record) -> String {
    clean_string(record.insider_name(), UNKNOWN_INSIDER)
}

fn issuer_key(record: &Record) -> String {
    clean_string(record.issuer(), UNKNOWN_ISSUER)
}

fn code_key(record: &Record) -> String {
    clean_code(record.transaction_code(), UNKNOWN)
}

fn role_key(record: &Record) -> String {
    clean_string(record.insider_role(), UNKNOWN)
}

// ---------------------------------------------------------------------------
// The eight views
// ---------------------------------------------------------------------------

/// Bar: transaction count per insider, unlabeled rows counted under the
/// "Unknown Insider" bucket.
pub fn transactions_per_insider(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::group_count(
        ds,
        "Transactions per Insider",
        insider_key,
        UNKNOWN_INSIDER,
        true,
    )?;
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::COUNTS })
}

/// Pie: total shares per transaction code. Rows without a parseable Shares
/// cell are excluded from the sum.
pub fn shares_by_transaction_code(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::group_sum(
        ds,
        "Total Shares by Transaction Code",
        Some("shares"),
        code_key,
        |r| resolve_numeric(r.shares(), MissingNumeric::Exclude),
    )?;
    Ok(ChartView { view, kind: ChartKind::Pie, options: ChartOptions::PIE })
}

/// Bar: the five issuers with the most transactions.
pub fn top_issuers(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let counts = aggregate::group_count(
        ds,
        "Top 5 Issuers by Transactions",
        issuer_key,
        UNKNOWN_ISSUER,
        true,
    )?;
    let view = aggregate::top_n(&counts, 5);
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::COUNTS })
}

/// Bar: the ten insiders with the highest total transaction value
/// (shares × price per share). A missing cell resolves to 0 here; the
/// strictly-positive rule then drops the row.
pub fn value_by_insider(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let sums = aggregate::group_sum(
        ds,
        "Top 10 Insiders by Transaction Value",
        Some("USD"),
        insider_key,
        |r| {
            let shares = resolve_numeric(r.shares(), MissingNumeric::Zero)?;
            let price = resolve_numeric(r.price_per_share(), MissingNumeric::Zero)?;
            Some(shares * price)
        },
    )?;
    let view = aggregate::top_n(&sums, 10);
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::SUMS })
}

/// Bar: transaction count per share-size bucket; invalid Shares cells
/// resolve to 0 and land in no bucket.
pub fn share_size_distribution(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::histogram(
        ds,
        "Transaction Size Distribution",
        &SHARE_BUCKETS,
        |r| resolve_numeric(r.shares(), MissingNumeric::Zero),
    )?;
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::COUNTS })
}

/// Bar: transaction count per price bucket, same zero-default policy as the
/// share-size chart.
pub fn price_distribution(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::histogram(
        ds,
        "Price per Share Distribution",
        &PRICE_BUCKETS,
        |r| resolve_numeric(r.price_per_share(), MissingNumeric::Zero),
    )?;
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::COUNTS })
}

/// Pie: Direct / Indirect / Other-Unknown ownership split. Every record
/// lands in exactly one slice, so the slice counts total the dataset size.
pub fn ownership_breakdown(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::categorical(ds, "Ownership Type", &OWNERSHIP_CATEGORIES, |r| {
        clean_code(r.ownership_type(), UNKNOWN)
    })?;
    Ok(ChartView { view, kind: ChartKind::Pie, options: ChartOptions::PIE })
}

/// Bar: transaction count per insider role. Unlike the insider chart, rows
/// without a role are dropped rather than bucketed under "Unknown".
pub fn transactions_by_role(ds: &TransactionDataset) -> Result<ChartView, AggregateError> {
    let view = aggregate::group_count(
        ds,
        "Transactions by Insider Role",
        role_key,
        UNKNOWN,
        false,
    )?;
    Ok(ChartView { view, kind: ChartKind::Bar, options: ChartOptions::COUNTS })
}

/// Build the full catalog in display order. Fails once with
/// [`AggregateError::EmptyDataset`] when there is nothing to chart.
pub fn build_all(ds: &TransactionDataset) -> Result<Vec<ChartView>, AggregateError> {
    Ok(vec![
        transactions_per_insider(ds)?,
        shares_by_transaction_code(ds)?,
        top_issuers(ds)?,
        value_by_insider(ds)?,
        share_size_distribution(ds)?,
        price_distribution(ds)?,
        ownership_breakdown(ds)?,
        transactions_by_role(ds)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;
    use std::collections::HashSet;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::from_cells(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn sample_dataset() -> TransactionDataset {
        let rows = vec![
            record(&[
                (columns::INSIDER_NAME, "Jane Doe"),
                (columns::ISSUER, "Acme Corp"),
                (columns::TRANSACTION_CODE, "p"),
                (columns::SHARES, "500"),
                (columns::PRICE_PER_SHARE, "12.50"),
                (columns::OWNERSHIP_TYPE, "D"),
                (columns::INSIDER_ROLE, "Director"),
            ]),
            record(&[
                (columns::INSIDER_NAME, "Jane Doe"),
                (columns::ISSUER, "Acme Corp"),
                (columns::TRANSACTION_CODE, "S"),
                (columns::SHARES, "15000"),
                (columns::PRICE_PER_SHARE, "80"),
                (columns::OWNERSHIP_TYPE, "I"),
                (columns::INSIDER_ROLE, "Director"),
            ]),
            record(&[
                (columns::INSIDER_NAME, "John Smith"),
                (columns::ISSUER, "Globex"),
                (columns::TRANSACTION_CODE, "P"),
                (columns::SHARES, "abc"),
                (columns::OWNERSHIP_TYPE, "by trust"),
            ]),
            record(&[(columns::ISSUER, "Globex")]),
        ];
        TransactionDataset::from_records(Vec::new(), rows)
    }

    #[test]
    fn build_all_produces_eight_well_formed_views() {
        let charts = build_all(&sample_dataset()).unwrap();
        assert_eq!(charts.len(), 8);
        for chart in &charts {
            assert_eq!(chart.view.labels.len(), chart.view.values.len());
            let distinct: HashSet<&String> = chart.view.labels.iter().collect();
            assert_eq!(distinct.len(), chart.view.labels.len(), "{}", chart.view.title);
            assert!(chart.view.values.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn build_all_refuses_empty_dataset() {
        let ds = TransactionDataset::default();
        assert_eq!(build_all(&ds).unwrap_err(), AggregateError::EmptyDataset);
    }

    #[test]
    fn insider_chart_counts_unknown_rows() {
        let chart = transactions_per_insider(&sample_dataset()).unwrap();
        assert_eq!(
            chart.view.labels,
            vec!["Jane Doe", "John Smith", "Unknown Insider"]
        );
        assert_eq!(chart.view.values, vec![2.0, 1.0, 1.0]);
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.options.y_step, Some(1.0));
    }

    #[test]
    fn shares_by_code_uppercases_and_skips_invalid() {
        let chart = shares_by_transaction_code(&sample_dataset()).unwrap();
        // "p" and "P" merge; the "abc" shares row and the shareless row drop.
        assert_eq!(chart.view.labels, vec!["P", "S"]);
        assert_eq!(chart.view.values, vec![500.0, 15000.0]);
        assert_eq!(chart.kind, ChartKind::Pie);
        assert!(!chart.options.show_y_axis);
    }

    #[test]
    fn top_issuers_is_sorted_descending() {
        let chart = top_issuers(&sample_dataset()).unwrap();
        assert_eq!(chart.view.labels, vec!["Acme Corp", "Globex"]);
        assert_eq!(chart.view.values, vec![2.0, 2.0]);
    }

    #[test]
    fn value_by_insider_multiplies_shares_and_price() {
        let chart = value_by_insider(&sample_dataset()).unwrap();
        // Jane: 500×12.50 + 15000×80 = 1_206_250. John's row has no valid
        // product and drops.
        assert_eq!(chart.view.labels, vec!["Jane Doe"]);
        assert_eq!(chart.view.values, vec![1_206_250.0]);
        assert_eq!(chart.view.unit.as_deref(), Some("USD"));
    }

    #[test]
    fn share_histogram_keeps_zero_buckets() {
        let chart = share_size_distribution(&sample_dataset()).unwrap();
        assert_eq!(chart.view.values, vec![1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn ownership_slices_cover_all_records() {
        let chart = ownership_breakdown(&sample_dataset()).unwrap();
        assert_eq!(chart.view.labels, vec!["Direct", "Indirect", "Other/Unknown"]);
        assert_eq!(chart.view.values, vec![1.0, 1.0, 2.0]);
        assert_eq!(chart.view.values.iter().sum::<f64>(), 4.0);
    }

    #[test]
    fn role_chart_drops_unlabeled_rows() {
        let chart = transactions_by_role(&sample_dataset()).unwrap();
        assert_eq!(chart.view.labels, vec!["Director"]);
        assert_eq!(chart.view.values, vec![2.0]);
    }
}
