use std::collections::HashMap;

use thiserror::Error;

use super::buckets::{BucketSpec, CategorySpec};
use super::model::{Record, TransactionDataset, View};
use super::normalize;

// ---------------------------------------------------------------------------
// Aggregation engine – dataset → View
// ---------------------------------------------------------------------------
//
// Four stateless algorithms: group-count, group-sum, top-N and fixed-bucket
// histogram (numeric and enumerated). Each one makes a single forward pass
// over the records with an accumulator owned by the call; nothing is shared
// between calls and the dataset is never mutated.

/// Failure signals from the engine. Per-record defects are handled by the
/// normalizer policies and never surface here; the only error is a dataset
/// with nothing to aggregate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("dataset contains no records")]
    EmptyDataset,
}

/// What a group-sum view does with a record whose numeric field is absent
/// (or blank). The two source chart sets disagree on this, so it stays a
/// per-view setting. A present but unparseable cell always excludes the
/// record, under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingNumeric {
    /// Drop the record from the sum.
    Exclude,
    /// Resolve the field to 0 (the strictly-positive rule then drops it,
    /// but a derived product still sees the other factor).
    Zero,
}

/// Resolve a raw numeric cell under a view's missing-field policy.
pub fn resolve_numeric(raw: Option<&str>, missing: MissingNumeric) -> Option<f64> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => normalize::parse_number(Some(s)),
        None => match missing {
            MissingNumeric::Zero => Some(0.0),
            MissingNumeric::Exclude => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Insertion-ordered accumulator
// ---------------------------------------------------------------------------

/// label → running value, preserving first-occurrence order. Local to each
/// aggregation call.
#[derive(Default)]
struct SeriesAccumulator {
    index: HashMap<String, usize>,
    pairs: Vec<(String, f64)>,
}

impl SeriesAccumulator {
    fn add(&mut self, label: String, amount: f64) {
        match self.index.get(&label) {
            Some(&i) => self.pairs[i].1 += amount,
            None => {
                self.index.insert(label.clone(), self.pairs.len());
                self.pairs.push((label, amount));
            }
        }
    }

    fn into_pairs(self) -> Vec<(String, f64)> {
        self.pairs
    }
}

fn ensure_records(dataset: &TransactionDataset) -> Result<(), AggregateError> {
    if dataset.is_empty() {
        Err(AggregateError::EmptyDataset)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// (a) Group-count
// ---------------------------------------------------------------------------

/// Count records per distinct normalized key, in first-occurrence order.
///
/// `include_unknown` controls whether records whose key equals
/// `unknown_label` form a bucket of their own or are skipped; both behaviors
/// exist across the source charts.
pub fn group_count(
    dataset: &TransactionDataset,
    title: &str,
    key: impl Fn(&Record) -> String,
    unknown_label: &str,
    include_unknown: bool,
) -> Result<View, AggregateError> {
    ensure_records(dataset)?;

    let mut acc = SeriesAccumulator::default();
    for record in &dataset.records {
        let label = key(record);
        if !include_unknown && label == unknown_label {
            continue;
        }
        acc.add(label, 1.0);
    }
    Ok(View::from_pairs(title, None, acc.into_pairs()))
}

// ---------------------------------------------------------------------------
// (b) Group-sum
// ---------------------------------------------------------------------------

/// Sum a resolved numeric quantity per distinct normalized key, in
/// first-occurrence order.
///
/// `amount` resolves the record's quantity (a single field or a derived
/// product) under the view's missing-field policy. A record contributes only
/// when the quantity resolves to a strictly positive number; zero, negative
/// and unresolved quantities are dropped rather than zero-summed.
pub fn group_sum(
    dataset: &TransactionDataset,
    title: &str,
    unit: Option<&str>,
    key: impl Fn(&Record) -> String,
    amount: impl Fn(&Record) -> Option<f64>,
) -> Result<View, AggregateError> {
    ensure_records(dataset)?;

    let mut acc = SeriesAccumulator::default();
    for record in &dataset.records {
        let Some(value) = amount(record) else {
            continue;
        };
        if value <= 0.0 {
            continue;
        }
        acc.add(key(record), value);
    }
    Ok(View::from_pairs(title, unit, acc.into_pairs()))
}

// ---------------------------------------------------------------------------
// (c) Top-N selection
// ---------------------------------------------------------------------------

/// Keep the N highest-valued entries of a view, sorted descending. The sort
/// is stable: equal values keep the relative order of the input series.
pub fn top_n(view: &View, n: usize) -> View {
    let mut pairs: Vec<(String, f64)> = view
        .labels
        .iter()
        .cloned()
        .zip(view.values.iter().copied())
        .collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs.truncate(n);
    View::from_pairs(view.title.clone(), view.unit.as_deref(), pairs)
}

// ---------------------------------------------------------------------------
// (d) Fixed-bucket histogram
// ---------------------------------------------------------------------------

/// Count records per bucket of a static numeric partition.
///
/// `value` resolves the record's numeric field; `None` (parse failure under
/// a default-to-zero view) is treated as 0. Records resolving ≤ 0 land in no
/// bucket. Every declared bucket appears in the output, zeros included, in
/// the spec's declared order.
pub fn histogram(
    dataset: &TransactionDataset,
    title: &str,
    spec: &BucketSpec,
    value: impl Fn(&Record) -> Option<f64>,
) -> Result<View, AggregateError> {
    ensure_records(dataset)?;

    let mut counts = vec![0.0; spec.buckets.len()];
    for record in &dataset.records {
        let v = value(record).unwrap_or(0.0);
        if v <= 0.0 {
            continue;
        }
        counts[spec.bucket_index(v)] += 1.0;
    }

    let pairs = spec
        .labels()
        .map(str::to_string)
        .zip(counts)
        .collect();
    Ok(View::from_pairs(title, None, pairs))
}

/// Histogram over an enumerated string domain. Every declared category is
/// present in the output and unmatched codes land in the spec's fallback,
/// so the counts always total the dataset size.
pub fn categorical(
    dataset: &TransactionDataset,
    title: &str,
    spec: &CategorySpec,
    code: impl Fn(&Record) -> String,
) -> Result<View, AggregateError> {
    ensure_records(dataset)?;

    let mut counts = vec![0.0; spec.categories.len() + 1];
    for record in &dataset.records {
        counts[spec.category_index(&code(record))] += 1.0;
    }

    let pairs = spec
        .labels()
        .into_iter()
        .map(str::to_string)
        .zip(counts)
        .collect();
    Ok(View::from_pairs(title, None, pairs))
}
