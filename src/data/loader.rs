use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Record, TransactionDataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Default source: the published Google-Sheets export of the transaction log.
pub const PUBLISHED_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTgszNwy78OqGoabOHIQ2mRKMrYU1ZNfjsl1F2GD7Y9VVTDQKJQEIhfNKLO4A9A5uE1JRH5rxG7yt8T/pub?gid=1833183151&single=true&output=csv";

/// Load a transaction table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row (the published format)
/// * `.json` – records-oriented array of flat objects
pub fn load_file(path: &Path) -> Result<TransactionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let text = std::fs::read_to_string(path).context("reading CSV file")?;
            parse_csv_text(&text)
        }
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Download a published CSV table over HTTP and parse it.
pub fn fetch_url(url: &str) -> Result<TransactionDataset> {
    let response = reqwest::blocking::get(url).context("fetching CSV")?;
    let status = response.status();
    if !status.is_success() {
        bail!("HTTP {status} fetching {url}");
    }
    let text = response.text().context("reading response body")?;
    parse_csv_text(&text)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row into a dataset. Rows are allowed
/// to be ragged (missing trailing cells) and fully blank rows are skipped;
/// cell contents are stored untouched.
pub fn parse_csv_text(text: &str) -> Result<TransactionDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut cells = BTreeMap::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            cells.insert(header.clone(), value.to_string());
        }

        let record = Record::from_cells(cells);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    log::info!("Parsed {} transaction rows", records.len());
    Ok(TransactionDataset::from_records(headers, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Insider Name": "Jane Doe", "Shares": "500", "Price per Share": 12.5 },
///   ...
/// ]
/// ```
///
/// Scalar values are stringified into cells; `null` means the field is
/// absent from that row.
fn load_json(path: &Path) -> Result<TransactionDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            let Some(cell) = json_to_cell(val) else {
                continue;
            };
            cells.insert(key.clone(), cell);
        }

        let record = Record::from_cells(cells);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(TransactionDataset::from_records(headers, records))
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;

    #[test]
    fn parses_header_keyed_rows() {
        let text = "\
Insider Name,Issuer,Shares
Jane Doe,Acme Corp,500
John Smith,Globex,abc
";
        let ds = parse_csv_text(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.headers, vec!["Insider Name", "Issuer", "Shares"]);
        assert_eq!(ds.records[0].insider_name(), Some("Jane Doe"));
        // Malformed numerics survive loading untouched.
        assert_eq!(ds.records[1].shares(), Some("abc"));
    }

    #[test]
    fn skips_blank_rows_and_tolerates_ragged_ones() {
        let text = "\
Insider Name,Issuer,Shares
Jane Doe,Acme Corp,500
,,
John Smith
";
        let ds = parse_csv_text(text).unwrap();
        assert_eq!(ds.len(), 2);
        // The ragged row has no Issuer/Shares cells at all.
        assert_eq!(ds.records[1].insider_name(), Some("John Smith"));
        assert_eq!(ds.records[1].issuer(), None);
        assert_eq!(ds.records[1].shares(), None);
    }

    #[test]
    fn header_only_input_yields_empty_dataset() {
        let ds = parse_csv_text("Insider Name,Issuer,Shares\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.headers.len(), 3);
    }

    #[test]
    fn json_rows_stringify_scalars_and_drop_nulls() {
        let dir = std::env::temp_dir().join("insider_charts_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.json");
        std::fs::write(
            &path,
            r#"[
                {"Insider Name": "Jane Doe", "Shares": 500, "Issuer": null},
                {"Insider Name": "John Smith", "Shares": "abc"}
            ]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get(columns::SHARES), Some("500"));
        assert_eq!(ds.records[0].issuer(), None);
        assert_eq!(ds.records[1].shares(), Some("abc"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(load_file(Path::new("table.parquet")).is_err());
    }
}
