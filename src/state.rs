use crate::data::loader;
use crate::data::model::TransactionDataset;
use crate::data::views::{self, ChartView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user loads a file or fetches a URL).
    pub dataset: Option<TransactionDataset>,

    /// Charts built from the current dataset, in display order.
    pub charts: Vec<ChartView>,

    /// Per-chart visibility, index-aligned with `charts`.
    pub visible: Vec<bool>,

    /// Where the current dataset came from (file name or URL).
    pub source: Option<String>,

    /// Editable URL for the Fetch action.
    pub url_input: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            charts: Vec::new(),
            visible: Vec::new(),
            source: None,
            url_input: loader::PUBLISHED_CSV_URL.to_string(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and rebuild the chart catalog. The
    /// views are pure, so a single rebuild per load keeps rendering cheap.
    pub fn set_dataset(&mut self, dataset: TransactionDataset, source: String) {
        match views::build_all(&dataset) {
            Ok(charts) => {
                self.visible = vec![true; charts.len()];
                self.charts = charts;
                self.status_message = None;
            }
            Err(e) => {
                // Empty dataset: surfaced once, no charts produced.
                self.charts.clear();
                self.visible.clear();
                self.status_message = Some(format!("No data: {e}"));
            }
        }
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.loading = false;
    }

    /// Record a failed load without touching the current dataset.
    pub fn set_load_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.loading = false;
    }

    /// Toggle one chart's visibility.
    pub fn toggle_chart(&mut self, index: usize) {
        if let Some(flag) = self.visible.get_mut(index) {
            *flag = !*flag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv_text;

    #[test]
    fn set_dataset_builds_one_chart_catalog() {
        let ds = parse_csv_text(
            "Insider Name,Issuer,Shares\nJane Doe,Acme,500\n",
        )
        .unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds, "test.csv".to_string());

        assert_eq!(state.charts.len(), 8);
        assert_eq!(state.visible, vec![true; 8]);
        assert!(state.status_message.is_none());
        assert_eq!(state.source.as_deref(), Some("test.csv"));
    }

    #[test]
    fn empty_dataset_surfaces_a_single_status() {
        let ds = parse_csv_text("Insider Name,Issuer,Shares\n").unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds, "empty.csv".to_string());

        assert!(state.charts.is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn toggle_chart_flips_visibility() {
        let ds = parse_csv_text("Insider Name\nJane\n").unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds, "t.csv".to_string());

        state.toggle_chart(2);
        assert!(!state.visible[2]);
        state.toggle_chart(2);
        assert!(state.visible[2]);
    }
}
