use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::model::View;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart visibility
// ---------------------------------------------------------------------------

/// Render the chart list with show/hide checkboxes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    if state.charts.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    let AppState { charts, visible, .. } = state;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (chart, shown) in charts.iter().zip(visible.iter_mut()) {
                ui.checkbox(shown, &chart.view.title);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export views…").clicked() {
                export_views_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("URL:");
        ui.add(
            egui::TextEdit::singleline(&mut state.url_input).desired_width(320.0),
        );
        if ui.button("Fetch").clicked() {
            fetch_from_url(state);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            let shown = state.visible.iter().filter(|&&v| v).count();
            ui.label(format!(
                "{} transactions loaded, {} of {} charts shown",
                ds.len(),
                shown,
                state.charts.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Load actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transaction table")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} transactions from {source}", dataset.len());
                state.set_dataset(dataset, source);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.set_load_error(format!("Error: {e:#}"));
            }
        }
    }
}

/// Save the currently visible series as records-oriented JSON, the same
/// `{ title, unit?, labels, values }` shape the charts are drawn from.
fn export_views_dialog(state: &mut AppState) {
    if state.charts.is_empty() {
        state.status_message = Some("Nothing to export.".to_string());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export chart series")
        .add_filter("JSON", &["json"])
        .set_file_name("views.json")
        .save_file();

    let Some(path) = file else {
        return;
    };

    let views: Vec<&View> = state
        .charts
        .iter()
        .zip(state.visible.iter())
        .filter(|(_, &shown)| shown)
        .map(|(chart, _)| &chart.view)
        .collect();

    let result = serde_json::to_string_pretty(&views)
        .map_err(anyhow::Error::from)
        .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));

    match result {
        Ok(()) => {
            log::info!("Exported {} views to {}", views.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export views: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn fetch_from_url(state: &mut AppState) {
    state.loading = true;
    let url = state.url_input.clone();
    match loader::fetch_url(&url) {
        Ok(dataset) => {
            log::info!("Fetched {} transactions from {url}", dataset.len());
            state.set_dataset(dataset, url);
        }
        Err(e) => {
            log::error!("Failed to fetch table: {e:#}");
            state.set_load_error(format!("Error: {e:#}"));
        }
    }
}
