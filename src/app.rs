use eframe::egui;

use crate::state::AppState;
use crate::ui::{chart, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InsiderChartsApp {
    pub state: AppState,
}

impl eframe::App for InsiderChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + source controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart visibility ----
        egui::SidePanel::left("chart_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.charts.is_empty() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a transaction table to view charts  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| {
                    for (view, &shown) in
                        self.state.charts.iter().zip(self.state.visible.iter())
                    {
                        if !shown {
                            continue;
                        }
                        chart::show(ui, view);
                        ui.separator();
                    }
                });
        });
    }
}
