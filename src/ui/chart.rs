use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Mesh, RichText, Shape, Stroke, Ui, Vec2};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Plot};

use crate::color::ColorMap;
use crate::data::views::{ChartKind, ChartView};

// ---------------------------------------------------------------------------
// Chart rendering – one ChartView → pixels
// ---------------------------------------------------------------------------
//
// The aggregation core hands over a finished View; everything visual
// (palette, axes, legends) lives here.

const CHART_HEIGHT: f32 = 260.0;
const PIE_DIAMETER: f32 = 220.0;

/// Render one chart with its title heading.
pub fn show(ui: &mut Ui, chart: &ChartView) {
    let mut heading = chart.view.title.clone();
    if let Some(unit) = &chart.view.unit {
        heading.push_str(&format!("  [{unit}]"));
    }
    ui.strong(heading);

    if chart.view.is_empty() {
        ui.label("No rows matched this view.");
        return;
    }

    match chart.kind {
        ChartKind::Bar => bar_chart(ui, chart),
        ChartKind::Pie => pie_chart(ui, chart),
    }
}

// ---------------------------------------------------------------------------
// Bar charts (egui_plot)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, chart: &ChartView) {
    let colors = ColorMap::new(&chart.view.labels);

    let bars: Vec<Bar> = chart
        .view
        .labels
        .iter()
        .zip(chart.view.values.iter())
        .enumerate()
        .map(|(i, (label, &value))| {
            Bar::new(i as f64, value)
                .width(0.6)
                .name(label)
                .fill(colors.color_for(label))
        })
        .collect();

    let labels = chart.view.labels.clone();
    let mut plot = Plot::new(&chart.view.title)
        .height(CHART_HEIGHT)
        .show_axes([true, chart.options.show_y_axis])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            // Ticks land on bar indices; everything between stays blank.
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        });

    if let Some(step) = chart.options.y_step {
        plot = plot.y_grid_spacer(uniform_grid_spacer(move |_| {
            [step * 100.0, step * 10.0, step]
        }));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

// ---------------------------------------------------------------------------
// Pie charts (painter wedges; egui_plot has no pie type)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, chart: &ChartView) {
    let total: f64 = chart.view.values.iter().sum();
    if total <= 0.0 {
        ui.label("All slices are zero.");
        return;
    }

    let colors = ColorMap::new(&chart.view.labels);

    ui.horizontal(|ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::splat(PIE_DIAMETER),
            egui::Sense::hover(),
        );
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.48;

        // 12 o'clock start, clockwise.
        let mut angle = -TAU / 4.0;
        for (label, &value) in chart.view.labels.iter().zip(&chart.view.values) {
            if value <= 0.0 {
                continue;
            }
            let sweep = (value / total) as f32 * TAU;
            painter.add(wedge(center, radius, angle, sweep, colors.color_for(label)));
            angle += sweep;
        }
        painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::DARK_GRAY));

        // Swatch legend with slice values.
        ui.vertical(|ui| {
            for (label, &value) in chart.view.labels.iter().zip(&chart.view.values) {
                ui.horizontal(|ui| {
                    let (swatch, painter) =
                        ui.allocate_painter(Vec2::splat(12.0), egui::Sense::hover());
                    painter.rect_filled(swatch.rect, 2.0, colors.color_for(label));
                    ui.label(RichText::new(format!(
                        "{label}: {}",
                        format_value(value)
                    )));
                });
            }
        });
    });
}

/// Build a filled wedge as a triangle fan around the circle center.
fn wedge(
    center: egui::Pos2,
    radius: f32,
    start_angle: f32,
    sweep: f32,
    color: Color32,
) -> Shape {
    let steps = ((sweep / 0.05).ceil() as usize).max(1);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for k in 0..=steps {
        let a = start_angle + sweep * (k as f32 / steps as f32);
        let point = center + radius * Vec2::new(a.cos(), a.sin());
        mesh.colored_vertex(point, color);
    }
    for k in 0..steps {
        mesh.add_triangle(0, (k + 1) as u32, (k + 2) as u32);
    }
    Shape::mesh(mesh)
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
