use eframe::egui::{self, Color32, RichText, TextStyle, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use super::display_value;
use crate::color::ChartColors;
use crate::dashboard::{format_count, ChartSpec, Dashboard};
use crate::data::filter::Selection;
use crate::data::model::{Column, EngagementTable};
use crate::state::{AppState, View, IDLE_MESSAGE};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render guidance, the empty-result warning, or the dashboard.
pub fn central_panel(ui: &mut Ui, state: &AppState, colors: &ChartColors) {
    match &state.view {
        View::Idle => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(IDLE_MESSAGE).heading());
            });
        }
        View::NoResults(warning) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("⚠ {warning}"))
                        .heading()
                        .color(Color32::from_rgb(0xE0, 0xA0, 0x00)),
                );
            });
        }
        View::Results(dashboard) => {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard_view(ui, dashboard, state, colors);
                });
        }
    }
}

fn dashboard_view(ui: &mut Ui, dashboard: &Dashboard, state: &AppState, colors: &ChartColors) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("📦 Supplier Engagement Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.small_button("Copy as JSON").clicked() {
                match dashboard.to_json() {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(e) => log::error!("Failed to serialise dashboard: {e}"),
                }
            }
        });
    });
    ui.add_space(12.0);

    // ---- KPI ----
    ui.columns(3, |cols: &mut [Ui]| {
        cols[0].label(RichText::new("Total Engagements:").heading());
        cols[0].label(RichText::new(dashboard.kpi_text()).heading().strong());
    });

    ui.separator();

    // ---- Charts ----
    ui.columns(2, |cols: &mut [Ui]| {
        bar_chart(&mut cols[0], &dashboard.by_supplier, Column::Supplier, &state.selection, colors);
        bar_chart(&mut cols[1], &dashboard.by_company, Column::Company, &state.selection, colors);
    });

    ui.add_space(8.0);
    matching_rows(ui, &state.table, &dashboard.row_indices);
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Draw one categorical bar chart. Selected categories get the highlight fill.
fn bar_chart(
    ui: &mut Ui,
    chart: &ChartSpec,
    column: Column,
    selection: &Selection,
    colors: &ChartColors,
) {
    ui.strong(&chart.title);
    if chart.is_empty() {
        ui.label("Nothing to chart.");
        return;
    }

    let bars: Vec<Bar> = chart
        .labels
        .iter()
        .zip(&chart.values)
        .enumerate()
        .map(|(i, (label, &value))| {
            let fill = if selection.contains(column, label) {
                colors.highlight
            } else {
                colors.bar
            };
            Bar::new(i as f64, value as f64)
                .name(display_value(label))
                .fill(fill)
                .width(0.7)
        })
        .collect();

    // Category names on the x axis, only at integer positions.
    let labels = chart.labels.clone();
    Plot::new(chart.title.as_str())
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if pos < 0.0 || (mark.value - pos).abs() > 1e-6 {
                return String::new();
            }
            labels
                .get(pos as usize)
                .map(|l| display_value(l).to_string())
                .unwrap_or_default()
        })
        .show_grid([false, true])
        .include_y(0.0)
        .include_y(chart.max_value() as f64 * 1.1)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(colors.bar).name(&chart.title));
        });
}

// ---------------------------------------------------------------------------
// Matching rows table
// ---------------------------------------------------------------------------

fn matching_rows(ui: &mut Ui, table: &EngagementTable, indices: &[usize]) {
    let title = format!("Matching engagements ({})", format_count(indices.len()));
    egui::CollapsingHeader::new(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let row_height = ui.text_style_height(&TextStyle::Body);
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(300.0)
                .columns(TableColumn::remainder().at_least(80.0), Column::ALL.len())
                .header(row_height + 4.0, |mut header| {
                    for column in Column::ALL {
                        header.col(|ui: &mut Ui| {
                            ui.strong(column.header());
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, indices.len(), |mut row| {
                        let Some(record) = indices.get(row.index()).and_then(|&i| table.row(i))
                        else {
                            return;
                        };
                        for column in Column::ALL {
                            row.col(|ui: &mut Ui| {
                                ui.label(display_value(record.get(column)));
                            });
                        }
                    });
                });
        });
}
