use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, TextStyle, Ui};

use super::display_value;
use crate::data::model::{Column, EngagementTable};
use crate::state::{AppState, Event, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
///
/// Option lists come from the full table and are always shown; nothing is
/// computed until Search is pressed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, events: &mut Vec<Event>) {
    ui.heading("Please Filter Here:");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add(egui::Button::new(RichText::new("Search").strong()))
            .clicked()
        {
            events.push(Event::Search);
        }
        if ui
            .add_enabled(!state.selection.is_empty(), egui::Button::new("Clear all"))
            .clicked()
        {
            events.push(Event::ClearAll);
        }
    });
    ui.separator();

    let table = Arc::clone(&state.table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in Column::ALL {
                multiselect(ui, state, &table, column, events);
                ui.add_space(6.0);
            }
        });
}

/// One collapsible multi-select: option search, Clear, one checkbox per value.
fn multiselect(
    ui: &mut Ui,
    state: &mut AppState,
    table: &EngagementTable,
    column: Column,
    events: &mut Vec<Event>,
) {
    let options = table.unique_values(column);
    let selected = state.selection.get(column);

    // Show count of selected / total in the header
    let header_text = format!(
        "Select the {}:  ({}/{})",
        column.label(),
        selected.len(),
        options.len()
    );
    let summary = (!selected.is_empty()).then(|| {
        selected
            .iter()
            .map(|v| display_value(v))
            .collect::<Vec<_>>()
            .join(", ")
    });

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.header())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    TextEdit::singleline(state.option_query_mut(column))
                        .hint_text("Find…")
                        .desired_width(ui.available_width() - 60.0),
                );
                if ui.small_button("Clear").clicked() {
                    events.push(Event::ClearColumn(column));
                }
            });

            let query = state.option_queries[column.index()].to_lowercase();
            let visible: Vec<&String> = options
                .iter()
                .filter(|v| query.is_empty() || v.to_lowercase().contains(&query))
                .collect();

            let row_height = ui.text_style_height(&TextStyle::Body);
            ScrollArea::vertical()
                .id_salt(("options", column.header()))
                .max_height(240.0)
                .show_rows(ui, row_height, visible.len(), |ui: &mut Ui, range| {
                    for value in &visible[range] {
                        let mut checked = state.selection.contains(column, value);
                        if ui.checkbox(&mut checked, display_value(value)).changed() {
                            events.push(Event::Toggle {
                                column,
                                value: value.to_string(),
                            });
                        }
                    }
                });
        });

    if let Some(summary) = summary {
        ui.label(RichText::new(summary).small().weak());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<Event>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = open_file_dialog() {
                    events.push(Event::Open(path));
                }
                ui.close_menu();
            }
            if ui.button("Reload data").clicked() {
                events.push(Event::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} engagements loaded from {}",
            state.table.len(),
            state.source_description()
        ));
        if let View::Results(dashboard) = &state.view {
            ui.separator();
            ui.label(format!("{} matching", dashboard.total_engagements));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open engagement data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "parquet", "pq", "json"],
        )
        .add_filter("Excel workbooks", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file()
}
