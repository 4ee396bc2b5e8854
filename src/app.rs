use eframe::egui;

use crate::color::ChartColors;
use crate::state::{AppState, Event};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    colors: ChartColors,
}

impl DashboardApp {
    pub fn new(state: AppState, colors: ChartColors) -> Self {
        Self { state, colors }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Widgets only record events; state changes once per frame below.
        let mut events: Vec<Event> = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut events);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &mut events);
            });

        // ---- Central panel: KPI and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::central_panel(ui, &self.state, &self.colors);
        });

        if !events.is_empty() {
            for event in events {
                log::debug!("{event:?}");
                self.state.handle(event);
            }
            ctx.request_repaint();
        }
    }
}
