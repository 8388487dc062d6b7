use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VanCrimeApp {
    pub state: AppState,
}

impl VanCrimeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for VanCrimeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts over tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let view = &self.state.view;

            ui.columns(2, |cols| {
                charts::month_chart(&mut cols[0], &view.month_chart);
                charts::weekday_chart(&mut cols[1], &view.weekday_chart);
            });

            ui.separator();

            ui.columns(2, |cols| {
                tables::count_table(&mut cols[0], "Total Count by Crime Type", &view.type_table);
                tables::count_table(
                    &mut cols[1],
                    "Total Count by Neighbourhood",
                    &view.nhood_table,
                );
            });
        });
    }
}
