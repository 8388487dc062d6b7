use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: year range sliders and the neighbourhood
/// multi-select.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_range_widgets(ui, state);
            ui.separator();
            neighbourhood_widgets(ui, state);
        });
}

fn year_range_widgets(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Year Range");

    let (min_year, max_year) = (state.dataset.min_year, state.dataset.max_year);
    let mut low = state.criteria.year_low;
    let mut high = state.criteria.year_high;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, min_year..=max_year).text("From"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min_year..=max_year).text("To"))
        .changed();

    if low_changed || high_changed {
        // The handles may not cross: the moved one pushes the other along.
        if low_changed {
            high = high.max(low);
        }
        if high_changed {
            low = low.min(high);
        }
        state.set_year_range(low, high);
    }
}

fn neighbourhood_widgets(ui: &mut Ui, state: &mut AppState) {
    // Clone so we can mutate state inside the loop.
    let neighbourhoods = state.dataset.neighbourhoods.clone();

    let n_selected = state.criteria.neighbourhoods.len();
    let n_total = neighbourhoods.len();
    let header_text = format!("Neighbourhoods  ({n_selected}/{n_total})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for name in &neighbourhoods {
                let mut checked = state.criteria.neighbourhoods.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    state.toggle_neighbourhood(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, active year range, record counts, status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("VanCrime – Vancouver Crime Data");

        let (lo, hi) = state.criteria.year_bounds();
        ui.label(format!("(from {lo} to {hi})"));

        ui.separator();
        ui.label(format!(
            "{} records loaded, {} selected",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
