use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::data::present::{ChartContent, SeriesPoint};

const CHART_HEIGHT: f32 = 250.0;

// ---------------------------------------------------------------------------
// Month chart (bar)
// ---------------------------------------------------------------------------

/// Render the count-by-month bar chart, or the selection prompt.
pub fn month_chart(ui: &mut Ui, content: &ChartContent) {
    ui.strong("Month Count");
    match content {
        ChartContent::Placeholder(prompt) => placeholder(ui, prompt),
        ChartContent::Series(points) => {
            let bars: Vec<Bar> = points
                .iter()
                .enumerate()
                .map(|(i, p): (usize, &SeriesPoint)| {
                    Bar::new(i as f64, p.count as f64).name(&p.label).width(0.6)
                })
                .collect();
            let labels = axis_labels(points);

            Plot::new("month_plot")
                .height(CHART_HEIGHT)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .include_y(0.0)
                .y_axis_label("Number of Crimes")
                .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
                });
        }
    }
}

// ---------------------------------------------------------------------------
// Weekday chart (area + points)
// ---------------------------------------------------------------------------

/// Render the count-by-weekday chart: a filled line with point markers,
/// Sunday through Saturday.
pub fn weekday_chart(ui: &mut Ui, content: &ChartContent) {
    ui.strong("Weekday Count");
    match content {
        ChartContent::Placeholder(prompt) => placeholder(ui, prompt),
        ChartContent::Series(points) => {
            let coords: Vec<[f64; 2]> = points
                .iter()
                .enumerate()
                .map(|(i, p): (usize, &SeriesPoint)| [i as f64, p.count as f64])
                .collect();
            let labels = axis_labels(points);

            let area = Line::new(PlotPoints::from(coords.clone()))
                .color(Color32::from_rgb(0x2e, 0x8b, 0x57))
                .fill(0.0)
                .width(1.5);
            let markers = Points::new(PlotPoints::from(coords))
                .color(Color32::RED)
                .radius(4.0);

            Plot::new("weekday_plot")
                .height(CHART_HEIGHT)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .include_y(0.0)
                .y_axis_label("Number of Crimes")
                .x_axis_formatter(move |mark, _range| category_tick(&labels, mark.value))
                .show(ui, |plot_ui| {
                    plot_ui.line(area);
                    plot_ui.points(markers);
                });
        }
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn axis_labels(points: &[SeriesPoint]) -> Vec<String> {
    points.iter().map(|p| p.label.clone()).collect()
}

/// Label only whole-number ticks that fall on a category index.
fn category_tick(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn placeholder(ui: &mut Ui, prompt: &str) {
    ui.add_sized(
        [ui.available_width(), CHART_HEIGHT],
        egui::Label::new(RichText::new(prompt).color(Color32::RED).size(18.0)),
    );
}
