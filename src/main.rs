mod app;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::VanCrimeApp;
use eframe::egui;
use state::AppState;

/// Default location of the city's open-data export, relative to the working
/// directory. Overridable with the first CLI argument.
const DEFAULT_DATA_PATH: &str = "data/crimedata_csv_AllNeighbourhoods_AllYears.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    // The dashboard is meaningless without data: load once, fail hard.
    let dataset = match data::loader::load_file(&path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("cannot start without data: {e}");
            eprintln!("vancrime: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} records, years {}–{}, {} neighbourhoods",
        dataset.len(),
        dataset.min_year,
        dataset.max_year,
        dataset.neighbourhoods.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "VanCrime – Vancouver Crime Data",
        options,
        Box::new(move |_cc| Ok(Box::new(VanCrimeApp::new(AppState::new(dataset))))),
    )
}
