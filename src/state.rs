use std::collections::BTreeSet;

use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{CrimeDataset, CrimeRecord};
use crate::data::present::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub dataset: CrimeDataset,

    /// The active year range + neighbourhood selection.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// The four renderable outputs derived from the current selection
    /// (cached, recomputed on every criteria change).
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start in the "awaiting selection" state: full year range, no
    /// neighbourhoods selected.
    pub fn new(dataset: CrimeDataset) -> Self {
        let criteria = FilterCriteria::initial(&dataset);
        let mut state = AppState {
            dataset,
            criteria,
            visible_indices: Vec::new(),
            view: DashboardView::placeholder(),
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Recompute the filtered subset and the derived view. Called after
    /// every criteria change; each run fully replaces the previous output.
    pub fn refresh(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.criteria);
        let records: Vec<&CrimeRecord> = self
            .visible_indices
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect();

        match DashboardView::build(&records) {
            Ok(view) => {
                self.view = view;
                self.status_message = None;
            }
            Err(e) => {
                // Load-time validation makes this unreachable; surface it
                // instead of panicking.
                log::error!("aggregation failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.view = DashboardView::placeholder();
            }
        }
    }

    /// Set the year range, keeping the bounds ordered.
    pub fn set_year_range(&mut self, low: i32, high: i32) {
        self.criteria.year_low = low.min(high);
        self.criteria.year_high = low.max(high);
        self.refresh();
    }

    /// Toggle a single neighbourhood in the selection.
    pub fn toggle_neighbourhood(&mut self, name: &str) {
        if !self.criteria.neighbourhoods.remove(name) {
            self.criteria.neighbourhoods.insert(name.to_string());
        }
        self.refresh();
    }

    /// Select every neighbourhood in the dataset.
    pub fn select_all(&mut self) {
        self.criteria.neighbourhoods = self.dataset.neighbourhoods.iter().cloned().collect();
        self.refresh();
    }

    /// Clear the neighbourhood selection (back to the placeholder state).
    pub fn select_none(&mut self) {
        self.criteria.neighbourhoods = BTreeSet::new();
        self.refresh();
    }
}
