use std::collections::BTreeSet;

use super::model::CrimeDataset;

// ---------------------------------------------------------------------------
// Filter criteria: year range + neighbourhood selection
// ---------------------------------------------------------------------------

/// The active selection, rebuilt on every user interaction.
///
/// An empty neighbourhood set is the dashboard's "please select a
/// neighbourhood" state: it matches nothing and is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year_low: i32,
    pub year_high: i32,
    pub neighbourhoods: BTreeSet<String>,
}

impl FilterCriteria {
    /// The initial selection: full year range, no neighbourhoods.
    pub fn initial(dataset: &CrimeDataset) -> Self {
        FilterCriteria {
            year_low: dataset.min_year,
            year_high: dataset.max_year,
            neighbourhoods: BTreeSet::new(),
        }
    }

    /// The year bounds in ascending order. The range widgets keep
    /// `year_low <= year_high`, but the core does not rely on it.
    pub fn year_bounds(&self) -> (i32, i32) {
        if self.year_low <= self.year_high {
            (self.year_low, self.year_high)
        } else {
            (self.year_high, self.year_low)
        }
    }
}

/// Return indices of records that pass the current criteria.
///
/// A record passes when its year falls inside the (inclusive) year range AND
/// its neighbourhood is among the selected ones. Pure function over the
/// read-only dataset; safe to call on every input event.
pub fn filtered_indices(dataset: &CrimeDataset, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.neighbourhoods.is_empty() {
        return Vec::new();
    }
    let (lo, hi) = criteria.year_bounds();

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            lo <= rec.year && rec.year <= hi && criteria.neighbourhoods.contains(&rec.neighbourhood)
        })
        .map(|(i, _)| i)
        .collect()
}
