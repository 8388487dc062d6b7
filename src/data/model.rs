use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CrimeRecord – one reported incident
// ---------------------------------------------------------------------------

/// A single reported incident (one row of the source table).
///
/// The loader guarantees `x != 0.0`, `y != 0.0` and that `(year, month, day)`
/// forms a real calendar date, so downstream code can treat those as
/// invariants rather than re-checking them.
#[derive(Debug, Clone, PartialEq)]
pub struct CrimeRecord {
    /// Crime category, e.g. "Theft from Vehicle".
    pub crime_type: String,
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Day of month, 1–31.
    pub day: u32,
    /// Named geographic subdivision the incident was reported in.
    pub neighbourhood: String,
    /// Projected easting; 0.0 in the source export means "location withheld".
    pub x: f64,
    /// Projected northing; 0.0 means "location withheld".
    pub y: f64,
}

impl CrimeRecord {
    /// The incident date, or `None` if `(year, month, day)` is not a real
    /// calendar date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

// ---------------------------------------------------------------------------
// CrimeDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with derived scalars, loaded once at startup and
/// read-only for the remainder of the process.
#[derive(Debug, Clone)]
pub struct CrimeDataset {
    /// All surviving records, in source order.
    pub records: Vec<CrimeRecord>,
    /// Earliest year present after cleaning.
    pub min_year: i32,
    /// Latest year present after cleaning (the partial trailing year of the
    /// raw export is already gone).
    pub max_year: i32,
    /// Sorted distinct neighbourhood names.
    pub neighbourhoods: Vec<String>,
}

impl CrimeDataset {
    /// Build the derived scalars from a non-empty set of cleaned records.
    ///
    /// Callers (the loader) must ensure `records` is non-empty; the year
    /// range of an empty dataset is meaningless.
    pub fn from_records(records: Vec<CrimeRecord>) -> Self {
        debug_assert!(!records.is_empty());

        let mut min_year = i32::MAX;
        let mut max_year = i32::MIN;
        let mut neighbourhoods: Vec<String> = Vec::new();

        for rec in &records {
            min_year = min_year.min(rec.year);
            max_year = max_year.max(rec.year);
            if !neighbourhoods.contains(&rec.neighbourhood) {
                neighbourhoods.push(rec.neighbourhood.clone());
            }
        }
        neighbourhoods.sort();

        CrimeDataset {
            records,
            min_year,
            max_year,
            neighbourhoods,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(crime_type: &str, year: i32, nhood: &str) -> CrimeRecord {
        CrimeRecord {
            crime_type: crime_type.to_string(),
            year,
            month: 1,
            day: 5,
            neighbourhood: nhood.to_string(),
            x: 491_000.0,
            y: 5_459_000.0,
        }
    }

    #[test]
    fn derived_scalars_cover_all_records() {
        let ds = CrimeDataset::from_records(vec![
            rec("Theft", 2019, "Sunset"),
            rec("Mischief", 2015, "Kitsilano"),
            rec("Theft", 2021, "Sunset"),
        ]);

        assert_eq!(ds.min_year, 2015);
        assert_eq!(ds.max_year, 2021);
        assert_eq!(ds.neighbourhoods, vec!["Kitsilano", "Sunset"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn invalid_date_is_detectable() {
        let mut r = rec("Theft", 2020, "Sunset");
        assert!(r.date().is_some());
        r.month = 2;
        r.day = 30;
        assert!(r.date().is_none());
    }
}
