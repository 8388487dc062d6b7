use std::collections::BTreeMap;

use chrono::Datelike;
use thiserror::Error;

use super::model::CrimeRecord;

/// Calendar-order month labels, matching strftime's `%b`.
pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sunday-first weekday labels, matching strftime's `%a` with `%w` ordering.
pub const WEEKDAY_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A record slipped past load-time cleaning with an impossible date. The
/// loader rejects these, so hitting this downstream is a programming defect,
/// not a recoverable runtime path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record has no valid calendar date: {year:04}-{month:02}-{day:02}")]
pub struct InvalidDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

fn check_date(rec: &CrimeRecord) -> Result<chrono::NaiveDate, InvalidDate> {
    rec.date().ok_or(InvalidDate {
        year: rec.year,
        month: rec.month,
        day: rec.day,
    })
}

// ---------------------------------------------------------------------------
// Fixed-axis counts: by month, by weekday
// ---------------------------------------------------------------------------

/// Counts per calendar month. Always 12 entries, January first; months
/// absent from the input stay at 0 so the chart axis never changes shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthCounts(pub [u64; 12]);

/// Counts per weekday. Always 7 entries, Sunday first; zero-filled like
/// [`MonthCounts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayCounts(pub [u64; 7]);

impl MonthCounts {
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `(label, count)` pairs in calendar order.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        MONTH_ABBR.iter().zip(self.0.iter()).map(|(&l, &c)| (l, c))
    }
}

impl WeekdayCounts {
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `(label, count)` pairs Sunday through Saturday.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        WEEKDAY_ABBR.iter().zip(self.0.iter()).map(|(&l, &c)| (l, c))
    }
}

/// Count records per calendar month.
pub fn by_month<'a>(
    records: impl IntoIterator<Item = &'a CrimeRecord>,
) -> Result<MonthCounts, InvalidDate> {
    let mut counts = MonthCounts::default();
    for rec in records {
        let date = check_date(rec)?;
        counts.0[date.month0() as usize] += 1;
    }
    Ok(counts)
}

/// Count records per weekday, derived from the full `(year, month, day)`
/// date rather than any stored weekday column.
pub fn by_weekday<'a>(
    records: impl IntoIterator<Item = &'a CrimeRecord>,
) -> Result<WeekdayCounts, InvalidDate> {
    let mut counts = WeekdayCounts::default();
    for rec in records {
        let date = check_date(rec)?;
        counts.0[date.weekday().num_days_from_sunday() as usize] += 1;
    }
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Ranked counts: by crime type, by neighbourhood
// ---------------------------------------------------------------------------

/// One row of a ranked count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Count records per crime type, largest group first.
pub fn by_type<'a>(records: impl IntoIterator<Item = &'a CrimeRecord>) -> Vec<LabelCount> {
    count_by(records, |rec| rec.crime_type.as_str())
}

/// Count records per neighbourhood, largest group first.
pub fn by_neighbourhood<'a>(records: impl IntoIterator<Item = &'a CrimeRecord>) -> Vec<LabelCount> {
    count_by(records, |rec| rec.neighbourhood.as_str())
}

/// Group by `key` and sort by count descending, ties broken by label
/// descending (lexicographic on the raw string).
fn count_by<'a, F>(records: impl IntoIterator<Item = &'a CrimeRecord>, key: F) -> Vec<LabelCount>
where
    F: Fn(&'a CrimeRecord) -> &'a str,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for rec in records {
        *counts.entry(key(rec)).or_default() += 1;
    }

    let mut ranked: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.label.cmp(&a.label)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(crime_type: &str, year: i32, month: u32, day: u32, nhood: &str) -> CrimeRecord {
        CrimeRecord {
            crime_type: crime_type.to_string(),
            year,
            month,
            day,
            neighbourhood: nhood.to_string(),
            x: 491_000.0,
            y: 5_459_000.0,
        }
    }

    #[test]
    fn month_counts_are_zero_filled_and_calendar_ordered() {
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
        ];
        let counts = by_month(&records).unwrap();

        let labelled: Vec<(&str, u64)> = counts.labelled().collect();
        assert_eq!(labelled.len(), 12);
        assert_eq!(labelled[0], ("Jan", 2));
        assert_eq!(labelled[5], ("Jun", 1));
        assert_eq!(labelled[11], ("Dec", 0));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn weekday_counts_derive_from_the_calendar_date() {
        // 2020-01-05 was a Sunday, 2020-01-20 a Monday, 2021-06-01 a Tuesday.
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
        ];
        let counts = by_weekday(&records).unwrap();

        assert_eq!(counts.0, [1, 1, 1, 0, 0, 0, 0]);
        let labelled: Vec<(&str, u64)> = counts.labelled().collect();
        assert_eq!(labelled[0], ("Sun", 1));
        assert_eq!(labelled[6], ("Sat", 0));
    }

    #[test]
    fn empty_input_yields_well_typed_zero_results() {
        let records: Vec<CrimeRecord> = Vec::new();
        assert_eq!(by_month(&records).unwrap().total(), 0);
        assert_eq!(by_weekday(&records).unwrap().total(), 0);
        assert!(by_type(&records).is_empty());
        assert!(by_neighbourhood(&records).is_empty());
    }

    #[test]
    fn invalid_date_is_an_error_not_a_coercion() {
        let records = vec![rec("Theft", 2020, 2, 30, "A")];
        let err = by_weekday(&records).unwrap_err();
        assert_eq!(
            err,
            InvalidDate {
                year: 2020,
                month: 2,
                day: 30
            }
        );
        assert!(by_month(&records).is_err());
    }

    #[test]
    fn ranked_counts_sort_desc_with_label_desc_ties() {
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
            rec("Mischief", 2021, 6, 8, "B"),
        ];
        let ranked = by_type(&records);

        let pairs: Vec<(&str, u64)> = ranked.iter().map(|lc| (lc.label.as_str(), lc.count)).collect();
        // Ties (Assault/Mischief at 1) break by label descending.
        assert_eq!(pairs, vec![("Theft", 2), ("Mischief", 1), ("Assault", 1)]);

        let total: u64 = ranked.iter().map(|lc| lc.count).sum();
        assert_eq!(total, records.len() as u64);
    }

    #[test]
    fn neighbourhood_counts_mirror_type_counts() {
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
        ];
        let ranked = by_neighbourhood(&records);
        let pairs: Vec<(&str, u64)> = ranked.iter().map(|lc| (lc.label.as_str(), lc.count)).collect();
        assert_eq!(pairs, vec![("A", 2), ("B", 1)]);
    }
}
