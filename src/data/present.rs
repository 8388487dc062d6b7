use super::aggregate::{self, InvalidDate, LabelCount};
use super::model::CrimeRecord;

/// Prompt shown in place of both charts while no neighbourhood is selected.
pub const SELECT_PROMPT: &str = "Please select Neighbourhood(s).";

pub const TYPE_TABLE_HEADERS: [&str; 2] = ["TYPE", "COUNT"];
pub const NHOOD_TABLE_HEADERS: [&str; 2] = ["NEIGHBOURHOOD", "COUNT"];

// ---------------------------------------------------------------------------
// Renderable descriptors
// ---------------------------------------------------------------------------

/// One point of a chart series, already labelled for the axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub count: u64,
}

/// What a chart region should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartContent {
    /// Nothing matched the filter; render the prompt instead of axes.
    Placeholder(&'static str),
    /// `(label, count)` pairs in the group's natural order.
    Series(Vec<SeriesPoint>),
}

/// A table with fixed headers. The row list is empty in the placeholder
/// state; the headers still render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContent {
    pub headers: [&'static str; 2],
    /// `[label, formatted count]` per row.
    pub rows: Vec<[String; 2]>,
}

// ---------------------------------------------------------------------------
// DashboardView – the one derived value the UI renders
// ---------------------------------------------------------------------------

/// All four outputs computed from a single filtered subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub month_chart: ChartContent,
    pub weekday_chart: ChartContent,
    pub type_table: TableContent,
    pub nhood_table: TableContent,
}

impl DashboardView {
    /// Run the four aggregations over one filtered subset and shape their
    /// outputs for rendering. An empty subset produces the placeholder
    /// variants, never an error.
    pub fn build(records: &[&CrimeRecord]) -> Result<DashboardView, InvalidDate> {
        if records.is_empty() {
            return Ok(DashboardView::placeholder());
        }

        let months = aggregate::by_month(records.iter().copied())?;
        let weekdays = aggregate::by_weekday(records.iter().copied())?;
        let types = aggregate::by_type(records.iter().copied());
        let nhoods = aggregate::by_neighbourhood(records.iter().copied());

        Ok(DashboardView {
            month_chart: ChartContent::Series(
                months
                    .labelled()
                    .map(|(label, count)| SeriesPoint {
                        label: label.to_string(),
                        count,
                    })
                    .collect(),
            ),
            weekday_chart: ChartContent::Series(
                weekdays
                    .labelled()
                    .map(|(label, count)| SeriesPoint {
                        label: label.to_string(),
                        count,
                    })
                    .collect(),
            ),
            type_table: ranked_table(TYPE_TABLE_HEADERS, &types),
            nhood_table: ranked_table(NHOOD_TABLE_HEADERS, &nhoods),
        })
    }

    /// The "awaiting selection" variant of all four outputs.
    pub fn placeholder() -> DashboardView {
        DashboardView {
            month_chart: ChartContent::Placeholder(SELECT_PROMPT),
            weekday_chart: ChartContent::Placeholder(SELECT_PROMPT),
            type_table: TableContent {
                headers: TYPE_TABLE_HEADERS,
                rows: Vec::new(),
            },
            nhood_table: TableContent {
                headers: NHOOD_TABLE_HEADERS,
                rows: Vec::new(),
            },
        }
    }
}

fn ranked_table(headers: [&'static str; 2], ranked: &[LabelCount]) -> TableContent {
    TableContent {
        headers,
        rows: ranked
            .iter()
            .map(|lc| [lc.label.clone(), format_count(lc.count)])
            .collect(),
    }
}

/// Format a count with thousands separators and no decimals: `1234567` →
/// `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
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
    fn empty_subset_renders_the_placeholder_variants() {
        let view = DashboardView::build(&[]).unwrap();

        assert_eq!(view.month_chart, ChartContent::Placeholder(SELECT_PROMPT));
        assert_eq!(view.weekday_chart, ChartContent::Placeholder(SELECT_PROMPT));
        assert_eq!(view.type_table.headers, ["TYPE", "COUNT"]);
        assert!(view.type_table.rows.is_empty());
        assert_eq!(view.nhood_table.headers, ["NEIGHBOURHOOD", "COUNT"]);
        assert!(view.nhood_table.rows.is_empty());
    }

    #[test]
    fn charts_keep_their_natural_order() {
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
        ];
        let refs: Vec<&CrimeRecord> = records.iter().collect();
        let view = DashboardView::build(&refs).unwrap();

        let ChartContent::Series(months) = &view.month_chart else {
            panic!("expected a series");
        };
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].label, "Jan");
        assert_eq!(months[0].count, 2);

        let ChartContent::Series(weekdays) = &view.weekday_chart else {
            panic!("expected a series");
        };
        assert_eq!(weekdays.len(), 7);
        assert_eq!(weekdays[0].label, "Sun");
        assert_eq!(weekdays[0].count, 1);
    }

    #[test]
    fn tables_carry_formatted_counts_in_rank_order() {
        let records = vec![
            rec("Theft", 2020, 1, 5, "A"),
            rec("Theft", 2020, 1, 20, "A"),
            rec("Assault", 2021, 6, 1, "B"),
        ];
        let refs: Vec<&CrimeRecord> = records.iter().collect();
        let view = DashboardView::build(&refs).unwrap();

        assert_eq!(
            view.type_table.rows,
            vec![
                ["Theft".to_string(), "2".to_string()],
                ["Assault".to_string(), "1".to_string()]
            ]
        );
        assert_eq!(
            view.nhood_table.rows,
            vec![
                ["A".to_string(), "2".to_string()],
                ["B".to_string(), "1".to_string()]
            ]
        );
    }

    #[test]
    fn single_neighbourhood_subset_matches_the_worked_example() {
        // criteria {neighbourhoods={"B"}} from the full three-record dataset
        let records = vec![rec("Assault", 2021, 6, 1, "B")];
        let refs: Vec<&CrimeRecord> = records.iter().collect();
        let view = DashboardView::build(&refs).unwrap();

        assert_eq!(
            view.type_table.rows,
            vec![["Assault".to_string(), "1".to_string()]]
        );
        assert_eq!(
            view.nhood_table.rows,
            vec![["B".to_string(), "1".to_string()]]
        );
    }

    #[test]
    fn counts_format_with_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
