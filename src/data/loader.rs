use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CrimeDataset, CrimeRecord};

/// Columns every input file must provide. Extra columns (the city's export
/// also carries HOUR, MINUTE, HUNDRED_BLOCK, ...) are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = ["TYPE", "YEAR", "MONTH", "DAY", "NEIGHBOURHOOD", "X", "Y"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension .{ext} (expected .csv, .json or .parquet)")]
    UnsupportedExtension { ext: String },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("{path}: no usable records after cleaning")]
    Empty { path: PathBuf },
}

fn io_err(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn format_err(path: &Path, reason: String) -> LoadError {
    LoadError::Format {
        path: path.to_path_buf(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a crime dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the city's open-data export (canonical format)
/// * `.json`    – records-oriented array: `[{ "TYPE": ..., "YEAR": ..., ... }]`
/// * `.parquet` – flat scalar columns with the same names
///
/// Cleaning, in order: rows with a missing value in any required column are
/// discarded; the latest year present is discarded wholesale (the trailing
/// year of the export is incomplete); rows with `X == 0` or `Y == 0`
/// (withheld location) are discarded; every surviving row must carry a real
/// calendar date.
pub fn load_file(path: &Path) -> Result<CrimeDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(LoadError::UnsupportedExtension {
                ext: other.to_string(),
            })
        }
    };

    let records = clean(rows, path)?;
    Ok(CrimeDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Raw row – one parsed line before cleaning
// ---------------------------------------------------------------------------

/// A parsed row whose required fields may still be missing. Rows that fail
/// `into_record` are the ones `dropna` would have removed.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "TYPE")]
    crime_type: Option<String>,
    #[serde(rename = "YEAR")]
    year: Option<i32>,
    #[serde(rename = "MONTH")]
    month: Option<u32>,
    #[serde(rename = "DAY")]
    day: Option<u32>,
    #[serde(rename = "NEIGHBOURHOOD")]
    neighbourhood: Option<String>,
    #[serde(rename = "X")]
    x: Option<f64>,
    #[serde(rename = "Y")]
    y: Option<f64>,
}

impl RawRow {
    /// Promote to a [`CrimeRecord`] if every required field is present and
    /// the text fields are non-blank.
    fn into_record(self) -> Option<CrimeRecord> {
        let crime_type = self.crime_type?.trim().to_string();
        let neighbourhood = self.neighbourhood?.trim().to_string();
        if crime_type.is_empty() || neighbourhood.is_empty() {
            return None;
        }
        Some(CrimeRecord {
            crime_type,
            year: self.year?,
            month: self.month?,
            day: self.day?,
            neighbourhood,
            x: self.x?,
            y: self.y?,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<CrimeRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| format_err(path, format!("reading CSV header: {e}")))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let raw = result.map_err(|e| format_err(path, format!("CSV line {}: {e}", row_no + 2)))?;
        if let Some(rec) = raw.into_record() {
            rows.push(rec);
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "TYPE": "Theft from Vehicle",
///     "YEAR": 2019, "MONTH": 3, "DAY": 14,
///     "NEIGHBOURHOOD": "Kitsilano",
///     "X": 487231.5, "Y": 5456991.2
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<CrimeRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| format_err(path, format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| format_err(path, "expected a top-level JSON array".to_string()))?;

    // Column presence is checked against the first record; per-row nulls are
    // handled by the dropna pass.
    if let Some(first) = records.first() {
        let obj = first
            .as_object()
            .ok_or_else(|| format_err(path, "row 0 is not a JSON object".to_string()))?;
        for column in REQUIRED_COLUMNS {
            if !obj.contains_key(column) {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                });
            }
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| format_err(path, format!("row {i} is not a JSON object")))?;

        let raw = RawRow {
            crime_type: json_string(obj.get("TYPE")),
            year: json_int(obj.get("YEAR")).and_then(|v| i32::try_from(v).ok()),
            month: json_int(obj.get("MONTH")).and_then(|v| u32::try_from(v).ok()),
            day: json_int(obj.get("DAY")).and_then(|v| u32::try_from(v).ok()),
            neighbourhood: json_string(obj.get("NEIGHBOURHOOD")),
            x: json_float(obj.get("X")),
            y: json_float(obj.get("Y")),
        };
        if let Some(rec) = raw.into_record() {
            rows.push(rec);
        }
    }
    Ok(rows)
}

fn json_string(val: Option<&JsonValue>) -> Option<String> {
    val?.as_str().map(|s| s.to_string())
}

fn json_int(val: Option<&JsonValue>) -> Option<i64> {
    val?.as_i64()
}

fn json_float(val: Option<&JsonValue>) -> Option<f64> {
    val?.as_f64()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the incident table.
///
/// Expected schema: flat scalar columns named like the CSV header. String
/// columns may be Utf8 or LargeUtf8, integer columns Int32 or Int64, and
/// coordinate columns Float32 or Float64, whatever the exporting tool
/// (Pandas or Polars) chose.
fn load_parquet(path: &Path) -> Result<Vec<CrimeRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| format_err(path, format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| format_err(path, format!("building parquet reader: {e}")))?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| format_err(path, format!("reading parquet batch: {e}")))?;
        let schema = batch.schema();

        let col_idx = |column: &'static str| -> Result<usize, LoadError> {
            schema.index_of(column).map_err(|_| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
        };

        let type_col = batch.column(col_idx("TYPE")?);
        let year_col = batch.column(col_idx("YEAR")?);
        let month_col = batch.column(col_idx("MONTH")?);
        let day_col = batch.column(col_idx("DAY")?);
        let nhood_col = batch.column(col_idx("NEIGHBOURHOOD")?);
        let x_col = batch.column(col_idx("X")?);
        let y_col = batch.column(col_idx("Y")?);

        for row in 0..batch.num_rows() {
            let raw = RawRow {
                crime_type: string_at(type_col, row),
                year: int_at(year_col, row).and_then(|v| i32::try_from(v).ok()),
                month: int_at(month_col, row).and_then(|v| u32::try_from(v).ok()),
                day: int_at(day_col, row).and_then(|v| u32::try_from(v).ok()),
                neighbourhood: string_at(nhood_col, row),
                x: float_at(x_col, row),
                y: float_at(y_col, row),
            };
            if let Some(rec) = raw.into_record() {
                rows.push(rec);
            }
        }
    }
    Ok(rows)
}

// -- Arrow helpers --

fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

fn int_at(col: &ArrayRef, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| i64::from(a.value(row))),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        _ => None,
    }
}

fn float_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Apply the dataset-level cleaning rules to the parsed rows.
fn clean(rows: Vec<CrimeRecord>, path: &Path) -> Result<Vec<CrimeRecord>, LoadError> {
    let Some(latest) = rows.iter().map(|r| r.year).max() else {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    };

    let survivors: Vec<CrimeRecord> = rows
        .into_iter()
        .filter(|r| r.year < latest && r.x != 0.0 && r.y != 0.0)
        .collect();

    // Reject invalid dates here so aggregation never sees one.
    for rec in &survivors {
        if rec.date().is_none() {
            return Err(format_err(
                path,
                format!(
                    "record has no valid calendar date: {:04}-{:02}-{:02}",
                    rec.year, rec.month, rec.day
                ),
            ));
        }
    }

    if survivors.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "TYPE,YEAR,MONTH,DAY,HOUR,MINUTE,HUNDRED_BLOCK,NEIGHBOURHOOD,X,Y";

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_load_applies_all_cleaning_rules() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Theft of Bicycle,2019,1,5,10,30,1X NICOLA ST,West End,490283.3,5459625.0\n\
             Mischief,2020,6,1,,,2X MAIN ST,Strathcona,492110.9,5458520.1\n\
             Mischief,2020,6,2,3,15,3X MAIN ST,,492110.9,5458520.1\n\
             Theft of Bicycle,2020,7,4,8,0,4X NICOLA ST,West End,0,5459625.0\n\
             Mischief,2021,2,9,7,45,5X MAIN ST,Strathcona,492110.9,5458520.1\n"
        );
        let path = write_file(&dir, "crime.csv", &csv);

        let ds = load_file(&path).unwrap();

        // Row 3 is dropped for its blank neighbourhood, row 4 for X=0, and
        // every 2021 row for being the (partial) latest year.
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.min_year, 2019);
        assert_eq!(ds.max_year, 2020);
        assert_eq!(ds.neighbourhoods, vec!["Strathcona", "West End"]);
        assert!(ds.records.iter().all(|r| r.x != 0.0 && r.y != 0.0));
    }

    #[test]
    fn csv_missing_required_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "TYPE,YEAR,MONTH,DAY,X,Y\nTheft,2019,1,5,490283.3,5459625.0\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "NEIGHBOURHOOD",
                ..
            }
        ));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/crime.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("crime.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension { ext } if ext == "xlsx"));
    }

    #[test]
    fn invalid_calendar_date_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Theft,2019,2,30,1,0,1X ST,West End,490283.3,5459625.0\n\
             Theft,2020,1,5,1,0,1X ST,West End,490283.3,5459625.0\n"
        );
        let path = write_file(&dir, "crime.csv", &csv);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Format { reason, .. } if reason.contains("2019-02-30")));
    }

    #[test]
    fn single_year_dataset_is_empty_after_cleaning() {
        // The latest year is always excluded, so a one-year export has no
        // usable records.
        let dir = tempfile::tempdir().unwrap();
        let csv = format!(
            "{HEADER}\n\
             Theft,2021,1,5,1,0,1X ST,West End,490283.3,5459625.0\n\
             Theft,2021,3,9,1,0,1X ST,West End,490283.3,5459625.0\n"
        );
        let path = write_file(&dir, "crime.csv", &csv);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn json_load_matches_csv_semantics() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"TYPE": "Theft", "YEAR": 2019, "MONTH": 1, "DAY": 5,
             "NEIGHBOURHOOD": "West End", "X": 490283.3, "Y": 5459625.0},
            {"TYPE": "Mischief", "YEAR": 2020, "MONTH": 6, "DAY": 1,
             "NEIGHBOURHOOD": null, "X": 492110.9, "Y": 5458520.1},
            {"TYPE": "Mischief", "YEAR": 2020, "MONTH": 6, "DAY": 2,
             "NEIGHBOURHOOD": "Strathcona", "X": 492110.9, "Y": 5458520.1},
            {"TYPE": "Theft", "YEAR": 2021, "MONTH": 2, "DAY": 9,
             "NEIGHBOURHOOD": "Strathcona", "X": 492110.9, "Y": 5458520.1}
        ]"#;
        let path = write_file(&dir, "crime.json", json);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.max_year, 2020);
    }

    #[test]
    fn json_missing_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[{"TYPE": "Theft", "YEAR": 2019, "MONTH": 1, "DAY": 5, "X": 1.0, "Y": 2.0}]"#;
        let path = write_file(&dir, "crime.json", json);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "NEIGHBOURHOOD",
                ..
            }
        ));
    }
}
