//! Survey CSV ingestion and validation.
//!
//! The detector assumes clean, finite numeric input; this layer owns that
//! contract. Every malformed cell is reported with its 1-based row number so
//! the operator can fix the offending station, and surveys with fewer than
//! two data rows are rejected before any fitting is attempted.
//!
//! Gradient survey format:    `depth_ft,pressure_psi`
//! Directional survey format: `md_ft,inclination_deg,azimuth_deg`
//! An optional header row is detected (any non-numeric first row) and skipped.

use crate::types::{DirectionalStation, SurveyPoint};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Minimum data rows for any survey to be worth interpreting.
pub const MIN_SURVEY_ROWS: usize = 2;

/// Survey ingestion errors.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}: non-numeric value '{value}' in {column} column")]
    NonNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: {column} is not finite")]
    NonFinite { row: usize, column: &'static str },

    #[error("Row {row}: {message}")]
    InvalidStation { row: usize, message: String },

    #[error("Survey has {rows} data rows; at least {min} required")]
    InsufficientData { rows: usize, min: usize },
}

// ============================================================================
// Gradient Surveys
// ============================================================================

/// Read a gradient survey from a CSV file.
pub fn read_gradient_csv(path: &Path) -> Result<Vec<SurveyPoint>, SurveyError> {
    let text = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let points = parse_gradient_survey(&text)?;
    info!(
        stations = points.len(),
        path = %path.display(),
        "gradient survey loaded"
    );
    Ok(points)
}

/// Parse gradient survey stations from CSV text.
pub fn parse_gradient_survey(text: &str) -> Result<Vec<SurveyPoint>, SurveyError> {
    let mut points = Vec::new();

    for (row, line) in data_rows(text) {
        let fields = csv_split(line);
        if fields.len() != 2 {
            return Err(SurveyError::ColumnCount {
                row,
                expected: 2,
                found: fields.len(),
            });
        }
        let depth = parse_cell(&fields[0], row, "depth")?;
        let pressure = parse_cell(&fields[1], row, "pressure")?;
        points.push(SurveyPoint { depth, pressure });
    }

    if points.len() < MIN_SURVEY_ROWS {
        return Err(SurveyError::InsufficientData {
            rows: points.len(),
            min: MIN_SURVEY_ROWS,
        });
    }

    Ok(points)
}

// ============================================================================
// Directional Surveys
// ============================================================================

/// Read a directional survey from a CSV file.
pub fn read_directional_csv(path: &Path) -> Result<Vec<DirectionalStation>, SurveyError> {
    let text = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let stations = parse_directional_survey(&text)?;
    info!(
        stations = stations.len(),
        path = %path.display(),
        "directional survey loaded"
    );
    Ok(stations)
}

/// Parse directional survey stations from CSV text.
///
/// Validates physical ranges (inclination 0-180, azimuth 0-360) and requires
/// strictly increasing measured depth.
pub fn parse_directional_survey(text: &str) -> Result<Vec<DirectionalStation>, SurveyError> {
    let mut stations: Vec<DirectionalStation> = Vec::new();

    for (row, line) in data_rows(text) {
        let fields = csv_split(line);
        if fields.len() != 3 {
            return Err(SurveyError::ColumnCount {
                row,
                expected: 3,
                found: fields.len(),
            });
        }
        let md = parse_cell(&fields[0], row, "md")?;
        let inclination = parse_cell(&fields[1], row, "inclination")?;
        let azimuth = parse_cell(&fields[2], row, "azimuth")?;

        if !(0.0..=180.0).contains(&inclination) {
            return Err(SurveyError::InvalidStation {
                row,
                message: format!("inclination {inclination} outside 0-180 degrees"),
            });
        }
        if !(0.0..=360.0).contains(&azimuth) {
            return Err(SurveyError::InvalidStation {
                row,
                message: format!("azimuth {azimuth} outside 0-360 degrees"),
            });
        }
        if let Some(prev) = stations.last() {
            if md <= prev.md {
                return Err(SurveyError::InvalidStation {
                    row,
                    message: format!(
                        "measured depth {md} does not increase past previous station {}",
                        prev.md
                    ),
                });
            }
        }

        stations.push(DirectionalStation {
            md,
            inclination,
            azimuth,
        });
    }

    if stations.len() < MIN_SURVEY_ROWS {
        return Err(SurveyError::InsufficientData {
            rows: stations.len(),
            min: MIN_SURVEY_ROWS,
        });
    }

    Ok(stations)
}

// ============================================================================
// Shared CSV Helpers
// ============================================================================

/// Iterate non-empty data rows with their 1-based file row numbers,
/// skipping a header row when the first row does not start with a number.
fn data_rows<'a>(text: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    let mut header_checked = false;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter(move |(_, line)| {
            if header_checked {
                return true;
            }
            header_checked = true;
            let first_cell = csv_split(line).into_iter().next().unwrap_or_default();
            first_cell.trim().parse::<f64>().is_ok()
        })
        .map(|(idx, line)| (idx + 1, line))
}

/// Parse one numeric cell; reject non-numeric text and non-finite values.
fn parse_cell(cell: &str, row: usize, column: &'static str) -> Result<f64, SurveyError> {
    let trimmed = cell.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| SurveyError::NonNumeric {
            row,
            column,
            value: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(SurveyError::NonFinite { row, column });
    }
    Ok(value)
}

/// Split a CSV line respecting double-quoted fields.
pub(crate) fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    fields.push(std::mem::take(&mut field));
                }
                _ => field.push(ch),
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gradient_with_header() {
        let text = "depth_ft,pressure_psi\n0,14.7\n1000,450.2\n2000,890.0\n";
        let points = parse_gradient_survey(text).unwrap();
        assert_eq!(points.len(), 3);
        assert!((points[1].depth - 1000.0).abs() < 1e-12);
        assert!((points[1].pressure - 450.2).abs() < 1e-12);
    }

    #[test]
    fn test_parse_gradient_without_header() {
        let text = "0,14.7\n1000,450.2\n";
        let points = parse_gradient_survey(text).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_non_numeric_cell_reports_row_number() {
        let text = "depth_ft,pressure_psi\n0,14.7\n1000,abc\n2000,890.0\n";
        let err = parse_gradient_survey(text).unwrap_err();
        match err {
            SurveyError::NonNumeric { row, column, value } => {
                assert_eq!(row, 3, "row numbers are 1-based file positions");
                assert_eq!(column, "pressure");
                assert_eq!(value, "abc");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_cell_rejected() {
        let text = "0,14.7\n1000,inf\n2000,890.0\n";
        let err = parse_gradient_survey(text).unwrap_err();
        assert!(matches!(err, SurveyError::NonFinite { row: 2, .. }));
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let text = "depth_ft,pressure_psi\n1000,450.2\n";
        let err = parse_gradient_survey(text).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InsufficientData { rows: 1, min: 2 }
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let text = "0,14.7\n1000,450.2,extra\n";
        let err = parse_gradient_survey(text).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::ColumnCount {
                row: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "0,14.7\n\n1000,450.2\n\n";
        let points = parse_gradient_survey(text).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_directional_survey_valid() {
        let text = "md_ft,inc_deg,azi_deg\n0,0,0\n1000,5.5,120\n2000,12.0,118\n";
        let stations = parse_directional_survey(text).unwrap();
        assert_eq!(stations.len(), 3);
        assert!((stations[2].inclination - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_directional_md_must_increase() {
        let text = "0,0,0\n1000,5.5,120\n1000,6.0,121\n";
        let err = parse_directional_survey(text).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidStation { row: 3, .. }));
    }

    #[test]
    fn test_directional_inclination_range() {
        let text = "0,0,0\n1000,190.0,120\n";
        let err = parse_directional_survey(text).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidStation { row: 2, .. }));
    }

    #[test]
    fn test_csv_split_quoted_fields() {
        let fields = csv_split("\"a,b\",2,\"say \"\"hi\"\"\"");
        assert_eq!(fields, vec!["a,b", "2", "say \"hi\""]);
    }
}
