//! CSV-backed parts catalog
//!
//! Format: `name,category,od_in,length_in,weight_lb,connection` with an
//! optional header row. Lookup is case-insensitive on part name so rig-up
//! sheets survive operator capitalization.

use super::{Part, PartCategory};
use crate::survey::ingest::csv_split;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Columns in a catalog CSV row.
const CATALOG_COLUMNS: usize = 6;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Row {row}: expected {CATALOG_COLUMNS} columns, found {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("Row {row}: non-numeric value '{value}' in {column} column")]
    NonNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: {message}")]
    InvalidPart { row: usize, message: String },

    #[error("Row {row}: duplicate part name '{name}'")]
    DuplicateName { row: usize, name: String },

    #[error("Catalog contains no parts")]
    Empty,
}

/// In-memory parts catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    /// Load a catalog from a CSV file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::parse(&text)?;
        info!(
            parts = catalog.len(),
            path = %path.display(),
            "parts catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from CSV text.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut parts: Vec<Part> = Vec::new();

        let mut first_row_seen = false;
        for (idx, line) in text.lines().enumerate() {
            let row = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields = csv_split(line);
            if fields.len() != CATALOG_COLUMNS {
                return Err(CatalogError::ColumnCount {
                    row,
                    found: fields.len(),
                });
            }

            // Skip a header row (first non-empty row with non-numeric OD)
            if !first_row_seen {
                first_row_seen = true;
                if fields[2].trim().parse::<f64>().is_err() {
                    continue;
                }
            }

            let name = fields[0].trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::InvalidPart {
                    row,
                    message: "part name is empty".to_string(),
                });
            }
            if parts.iter().any(|p| p.name.eq_ignore_ascii_case(&name)) {
                return Err(CatalogError::DuplicateName { row, name });
            }

            let category =
                fields[1]
                    .parse::<PartCategory>()
                    .map_err(|message| CatalogError::InvalidPart { row, message })?;

            let od_in = parse_positive(&fields[2], row, "od_in")?;
            let length_in = parse_positive(&fields[3], row, "length_in")?;
            let weight_lb = parse_positive(&fields[4], row, "weight_lb")?;
            let connection = fields[5].trim().to_string();

            parts.push(Part {
                name,
                category,
                od_in,
                length_in,
                weight_lb,
                connection,
            });
        }

        if parts.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { parts })
    }

    /// Case-insensitive lookup by part name.
    pub fn find(&self, name: &str) -> Option<&Part> {
        let wanted = name.trim();
        self.parts
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn parse_positive(cell: &str, row: usize, column: &'static str) -> Result<f64, CatalogError> {
    let trimmed = cell.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| CatalogError::NonNumeric {
            row,
            column,
            value: trimmed.to_string(),
        })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(CatalogError::InvalidPart {
            row,
            message: format!("{column} must be a positive finite number, got {value}"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,category,od_in,length_in,weight_lb,connection
Rope Socket 1.5,rope socket,1.5,12.0,5.0,15/16-10 UN
Stem 1.5x5,stem,1.5,60.0,31.0,15/16-10 UN
SB Pulling Tool,pulling tool,1.75,14.5,8.5,15/16-10 UN
";

    #[test]
    fn test_parse_sample_catalog() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        let stem = catalog.find("stem 1.5X5").expect("case-insensitive lookup");
        assert_eq!(stem.category, PartCategory::Stem);
        assert!((stem.weight_lb - 31.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_part() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert!(catalog.find("Gauge Cutter").is_none());
    }

    #[test]
    fn test_bad_category() {
        let text = "Widget,sprocket,1.5,10.0,4.0,none\n";
        let err = Catalog::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPart { row: 1, .. }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let text = "Widget,stem,1.5,10.0,-4.0,none\n";
        let err = Catalog::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPart { row: 1, .. }));
    }

    #[test]
    fn test_non_numeric_od() {
        let text = "Widget,stem,big,10.0,4.0,none\n";
        let err = Catalog::parse(text).unwrap_err();
        match err {
            CatalogError::NonNumeric { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "od_in");
                assert_eq!(value, "big");
            }
            other => panic!("expected NonNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let text = "\
Stem 1.5x5,stem,1.5,60.0,31.0,15/16-10 UN
stem 1.5X5,stem,1.5,60.0,31.0,15/16-10 UN
";
        let err = Catalog::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { row: 2, .. }));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            Catalog::parse("name,category,od_in,length_in,weight_lb,connection\n"),
            Err(CatalogError::Empty)
        ));
    }
}
