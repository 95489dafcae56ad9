//! Wirescope: Slickline Survey Intelligence
//!
//! Interpretation and job-planning toolkit for slickline/wireline operations.
//!
//! ## Architecture
//!
//! - **Survey**: gradient-survey fluid-contact detection, CSV ingestion,
//!   directional MD-to-TVD conversion (minimum curvature)
//! - **Mechanics**: spool capacity, wire weight/stretch, safe working pull
//! - **Tool String**: CSV-backed parts catalog and assembly arithmetic
//! - **Report**: text, JSON, and CSV rendering of every computed table

pub mod config;
pub mod mechanics;
pub mod report;
pub mod survey;
pub mod toolstring;
pub mod types;

// Re-export job configuration
pub use config::JobConfig;

// Re-export the interpretation core
pub use survey::{classify_gradient, FluidContactDetector, SurveyError, MIN_SPLIT_POINTS};

// Re-export commonly used types
pub use types::{
    DirectionalStation, FitDiagnostics, FluidContact, FluidKind, GradientAnalysis, LinearFit,
    PathPoint, SegmentSide, SplitResult, SurveyKind, SurveyPoint,
};

// Re-export tool string assembly
pub use toolstring::{Catalog, CatalogError, ToolString};
