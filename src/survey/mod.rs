//! Survey interpretation: gradient-survey fluid-contact detection, CSV
//! ingestion and validation, and directional MD-to-TVD conversion.

pub mod gradient;
pub mod ingest;
pub mod quality;
pub mod tvd;

pub use gradient::{classify_gradient, FluidContactDetector, MIN_SPLIT_POINTS};
pub use ingest::SurveyError;
