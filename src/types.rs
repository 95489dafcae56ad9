//! Core data model for gradient-survey interpretation and job planning.
//!
//! Everything here is transient: computed fresh from a caller-supplied survey,
//! handed to the report layer, and discarded. Nothing is persisted or cached.

use serde::{Deserialize, Serialize};

// ============================================================================
// Gradient Classification Bands
// ============================================================================

/// Fluid-gradient classification bands (psi/ft).
///
/// These encode typical downhole fluid column gradients and are fixed domain
/// constants, not operator-tunable config. Band edges are inclusive on both
/// ends; the gaps between bands classify as [`FluidKind::Unknown`].
pub mod gradient_bands {
    /// Maximum |gradient| for a gas column (psi/ft)
    pub const GAS_MAX: f64 = 0.10;
    /// Minimum |gradient| for an oil column (psi/ft)
    pub const OIL_MIN: f64 = 0.27;
    /// Maximum |gradient| for an oil column (psi/ft)
    pub const OIL_MAX: f64 = 0.32;
    /// Minimum |gradient| for a water column (psi/ft)
    pub const WATER_MIN: f64 = 0.40;
    /// Maximum |gradient| for a water column (psi/ft)
    pub const WATER_MAX: f64 = 0.46;
}

// ============================================================================
// Gradient Survey Types
// ============================================================================

/// One pressure station from a static or flowing gradient survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    /// True vertical depth (ft, positive downward)
    pub depth: f64,
    /// Gauge pressure (psi)
    pub pressure: f64,
}

/// Whether the survey was taken shut-in or flowing.
///
/// The interpretation pipeline is identical for both; the kind is carried
/// through to the report header only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurveyKind {
    /// Static Gradient Survey (shut-in well)
    Static,
    /// Flowing Gradient Survey
    Flowing,
}

impl std::fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => write!(f, "Static Gradient Survey"),
            Self::Flowing => write!(f, "Flowing Gradient Survey"),
        }
    }
}

/// Degree-1 least-squares fit over a contiguous depth range:
/// `pressure = slope * depth + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Pressure gradient (psi/ft)
    pub slope: f64,
    /// Surface intercept (psi at zero depth)
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at a depth.
    pub fn predict(&self, depth: f64) -> f64 {
        self.slope * depth + self.intercept
    }
}

/// Fluid type inferred from the magnitude of a pressure gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluidKind {
    Gas,
    Oil,
    Water,
    /// Gradient falls outside all known fluid bands
    Unknown,
}

impl std::fmt::Display for FluidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gas => write!(f, "Gas"),
            Self::Oil => write!(f, "Oil"),
            Self::Water => write!(f, "Water"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Best two-segment partition of a survey and its associated fits.
///
/// `split_index` is an index into the survey after the detector's internal
/// descending-depth sort: `fit_above` covers stations `[0, split_index)` and
/// `fit_below` covers `[split_index, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    /// Partition point in the descending-depth station ordering
    pub split_index: usize,
    /// Fit over stations before the split
    pub fit_above: LinearFit,
    /// Fit over stations from the split onward
    pub fit_below: LinearFit,
    /// Sum of the two per-segment RMS residuals (psi); always >= 0
    pub total_residual: f64,
}

/// Which side of a fluid contact a segment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentSide {
    Upper,
    Lower,
}

/// Derived fluid interface: the crossing point of the two segment fits,
/// plus a fluid classification for each segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidContact {
    /// Interface depth (ft)
    pub depth: f64,
    /// Pressure at the interface (psi)
    pub pressure: f64,
    /// Fit over the upper portion of the split
    pub upper_fit: LinearFit,
    /// Fit over the lower portion of the split
    pub lower_fit: LinearFit,
    /// Fluid classification of the upper segment
    pub upper_label: FluidKind,
    /// Fluid classification of the lower segment
    pub lower_label: FluidKind,
}

impl FluidContact {
    /// Which segment carries the steeper (higher |gradient|) fit.
    ///
    /// On an exact |slope| tie the lower segment is deemed steeper. The
    /// tie-break is deliberate and tested; callers relying on the
    /// steeper/flatter distinction get a deterministic answer.
    pub fn steeper_side(&self) -> SegmentSide {
        if self.upper_fit.slope.abs() > self.lower_fit.slope.abs() {
            SegmentSide::Upper
        } else {
            SegmentSide::Lower
        }
    }
}

/// Goodness-of-fit diagnostics for one fitted segment.
///
/// Advisory output only: diagnostics never influence split selection,
/// contact computation, or fluid classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Coefficient of determination (0..1)
    pub r_squared: f64,
    /// Two-tailed p-value of the slope (Student's t, n-2 dof)
    pub p_value: f64,
    /// Stations in the segment
    pub sample_count: usize,
}

/// Complete result of interpreting one gradient survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientAnalysis {
    /// Stations supplied by the caller
    pub station_count: usize,
    /// Best two-segment split, when the survey is long enough (>= 11 stations)
    pub split: Option<SplitResult>,
    /// Fluid interface, when the two fitted slopes differ
    pub contact: Option<FluidContact>,
    /// Diagnostics for the upper segment fit
    pub upper_quality: Option<FitDiagnostics>,
    /// Diagnostics for the lower segment fit
    pub lower_quality: Option<FitDiagnostics>,
}

// ============================================================================
// Directional Survey Types
// ============================================================================

/// One station from a directional (deviation) survey.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalStation {
    /// Measured depth along the wellbore (ft)
    pub md: f64,
    /// Inclination from vertical (degrees, 0-180)
    pub inclination: f64,
    /// Azimuth from north (degrees, 0-360)
    pub azimuth: f64,
}

/// Computed wellbore position at one survey station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Measured depth (ft)
    pub md: f64,
    /// True vertical depth (ft)
    pub tvd: f64,
    /// Northing displacement from the first station (ft)
    pub northing: f64,
    /// Easting displacement from the first station (ft)
    pub easting: f64,
    /// Dogleg severity over the incoming course (degrees per 100 ft)
    pub dls: f64,
}
