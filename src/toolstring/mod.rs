//! Tool-string assembly model
//!
//! A tool string is an ordered stack of downhole components (rope socket,
//! stem, jars, running/pulling tool, ...) made up from a parts catalog. This
//! module carries the assembly arithmetic the rig-up sheet needs: total
//! length, total weight, and maximum OD against the well's restriction.

pub mod catalog;

pub use catalog::{Catalog, CatalogError};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Component category, used for catalog grouping and rig-up sheet ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartCategory {
    RopeSocket,
    Stem,
    Jar,
    KnuckleJoint,
    RunningTool,
    PullingTool,
    Gauge,
    Centralizer,
    Other,
}

impl FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
            "ropesocket" => Ok(Self::RopeSocket),
            "stem" => Ok(Self::Stem),
            "jar" | "jars" => Ok(Self::Jar),
            "knucklejoint" => Ok(Self::KnuckleJoint),
            "runningtool" => Ok(Self::RunningTool),
            "pullingtool" => Ok(Self::PullingTool),
            "gauge" => Ok(Self::Gauge),
            "centralizer" => Ok(Self::Centralizer),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown part category '{other}'")),
        }
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RopeSocket => "Rope Socket",
            Self::Stem => "Stem",
            Self::Jar => "Jar",
            Self::KnuckleJoint => "Knuckle Joint",
            Self::RunningTool => "Running Tool",
            Self::PullingTool => "Pulling Tool",
            Self::Gauge => "Gauge",
            Self::Centralizer => "Centralizer",
            Self::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// One catalog component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub category: PartCategory,
    /// Outside diameter (inches)
    pub od_in: f64,
    /// Fishing-neck to bottom length (inches)
    pub length_in: f64,
    /// Weight (lb)
    pub weight_lb: f64,
    /// Thread connection, e.g. "15/16-10 UN"
    pub connection: String,
}

/// Ordered stack of parts, top down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolString {
    parts: Vec<Part>,
}

impl ToolString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part at the bottom of the string.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Total assembled length (inches).
    pub fn total_length_in(&self) -> f64 {
        self.parts.iter().map(|p| p.length_in).sum()
    }

    /// Total assembled length (feet).
    pub fn total_length_ft(&self) -> f64 {
        self.total_length_in() / 12.0
    }

    /// Total string weight (lb).
    pub fn total_weight_lb(&self) -> f64 {
        self.parts.iter().map(|p| p.weight_lb).sum()
    }

    /// Largest OD in the string (inches); 0.0 for an empty string.
    pub fn max_od_in(&self) -> f64 {
        self.parts.iter().map(|p| p.od_in).fold(0.0, f64::max)
    }

    /// Whether the string passes a minimum restriction ID.
    pub fn fits_restriction(&self, restriction_id_in: f64) -> bool {
        self.max_od_in() < restriction_id_in
    }
}
