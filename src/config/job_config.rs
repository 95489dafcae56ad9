//! Job configuration - operator-tunable values as TOML
//!
//! Every struct implements `Default` with values matching the built-in
//! constants, so behavior is unchanged when no config file is present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Environment variable naming an explicit config path.
const CONFIG_ENV_VAR: &str = "WIRESCOPE_CONFIG";

/// Default config filename searched in the working directory.
const CONFIG_FILENAME: &str = "wirescope.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a wireline job.
///
/// Load with [`JobConfig::load`], which searches:
/// 1. `$WIRESCOPE_CONFIG` env var
/// 2. `./wirescope.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    /// Well / job identification (report headers)
    #[serde(default)]
    pub job: JobInfo,

    /// Wire size property table
    #[serde(default)]
    pub wire: WireTable,

    /// Safety derating factors
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Report formatting
    #[serde(default)]
    pub report: ReportConfig,
}

impl JobConfig {
    /// Load configuration using the documented search order.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_from(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILENAME);
        if local.exists() {
            return Self::load_from(local);
        }
        info!("no config file found, using built-in defaults");
        Self::default()
    }

    /// Load from an explicit path, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Self>(&text) {
                Ok(config) => {
                    info!(path = %path.display(), "job config loaded");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config parse failed, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config read failed, using defaults");
                Self::default()
            }
        }
    }

    /// Look up a wire size by name (e.g. "0.108").
    pub fn wire_size(&self, name: &str) -> Option<&WireSize> {
        let wanted = name.trim();
        self.wire
            .sizes
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(wanted))
    }

    /// Validate physical ranges, returning human-readable warnings.
    ///
    /// Warnings are advisory; the defaults stay in effect for the run.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.safety.wire_safety_factor < 1.0 {
            warnings.push(ConfigWarning {
                field: "safety.wire_safety_factor".to_string(),
                message: format!(
                    "safety factor {} is below 1.0; safe pull would exceed breaking strength",
                    self.safety.wire_safety_factor
                ),
            });
        }
        if self.safety.wire_safety_factor > 10.0 {
            warnings.push(ConfigWarning {
                field: "safety.wire_safety_factor".to_string(),
                message: format!(
                    "safety factor {} is unusually conservative (typical range 1.5-3)",
                    self.safety.wire_safety_factor
                ),
            });
        }

        for wire in &self.wire.sizes {
            if wire.diameter_in <= 0.0 || wire.diameter_in > 0.5 {
                warnings.push(ConfigWarning {
                    field: format!("wire.sizes.{}", wire.name),
                    message: format!(
                        "diameter {} in is outside the plausible slickline range",
                        wire.diameter_in
                    ),
                });
            }
            if wire.weight_lb_per_kft <= 0.0 {
                warnings.push(ConfigWarning {
                    field: format!("wire.sizes.{}", wire.name),
                    message: "weight per 1000 ft must be positive".to_string(),
                });
            }
            if wire.breaking_strength_lbf <= 0.0 {
                warnings.push(ConfigWarning {
                    field: format!("wire.sizes.{}", wire.name),
                    message: "breaking strength must be positive".to_string(),
                });
            }
        }

        if self.report.depth_decimals > 4 || self.report.pressure_decimals > 4 {
            warnings.push(ConfigWarning {
                field: "report".to_string(),
                message: "more than 4 decimals exceeds gauge resolution".to_string(),
            });
        }

        warnings
    }
}

/// One advisory validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
}

// ============================================================================
// Sections
// ============================================================================

/// Well / job identification, echoed in report headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobInfo {
    #[serde(default)]
    pub well: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub company: String,
}

/// Wire size property table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTable {
    #[serde(default = "default_wire_sizes")]
    pub sizes: Vec<WireSize>,
}

impl Default for WireTable {
    fn default() -> Self {
        Self {
            sizes: default_wire_sizes(),
        }
    }
}

/// Properties of one slickline wire size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSize {
    /// Size name as written on the drum tag, e.g. "0.108"
    pub name: String,
    /// Diameter (inches)
    pub diameter_in: f64,
    /// Weight in air (lb per 1000 ft)
    pub weight_lb_per_kft: f64,
    /// New-wire breaking strength (lbf)
    pub breaking_strength_lbf: f64,
}

/// Standard bright carbon-steel slickline sizes.
fn default_wire_sizes() -> Vec<WireSize> {
    vec![
        WireSize {
            name: "0.092".to_string(),
            diameter_in: 0.092,
            weight_lb_per_kft: 22.6,
            breaking_strength_lbf: 1595.0,
        },
        WireSize {
            name: "0.108".to_string(),
            diameter_in: 0.108,
            weight_lb_per_kft: 31.1,
            breaking_strength_lbf: 2200.0,
        },
        WireSize {
            name: "0.125".to_string(),
            diameter_in: 0.125,
            weight_lb_per_kft: 41.7,
            breaking_strength_lbf: 2945.0,
        },
        WireSize {
            name: "0.140".to_string(),
            diameter_in: 0.140,
            weight_lb_per_kft: 52.3,
            breaking_strength_lbf: 3695.0,
        },
        WireSize {
            name: "0.160".to_string(),
            diameter_in: 0.160,
            weight_lb_per_kft: 68.3,
            breaking_strength_lbf: 4825.0,
        },
    ]
}

/// Safety derating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Breaking strength divisor for safe working pull
    #[serde(default = "default_safety_factor")]
    pub wire_safety_factor: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            wire_safety_factor: default_safety_factor(),
        }
    }
}

fn default_safety_factor() -> f64 {
    2.0
}

/// Report formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for depths (ft)
    #[serde(default = "default_depth_decimals")]
    pub depth_decimals: usize,
    /// Decimal places for pressures (psi)
    #[serde(default = "default_pressure_decimals")]
    pub pressure_decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            depth_decimals: default_depth_decimals(),
            pressure_decimals: default_pressure_decimals(),
        }
    }
}

fn default_depth_decimals() -> usize {
    1
}

fn default_pressure_decimals() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_standard_wire_sizes() {
        let config = JobConfig::default();
        assert_eq!(config.wire.sizes.len(), 5);
        let w = config.wire_size("0.108").expect("standard size present");
        assert!((w.diameter_in - 0.108).abs() < 1e-12);
        assert!((w.weight_lb_per_kft - 31.1).abs() < 1e-12);
    }

    #[test]
    fn test_default_config_validates_clean() {
        assert!(JobConfig::default().validate().is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: JobConfig = toml::from_str(
            r#"
[job]
well = "Endurance-3"
field = "Gulf of Mexico"

[safety]
wire_safety_factor = 2.5
"#,
        )
        .unwrap();
        assert_eq!(config.job.well, "Endurance-3");
        assert!((config.safety.wire_safety_factor - 2.5).abs() < 1e-12);
        // Unspecified sections keep their defaults
        assert_eq!(config.wire.sizes.len(), 5);
        assert_eq!(config.report.pressure_decimals, 2);
    }

    #[test]
    fn test_low_safety_factor_warns() {
        let mut config = JobConfig::default();
        config.safety.wire_safety_factor = 0.8;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "safety.wire_safety_factor");
    }

    #[test]
    fn test_bad_wire_entry_warns() {
        let mut config = JobConfig::default();
        config.wire.sizes.push(WireSize {
            name: "bogus".to_string(),
            diameter_in: -0.1,
            weight_lb_per_kft: 10.0,
            breaking_strength_lbf: 100.0,
        });
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("bogus"));
    }

    #[test]
    fn test_wire_lookup_is_case_insensitive_and_trimmed() {
        let config = JobConfig::default();
        assert!(config.wire_size(" 0.125 ").is_some());
        assert!(config.wire_size("0.999").is_none());
    }
}
