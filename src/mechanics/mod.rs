//! Wireline mechanics calculators
//!
//! Rigging-up arithmetic for slickline jobs:
//! - Spool/drum wire capacity
//! - Wire weight in air and buoyed in wellbore fluid
//! - Elastic wire stretch under pull
//! - Safe working pull from breaking strength
//!
//! All functions guard non-physical inputs by returning 0.0 rather than
//! propagating errors; upstream CLI validation reports bad operator input
//! with context.

/// Drum capacity constant: pi / 12 converts cubic inches of wire stack to
/// feet of wire per squared wire diameter.
const CAPACITY_K_NUMERATOR: f64 = 0.2618;

/// Fresh-water-equivalent density of steel (ppg). Used for buoyancy factor.
const STEEL_DENSITY_PPG: f64 = 65.4;

/// Young's modulus of slickline steel (psi).
const WIRE_ELASTIC_MODULUS_PSI: f64 = 30_000_000.0;

// ============================================================================
// Spool Capacity
// ============================================================================

/// Wire capacity of a drum in feet.
///
/// Formula: L = (A + B) * A * C * K, K = 0.2618 / d²
///
/// Where:
/// - A = flange depth available for wire (inches)
/// - B = barrel (core) diameter (inches)
/// - C = drum width between flanges (inches)
/// - d = wire diameter (inches)
pub fn drum_capacity_ft(
    flange_depth_in: f64,
    barrel_diameter_in: f64,
    drum_width_in: f64,
    wire_diameter_in: f64,
) -> f64 {
    if flange_depth_in <= 0.0
        || barrel_diameter_in <= 0.0
        || drum_width_in <= 0.0
        || wire_diameter_in <= 0.0
    {
        return 0.0;
    }

    let k = CAPACITY_K_NUMERATOR / (wire_diameter_in * wire_diameter_in);
    (flange_depth_in + barrel_diameter_in) * flange_depth_in * drum_width_in * k
}

// ============================================================================
// Wire Weight
// ============================================================================

/// Weight of wire hanging in air (lb).
pub fn wire_weight_air_lb(length_ft: f64, weight_lb_per_kft: f64) -> f64 {
    if length_ft <= 0.0 || weight_lb_per_kft <= 0.0 {
        return 0.0;
    }
    length_ft * weight_lb_per_kft / 1000.0
}

/// Buoyancy factor for steel wire in wellbore fluid.
///
/// BF = 1 - fluid_density / steel_density, both in ppg. Air (density 0)
/// gives 1.0; fluids denser than steel clamp to 0.0.
pub fn buoyancy_factor(fluid_density_ppg: f64) -> f64 {
    if fluid_density_ppg <= 0.0 {
        return 1.0;
    }
    (1.0 - fluid_density_ppg / STEEL_DENSITY_PPG).max(0.0)
}

/// Buoyed weight of wire hanging in fluid (lb).
pub fn wire_weight_buoyed_lb(length_ft: f64, weight_lb_per_kft: f64, fluid_density_ppg: f64) -> f64 {
    wire_weight_air_lb(length_ft, weight_lb_per_kft) * buoyancy_factor(fluid_density_ppg)
}

// ============================================================================
// Stretch and Pull
// ============================================================================

/// Elastic wire stretch under pull (ft).
///
/// dL = F * L / (E * A), with F in lbf, L in ft, A = pi d² / 4 in in².
pub fn wire_stretch_ft(pull_lbf: f64, length_ft: f64, wire_diameter_in: f64) -> f64 {
    if pull_lbf <= 0.0 || length_ft <= 0.0 || wire_diameter_in <= 0.0 {
        return 0.0;
    }
    let area_in2 = std::f64::consts::PI * wire_diameter_in * wire_diameter_in / 4.0;
    pull_lbf * length_ft / (WIRE_ELASTIC_MODULUS_PSI * area_in2)
}

/// Maximum pull the operator should apply (lbf).
///
/// Breaking strength derated by the configured safety factor. A safety
/// factor below 1.0 is non-physical and yields 0.0.
pub fn safe_working_pull_lbf(breaking_strength_lbf: f64, safety_factor: f64) -> f64 {
    if breaking_strength_lbf <= 0.0 || safety_factor < 1.0 {
        return 0.0;
    }
    breaking_strength_lbf / safety_factor
}
