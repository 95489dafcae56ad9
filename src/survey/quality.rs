//! Goodness-of-fit diagnostics for fitted survey segments.
//!
//! Reports R² and a two-tailed slope p-value (Student's t-distribution via
//! statrs) for each trendline segment. Purely advisory: the detector never
//! consults these values when choosing a split or deriving the contact.

use crate::types::{FitDiagnostics, LinearFit};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Minimum stations for a meaningful p-value (n-2 degrees of freedom).
const MIN_DIAGNOSTIC_SAMPLES: usize = 3;

/// Compute diagnostics for one fitted segment.
///
/// # Returns
/// `None` when the segment is too short for a t-test, or the slices differ
/// in length.
pub fn segment_diagnostics(
    fit: &LinearFit,
    depths: &[f64],
    pressures: &[f64],
) -> Option<FitDiagnostics> {
    let n = depths.len();
    if n < MIN_DIAGNOSTIC_SAMPLES || n != pressures.len() {
        return None;
    }

    let r_squared = r_squared(fit, depths, pressures);
    // For a degree-1 fit, |r| = sqrt(R²); the slope sign carries r's sign but
    // the two-tailed test only needs the magnitude
    let r = r_squared.sqrt().min(1.0);
    let p_value = p_value_for_r(r, n);

    Some(FitDiagnostics {
        r_squared,
        p_value,
        sample_count: n,
    })
}

/// Coefficient of determination: 1 - SS_res / SS_tot.
///
/// A zero-variance pressure column is a degenerate segment: R² is 1.0 when
/// the fit reproduces it exactly and 0.0 otherwise.
fn r_squared(fit: &LinearFit, depths: &[f64], pressures: &[f64]) -> f64 {
    let n = pressures.len() as f64;
    let mean_p: f64 = pressures.iter().sum::<f64>() / n;

    let ss_tot: f64 = pressures.iter().map(|p| (p - mean_p).powi(2)).sum();
    let ss_res: f64 = depths
        .iter()
        .zip(pressures.iter())
        .map(|(d, p)| (p - fit.predict(*d)).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

/// Two-tailed p-value for a correlation magnitude via Student's t.
///
/// t = r * sqrt(n-2) / sqrt(1-r²), n-2 degrees of freedom.
fn p_value_for_r(r: f64, n: usize) -> f64 {
    if n < MIN_DIAGNOSTIC_SAMPLES {
        return 1.0;
    }

    // Near-perfect fits are maximally significant; avoids the 1-r² blowup
    if r >= 0.9999 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
        Err(_) => 1.0,
    }
}
