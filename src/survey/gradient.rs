//! Fluid-Contact Detection
//!
//! Locates a fluid interface (gas/oil/water) in a pressure-vs-depth survey by
//! exhaustive two-segment piecewise-linear least-squares fitting. The split
//! index minimizing the summed per-segment RMS residual defines two trendlines;
//! their crossing point is the fluid contact, and each segment is classified
//! by gradient magnitude.
//!
//! ## Key behaviors
//! - Exhaustive O(N²) split search over `[5, N-5)`; survey station counts are
//!   small (tens to low hundreds), so no incremental updates or early exit
//! - First minimum wins on residual ties (strict `<` while scanning upward)
//! - Parallel best-fit slopes (exact equality) yield no contact, a reportable
//!   outcome, not an error
//! - N < 11 yields no split; the caller shows raw data without trendlines

use crate::types::{
    gradient_bands, FluidContact, FluidKind, GradientAnalysis, LinearFit, SplitResult, SurveyPoint,
};
use tracing::debug;

/// Stations required on each side of a candidate split.
const SPLIT_MARGIN: usize = 5;

/// Minimum survey length for the split search to have a nonempty candidate
/// range `[SPLIT_MARGIN, n - SPLIT_MARGIN)`.
pub const MIN_SPLIT_POINTS: usize = 2 * SPLIT_MARGIN + 1;

/// Two-segment trendline detector for gradient surveys.
///
/// Pure synchronous computation over in-memory slices: no I/O, no shared
/// state, safe to call repeatedly and from multiple threads as long as each
/// call owns its buffers.
pub struct FluidContactDetector;

impl FluidContactDetector {
    /// Interpret a full survey: sort, split, derive the contact, attach
    /// per-segment fit diagnostics.
    ///
    /// Stations may arrive in any order; they are re-sorted by descending
    /// depth internally because the split coordinate is an index into that
    /// ordering and fits must cover physically contiguous depth ranges.
    pub fn analyze(points: &[SurveyPoint]) -> GradientAnalysis {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| {
            b.depth
                .partial_cmp(&a.depth)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let depths: Vec<f64> = sorted.iter().map(|p| p.depth).collect();
        let pressures: Vec<f64> = sorted.iter().map(|p| p.pressure).collect();

        let split = Self::find_best_split(&depths, &pressures);
        let contact = split.as_ref().and_then(Self::compute_fluid_contact);

        let (upper_quality, lower_quality) = match &split {
            Some(s) => {
                let i = s.split_index;
                (
                    super::quality::segment_diagnostics(&s.fit_above, &depths[..i], &pressures[..i]),
                    super::quality::segment_diagnostics(&s.fit_below, &depths[i..], &pressures[i..]),
                )
            }
            None => (None, None),
        };

        if let Some(s) = &split {
            debug!(
                split_index = s.split_index,
                total_residual = s.total_residual,
                contact_found = contact.is_some(),
                "gradient survey analyzed"
            );
        } else {
            debug!(
                stations = points.len(),
                "survey too short for trendline split"
            );
        }

        GradientAnalysis {
            station_count: points.len(),
            split,
            contact,
            upper_quality,
            lower_quality,
        }
    }

    /// Find the two-segment partition minimizing total RMS residual.
    ///
    /// For every candidate split index `i` in `[5, n-5)`, fits a line to each
    /// side and sums the two per-segment RMS residuals. The full candidate
    /// range is always scanned; the first strict minimum wins.
    ///
    /// # Returns
    /// `None` when fewer than [`MIN_SPLIT_POINTS`] stations are supplied or
    /// the slices differ in length. Insufficient data, not an error.
    pub fn find_best_split(depths: &[f64], pressures: &[f64]) -> Option<SplitResult> {
        let n = depths.len();
        if n < MIN_SPLIT_POINTS || n != pressures.len() {
            return None;
        }

        let mut best: Option<SplitResult> = None;

        for i in SPLIT_MARGIN..(n - SPLIT_MARGIN) {
            let fit_above = Self::fit_line(&depths[..i], &pressures[..i]);
            let fit_below = Self::fit_line(&depths[i..], &pressures[i..]);

            let total_residual = Self::rms_residual(&fit_above, &depths[..i], &pressures[..i])
                + Self::rms_residual(&fit_below, &depths[i..], &pressures[i..]);

            let improved = best
                .as_ref()
                .map_or(true, |b| total_residual < b.total_residual);
            if improved {
                best = Some(SplitResult {
                    split_index: i,
                    fit_above,
                    fit_below,
                    total_residual,
                });
            }
        }

        best
    }

    /// Derive the fluid interface from a chosen split.
    ///
    /// Solves the 2x2 system for the intersection of the two fitted lines.
    /// Slopes are compared with exact equality: parallel best fits have no
    /// finite intersection and the caller reports "no fluid contact found"
    /// rather than a failure.
    pub fn compute_fluid_contact(split: &SplitResult) -> Option<FluidContact> {
        let (m1, c1) = (split.fit_above.slope, split.fit_above.intercept);
        let (m2, c2) = (split.fit_below.slope, split.fit_below.intercept);

        if m1 == m2 {
            return None;
        }

        let depth = (c2 - c1) / (m1 - m2);
        let pressure = m1 * depth + c1;

        Some(FluidContact {
            depth,
            pressure,
            upper_fit: split.fit_above,
            lower_fit: split.fit_below,
            upper_label: classify_gradient(split.fit_above.slope),
            lower_label: classify_gradient(split.fit_below.slope),
        })
    }

    /// Ordinary least-squares degree-1 fit.
    fn fit_line(x: &[f64], y: &[f64]) -> LinearFit {
        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
        let sum_x2: f64 = x.iter().map(|a| a * a).sum();

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            // Every station at one depth: flat line through the mean pressure
            return LinearFit {
                slope: 0.0,
                intercept: sum_y / n,
            };
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        LinearFit { slope, intercept }
    }

    /// Root-mean-square residual of a fit against its own sub-range.
    fn rms_residual(fit: &LinearFit, x: &[f64], y: &[f64]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(xi, yi)| {
                let r = yi - fit.predict(*xi);
                r * r
            })
            .sum();
        (sum_sq / x.len() as f64).sqrt()
    }
}

/// Classify a pressure gradient by magnitude.
///
/// Band edges are inclusive on both ends; gradients in the gaps between bands
/// (and above the water band) classify as Unknown. The banding is fixed
/// domain knowledge: typical gas/oil/water column gradients in psi/ft.
pub fn classify_gradient(slope: f64) -> FluidKind {
    let g = slope.abs();
    if g <= gradient_bands::GAS_MAX {
        FluidKind::Gas
    } else if (gradient_bands::OIL_MIN..=gradient_bands::OIL_MAX).contains(&g) {
        FluidKind::Oil
    } else if (gradient_bands::WATER_MIN..=gradient_bands::WATER_MAX).contains(&g) {
        FluidKind::Water
    } else {
        FluidKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-fluid synthetic survey: gas gradient above the contact, water
    /// below, continuous at the contact depth.
    fn two_fluid_survey(
        contact_depth: f64,
        max_depth: f64,
        spacing: f64,
        gas_slope: f64,
        water_slope: f64,
        surface_pressure: f64,
    ) -> Vec<SurveyPoint> {
        let water_intercept =
            surface_pressure + gas_slope * contact_depth - water_slope * contact_depth;
        let mut points = Vec::new();
        let mut depth = 0.0;
        while depth <= max_depth + 1e-9 {
            let pressure = if depth <= contact_depth {
                surface_pressure + gas_slope * depth
            } else {
                water_intercept + water_slope * depth
            };
            points.push(SurveyPoint { depth, pressure });
            depth += spacing;
        }
        points
    }

    #[test]
    fn test_classification_band_edges() {
        assert_eq!(classify_gradient(0.10), FluidKind::Gas);
        assert_eq!(classify_gradient(0.269), FluidKind::Unknown);
        assert_eq!(classify_gradient(0.27), FluidKind::Oil);
        assert_eq!(classify_gradient(0.32), FluidKind::Oil);
        assert_eq!(classify_gradient(0.33), FluidKind::Unknown);
        assert_eq!(classify_gradient(0.40), FluidKind::Water);
        assert_eq!(classify_gradient(0.46), FluidKind::Water);
        assert_eq!(classify_gradient(0.47), FluidKind::Unknown);
    }

    #[test]
    fn test_classification_uses_magnitude() {
        // Descending-depth fits can carry either sign for the same column
        assert_eq!(classify_gradient(-0.433), FluidKind::Water);
        assert_eq!(classify_gradient(-0.05), FluidKind::Gas);
        assert_eq!(classify_gradient(0.0), FluidKind::Gas);
    }

    #[test]
    fn test_too_few_stations_returns_none() {
        let depths: Vec<f64> = (0..10).map(|i| i as f64 * 100.0).collect();
        let pressures: Vec<f64> = depths.iter().map(|d| 0.433 * d + 14.7).collect();
        assert!(
            FluidContactDetector::find_best_split(&depths, &pressures).is_none(),
            "10 stations is below the 11-station minimum"
        );
    }

    #[test]
    fn test_eleven_stations_is_enough() {
        let depths: Vec<f64> = (0..11).map(|i| i as f64 * 100.0).collect();
        let pressures: Vec<f64> = depths.iter().map(|d| 0.433 * d + 14.7).collect();
        let split = FluidContactDetector::find_best_split(&depths, &pressures);
        assert!(split.is_some(), "11 stations gives exactly one candidate");
        let split = split.unwrap();
        assert_eq!(split.split_index, 5, "Only candidate in [5, 6)");
    }

    #[test]
    fn test_length_mismatch_returns_none() {
        let depths: Vec<f64> = (0..20).map(|i| i as f64 * 50.0).collect();
        let pressures: Vec<f64> = (0..19).map(|i| i as f64 * 20.0).collect();
        assert!(FluidContactDetector::find_best_split(&depths, &pressures).is_none());
    }

    #[test]
    fn test_split_index_stays_in_candidate_range() {
        // Noisy-ish but deterministic data: the chosen index must respect the
        // 5-station margins regardless of shape
        let depths: Vec<f64> = (0..40).map(|i| 4000.0 - i as f64 * 100.0).collect();
        let pressures: Vec<f64> = depths
            .iter()
            .enumerate()
            .map(|(i, d)| 0.3 * d + 20.0 * ((i as f64) * 0.7).sin())
            .collect();
        let split = FluidContactDetector::find_best_split(&depths, &pressures)
            .expect("40 stations is plenty");
        assert!(split.split_index >= 5);
        assert!(split.split_index < 40 - 5);
        assert!(split.total_residual >= 0.0);
    }

    #[test]
    fn test_determinism() {
        let points = two_fluid_survey(5000.0, 10000.0, 250.0, 0.08, 0.44, 200.0);
        let first = FluidContactDetector::analyze(&points);
        let second = FluidContactDetector::analyze(&points);
        assert_eq!(first.split, second.split);
        assert_eq!(first.contact, second.contact);
    }

    #[test]
    fn test_perfect_two_line_data_recovers_generators() {
        // pressure = 0.10*depth + 5 above 500 ft, 0.433*depth + c below,
        // continuous at 500 ft; stations every 25 ft from 0 to 1000
        let points = two_fluid_survey(500.0, 1000.0, 25.0, 0.10, 0.433, 5.0);
        assert_eq!(points.len(), 41);

        let analysis = FluidContactDetector::analyze(&points);
        let split = analysis.split.expect("41 stations must produce a split");

        // Descending sort puts the deepest (water) stations first: depth 500
        // sits on both generator lines, so the perfect boundary lands within
        // a station of index 20
        assert!(
            (19..=22).contains(&split.split_index),
            "split_index {} should land at the 500 ft boundary",
            split.split_index
        );
        assert!(
            (split.fit_above.slope - 0.433).abs() < 1e-6,
            "deep-side slope {} should match the water generator",
            split.fit_above.slope
        );
        assert!(
            (split.fit_below.slope - 0.10).abs() < 1e-6,
            "shallow-side slope {} should match the gas generator",
            split.fit_below.slope
        );
        assert!(split.total_residual < 1e-6);
    }

    #[test]
    fn test_contact_point_satisfies_both_lines() {
        let points = two_fluid_survey(500.0, 1000.0, 25.0, 0.10, 0.433, 5.0);
        let analysis = FluidContactDetector::analyze(&points);
        let contact = analysis.contact.expect("distinct slopes must intersect");

        assert!(
            (contact.depth - 500.0).abs() < 1.0,
            "contact depth {} should sit at the generator boundary",
            contact.depth
        );
        let expected_pressure = 0.10 * 500.0 + 5.0;
        assert!((contact.pressure - expected_pressure).abs() < 0.5);

        // Both fitted lines must agree at the returned point
        let upper_p = contact.upper_fit.predict(contact.depth);
        let lower_p = contact.lower_fit.predict(contact.depth);
        assert!((upper_p - contact.pressure).abs() < 1e-6);
        assert!((lower_p - contact.pressure).abs() < 1e-6);

        // Deep side is water, shallow side is gas
        assert_eq!(contact.upper_label, FluidKind::Water);
        assert_eq!(contact.lower_label, FluidKind::Gas);
    }

    #[test]
    fn test_parallel_slopes_yield_no_contact() {
        let split = SplitResult {
            split_index: 12,
            fit_above: LinearFit {
                slope: 0.433,
                intercept: 100.0,
            },
            fit_below: LinearFit {
                slope: 0.433,
                intercept: 250.0,
            },
            total_residual: 1.25,
        };
        assert!(
            FluidContactDetector::compute_fluid_contact(&split).is_none(),
            "Identical slopes have no finite intersection"
        );
    }

    #[test]
    fn test_residual_minimality_against_brute_force() {
        // Independent recomputation of every candidate residual; the detector
        // must never return a beatable split
        let points = two_fluid_survey(2000.0, 4000.0, 100.0, 0.09, 0.45, 150.0);
        let mut sorted = points.clone();
        sorted.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap());
        let depths: Vec<f64> = sorted.iter().map(|p| p.depth).collect();
        let pressures: Vec<f64> = sorted.iter().map(|p| p.pressure).collect();

        let chosen = FluidContactDetector::find_best_split(&depths, &pressures).unwrap();

        let n = depths.len();
        for i in 5..(n - 5) {
            let fa = naive_fit(&depths[..i], &pressures[..i]);
            let fb = naive_fit(&depths[i..], &pressures[i..]);
            let total = naive_rms(&fa, &depths[..i], &pressures[..i])
                + naive_rms(&fb, &depths[i..], &pressures[i..]);
            assert!(
                chosen.total_residual <= total + 1e-12,
                "candidate {} beats the chosen split ({} < {})",
                i,
                total,
                chosen.total_residual
            );
        }
    }

    #[test]
    fn test_first_minimum_wins_on_flat_data() {
        // A single perfect line: every candidate has ~zero residual, so the
        // strict-< scan must keep the earliest index
        let depths: Vec<f64> = (0..30).map(|i| 3000.0 - i as f64 * 100.0).collect();
        let pressures: Vec<f64> = depths.iter().map(|d| 0.433 * d + 14.7).collect();
        let split = FluidContactDetector::find_best_split(&depths, &pressures).unwrap();
        assert_eq!(
            split.split_index, 5,
            "ties resolve to the first candidate scanned"
        );
    }

    // Naive reference implementations for the brute-force test

    fn naive_fit(x: &[f64], y: &[f64]) -> LinearFit {
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;
        let mut num = 0.0;
        let mut den = 0.0;
        for (xi, yi) in x.iter().zip(y.iter()) {
            num += (xi - mean_x) * (yi - mean_y);
            den += (xi - mean_x) * (xi - mean_x);
        }
        let slope = if den == 0.0 { 0.0 } else { num / den };
        LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }

    fn naive_rms(fit: &LinearFit, x: &[f64], y: &[f64]) -> f64 {
        let sum: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(xi, yi)| (yi - fit.predict(*xi)).powi(2))
            .sum();
        (sum / x.len() as f64).sqrt()
    }
}
