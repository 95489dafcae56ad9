//! Synthetic Gradient Survey Generator
//!
//! Produces a two-fluid pressure-vs-depth survey for exercising the
//! wirescope analyzer end-to-end: a shallow column at one gradient, a deep
//! column at another, continuous at the contact depth, with optional
//! Gaussian gauge noise.
//!
//! # Usage
//! ```bash
//! ./simulation --contact-depth 5000 --max-depth 10000 --noise 2.5 --seed 7 > sgs.csv
//! ./simulation | wirescope analyze --input /dev/stdin
//! ```

use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::io::{self, Write};
use std::path::PathBuf;

use wirescope::types::SurveyPoint;

// ============================================================================
// Survey Defaults
// ============================================================================

/// Default gas-column gradient (psi/ft)
const DEFAULT_TOP_GRADIENT: f64 = 0.08;
/// Default water-column gradient (psi/ft)
const DEFAULT_BOTTOM_GRADIENT: f64 = 0.44;
/// Default wellhead pressure (psi)
const DEFAULT_SURFACE_PRESSURE: f64 = 250.0;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "survey-simulation")]
#[command(about = "Synthetic gradient survey generator for wirescope testing")]
#[command(version)]
struct Args {
    /// Fluid contact depth (ft)
    #[arg(long, default_value = "5000.0")]
    contact_depth: f64,

    /// Deepest station (ft)
    #[arg(long, default_value = "10000.0")]
    max_depth: f64,

    /// Station spacing (ft)
    #[arg(long, default_value = "250.0")]
    spacing: f64,

    /// Gradient above the contact (psi/ft)
    #[arg(long, default_value_t = DEFAULT_TOP_GRADIENT)]
    top_gradient: f64,

    /// Gradient below the contact (psi/ft)
    #[arg(long, default_value_t = DEFAULT_BOTTOM_GRADIENT)]
    bottom_gradient: f64,

    /// Wellhead pressure (psi)
    #[arg(long, default_value_t = DEFAULT_SURFACE_PRESSURE)]
    surface_pressure: f64,

    /// Gauge noise standard deviation (psi); 0 disables noise
    #[arg(long, default_value = "0.0")]
    noise: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.max_depth <= 0.0 || args.spacing <= 0.0 {
        anyhow::bail!("max depth and spacing must be positive");
    }
    if args.contact_depth <= 0.0 || args.contact_depth >= args.max_depth {
        anyhow::bail!(
            "contact depth {} must sit inside the surveyed interval (0, {})",
            args.contact_depth,
            args.max_depth
        );
    }

    let points = generate_survey(&args);

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            write_survey_csv(&points, &mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_survey_csv(&points, &mut lock)?;
        }
    }

    Ok(())
}

/// Build the station list: continuous two-gradient column plus noise.
fn generate_survey(args: &Args) -> Vec<SurveyPoint> {
    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let noise = Normal::new(0.0, args.noise.max(0.0)).ok();

    // Intercept keeping the deep line continuous at the contact
    let bottom_intercept = args.surface_pressure + args.top_gradient * args.contact_depth
        - args.bottom_gradient * args.contact_depth;

    let mut points = Vec::new();
    let mut depth = 0.0;
    while depth <= args.max_depth + 1e-9 {
        let clean = if depth <= args.contact_depth {
            args.surface_pressure + args.top_gradient * depth
        } else {
            bottom_intercept + args.bottom_gradient * depth
        };
        let jitter = match (&noise, args.noise > 0.0) {
            (Some(n), true) => n.sample(&mut rng),
            _ => 0.0,
        };
        points.push(SurveyPoint {
            depth,
            pressure: clean + jitter,
        });
        depth += args.spacing;
    }
    points
}

/// Write stations in the analyzer's input format.
fn write_survey_csv<W: Write>(points: &[SurveyPoint], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "depth_ft,pressure_psi")?;
    for p in points {
        writeln!(writer, "{:.1},{:.3}", p.depth, p.pressure)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            contact_depth: 5000.0,
            max_depth: 10000.0,
            spacing: 250.0,
            top_gradient: DEFAULT_TOP_GRADIENT,
            bottom_gradient: DEFAULT_BOTTOM_GRADIENT,
            surface_pressure: DEFAULT_SURFACE_PRESSURE,
            noise: 0.0,
            seed: Some(42),
            output: None,
        }
    }

    #[test]
    fn test_generated_survey_is_continuous_at_contact() {
        let args = default_args();
        let points = generate_survey(&args);
        // Station exactly at the contact belongs to the shallow line; the
        // next one is one spacing into the deep column
        let at_contact = points
            .iter()
            .find(|p| (p.depth - 5000.0).abs() < 1e-9)
            .unwrap();
        let expected = 250.0 + 0.08 * 5000.0;
        assert!((at_contact.pressure - expected).abs() < 1e-9);

        let below = points
            .iter()
            .find(|p| (p.depth - 5250.0).abs() < 1e-9)
            .unwrap();
        assert!((below.pressure - (expected + 0.44 * 250.0)).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let mut args = default_args();
        args.noise = 3.0;
        let first = generate_survey(&args);
        let second = generate_survey(&args);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.pressure, b.pressure, "same seed must reproduce the survey");
        }
    }

    #[test]
    fn test_csv_output_shape() {
        let args = default_args();
        let points = generate_survey(&args);
        let mut buf = Vec::new();
        write_survey_csv(&points, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("depth_ft,pressure_psi\n"));
        assert_eq!(text.lines().count(), points.len() + 1);
    }
}
