//! Wirescope - Slickline Survey Intelligence
//!
//! Gradient-survey interpretation and wireline job planning from the command
//! line.
//!
//! # Usage
//!
//! ```bash
//! # Interpret a static gradient survey
//! wirescope analyze --input sgs.csv
//!
//! # Same survey as JSON for downstream tooling
//! wirescope analyze --input sgs.csv --format json
//!
//! # Directional survey to TVD table
//! wirescope tvd --input deviation.csv --output path.csv
//!
//! # Rig-up arithmetic
//! wirescope capacity --flange-depth 4 --barrel-diameter 12 --width 20 --wire-size 0.108
//! wirescope wire --size 0.125 --length 15000 --fluid-density 8.6 --pull 500
//! wirescope toolstring --catalog parts.csv --parts "Rope Socket 1.5,Stem 1.5x5"
//! ```
//!
//! # Environment Variables
//!
//! - `WIRESCOPE_CONFIG`: Path to a job config TOML (default: ./wirescope.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use tracing::warn;

use wirescope::report;
use wirescope::survey::{ingest, tvd, FluidContactDetector};
use wirescope::toolstring::Catalog;
use wirescope::types::SurveyKind;
use wirescope::{config, mechanics, ToolString};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wirescope")]
#[command(about = "Slickline Survey Intelligence")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interpret a gradient survey: trendlines, fluid contact, classification
    Analyze {
        /// Survey CSV (depth_ft,pressure_psi; optional header row)
        #[arg(long, short)]
        input: PathBuf,

        /// Survey kind: static or flowing
        #[arg(long, default_value = "static")]
        kind: String,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Convert a directional survey to TVD via minimum curvature
    Tvd {
        /// Directional CSV (md_ft,inclination_deg,azimuth_deg)
        #[arg(long, short)]
        input: PathBuf,

        /// Output format: text or csv
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the table to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Spool wire capacity from drum dimensions
    Capacity {
        /// Flange depth available for wire (inches)
        #[arg(long)]
        flange_depth: f64,

        /// Drum barrel (core) diameter (inches)
        #[arg(long)]
        barrel_diameter: f64,

        /// Drum width between flanges (inches)
        #[arg(long)]
        width: f64,

        /// Wire size name from the config table, e.g. 0.108
        #[arg(long)]
        wire_size: String,
    },

    /// Wire weight, stretch, and safe pull for a run depth
    Wire {
        /// Wire size name from the config table, e.g. 0.125
        #[arg(long)]
        size: String,

        /// Wire length in the well (ft)
        #[arg(long)]
        length: f64,

        /// Wellbore fluid density (ppg); omit for a dry hole
        #[arg(long, default_value = "0.0")]
        fluid_density: f64,

        /// Surface pull applied for the stretch estimate (lbf)
        #[arg(long, default_value = "0.0")]
        pull: f64,
    },

    /// Assemble a tool string from a parts catalog and print the rig-up sheet
    Toolstring {
        /// Parts catalog CSV
        #[arg(long)]
        catalog: PathBuf,

        /// Comma-separated part names, top down
        #[arg(long)]
        parts: String,

        /// Minimum restriction ID the string must pass (inches)
        #[arg(long)]
        restriction: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let job_config = config::JobConfig::load();
    for warning in job_config.validate() {
        warn!(field = %warning.field, "{}", warning.message);
    }
    config::init(job_config);

    match args.command {
        Command::Analyze {
            input,
            kind,
            format,
            output,
        } => run_analyze(&input, &kind, &format, output.as_deref()),
        Command::Tvd {
            input,
            format,
            output,
        } => run_tvd(&input, &format, output.as_deref()),
        Command::Capacity {
            flange_depth,
            barrel_diameter,
            width,
            wire_size,
        } => run_capacity(flange_depth, barrel_diameter, width, &wire_size),
        Command::Wire {
            size,
            length,
            fluid_density,
            pull,
        } => run_wire(&size, length, fluid_density, pull),
        Command::Toolstring {
            catalog,
            parts,
            restriction,
        } => run_toolstring(&catalog, &parts, restriction),
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_analyze(
    input: &std::path::Path,
    kind: &str,
    format: &str,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let kind = parse_survey_kind(kind)?;
    let points = ingest::read_gradient_csv(input)
        .with_context(|| format!("reading gradient survey {}", input.display()))?;

    let analysis = FluidContactDetector::analyze(&points);
    let cfg = config::get();

    let rendered = match format {
        "text" => report::render_gradient_text(kind, &points, &analysis, cfg),
        "json" => report::GradientReport::new(kind, cfg, &analysis)
            .to_json()
            .context("serializing analysis to JSON")?,
        other => bail!("unknown format '{other}' (expected text or json)"),
    };

    emit(&rendered, output)
}

fn run_tvd(input: &std::path::Path, format: &str, output: Option<&std::path::Path>) -> Result<()> {
    let stations = ingest::read_directional_csv(input)
        .with_context(|| format!("reading directional survey {}", input.display()))?;
    let path = tvd::minimum_curvature(&stations);

    match format {
        "text" => emit(&report::render_tvd_text(&path, config::get()), output),
        "csv" => {
            let mut buf = Vec::new();
            report::write_tvd_csv(&path, &mut buf).context("rendering TVD CSV")?;
            emit(&String::from_utf8_lossy(&buf), output)
        }
        other => bail!("unknown format '{other}' (expected text or csv)"),
    }
}

fn run_capacity(flange_depth: f64, barrel_diameter: f64, width: f64, wire_size: &str) -> Result<()> {
    let cfg = config::get();
    let wire = cfg
        .wire_size(wire_size)
        .with_context(|| format!("wire size '{wire_size}' not in the config wire table"))?;

    let capacity =
        mechanics::drum_capacity_ft(flange_depth, barrel_diameter, width, wire.diameter_in);
    if capacity <= 0.0 {
        bail!("non-physical drum dimensions: all of flange depth, barrel diameter, and width must be positive");
    }

    println!(
        "Drum capacity for {} in wire: {:.0} ft",
        wire.name, capacity
    );
    Ok(())
}

fn run_wire(size: &str, length: f64, fluid_density: f64, pull: f64) -> Result<()> {
    if length <= 0.0 {
        bail!("wire length must be positive, got {length}");
    }
    let cfg = config::get();
    let wire = cfg
        .wire_size(size)
        .with_context(|| format!("wire size '{size}' not in the config wire table"))?;

    let air = mechanics::wire_weight_air_lb(length, wire.weight_lb_per_kft);
    let buoyed = mechanics::wire_weight_buoyed_lb(length, wire.weight_lb_per_kft, fluid_density);
    let safe_pull =
        mechanics::safe_working_pull_lbf(wire.breaking_strength_lbf, cfg.safety.wire_safety_factor);

    println!("Wire {} at {length:.0} ft:", wire.name);
    println!("  Weight in air:    {air:.1} lb");
    println!("  Buoyed weight:    {buoyed:.1} lb ({fluid_density:.1} ppg fluid)");
    println!(
        "  Safe pull:        {safe_pull:.0} lbf (breaking {:.0} lbf / factor {:.1})",
        wire.breaking_strength_lbf, cfg.safety.wire_safety_factor
    );
    if pull > 0.0 {
        let stretch = mechanics::wire_stretch_ft(pull, length, wire.diameter_in);
        println!("  Stretch at {pull:.0} lbf: {stretch:.2} ft");
        if pull > safe_pull {
            warn!(
                pull,
                safe_pull, "requested pull exceeds safe working pull for this wire"
            );
        }
    }
    Ok(())
}

fn run_toolstring(
    catalog_path: &std::path::Path,
    parts: &str,
    restriction: Option<f64>,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("loading parts catalog {}", catalog_path.display()))?;

    let mut toolstring = ToolString::new();
    for name in parts.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let part = catalog
            .find(name)
            .with_context(|| format!("part '{name}' not found in catalog"))?;
        toolstring.push(part.clone());
    }
    if toolstring.is_empty() {
        bail!("no parts selected");
    }

    print!(
        "{}",
        report::render_toolstring_text(&toolstring, config::get())
    );

    if let Some(id) = restriction {
        if toolstring.fits_restriction(id) {
            println!("Passes {id:.3} in restriction.");
        } else {
            println!(
                "DOES NOT PASS {id:.3} in restriction (max OD {:.3} in).",
                toolstring.max_od_in()
            );
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_survey_kind(kind: &str) -> Result<SurveyKind> {
    match kind.to_ascii_lowercase().as_str() {
        "static" | "sgs" => Ok(SurveyKind::Static),
        "flowing" | "fgs" => Ok(SurveyKind::Flowing),
        other => bail!("unknown survey kind '{other}' (expected static or flowing)"),
    }
}

fn emit(rendered: &str, output: Option<&std::path::Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            file.write_all(rendered.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?;
            Ok(())
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
