//! Report rendering: fixed-width text for the field engineer, JSON for
//! downstream tooling, CSV for spreadsheets.
//!
//! Degenerate analysis outcomes render as plain statements, never failures:
//! a short survey reports "insufficient stations for trendline analysis" and
//! parallel best fits report "no fluid contact determinable".

use crate::config::JobConfig;
use crate::types::{
    GradientAnalysis, PathPoint, SegmentSide, SurveyKind, SurveyPoint,
};
use crate::toolstring::ToolString;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};

/// JSON envelope for a gradient analysis.
#[derive(Debug, Serialize)]
pub struct GradientReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub survey_kind: SurveyKind,
    pub well: &'a str,
    pub field: &'a str,
    pub company: &'a str,
    pub analysis: &'a GradientAnalysis,
}

impl<'a> GradientReport<'a> {
    pub fn new(kind: SurveyKind, config: &'a JobConfig, analysis: &'a GradientAnalysis) -> Self {
        Self {
            generated_at: Utc::now(),
            survey_kind: kind,
            well: &config.job.well,
            field: &config.job.field,
            company: &config.job.company,
            analysis,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Gradient Survey Text Report
// ============================================================================

/// Render the full interpretation as a fixed-width text report.
pub fn render_gradient_text(
    kind: SurveyKind,
    points: &[SurveyPoint],
    analysis: &GradientAnalysis,
    config: &JobConfig,
) -> String {
    let dd = config.report.depth_decimals;
    let pd = config.report.pressure_decimals;
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "{kind}");
    if !config.job.well.is_empty() {
        let _ = writeln!(out, "Well:    {}", config.job.well);
    }
    if !config.job.field.is_empty() {
        let _ = writeln!(out, "Field:   {}", config.job.field);
    }
    if !config.job.company.is_empty() {
        let _ = writeln!(out, "Company: {}", config.job.company);
    }
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out);

    // Station table, deepest first to match the interpretation ordering
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        b.depth
            .partial_cmp(&a.depth)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let _ = writeln!(out, "{:>12}  {:>14}", "Depth (ft)", "Pressure (psi)");
    let _ = writeln!(out, "{:>12}  {:>14}", "----------", "--------------");
    for p in &sorted {
        let _ = writeln!(out, "{:>12.dd$}  {:>14.pd$}", p.depth, p.pressure);
    }
    let _ = writeln!(out);

    let Some(split) = &analysis.split else {
        let _ = writeln!(
            out,
            "Insufficient stations for trendline analysis ({} supplied, {} required).",
            analysis.station_count,
            crate::survey::MIN_SPLIT_POINTS
        );
        let _ = writeln!(out, "Raw survey data shown without trendline overlay.");
        return out;
    };

    let _ = writeln!(out, "Trendline Decomposition");
    let _ = writeln!(out, "-----------------------");
    let _ = writeln!(
        out,
        "Split at station {} of {} (deepest-first ordering)",
        split.split_index, analysis.station_count
    );
    let _ = writeln!(
        out,
        "Combined RMS residual: {:.4} psi",
        split.total_residual
    );
    let _ = writeln!(out);

    let upper_kind = crate::survey::classify_gradient(split.fit_above.slope);
    let lower_kind = crate::survey::classify_gradient(split.fit_below.slope);

    let _ = writeln!(
        out,
        "  Deep segment:    {:+.4} psi/ft  ({})",
        split.fit_above.slope, upper_kind
    );
    if let Some(q) = &analysis.upper_quality {
        let _ = writeln!(
            out,
            "                   R² = {:.4}, p = {:.4}, n = {}",
            q.r_squared, q.p_value, q.sample_count
        );
    }
    let _ = writeln!(
        out,
        "  Shallow segment: {:+.4} psi/ft  ({})",
        split.fit_below.slope, lower_kind
    );
    if let Some(q) = &analysis.lower_quality {
        let _ = writeln!(
            out,
            "                   R² = {:.4}, p = {:.4}, n = {}",
            q.r_squared, q.p_value, q.sample_count
        );
    }
    let _ = writeln!(out);

    match &analysis.contact {
        Some(contact) => {
            let _ = writeln!(out, "Fluid Contact");
            let _ = writeln!(out, "-------------");
            let _ = writeln!(out, "  Depth:    {:.dd$} ft", contact.depth);
            let _ = writeln!(out, "  Pressure: {:.pd$} psi", contact.pressure);
            let _ = writeln!(
                out,
                "  Interface: {} over {}",
                contact.lower_label, contact.upper_label
            );
            let steeper = match contact.steeper_side() {
                SegmentSide::Upper => "deep",
                SegmentSide::Lower => "shallow",
            };
            let _ = writeln!(out, "  Steeper gradient on the {steeper} segment");
        }
        None => {
            let _ = writeln!(
                out,
                "No fluid contact determinable: the two trendlines are parallel."
            );
            let _ = writeln!(out, "Both trendlines shown without an interface marker.");
        }
    }

    out
}

// ============================================================================
// TVD Report
// ============================================================================

/// Render a computed wellbore path as a fixed-width table.
pub fn render_tvd_text(path: &[PathPoint], config: &JobConfig) -> String {
    let dd = config.report.depth_decimals;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>12} {:>12} {:>12} {:>12} {:>12}",
        "MD (ft)", "TVD (ft)", "North (ft)", "East (ft)", "DLS (°/100)"
    );
    let _ = writeln!(out, "{}", "-".repeat(64));
    for p in path {
        let _ = writeln!(
            out,
            "{:>12.dd$} {:>12.dd$} {:>12.1} {:>12.1} {:>12.2}",
            p.md, p.tvd, p.northing, p.easting, p.dls
        );
    }
    out
}

/// Write a computed wellbore path as CSV.
pub fn write_tvd_csv<W: Write>(path: &[PathPoint], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "md_ft,tvd_ft,northing_ft,easting_ft,dls_deg_per_100ft")?;
    for p in path {
        writeln!(
            writer,
            "{:.3},{:.3},{:.3},{:.3},{:.3}",
            p.md, p.tvd, p.northing, p.easting, p.dls
        )?;
    }
    Ok(())
}

// ============================================================================
// Tool String Report
// ============================================================================

/// Render a rig-up sheet for an assembled tool string.
pub fn render_toolstring_text(toolstring: &ToolString, config: &JobConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Tool String Rig-Up Sheet");
    if !config.job.well.is_empty() {
        let _ = writeln!(out, "Well: {}", config.job.well);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<28} {:<14} {:>8} {:>10} {:>10}",
        "Part", "Category", "OD (in)", "Len (in)", "Wt (lb)"
    );
    let _ = writeln!(out, "{}", "-".repeat(74));
    for p in toolstring.parts() {
        let _ = writeln!(
            out,
            "{:<28} {:<14} {:>8.3} {:>10.1} {:>10.1}",
            p.name,
            p.category.to_string(),
            p.od_in,
            p.length_in,
            p.weight_lb
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(74));
    let _ = writeln!(
        out,
        "{:<28} {:<14} {:>8.3} {:>10.1} {:>10.1}",
        format!("TOTAL ({} parts)", toolstring.len()),
        "",
        toolstring.max_od_in(),
        toolstring.total_length_in(),
        toolstring.total_weight_lb()
    );
    let _ = writeln!(
        out,
        "Assembled length: {:.2} ft, max OD {:.3} in",
        toolstring.total_length_ft(),
        toolstring.max_od_in()
    );
    out
}
