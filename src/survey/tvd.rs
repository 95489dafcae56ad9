//! Directional survey MD-to-TVD conversion (minimum curvature method)
//!
//! Converts measured-depth stations to true vertical depth and horizontal
//! displacement. Between consecutive stations the wellbore is modeled as a
//! circular arc; the ratio factor RF = (2/beta) * tan(beta/2) smooths the
//! balanced-tangential step, with RF -> 1 as the dogleg angle beta -> 0.
//!
//! Station list preconditions (strictly increasing MD, inclination 0-180,
//! azimuth 0-360) are enforced by the ingest layer.

use crate::types::{DirectionalStation, PathPoint};

/// Dogleg angles below this are treated as a straight course (RF = 1).
const STRAIGHT_COURSE_RAD: f64 = 1e-9;

/// Compute the wellbore path from directional stations.
///
/// The first station anchors the path: TVD there equals its measured depth
/// (hole assumed vertical above the tie-in) with zero horizontal offsets.
/// Returns one [`PathPoint`] per input station; empty input yields an empty
/// path.
pub fn minimum_curvature(stations: &[DirectionalStation]) -> Vec<PathPoint> {
    let Some(first) = stations.first() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(stations.len());
    path.push(PathPoint {
        md: first.md,
        tvd: first.md,
        northing: 0.0,
        easting: 0.0,
        dls: 0.0,
    });

    for pair in stations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let prev = path[path.len() - 1];

        let i1 = a.inclination.to_radians();
        let i2 = b.inclination.to_radians();
        let a1 = a.azimuth.to_radians();
        let a2 = b.azimuth.to_radians();

        let beta = dogleg_angle(i1, i2, a1, a2);
        let rf = ratio_factor(beta);
        let half_course = (b.md - a.md) / 2.0;

        let tvd = prev.tvd + half_course * (i1.cos() + i2.cos()) * rf;
        let northing = prev.northing + half_course * (i1.sin() * a1.cos() + i2.sin() * a2.cos()) * rf;
        let easting = prev.easting + half_course * (i1.sin() * a1.sin() + i2.sin() * a2.sin()) * rf;

        let course_len = b.md - a.md;
        let dls = if course_len > 0.0 {
            beta.to_degrees() * 100.0 / course_len
        } else {
            0.0
        };

        path.push(PathPoint {
            md: b.md,
            tvd,
            northing,
            easting,
            dls,
        });
    }

    path
}

/// Interpolate TVD at an arbitrary measured depth along a computed path.
///
/// Linear between bracketing stations; clamps outside the surveyed range.
/// Returns `None` for an empty path.
pub fn tvd_at_md(path: &[PathPoint], md: f64) -> Option<f64> {
    let first = path.first()?;
    let last = path.last()?;

    if md <= first.md {
        return Some(first.tvd);
    }
    if md >= last.md {
        return Some(last.tvd);
    }

    for pair in path.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if md >= a.md && md <= b.md {
            let span = b.md - a.md;
            if span <= 0.0 {
                return Some(a.tvd);
            }
            let t = (md - a.md) / span;
            return Some(a.tvd + t * (b.tvd - a.tvd));
        }
    }

    Some(last.tvd)
}

/// Total dogleg angle between two stations (radians).
///
/// cos(beta) = cos(i2 - i1) - sin(i1) * sin(i2) * (1 - cos(a2 - a1))
fn dogleg_angle(i1: f64, i2: f64, a1: f64, a2: f64) -> f64 {
    let cos_beta = (i2 - i1).cos() - i1.sin() * i2.sin() * (1.0 - (a2 - a1).cos());
    cos_beta.clamp(-1.0, 1.0).acos()
}

/// Minimum-curvature ratio factor.
fn ratio_factor(beta: f64) -> f64 {
    if beta < STRAIGHT_COURSE_RAD {
        1.0
    } else {
        (2.0 / beta) * (beta / 2.0).tan()
    }
}
