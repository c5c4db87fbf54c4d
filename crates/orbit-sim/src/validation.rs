//! Cross-checks between independent computations of the same quantity
//!
//! Each body can be checked against the relations its queries must satisfy:
//! Newton vs. Bessel series for E, instantaneous vs. constant energy,
//! |L| vs. c, and integrated vs. closed-form true anomaly.

use orbit_core::constants::TWO_PI;

use crate::body::Body;
use crate::error::{OrbitError, OrbitResult};

/// Residuals for a single body at one time
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ValidationPoint {
    pub time: f64,
    /// |E_newton - E_series|
    pub series_gap: f64,
    /// |E(t) - E| / |E|
    pub energy_residual: f64,
    /// ||L(t)| - c| / c
    pub momentum_residual: f64,
    /// Angular distance between the two true-anomaly computations
    pub anomaly_gap: f64,
}

/// Check one body at one time
pub fn validate_body(body: &Body, time: f64, n_terms: u32) -> OrbitResult<ValidationPoint> {
    let newton = body.eccentric_anomaly(time)?;
    let series = body.eccentric_anomaly_via_series(time, n_terms);

    let energy = body.energy();
    let energy_residual = ((body.energy_from_time(time)? - energy) / energy).abs();

    let c = body.angular_momentum_constant();
    let momentum_residual = ((body.angular_moment(time)?.norm() - c) / c).abs();

    // 0 and 2π are the same direction
    let raw_gap = (body.real_anomaly(time) - body.real_anomaly_from_eccentric(time)?).abs();
    let anomaly_gap = raw_gap.min(TWO_PI - raw_gap);

    Ok(ValidationPoint {
        time,
        series_gap: (newton - series).abs(),
        energy_residual,
        momentum_residual,
        anomaly_gap,
    })
}

/// Check one body at `start, start + step, ...` up to and including `end`
pub fn validate_range(body: &Body, start: f64, end: f64, step: f64, n_terms: u32) -> OrbitResult<Vec<ValidationPoint>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(OrbitError::validation("step", format!("{} must be positive", step)));
    }
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Err(OrbitError::validation("range", format!("[{}, {}] is empty", start, end)));
    }

    // Slack keeps `end` in the range when (end - start) / step rounds just below an integer
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    let results = (0..count)
        .map(|k| validate_body(body, start + k as f64 * step, n_terms))
        .collect::<OrbitResult<Vec<_>>>()?;

    tracing::debug!(body = body.name(), points = results.len(), "validation range done");
    Ok(results)
}

/// Worst and mean residuals over a validation run
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ValidationSummary {
    pub num_points: usize,
    pub max_series_gap: f64,
    pub mean_series_gap: f64,
    pub max_energy_residual: f64,
    pub max_momentum_residual: f64,
    pub max_anomaly_gap: f64,
    pub mean_anomaly_gap: f64,
}

pub fn summarize_validation(results: &[ValidationPoint]) -> ValidationSummary {
    if results.is_empty() {
        return ValidationSummary::default();
    }

    let n = results.len() as f64;
    let max = |f: fn(&ValidationPoint) -> f64| results.iter().map(f).fold(0.0, f64::max);
    let mean = |f: fn(&ValidationPoint) -> f64| results.iter().map(f).sum::<f64>() / n;

    ValidationSummary {
        num_points: results.len(),
        max_series_gap: max(|p| p.series_gap),
        mean_series_gap: mean(|p| p.series_gap),
        max_energy_residual: max(|p| p.energy_residual),
        max_momentum_residual: max(|p| p.momentum_residual),
        max_anomaly_gap: max(|p| p.anomaly_gap),
        mean_anomaly_gap: mean(|p| p.anomaly_gap),
    }
}
