//! Newton-Raphson solution of Kepler's equation

use orbit_core::mean_anomaly;

use crate::config::SolverConfig;
use crate::error::{OrbitError, OrbitResult};

/// Solves E - e·sin(E) = M for the eccentric anomaly
#[derive(Clone, Copy, Debug, Default)]
pub struct KeplerSolver {
    config: SolverConfig,
}

impl KeplerSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Eccentric anomaly at `time`, which the caller has already reduced into [0, period)
    pub fn solve(&self, period: f64, eccentricity: f64, time: f64) -> OrbitResult<f64> {
        self.solve_mean(eccentricity, mean_anomaly(time, period))
    }

    /// Eccentric anomaly for a given mean anomaly
    ///
    /// Seeded with E₀ = M. A circular orbit returns M untouched.
    pub fn solve_mean(&self, eccentricity: f64, mean_anomaly: f64) -> OrbitResult<f64> {
        if eccentricity == 0.0 {
            return Ok(mean_anomaly);
        }

        let mut ea = mean_anomaly;
        let mut step = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let f = ea - eccentricity * ea.sin() - mean_anomaly;
            let fp = 1.0 - eccentricity * ea.cos();
            step = f / fp;
            ea -= step;

            if step.abs() < self.config.tolerance {
                tracing::trace!(iteration, eccentricity, mean_anomaly, "Kepler solver converged");
                return Ok(ea);
            }
        }

        tracing::warn!(
            eccentricity,
            mean_anomaly,
            last_step = step,
            "Kepler solver hit iteration cap"
        );
        Err(OrbitError::Convergence {
            iterations: self.config.max_iterations,
            eccentricity,
            mean_anomaly,
            last_step: step,
        })
    }
}
