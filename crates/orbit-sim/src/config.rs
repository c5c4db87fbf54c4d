//! Numeric knobs and physical constants for the engine

use orbit_core::constants::*;
use serde::{Deserialize, Serialize};

use crate::error::{OrbitError, OrbitResult};

/// Newton-Raphson settings for Kepler's equation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Stop once |E_{n+1} - E_n| drops below this (radians)
    pub tolerance: f64,
    /// Give up with a convergence error after this many iterations
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
        }
    }
}

/// Fixed RK4 step counts for the true-anomaly integration
///
/// Cost per query grows linearly with the step count; accuracy grows
/// with its fourth power.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    pub one_body_steps: usize,
    pub two_body_steps: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            one_body_steps: ONE_BODY_STEPS,
            two_body_steps: TWO_BODY_STEPS,
        }
    }
}

/// Constants used only by the reduced two-body model
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoBodyConfig {
    /// G in SI units
    pub gravitational_constant: f64,
    /// Mass of the central body (kg)
    pub central_mass_kg: f64,
    /// Converts μ from SI into the engine's length/time units
    pub unit_scale: f64,
}

impl Default for TwoBodyConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            central_mass_kg: SUN_MASS_KG,
            unit_scale: TWO_BODY_UNIT_SCALE,
        }
    }
}

impl TwoBodyConfig {
    /// Reduced gravitational parameter S·G·M³/(m+M)²
    pub fn reduced_mu(&self, mass_kg: f64) -> f64 {
        let m = self.central_mass_kg;
        self.unit_scale * self.gravitational_constant * m.powi(3) / (mass_kg + m).powi(2)
    }

    /// Fraction m/(m+M) of the separation carried by the central body
    pub fn mass_ratio(&self, mass_kg: f64) -> f64 {
        mass_kg / (mass_kg + self.central_mass_kg)
    }
}

/// Everything a [`Body`](crate::body::Body) needs beyond its elements
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub solver: SolverConfig,
    pub integrator: IntegratorConfig,
    pub two_body: TwoBodyConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> OrbitResult<()> {
        if !(self.solver.tolerance.is_finite() && self.solver.tolerance > 0.0) {
            return Err(OrbitError::validation("solver.tolerance", "must be finite and positive"));
        }
        if self.solver.max_iterations == 0 {
            return Err(OrbitError::validation("solver.max_iterations", "must be at least 1"));
        }
        if self.integrator.one_body_steps == 0 {
            return Err(OrbitError::validation("integrator.one_body_steps", "must be at least 1"));
        }
        if self.integrator.two_body_steps == 0 {
            return Err(OrbitError::validation("integrator.two_body_steps", "must be at least 1"));
        }

        let positive = [
            ("two_body.gravitational_constant", self.two_body.gravitational_constant),
            ("two_body.central_mass_kg", self.two_body.central_mass_kg),
            ("two_body.unit_scale", self.two_body.unit_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(OrbitError::validation(field, format!("must be finite and positive, got {}", value)));
            }
        }

        Ok(())
    }
}
