//! A body on a fixed elliptical orbit and its state queries
//!
//! All queries take a time in days since periapsis passage and fold it into
//! the relevant period first. Anything touching the eccentric anomaly goes
//! through [`KeplerSolver`] and can fail with a convergence error; the
//! integrator and series paths are infallible.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use nalgebra::{Matrix3, Vector2, Vector3};
use orbit_core::constants::TWO_PI;

use crate::cache::{OrbitCache, SampledOrbit};
use crate::config::EngineConfig;
use crate::elements::OrbitalElements;
use crate::error::{OrbitError, OrbitResult};
use crate::integrator::{AnomalyIntegrator, TrueAnomalyRate};
use crate::kepler::KeplerSolver;
use crate::orientation::OrientationTransform;
use crate::series::SeriesSolver;
use crate::two_body::ReducedTwoBody;

/// Orbiting body with immutable elements and derived constants
#[derive(Debug)]
pub struct Body {
    name: String,
    /// Mass in kilograms
    mass: f64,
    elements: OrbitalElements,
    /// μ = 4π²a³/P²
    mu: f64,
    /// c = √(μ a (1 - e²))
    c: f64,
    orientation: OrientationTransform,
    solver: KeplerSolver,
    integrator: AnomalyIntegrator,
    rate: TrueAnomalyRate,
    two_body: ReducedTwoBody,
    orbit: OrbitCache,
    orbit_2d: OrbitCache,
    orbit_2bodies: OrbitCache,
}

impl Body {
    /// Build a body with the default engine configuration
    ///
    /// Angles are in degrees, the period in days and the mass in kilograms.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        eccentricity: f64,
        semi_major_axis: f64,
        period_days: f64,
        mass_kg: f64,
        inclination_deg: f64,
        arg_periapsis_deg: f64,
        ascending_node_deg: f64,
    ) -> OrbitResult<Self> {
        let elements = OrbitalElements::from_degrees(
            eccentricity,
            semi_major_axis,
            period_days,
            inclination_deg,
            arg_periapsis_deg,
            ascending_node_deg,
        )?;
        Self::from_elements(name, mass_kg, elements, EngineConfig::default())
    }

    /// Build a body from validated elements and an explicit configuration
    pub fn from_elements(
        name: impl Into<String>,
        mass_kg: f64,
        elements: OrbitalElements,
        config: EngineConfig,
    ) -> OrbitResult<Self> {
        config.validate()?;
        if !(mass_kg.is_finite() && mass_kg >= 0.0) {
            return Err(OrbitError::validation("mass", format!("{} must be finite and non-negative", mass_kg)));
        }

        let name = name.into();
        let mu = elements.mu();
        let c = elements.angular_momentum_for(mu);
        let orientation = OrientationTransform::from_elements(&elements);
        let solver = KeplerSolver::new(config.solver);
        let two_body = ReducedTwoBody::new(
            elements,
            mass_kg,
            &config.two_body,
            AnomalyIntegrator::new(config.integrator.two_body_steps),
            solver,
        );

        tracing::debug!(
            name = %name,
            e = elements.eccentricity(),
            a = elements.semi_major_axis(),
            period = elements.period(),
            mu,
            c,
            "body constructed"
        );

        Ok(Self {
            name,
            mass: mass_kg,
            elements,
            mu,
            c,
            orientation,
            solver,
            integrator: AnomalyIntegrator::new(config.integrator.one_body_steps),
            rate: TrueAnomalyRate::new(elements, c),
            two_body,
            orbit: OrbitCache::new(),
            orbit_2d: OrbitCache::new(),
            orbit_2bodies: OrbitCache::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn period(&self) -> f64 {
        self.elements.period()
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Specific angular momentum magnitude c
    pub fn angular_momentum_constant(&self) -> f64 {
        self.c
    }

    pub fn rotation(&self) -> &Matrix3<f64> {
        self.orientation.matrix()
    }

    pub fn two_body(&self) -> &ReducedTwoBody {
        &self.two_body
    }

    /// Orders bodies by semi-major axis, innermost first
    pub fn cmp_by_semi_major_axis(&self, other: &Body) -> Ordering {
        self.elements
            .semi_major_axis()
            .total_cmp(&other.elements.semi_major_axis())
    }

    pub fn time_in_period(&self, time: f64) -> f64 {
        self.elements.time_in_period(time)
    }

    pub fn mean_anomaly(&self, time: f64) -> f64 {
        self.elements.mean_anomaly_at(time)
    }

    /// Eccentric anomaly from Newton-Raphson
    pub fn eccentric_anomaly(&self, time: f64) -> OrbitResult<f64> {
        let t = self.time_in_period(time);
        self.solver.solve(self.period(), self.elements.eccentricity(), t)
    }

    /// Eccentric anomaly from the first `n_terms` terms of the Bessel series
    pub fn eccentric_anomaly_via_series(&self, time: f64, n_terms: u32) -> f64 {
        let t = self.time_in_period(time);
        SeriesSolver.solve(self.period(), self.elements.eccentricity(), t, n_terms)
    }

    /// Position in the orbital plane, x towards periapsis
    pub fn position_2d(&self, time: f64) -> OrbitResult<Vector2<f64>> {
        let (x, y) = self.elements.position_perifocal(self.eccentric_anomaly(time)?);
        Ok(Vector2::new(x, y))
    }

    /// Velocity in the orbital plane
    pub fn speed_2d(&self, time: f64) -> OrbitResult<Vector2<f64>> {
        let (vx, vy) = self.elements.velocity_perifocal(self.eccentric_anomaly(time)?);
        Ok(Vector2::new(vx, vy))
    }

    /// Position in 3D, relative to the focus
    pub fn position(&self, time: f64) -> OrbitResult<Vector3<f64>> {
        let p = self.position_2d(time)?;
        Ok(self.orientation.apply_planar(p.x, p.y))
    }

    /// Velocity in 3D
    pub fn speed(&self, time: f64) -> OrbitResult<Vector3<f64>> {
        let v = self.speed_2d(time)?;
        Ok(self.orientation.apply_planar(v.x, v.y))
    }

    pub fn distance_to_sun(&self, time: f64) -> OrbitResult<f64> {
        Ok(self.position(time)?.norm())
    }

    pub fn speed_module(&self, time: f64) -> OrbitResult<f64> {
        Ok(self.speed(time)?.norm())
    }

    /// Specific orbital energy, -c² / (2a²(1 - e²))
    pub fn energy(&self) -> f64 {
        let a = self.elements.semi_major_axis();
        let e = self.elements.eccentricity();
        -self.c * self.c / (2.0 * a * a * (1.0 - e * e))
    }

    /// Specific orbital energy from the instantaneous state, v²/2 - μ/r
    pub fn energy_from_time(&self, time: f64) -> OrbitResult<f64> {
        let v = self.speed_module(time)?;
        let r = self.distance_to_sun(time)?;
        Ok(v * v / 2.0 - self.mu / r)
    }

    /// True anomaly from the RK4 integration of dθ/dt
    pub fn real_anomaly(&self, time: f64) -> f64 {
        let t = self.time_in_period(time);
        self.integrator.true_anomaly(&self.rate, t)
    }

    /// dθ/dt at the integrated true anomaly
    pub fn real_anomaly_rate(&self, time: f64) -> f64 {
        self.rate.rate(self.real_anomaly(time))
    }

    /// True anomaly from the eccentric anomaly
    ///
    /// arccos only covers [0, π]; the second half of the period is mirrored.
    pub fn real_anomaly_from_eccentric(&self, time: f64) -> OrbitResult<f64> {
        let t = self.time_in_period(time);
        let e = self.elements.eccentricity();
        let cos_ea = self.eccentric_anomaly(t)?.cos();

        let ratio = (cos_ea - e) / (1.0 - e * cos_ea);
        if !(-1.0..=1.0).contains(&ratio) {
            tracing::trace!(ratio, "clamping arccos argument");
        }
        let theta = ratio.clamp(-1.0, 1.0).acos();

        Ok(if 2.0 * t < self.period() { theta } else { TWO_PI - theta })
    }

    /// Angular momentum vector along the rotated orbit normal, magnitude r² dθ/dt
    pub fn angular_moment(&self, time: f64) -> OrbitResult<Vector3<f64>> {
        let r = self.distance_to_sun(time)?;
        let magnitude = r * r * self.real_anomaly_rate(time);
        Ok(self.orientation.normal() * magnitude)
    }

    /// Closed 3D orbit of `n_points + 1` samples over one period
    ///
    /// Built on the first call only. Later calls return that orbit even when
    /// `n_points` differs; check [`SampledOrbit::samples`] if it matters.
    /// `n_points == 0` is a validation error.
    pub fn get_orbit(&self, n_points: usize) -> OrbitResult<Arc<SampledOrbit>> {
        self.orbit.get_or_try_init(n_points, || {
            SampledOrbit::sample(self.period(), n_points, |t| self.position(t))
        })
    }

    /// Closed planar orbit, cached like [`Body::get_orbit`]
    pub fn get_orbit_2d(&self, n_points: usize) -> OrbitResult<Arc<SampledOrbit>> {
        self.orbit_2d.get_or_try_init(n_points, || {
            SampledOrbit::sample(self.period(), n_points, |t| {
                let p = self.position_2d(t)?;
                Ok(Vector3::new(p.x, p.y, 0.0))
            })
        })
    }

    /// Closed planar orbit under the reduced two-body model, in the barycentric frame
    ///
    /// Sampled over the two-body period; each point adds the barycenter drift
    /// to the planar two-body position. Cached like [`Body::get_orbit`].
    pub fn get_orbit_2bodies(&self, n_points: usize) -> OrbitResult<Arc<SampledOrbit>> {
        self.orbit_2bodies.get_or_try_init(n_points, || {
            let drift = self.two_body.barycenter_drift()?;
            SampledOrbit::sample(self.two_body.period(), n_points, |t| {
                let p = self.two_body.position(t) + drift.at(t);
                Ok(Vector3::new(p.x, p.y, 0.0))
            })
        })
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
