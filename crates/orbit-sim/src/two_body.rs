//! Reduced two-body correction
//!
//! Treats the central star as having finite mass: the effective gravitational
//! parameter becomes μ' = S·G·M³/(m+M)², which also changes the period, and
//! both bodies orbit their common barycenter. Motion stays in the orbital
//! plane; nothing here is rotated into 3D.

use nalgebra::Vector2;
use orbit_core::constants::TWO_PI;
use orbit_core::reduce_time;

use crate::config::TwoBodyConfig;
use crate::elements::OrbitalElements;
use crate::error::OrbitResult;
use crate::integrator::{AnomalyIntegrator, TrueAnomalyRate};
use crate::kepler::KeplerSolver;

/// Barycenter moving uniformly from `origin` with `velocity`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarycenterDrift {
    pub origin: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl BarycenterDrift {
    pub fn at(&self, time: f64) -> Vector2<f64> {
        self.origin + self.velocity * time
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ReducedTwoBody {
    elements: OrbitalElements,
    mu: f64,
    period: f64,
    rate: TrueAnomalyRate,
    integrator: AnomalyIntegrator,
    solver: KeplerSolver,
    mass_ratio: f64,
}

impl ReducedTwoBody {
    pub fn new(
        elements: OrbitalElements,
        mass_kg: f64,
        config: &TwoBodyConfig,
        integrator: AnomalyIntegrator,
        solver: KeplerSolver,
    ) -> Self {
        let mu = config.reduced_mu(mass_kg);
        let a = elements.semi_major_axis();
        let period = (TWO_PI * TWO_PI * a.powi(3) / mu).sqrt();
        let rate = TrueAnomalyRate::new(elements, elements.angular_momentum_for(mu));

        Self {
            elements,
            mu,
            period,
            rate,
            integrator,
            solver,
            mass_ratio: config.mass_ratio(mass_kg),
        }
    }

    /// Reduced gravitational parameter μ'
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Period P' = √(4π²a³/μ')
    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn angular_momentum_constant(&self) -> f64 {
        self.rate.angular_momentum()
    }

    /// m/(m+M)
    pub fn mass_ratio(&self) -> f64 {
        self.mass_ratio
    }

    /// True anomaly from the two-body integrator
    pub fn true_anomaly(&self, time: f64) -> f64 {
        let t = reduce_time(time, self.period);
        self.integrator.true_anomaly(&self.rate, t)
    }

    /// Planar position relative to the star
    pub fn position(&self, time: f64) -> Vector2<f64> {
        let (x, y) = self.elements.position_from_true_anomaly(self.true_anomaly(time));
        Vector2::new(x, y)
    }

    /// Planar velocity relative to the star
    pub fn speed(&self, time: f64) -> OrbitResult<Vector2<f64>> {
        let t = reduce_time(time, self.period);
        let ea = self.solver.solve(self.period, self.elements.eccentricity(), t)?;
        let (vx, vy) = self.elements.velocity_perifocal_with_period(ea, self.period);
        Ok(Vector2::new(vx, vy))
    }

    /// Linear barycenter motion seeded from the state at t = 0
    pub fn barycenter_drift(&self) -> OrbitResult<BarycenterDrift> {
        Ok(BarycenterDrift {
            origin: self.position(0.0) * self.mass_ratio,
            velocity: self.speed(0.0)? * self.mass_ratio,
        })
    }

    /// Barycenter position q·r(0) + q·v(0)·t
    ///
    /// `time` is not reduced: the drift is linear in absolute time.
    pub fn mass_center(&self, time: f64) -> OrbitResult<Vector2<f64>> {
        Ok(self.barycenter_drift()?.at(time))
    }

    /// Planet and star positions in the barycentric frame, `[planet, star]`
    pub fn positions(&self, time: f64) -> OrbitResult<[Vector2<f64>; 2]> {
        let center = self.mass_center(time)?;
        Ok([self.position(time) + center, center])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orbit_core::constants::{G, SUN_MASS_KG, TWO_BODY_UNIT_SCALE};

    fn earth_two_body() -> ReducedTwoBody {
        let elements = OrbitalElements::from_degrees(0.017, 1.0, 365.26, 0.0, 0.0, 101.22).unwrap();
        ReducedTwoBody::new(
            elements,
            5.9742e24,
            &TwoBodyConfig::default(),
            AnomalyIntegrator::new(4000),
            KeplerSolver::default(),
        )
    }

    #[test]
    fn test_reduced_period_from_mu() {
        let two_body = earth_two_body();
        let mu = TWO_BODY_UNIT_SCALE * G * SUN_MASS_KG.powi(3) / (5.9742e24 + SUN_MASS_KG).powi(2);

        assert_relative_eq!(two_body.mu(), mu, max_relative = 1e-14);
        assert_relative_eq!(
            two_body.period(),
            (4.0 * std::f64::consts::PI.powi(2) / mu).sqrt(),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_starts_at_periapsis() {
        let two_body = earth_two_body();
        let p = two_body.position(0.0);
        assert_relative_eq!(p.x, 1.0 - 0.017, max_relative = 1e-14);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_mass_center_is_linear() {
        let two_body = earth_two_body();
        let c0 = two_body.mass_center(0.0).unwrap();
        let c1 = two_body.mass_center(10.0).unwrap();
        let c2 = two_body.mass_center(20.0).unwrap();

        assert_relative_eq!(c2 - c1, c1 - c0, max_relative = 1e-12);
        assert_relative_eq!(c0, two_body.position(0.0) * two_body.mass_ratio(), max_relative = 1e-14);
    }

    #[test]
    fn test_barycentric_positions_offset_by_center() {
        let two_body = earth_two_body();
        let t = 42.0;
        let [planet, star] = two_body.positions(t).unwrap();

        assert_relative_eq!(star, two_body.mass_center(t).unwrap(), max_relative = 1e-14);
        assert_relative_eq!(planet - star, two_body.position(t), max_relative = 1e-12);
    }
}
