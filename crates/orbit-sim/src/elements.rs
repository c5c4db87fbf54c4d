//! Keplerian orbital elements and the closed-form quantities derived from them

use orbit_core::constants::TWO_PI;
use orbit_core::{mean_anomaly, reduce_time};

use crate::error::{OrbitError, OrbitResult};

/// Elliptical orbital elements
///
/// Angles are stored in radians. Instances only exist through
/// [`OrbitalElements::from_degrees`] or [`OrbitalElements::new`], both of
/// which enforce `0 <= e < 1` and `a, period > 0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OrbitalElements {
    /// Eccentricity (dimensionless, 0 = circular)
    e: f64,
    /// Semi-major axis (length units, usually AU)
    a: f64,
    /// Orbital period (days)
    period: f64,
    /// Inclination (radians)
    i: f64,
    /// Argument of periapsis (radians)
    omega_small: f64,
    /// Longitude of ascending node (radians)
    omega_big: f64,
}

impl OrbitalElements {
    /// Create from angles in radians
    pub fn new(e: f64, a: f64, period: f64, i: f64, omega_small: f64, omega_big: f64) -> OrbitResult<Self> {
        if !e.is_finite() || !(0.0..1.0).contains(&e) {
            return Err(OrbitError::validation(
                "eccentricity",
                format!("{} is outside [0, 1); only elliptical orbits are supported", e),
            ));
        }
        if !(a.is_finite() && a > 0.0) {
            return Err(OrbitError::validation("semi_major_axis", format!("{} must be positive", a)));
        }
        if !(period.is_finite() && period > 0.0) {
            return Err(OrbitError::validation("period", format!("{} must be positive", period)));
        }
        for (field, angle) in [("inclination", i), ("arg_periapsis", omega_small), ("ascending_node", omega_big)] {
            if !angle.is_finite() {
                return Err(OrbitError::validation(field, "must be finite"));
            }
        }

        Ok(Self { e, a, period, i, omega_small, omega_big })
    }

    /// Create from angles in degrees
    pub fn from_degrees(
        e: f64,
        a: f64,
        period: f64,
        i_deg: f64,
        omega_small_deg: f64,
        omega_big_deg: f64,
    ) -> OrbitResult<Self> {
        Self::new(
            e,
            a,
            period,
            i_deg.to_radians(),
            omega_small_deg.to_radians(),
            omega_big_deg.to_radians(),
        )
    }

    pub fn eccentricity(&self) -> f64 {
        self.e
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn inclination(&self) -> f64 {
        self.i
    }

    pub fn arg_periapsis(&self) -> f64 {
        self.omega_small
    }

    pub fn ascending_node(&self) -> f64 {
        self.omega_big
    }

    /// √(1 - e²), the semi-minor to semi-major ratio
    pub fn axis_ratio(&self) -> f64 {
        (1.0 - self.e * self.e).sqrt()
    }

    /// Semi-latus rectum a(1 - e²)
    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e * self.e)
    }

    /// Gravitational parameter implied by Kepler's third law, μ = 4π²a³/P²
    pub fn mu(&self) -> f64 {
        TWO_PI * TWO_PI * self.a.powi(3) / (self.period * self.period)
    }

    /// Specific angular momentum magnitude c = √(μ a (1 - e²)) for a given μ
    pub fn angular_momentum_for(&self, mu: f64) -> f64 {
        (mu * self.semi_latus_rectum()).sqrt()
    }

    /// Time folded into [0, P)
    pub fn time_in_period(&self, time: f64) -> f64 {
        reduce_time(time, self.period)
    }

    /// Mean anomaly at `time` (radians, in [0, 2π))
    pub fn mean_anomaly_at(&self, time: f64) -> f64 {
        mean_anomaly(self.time_in_period(time), self.period)
    }

    /// Distance from the focus at true anomaly θ
    pub fn radius(&self, true_anomaly: f64) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.e * true_anomaly.cos())
    }

    /// Position in the orbital plane from eccentric anomaly
    /// Returns (x, y) with x pointing to periapsis
    pub fn position_perifocal(&self, eccentric_anomaly: f64) -> (f64, f64) {
        let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
        (self.a * (cos_e - self.e), self.a * self.axis_ratio() * sin_e)
    }

    /// Velocity in the orbital plane from eccentric anomaly, for a given period
    pub fn velocity_perifocal_with_period(&self, eccentric_anomaly: f64, period: f64) -> (f64, f64) {
        let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
        let k = TWO_PI * self.a / (period * (1.0 - self.e * cos_e));
        (-k * sin_e, k * self.axis_ratio() * cos_e)
    }

    /// Velocity in the orbital plane from eccentric anomaly
    pub fn velocity_perifocal(&self, eccentric_anomaly: f64) -> (f64, f64) {
        self.velocity_perifocal_with_period(eccentric_anomaly, self.period)
    }

    /// Position in the orbital plane from true anomaly
    pub fn position_from_true_anomaly(&self, true_anomaly: f64) -> (f64, f64) {
        let r = self.radius(true_anomaly);
        let (sin_t, cos_t) = true_anomaly.sin_cos();
        (r * cos_t, r * sin_t)
    }

    /// Rate of the true anomaly, c(1 + e cos θ)² / (a²(1 - e²)²)
    pub fn true_anomaly_rate(&self, c: f64, true_anomaly: f64) -> f64 {
        let num = c * (1.0 + self.e * true_anomaly.cos()).powi(2);
        let one_minus = 1.0 - self.e * self.e;
        num / (self.a * self.a * one_minus * one_minus)
    }
}
