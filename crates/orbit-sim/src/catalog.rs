//! Planetary orbital elements and masses
//!
//! Angles in degrees, semi-major axis in AU, period in days, mass in kg.
//! Times are measured from each planet's own periapsis passage; there is no
//! shared epoch.

use crate::body::Body;
use crate::config::EngineConfig;
use crate::elements::OrbitalElements;
use crate::error::OrbitResult;

/// Planet identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Raw element set for one catalog entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetData {
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub period_days: f64,
    pub mass_kg: f64,
    pub inclination_deg: f64,
    pub arg_periapsis_deg: f64,
    pub ascending_node_deg: f64,
}

impl Planet {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Case-insensitive lookup by English name
    pub fn from_name(name: &str) -> Option<Planet> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn data(&self) -> PlanetData {
        let (eccentricity, semi_major_axis, period_days, mass_kg, inclination_deg, arg_periapsis_deg, ascending_node_deg) =
            match self {
                //                 e      a (AU)   P (d)     m (kg)     i      ω̄       Ω
                Self::Mercury => (0.206, 0.387, 87.97, 3.301e23, 7.0, 75.9, 47.14),
                Self::Venus => (0.007, 0.723, 224.7, 4.867e24, 3.59, 130.15, 75.78),
                Self::Earth => (0.017, 1.0, 365.26, 5.9742e24, 0.0, 101.22, 0.0),
                Self::Mars => (0.093, 1.524, 686.98, 6.417e23, 1.85, 101.22, 48.78),
                Self::Jupiter => (0.048, 5.203, 4332.6, 1.899e27, 1.31, 12.72, 99.44),
                Self::Saturn => (0.056, 9.546, 10759.0, 5.685e26, 2.5, 91.09, 112.79),
                Self::Uranus => (0.047, 19.2, 30687.0, 8.682e25, 0.77, 169.05, 73.48),
                Self::Neptune => (0.009, 30.09, 60784.0, 1.024e26, 1.78, 43.83, 130.68),
            };

        PlanetData {
            eccentricity,
            semi_major_axis,
            period_days,
            mass_kg,
            inclination_deg,
            arg_periapsis_deg,
            ascending_node_deg,
        }
    }

    pub fn elements(&self) -> OrbitResult<OrbitalElements> {
        let d = self.data();
        OrbitalElements::from_degrees(
            d.eccentricity,
            d.semi_major_axis,
            d.period_days,
            d.inclination_deg,
            d.arg_periapsis_deg,
            d.ascending_node_deg,
        )
    }

    pub fn body(&self) -> OrbitResult<Body> {
        self.body_with_config(EngineConfig::default())
    }

    pub fn body_with_config(&self, config: EngineConfig) -> OrbitResult<Body> {
        Body::from_elements(self.name(), self.data().mass_kg, self.elements()?, config)
    }

    pub fn inner() -> &'static [Planet] {
        &[Self::Mercury, Self::Venus, Self::Earth, Self::Mars]
    }

    pub fn outer() -> &'static [Planet] {
        &[Self::Jupiter, Self::Saturn, Self::Uranus, Self::Neptune]
    }

    pub fn all() -> &'static [Planet] {
        &[
            Self::Mercury, Self::Venus, Self::Earth, Self::Mars,
            Self::Jupiter, Self::Saturn, Self::Uranus, Self::Neptune,
        ]
    }
}
