//! Catalog planets evaluated together

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::body::Body;
use crate::catalog::Planet;
use crate::config::EngineConfig;
use crate::error::OrbitResult;

/// Body state at a specific time
#[derive(Clone, Debug)]
pub struct BodyState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub distance: f64,
}

/// All planet states at one time
#[derive(Clone, Debug)]
pub struct SystemSnapshot {
    /// Days since each planet's periapsis passage
    pub time: f64,
    pub states: HashMap<Planet, BodyState>,
}

/// Planet bodies built once from the catalog
pub struct SolarSystem {
    bodies: HashMap<Planet, Body>,
}

impl SolarSystem {
    pub fn new() -> OrbitResult<Self> {
        Self::with_config(Planet::all(), EngineConfig::default())
    }

    pub fn inner() -> OrbitResult<Self> {
        Self::with_config(Planet::inner(), EngineConfig::default())
    }

    pub fn outer() -> OrbitResult<Self> {
        Self::with_config(Planet::outer(), EngineConfig::default())
    }

    pub fn with_config(planets: &[Planet], config: EngineConfig) -> OrbitResult<Self> {
        let bodies = planets
            .iter()
            .map(|p| p.body_with_config(config).map(|body| (*p, body)))
            .collect::<OrbitResult<HashMap<_, _>>>()?;

        Ok(Self { bodies })
    }

    pub fn body(&self, planet: Planet) -> Option<&Body> {
        self.bodies.get(&planet)
    }

    /// Planets in this system, innermost first
    pub fn planets(&self) -> Vec<Planet> {
        let mut planets: Vec<Planet> = self.bodies.keys().copied().collect();
        planets.sort_by(|a, b| self.bodies[a].cmp_by_semi_major_axis(&self.bodies[b]));
        planets
    }

    /// Outermost semi-major axis, handy for sizing plots
    pub fn extent(&self) -> f64 {
        self.bodies
            .values()
            .map(|b| b.elements().semi_major_axis())
            .fold(0.0, f64::max)
    }

    pub fn body_state(&self, planet: Planet, time: f64) -> OrbitResult<Option<BodyState>> {
        let Some(body) = self.bodies.get(&planet) else {
            return Ok(None);
        };

        let position = body.position(time)?;
        Ok(Some(BodyState {
            position,
            velocity: body.speed(time)?,
            distance: position.norm(),
        }))
    }

    pub fn snapshot(&self, time: f64) -> OrbitResult<SystemSnapshot> {
        let mut states = HashMap::new();

        for planet in self.bodies.keys() {
            if let Some(state) = self.body_state(*planet, time)? {
                states.insert(*planet, state);
            }
        }

        Ok(SystemSnapshot { time, states })
    }
}
