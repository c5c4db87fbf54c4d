//! Compute-once storage for sampled orbits

use std::sync::Arc;

use nalgebra::Vector3;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::error::{OrbitError, OrbitResult};

/// Closed polyline of an orbit: `samples + 1` points, last equal to first
#[derive(Clone, Debug, PartialEq)]
pub struct SampledOrbit {
    samples: usize,
    points: Vec<Vector3<f64>>,
}

impl SampledOrbit {
    /// Sample `position` at `samples` equally spaced times over one period
    /// and close the loop
    pub fn sample<F>(period: f64, samples: usize, mut position: F) -> OrbitResult<Self>
    where
        F: FnMut(f64) -> OrbitResult<Vector3<f64>>,
    {
        check_samples(samples)?;
        let dt = period / samples as f64;

        let mut points = (0..samples)
            .map(|k| position(k as f64 * dt))
            .collect::<OrbitResult<Vec<_>>>()?;
        points.push(points[0]);

        Ok(Self { samples, points })
    }

    /// Sample count the orbit was built with
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.points.iter()
    }
}

/// Lazily populated, then immutable, orbit sample set
///
/// The first caller builds the orbit under an upgradable read lock; callers
/// arriving meanwhile block until the finished orbit is published. A later
/// request with a different sample count gets the stored orbit back.
#[derive(Debug, Default)]
pub struct OrbitCache {
    slot: RwLock<Option<Arc<SampledOrbit>>>,
}

impl OrbitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Return the stored orbit, building it with `build` on first use
    ///
    /// A failed build leaves the slot empty so a later call can retry.
    pub fn get_or_try_init<F>(&self, samples: usize, build: F) -> OrbitResult<Arc<SampledOrbit>>
    where
        F: FnOnce() -> OrbitResult<SampledOrbit>,
    {
        check_samples(samples)?;

        if let Some(orbit) = self.slot.read().as_ref() {
            return Ok(Self::served(orbit, samples));
        }

        // Only one upgradable reader at a time, so at most one builder
        let guard = self.slot.upgradable_read();
        if let Some(orbit) = guard.as_ref() {
            return Ok(Self::served(orbit, samples));
        }

        let orbit = Arc::new(build()?);
        tracing::debug!(samples = orbit.samples(), points = orbit.len(), "orbit cache populated");

        let mut slot = RwLockUpgradableReadGuard::upgrade(guard);
        *slot = Some(Arc::clone(&orbit));
        Ok(orbit)
    }

    fn served(orbit: &Arc<SampledOrbit>, requested: usize) -> Arc<SampledOrbit> {
        if requested != orbit.samples() {
            tracing::debug!(
                requested,
                cached = orbit.samples(),
                "orbit cache already populated, ignoring new sample count"
            );
        }
        Arc::clone(orbit)
    }
}

fn check_samples(samples: usize) -> OrbitResult<()> {
    if samples == 0 {
        return Err(OrbitError::validation("n_points", "an orbit needs at least one sample"));
    }
    Ok(())
}
