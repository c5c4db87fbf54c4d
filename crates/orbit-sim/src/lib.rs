//! Keplerian orbit engine
//!
//! Computes position, velocity, anomalies, energy and angular momentum of a
//! body on a fixed ellipse. Eccentric anomaly comes from Newton-Raphson with a
//! Bessel-series cross-check, true anomaly from a fixed-step RK4 integration,
//! and the orbital plane is placed in 3D by a Rodrigues rotation.

pub mod body;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod elements;
pub mod error;
pub mod integrator;
pub mod kepler;
pub mod orientation;
pub mod series;
pub mod system;
pub mod two_body;
pub mod validation;

pub use body::Body;
pub use cache::{OrbitCache, SampledOrbit};
pub use catalog::{Planet, PlanetData};
pub use config::{EngineConfig, IntegratorConfig, SolverConfig, TwoBodyConfig};
pub use elements::OrbitalElements;
pub use error::{OrbitError, OrbitResult};
pub use integrator::{AnomalyIntegrator, TrueAnomalyRate};
pub use kepler::KeplerSolver;
pub use orientation::OrientationTransform;
pub use series::{bessel_j, SeriesSolver};
pub use system::{BodyState, SolarSystem, SystemSnapshot};
pub use two_body::{BarycenterDrift, ReducedTwoBody};
pub use validation::{summarize_validation, validate_body, validate_range, ValidationPoint, ValidationSummary};

#[cfg(test)]
mod tests;
