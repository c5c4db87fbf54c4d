/// Full turn in radians
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.674e-11;

/// Solar mass in kilograms
pub const SUN_MASS_KG: f64 = 1.989e30;

/// Scale applied to G·M☉ (SI) to express the reduced two-body parameter
/// in the engine's length and time units
pub const TWO_BODY_UNIT_SCALE: f64 = 8.9546188e-25;

/// Astronomical unit in meters
pub const AU: f64 = 1.495978707e11;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Default Newton-Raphson step tolerance for Kepler's equation (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Default Newton-Raphson iteration cap
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Default RK4 step count for the one-body true-anomaly integration
pub const ONE_BODY_STEPS: usize = 5000;

/// Default RK4 step count for the reduced two-body integration
pub const TWO_BODY_STEPS: usize = 4000;
