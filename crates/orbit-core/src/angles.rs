use crate::constants::TWO_PI;

/// Reduce a time into [0, period)
///
/// Negative times wrap backwards, so `reduce_time(-1.0, p) == p - 1.0`.
pub fn reduce_time(time: f64, period: f64) -> f64 {
    let t = time.rem_euclid(period);
    if t >= period { 0.0 } else { t }
}

/// Mean anomaly 2πt/P for a time already reduced into [0, P)
pub fn mean_anomaly(time: f64, period: f64) -> f64 {
    TWO_PI * time / period
}
