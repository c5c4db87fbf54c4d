use crate::angles::*;
use crate::constants::*;
use approx::assert_abs_diff_eq;

#[test]
fn test_reduce_time_wraps_period() {
    let period = 365.26;

    assert_eq!(reduce_time(0.0, period), 0.0);
    assert_eq!(reduce_time(period, period), 0.0);
    assert_abs_diff_eq!(reduce_time(400.0, period), 400.0 - period, epsilon = 1e-12);
    assert_abs_diff_eq!(reduce_time(-1.0, period), period - 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(reduce_time(3.0 * period + 10.0, period), 10.0, epsilon = 1e-9);
}

#[test]
fn test_mean_anomaly_quarter_period() {
    let m = mean_anomaly(25.0, 100.0);
    assert_abs_diff_eq!(m, TWO_PI / 4.0, epsilon = 1e-15);
}
