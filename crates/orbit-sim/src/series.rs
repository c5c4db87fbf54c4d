//! Bessel-series expansion of the eccentric anomaly
//!
//! E = M + 2 Σ_{k=1}^{N} (1/k) J_k(k e) sin(k M)
//!
//! The series converges for every e < 1 but slows down sharply as e grows,
//! so it serves as an independent cross-check of [`KeplerSolver`]
//! rather than the primary path.
//!
//! [`KeplerSolver`]: crate::kepler::KeplerSolver

use orbit_core::mean_anomaly;

// Keeps the unnormalized recurrence inside f64 range
const RESCALE_ABOVE: f64 = 1e250;
const RESCALE_BY: f64 = 1e-250;

/// Bessel function of the first kind of integer order, J_n(x)
///
/// Miller's backward recurrence J_{k-1} = (2k/x) J_k - J_{k+1}, started
/// from an arbitrary seed well above both n and |x| and normalized with
/// J_0 + 2 Σ J_{2k} = 1. Stable for the large orders and arguments the
/// series reaches (x = k·e up to k = N).
pub fn bessel_j(n: u32, x: f64) -> f64 {
    if x == 0.0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }

    let ax = x.abs();
    let top = n.max(ax as u32);
    let start = 2 * ((top + 20 + (40.0 * top as f64).sqrt() as u32) / 2);
    let two_over_x = 2.0 / ax;

    // j holds J_k, above holds J_{k+1}; both unnormalized
    let mut above = 0.0;
    let mut j = 1.0;
    let mut even_sum = 0.0;
    let mut wanted = 0.0;

    for k in (1..=start).rev() {
        let below = k as f64 * two_over_x * j - above;
        above = j;
        j = below;

        if j.abs() > RESCALE_ABOVE {
            j *= RESCALE_BY;
            above *= RESCALE_BY;
            even_sum *= RESCALE_BY;
            wanted *= RESCALE_BY;
        }

        let order = k - 1;
        if order == n {
            wanted = j;
        }
        if order > 0 && order % 2 == 0 {
            even_sum += j;
        }
    }

    let value = wanted / (2.0 * even_sum + j);
    if x < 0.0 && n % 2 == 1 { -value } else { value }
}

/// Series evaluation of the eccentric anomaly
#[derive(Clone, Copy, Debug, Default)]
pub struct SeriesSolver;

impl SeriesSolver {
    /// Eccentric anomaly at `time` (already reduced into [0, period)) using `n_terms` terms
    pub fn solve(&self, period: f64, eccentricity: f64, time: f64, n_terms: u32) -> f64 {
        self.solve_mean(eccentricity, mean_anomaly(time, period), n_terms)
    }

    pub fn solve_mean(&self, eccentricity: f64, mean_anomaly: f64, n_terms: u32) -> f64 {
        (1..=n_terms).fold(mean_anomaly, |ea, k| {
            let kf = k as f64;
            ea + (2.0 / kf) * bessel_j(k, kf * eccentricity) * (kf * mean_anomaly).sin()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kepler::KeplerSolver;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_bessel_reference_values() {
        // Abramowitz & Stegun, Table 9.1
        assert_abs_diff_eq!(bessel_j(0, 1.0), 0.765_197_686_557_966_6, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(1, 1.0), 0.440_050_585_744_933_5, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(2, 2.0), 0.352_834_028_615_637_7, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(1, 5.0), -0.327_579_137_591_465_2, epsilon = 1e-13);
        assert_abs_diff_eq!(bessel_j(5, 10.0), -0.234_061_528_186_793_7, epsilon = 1e-12);
    }

    #[test]
    fn test_bessel_at_zero() {
        assert_eq!(bessel_j(0, 0.0), 1.0);
        assert_eq!(bessel_j(3, 0.0), 0.0);
    }

    #[test]
    fn test_bessel_large_order_and_argument() {
        assert_abs_diff_eq!(bessel_j(150, 135.0), 4.479_046_017_649_257e-4, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(200, 190.0), 5.682_532_802_241_143e-3, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(30, 24.0), 5.625_680_842_695_14e-3, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(5, 30.0), -0.143_240_295_512_077_06, epsilon = 1e-14);
        assert_abs_diff_eq!(bessel_j(1, 100.0), -0.077_145_352_014_112_16, epsilon = 1e-14);
    }

    #[test]
    fn test_bessel_bounded_along_series_arguments() {
        for &e in &[0.8, 0.9, 0.95, 0.99] {
            for k in 1..=200u32 {
                let j = bessel_j(k, k as f64 * e);
                assert!(j.is_finite() && j > 0.0 && j < 1.0, "J_{}({}) = {}", k, k as f64 * e, j);
            }
        }
    }

    #[test]
    fn test_bessel_odd_order_negative_argument() {
        assert_abs_diff_eq!(bessel_j(3, -2.5), -bessel_j(3, 2.5), epsilon = 1e-16);
        assert_abs_diff_eq!(bessel_j(4, -2.5), bessel_j(4, 2.5), epsilon = 1e-16);
    }

    #[test]
    fn test_circular_series_is_mean_anomaly() {
        let m = 1.234;
        assert_eq!(SeriesSolver.solve_mean(0.0, m, 20), m);
    }

    #[test]
    fn test_series_agrees_with_newton_for_low_eccentricity() {
        let newton = KeplerSolver::default();

        for &e in &[0.017, 0.093, 0.206, 0.29] {
            for k in 0..24 {
                let m = 2.0 * PI * k as f64 / 24.0;
                let exact = newton.solve_mean(e, m).unwrap();
                let series = SeriesSolver.solve_mean(e, m, 20);
                assert!((exact - series).abs() < 1e-6, "e={} M={} gap={}", e, m, (exact - series).abs());
            }
        }
    }

    #[test]
    fn test_series_gap_shrinks_with_terms() {
        let e = 0.5;
        let m = 0.7;
        let exact = KeplerSolver::default().solve_mean(e, m).unwrap();

        let gaps: Vec<f64> = [2, 5, 10, 20, 40]
            .iter()
            .map(|&n| (SeriesSolver.solve_mean(e, m, n) - exact).abs())
            .collect();

        assert!(gaps[4] < gaps[0], "gaps {:?}", gaps);
        assert!(gaps[4] < 1e-8, "gaps {:?}", gaps);
    }

    #[test]
    fn test_series_converges_for_high_eccentricity() {
        let newton = KeplerSolver::default();
        let m = 1.0;

        for &e in &[0.8, 0.9, 0.95] {
            let exact = newton.solve_mean(e, m).unwrap();
            let gap = |n: u32| (SeriesSolver.solve_mean(e, m, n) - exact).abs();

            for n in 1..=200 {
                assert!(gap(n) < 0.25, "e={} N={} gap={}", e, n, gap(n));
            }

            let gaps: Vec<f64> = [50, 100, 150, 200].iter().map(|&n| gap(n)).collect();
            assert!(gaps.windows(2).all(|w| w[1] < w[0]), "e={} gaps {:?}", e, gaps);
            assert!(gaps[3] < 1e-4, "e={} gaps {:?}", e, gaps);
        }
    }
}
