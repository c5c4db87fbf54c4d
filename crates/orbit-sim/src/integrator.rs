//! Fixed-step integration of the true anomaly
//!
//! Conservation of angular momentum gives the true-anomaly rate
//!
//! dθ/dt = c (1 + e cos θ)² / (a² (1 - e²)²)
//!
//! which is integrated from θ(0) = 0 with classic 4th-order Runge-Kutta.
//! There is no error control: the step count fixes both the cost of a query
//! and its accuracy (global error ~ h⁴).

use crate::elements::OrbitalElements;

/// Right-hand side of the true-anomaly equation for one orbit
#[derive(Clone, Copy, Debug)]
pub struct TrueAnomalyRate {
    elements: OrbitalElements,
    /// Specific angular momentum of the variant being integrated
    c: f64,
}

impl TrueAnomalyRate {
    pub fn new(elements: OrbitalElements, c: f64) -> Self {
        Self { elements, c }
    }

    pub fn angular_momentum(&self) -> f64 {
        self.c
    }

    /// dθ/dt at true anomaly θ
    pub fn rate(&self, true_anomaly: f64) -> f64 {
        self.elements.true_anomaly_rate(self.c, true_anomaly)
    }
}

/// Classic RK4 with a fixed number of equal steps
#[derive(Clone, Copy, Debug)]
pub struct AnomalyIntegrator {
    steps: usize,
}

impl AnomalyIntegrator {
    pub fn new(steps: usize) -> Self {
        Self { steps: steps.max(1) }
    }

    /// Integrate y' = f(t, y) from (t0, y0) to t1
    pub fn integrate_with<F>(&self, f: F, t0: f64, y0: f64, t1: f64) -> f64
    where
        F: Fn(f64, f64) -> f64,
    {
        let h = (t1 - t0) / self.steps as f64;
        if h == 0.0 {
            return y0;
        }

        (0..self.steps).fold(y0, |y, n| {
            let t = t0 + n as f64 * h;
            rk4_step(&f, t, y, h)
        })
    }

    /// True anomaly θ(time) with θ(0) = 0
    pub fn true_anomaly(&self, rate: &TrueAnomalyRate, time: f64) -> f64 {
        self.integrate_with(|_, theta| rate.rate(theta), 0.0, 0.0, time)
    }
}

fn rk4_step<F>(f: &F, t: f64, y: f64, h: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = f(t, y);
    let k2 = f(t + h / 2.0, y + k1 * (h / 2.0));
    let k3 = f(t + h / 2.0, y + k2 * (h / 2.0));
    let k4 = f(t + h, y + k3 * h);

    y + (k1 + 2.0 * k2 + 2.0 * k3 + k4) * (h / 6.0)
}
