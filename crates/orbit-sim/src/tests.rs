use crate::body::Body;
use crate::catalog::Planet;
use crate::config::EngineConfig;
use crate::elements::OrbitalElements;
use crate::error::OrbitError;
use crate::orientation::OrientationTransform;
use approx::assert_relative_eq;
use nalgebra::Matrix3;
use std::f64::consts::PI;
use std::sync::Arc;

fn sample_times(period: f64, n: usize) -> Vec<f64> {
    (0..n).map(|k| period * k as f64 / n as f64 + 0.37).collect()
}

fn earth_flat() -> Body {
    Body::new("Earth", 0.017, 1.0, 365.26, 5.9742e24, 0.0, 0.0, 0.0).unwrap()
}

#[test]
fn test_concrete_earth_periapsis() {
    let earth = earth_flat();
    let p = earth.position(0.0).unwrap();

    assert!((p.x - 0.983).abs() < 1e-12, "x = {}", p.x);
    assert!(p.y.abs() < 1e-15 && p.z.abs() < 1e-15);
    assert_eq!(*earth.rotation(), Matrix3::identity());
}

#[test]
fn test_energy_conservation() {
    for planet in Planet::all() {
        let body = planet.body().unwrap();
        let energy = body.energy();

        for t in sample_times(body.period(), 25) {
            let e_t = body.energy_from_time(t).unwrap();
            assert!(((e_t - energy) / energy).abs() < 1e-9,
                "{} at t={}: {} vs {}", body, t, e_t, energy);
        }
    }
}

#[test]
fn test_angular_momentum_conservation() {
    for planet in Planet::inner() {
        let body = planet.body().unwrap();
        let c = body.angular_momentum_constant();

        for t in sample_times(body.period(), 12) {
            let l = body.angular_moment(t).unwrap().norm();
            assert!(((l - c) / c).abs() < 1e-9, "{} at t={}: |L|={} c={}", body, t, l, c);
        }
    }
}

#[test]
fn test_true_anomaly_paths_agree() {
    for planet in [Planet::Mercury, Planet::Mars, Planet::Jupiter] {
        let body = planet.body().unwrap();

        for t in sample_times(body.period(), 15) {
            let integrated = body.real_anomaly(t);
            let closed = body.real_anomaly_from_eccentric(t).unwrap();
            assert!((integrated - closed).abs() < 1e-6,
                "{} at t={}: {} vs {}", body, t, integrated, closed);
        }
    }
}

#[test]
fn test_series_tracks_newton_below_03() {
    let body = Body::new("moderate", 0.28, 2.0, 1000.0, 1.0e22, 10.0, 20.0, 30.0).unwrap();

    for t in sample_times(body.period(), 30) {
        let newton = body.eccentric_anomaly(t).unwrap();
        let series = body.eccentric_anomaly_via_series(t, 20);
        assert!((newton - series).abs() < 1e-6, "t={}: {} vs {}", t, newton, series);
    }
}

#[test]
fn test_series_gap_shrinks_as_terms_grow() {
    let body = Body::new("eccentric", 0.6, 1.0, 100.0, 1.0, 0.0, 0.0, 0.0).unwrap();
    let t = 13.0;
    let newton = body.eccentric_anomaly(t).unwrap();

    let coarse = (body.eccentric_anomaly_via_series(t, 3) - newton).abs();
    let fine = (body.eccentric_anomaly_via_series(t, 60) - newton).abs();
    assert!(fine < coarse, "coarse={} fine={}", coarse, fine);
    assert!(fine < 1e-8, "fine={}", fine);
}

#[test]
fn test_periodicity() {
    for planet in Planet::all() {
        let body = planet.body().unwrap();
        let start = body.position(0.0).unwrap();
        let end = body.position(body.period()).unwrap();
        assert_relative_eq!(start, end, epsilon = 1e-12);
    }
}

#[test]
fn test_circular_orbit_eccentric_equals_mean() {
    let body = Body::new("ring", 0.0, 1.0, 365.26, 1.0, 5.0, 10.0, 15.0).unwrap();
    let speed = body.speed_module(0.0).unwrap();

    for t in sample_times(365.26, 20) {
        let m = 2.0 * PI * body.time_in_period(t) / 365.26;
        assert_eq!(body.eccentric_anomaly(t).unwrap(), m);
        assert_relative_eq!(body.speed_module(t).unwrap(), speed, max_relative = 1e-12);
    }
}

#[test]
fn test_rotation_is_proper_for_catalog_and_random_angles() {
    let mut matrices: Vec<Matrix3<f64>> = Planet::all()
        .iter()
        .map(|p| *p.body().unwrap().rotation())
        .collect();

    for k in 0..50 {
        let x = k as f64;
        matrices.push(*OrientationTransform::new(x * 0.731, x * 1.913, x * -2.417).matrix());
    }

    for m in matrices {
        let err = (m.transpose() * m - Matrix3::identity()).abs().max();
        assert!(err < 1e-12, "RᵀR deviates by {}", err);
        assert!((m.determinant() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_get_orbit_closed_loop() {
    let body = Planet::Mars.body().unwrap();
    let orbit = body.get_orbit(60).unwrap();

    assert_eq!(orbit.len(), 61);
    assert_eq!(orbit.points()[0], orbit.points()[60]);
    assert_relative_eq!(orbit.points()[0], body.position(0.0).unwrap(), epsilon = 1e-15);
}

#[test]
fn test_get_orbit_ignores_later_sample_count() {
    let body = earth_flat();
    let first = body.get_orbit(10).unwrap();
    let second = body.get_orbit(50).unwrap();

    assert_eq!(first.len(), 11);
    assert_eq!(second.len(), 11);
    assert_eq!(second.samples(), 10);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_orbit_caches_are_independent() {
    let body = earth_flat();
    let orbit = body.get_orbit(10).unwrap();
    let planar = body.get_orbit_2d(30).unwrap();
    let two_body = body.get_orbit_2bodies(20).unwrap();

    assert_eq!(orbit.len(), 11);
    assert_eq!(planar.len(), 31);
    assert_eq!(two_body.len(), 21);
}

#[test]
fn test_convergence_error_surfaces_from_queries() {
    let mut config = EngineConfig::default();
    config.solver.max_iterations = 1;
    let elements = OrbitalElements::from_degrees(0.9, 1.0, 100.0, 0.0, 0.0, 0.0).unwrap();
    let body = Body::from_elements("eccentric", 1.0, elements, config).unwrap();

    assert!(matches!(body.position(10.0), Err(OrbitError::Convergence { .. })));
    assert!(matches!(body.get_orbit(8), Err(OrbitError::Convergence { .. })));
    // integrator path has no solver in it
    assert!(body.real_anomaly(10.0) > 0.0);
}

#[test]
fn test_body_is_shareable_across_threads() {
    let body = Planet::Venus.body().unwrap();

    let orbits: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| body.get_orbit(40).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(orbits.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
