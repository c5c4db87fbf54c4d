//! Orbital plane to 3D orientation

use nalgebra::{Matrix3, Vector3};

use crate::elements::OrbitalElements;

/// Composite rotation R = R_tilt · R_periapsis
///
/// R_periapsis turns the ellipse by ω̄ inside its own plane (about z).
/// R_tilt then tilts the plane by i about the line of nodes
/// u = (cos Ω, sin Ω, 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationTransform {
    matrix: Matrix3<f64>,
}

impl OrientationTransform {
    pub fn new(inclination: f64, arg_periapsis: f64, ascending_node: f64) -> Self {
        let tilt = Self::tilt(inclination, ascending_node);
        let periapsis = Self::periapsis(arg_periapsis);
        Self { matrix: tilt * periapsis }
    }

    pub fn from_elements(elements: &OrbitalElements) -> Self {
        Self::new(elements.inclination(), elements.arg_periapsis(), elements.ascending_node())
    }

    /// Rotation by ω̄ about the out-of-plane axis
    pub fn periapsis(arg_periapsis: f64) -> Matrix3<f64> {
        let (s, c) = arg_periapsis.sin_cos();
        Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Rodrigues rotation by i about the unit line-of-nodes axis
    ///
    /// R = cos i · I + sin i · [u]ₓ + (1 - cos i) · u uᵀ
    pub fn tilt(inclination: f64, ascending_node: f64) -> Matrix3<f64> {
        let (uy, ux) = ascending_node.sin_cos();
        let (s, c) = inclination.sin_cos();
        let v = 1.0 - c;

        Matrix3::new(
            c + ux * ux * v, ux * uy * v, uy * s,
            ux * uy * v, c + uy * uy * v, -ux * s,
            -uy * s, ux * s, c,
        )
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Rotate a planar vector (x, y, 0) into 3D
    pub fn apply_planar(&self, x: f64, y: f64) -> Vector3<f64> {
        self.matrix * Vector3::new(x, y, 0.0)
    }

    /// Unit normal of the orbital plane, R · ẑ
    pub fn normal(&self) -> Vector3<f64> {
        self.matrix.column(2).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_proper_rotation(m: &Matrix3<f64>) {
        let identity = m.transpose() * m;
        assert_relative_eq!(identity, Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_angles_is_identity() {
        let r = OrientationTransform::new(0.0, 0.0, 0.0);
        assert_relative_eq!(*r.matrix(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_orthonormal_for_arbitrary_angles() {
        let angles = [-3.0, -1.1, 0.0, 0.3, 1.0, FRAC_PI_2, 2.5, PI, 4.0, 6.2];

        for &i in &angles {
            for &w in &angles {
                for &o in &angles {
                    let r = OrientationTransform::new(i, w, o);
                    assert_proper_rotation(r.matrix());
                }
            }
        }
    }

    #[test]
    fn test_line_of_nodes_is_fixed_by_tilt() {
        let node = 0.8;
        let tilt = OrientationTransform::tilt(0.6, node);
        let axis = Vector3::new(node.cos(), node.sin(), 0.0);

        assert_relative_eq!(tilt * axis, axis, epsilon = 1e-14);
    }

    #[test]
    fn test_periapsis_rotates_in_plane() {
        let r = OrientationTransform::new(0.0, FRAC_PI_2, 0.0);
        let v = r.apply_planar(1.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_polar_orbit_normal() {
        // 90° inclination about the x axis tips the plane normal onto -y
        let r = OrientationTransform::new(FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(r.normal(), Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-15);

        let v = r.apply_planar(0.0, 1.0);
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);
    }
}
