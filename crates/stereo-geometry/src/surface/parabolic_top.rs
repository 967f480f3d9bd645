//! Parabolic humming-top surface.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use stereo_math::{Point3, Vector3};

use super::Surface;

/// A surface of revolution whose radius is a parabola in the axial parameter,
/// pinched to a point at both ends.
///
/// Parameterized by axial `u` in `[-height, height]` and angle `v` in `[0, 2*PI)`:
/// `r(u) = (|u| - height)^2 / (2 * focal)`,
/// `P(u, v) = (r(u) cos(v), r(u) sin(v), u)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParabolicTop {
    pub height: f64,
    pub focal: f64,
}

impl ParabolicTop {
    pub const DEFAULT_HEIGHT: f64 = 1.0;
    pub const DEFAULT_FOCAL: f64 = 1.0;

    pub fn new(height: f64, focal: f64) -> Self {
        Self { height, focal }
    }

    /// Distance from the axis at axial parameter `u`.
    pub fn radius(&self, u: f64) -> f64 {
        (u.abs() - self.height).powi(2) / (2.0 * self.focal)
    }
}

impl Default for ParabolicTop {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HEIGHT, Self::DEFAULT_FOCAL)
    }
}

impl Surface for ParabolicTop {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let r = self.radius(u);
        Point3::new(r * v.cos(), r * v.sin(), u)
    }

    fn domain_u(&self) -> (f64, f64) {
        (-self.height, self.height)
    }

    fn domain_v(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn partials(&self, u: f64, v: f64) -> Option<(Vector3, Vector3)> {
        // |u| has no derivative at the waist
        if u == 0.0 {
            return None;
        }
        let r = self.radius(u);
        let dr = u.signum() * (u.abs() - self.height) / self.focal;
        let (sin_v, cos_v) = v.sin_cos();
        Some((
            Vector3::new(dr * cos_v, dr * sin_v, 1.0),
            Vector3::new(-r * sin_v, r * cos_v, 0.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_z_is_axial_parameter() {
        let top = ParabolicTop::default();
        for i in 0..=20 {
            let u = -1.0 + i as f64 * 0.1;
            for j in 0..63 {
                let v = j as f64 * 0.1;
                let p = top.point_at(u, v);
                assert_eq!(p.z, u);
                let r = top.radius(u);
                assert_abs_diff_eq!(p.x * p.x + p.y * p.y, r * r, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_pinched_at_ends_widest_at_waist() {
        let top = ParabolicTop::default();
        assert_eq!(top.radius(1.0), 0.0);
        assert_eq!(top.radius(-1.0), 0.0);
        assert_abs_diff_eq!(top.radius(0.0), 0.5);
        assert_eq!(top.radius(0.3), top.radius(-0.3));
    }

    #[test]
    fn test_partials_match_finite_differences() {
        let top = ParabolicTop::default();
        let (u, v, h) = (0.4, 1.3, 1e-6);
        let (du, dv) = top.partials(u, v).unwrap();
        let fd_u = (top.point_at(u + h, v) - top.point_at(u - h, v)) / (2.0 * h);
        let fd_v = (top.point_at(u, v + h) - top.point_at(u, v - h)) / (2.0 * h);
        assert!((du - fd_u).length() < 1e-6, "du={du:?} fd={fd_u:?}");
        assert!((dv - fd_v).length() < 1e-6, "dv={dv:?} fd={fd_v:?}");

        let (du, _) = top.partials(-0.4, v).unwrap();
        let fd_u = (top.point_at(-0.4 + h, v) - top.point_at(-0.4 - h, v)) / (2.0 * h);
        assert!((du - fd_u).length() < 1e-6);
    }

    #[test]
    fn test_no_partials_at_waist() {
        assert!(ParabolicTop::default().partials(0.0, 0.5).is_none());
    }
}
