//! Small sphere used to visualise points of interest in the scene.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use stereo_math::{Point3, Vector3};

use super::Surface;

/// A sphere parameterized by longitude `u` in `[0, 2*PI)` and colatitude `v`
/// in `[0, PI)` measured from the `-Z` pole.
///
/// `P(u, v) = center + radius * (cos(u) sin(v), sin(u) sin(v), -cos(v))`,
/// which makes `dP/du x dP/dv` point outward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSphere {
    pub center: Point3,
    pub radius: f64,
}

impl MarkerSphere {
    pub const DEFAULT_RADIUS: f64 = 0.05;

    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Default for MarkerSphere {
    fn default() -> Self {
        Self::new(Point3::ZERO, Self::DEFAULT_RADIUS)
    }
}

impl Surface for MarkerSphere {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();
        self.center + self.radius * Vector3::new(cos_u * sin_v, sin_u * sin_v, -cos_v)
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        (0.0, PI)
    }

    fn partials(&self, u: f64, v: f64) -> Option<(Vector3, Vector3)> {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();
        Some((
            self.radius * Vector3::new(-sin_u * sin_v, cos_u * sin_v, 0.0),
            self.radius * Vector3::new(cos_u * cos_v, sin_u * cos_v, sin_v),
        ))
    }
}
