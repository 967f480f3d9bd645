//! Surface traits and implementations.

mod parabolic_top;
mod sphere;

use stereo_math::{Point3, Vector3};

pub use parabolic_top::ParabolicTop;
pub use sphere::MarkerSphere;

/// Trait for parametric surfaces in 3D space.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);

    /// Closed-form partial derivatives `(dP/du, dP/dv)` at `(u, v)`, if the
    /// surface is differentiable there.
    fn partials(&self, _u: f64, _v: f64) -> Option<(Vector3, Vector3)> {
        None
    }
}
