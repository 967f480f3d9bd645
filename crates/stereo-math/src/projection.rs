//! Projection and transform builders with OpenGL clip-space conventions.
//!
//! All matrices are column-major `DMat4` and compose right-to-left:
//! `a * b` transforms by `b` first, then `a`.

use stereo_core::Tolerance;

use crate::{DMat4, Vector3};

/// Off-axis perspective frustum, equivalent to `glFrustum`.
///
/// `left`/`right` and `bottom`/`top` are the extents of the near plane at
/// distance `near`. Unlike a symmetric perspective the view axis need not pass
/// through the middle of the near plane, which is what lets each stereo eye
/// shear toward a shared convergence plane. Callers must keep
/// `left != right`, `bottom != top` and `near != far`.
pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> DMat4 {
    let dx = right - left;
    let dy = top - bottom;
    let dz = far - near;

    DMat4::from_cols_array(&[
        2.0 * near / dx,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 * near / dy,
        0.0,
        0.0,
        (left + right) / dx,
        (top + bottom) / dy,
        -(far + near) / dz,
        -1.0,
        0.0,
        0.0,
        -2.0 * near * far / dz,
        0.0,
    ])
}

/// Orthographic projection mapping the given box to the `[-1, 1]` clip cube.
pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> DMat4 {
    DMat4::orthographic_rh_gl(left, right, bottom, top, near, far)
}

pub fn translation(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_translation(Vector3::new(x, y, z))
}

/// Rotation by `angle` radians about `axis`. The axis does not need to be unit length.
pub fn axis_rotation(axis: Vector3, angle: f64) -> DMat4 {
    match axis.try_normalize() {
        Some(axis) => DMat4::from_axis_angle(axis, angle),
        None => DMat4::IDENTITY,
    }
}

/// Inverse-transpose of `model_view`, used to carry normals into view space.
///
/// A singular matrix has no inverse; identity is returned instead so a
/// collapsed rotator state cannot poison the frame with NaNs.
pub fn normal_matrix(model_view: DMat4) -> DMat4 {
    if Tolerance::default().is_zero(model_view.determinant()) {
        return DMat4::IDENTITY;
    }
    model_view.inverse().transpose()
}

/// Linearly remap `value` from `[from_min, from_max]` to `[to_min, to_max]`.
///
/// Values outside the source range extrapolate; nothing is clamped.
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let t = (value - from_min) / (from_max - from_min);
    to_min + t * (to_max - to_min)
}
