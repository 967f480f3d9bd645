use std::f64::consts::PI;
use std::ops::RangeInclusive;

use log::warn;
use serde::{Deserialize, Serialize};
use stereo_config::MAX_EYE_SEPARATION;
use stereo_math::{frustum, translation, DMat4};

/// Smallest convergence distance used when building a frustum.
pub const MIN_CONVERGENCE: f64 = 1e-6;
/// Field of view is kept inside `[MIN_FOV, PI - MIN_FOV]` when building a frustum.
pub const MIN_FOV: f64 = 1e-4;
pub const MIN_NEAR: f64 = 1e-6;
pub const MIN_DEPTH_RANGE: f64 = 1e-6;
pub const MIN_ASPECT: f64 = 1e-6;
/// Floor on the half-width of the convergence-plane window, keeps the eye
/// frusta from collapsing when the separation dwarfs it.
pub const MIN_HALF_WIDTH: f64 = 1e-9;

/// Ranges offered by the live controls.
pub const CONVERGENCE_RANGE: RangeInclusive<f64> = 10.0..=1000.0;
pub const EYE_SEPARATION_RANGE: RangeInclusive<f64> = 0.0..=MAX_EYE_SEPARATION;
pub const FOV_RANGE: RangeInclusive<f64> = 0.0..=PI;
pub const NEAR_RANGE: RangeInclusive<f64> = 0.1..=20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Draw order within a frame.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];
}

/// Near-plane extents of one eye's frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

/// Projection and eye-offset view for one eye, rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: DMat4,
    pub view: DMat4,
}

impl FrameMatrices {
    /// `projection * view * model_view`.
    pub fn combine(&self, model_view: DMat4) -> DMat4 {
        self.projection * self.view * model_view
    }
}

/// Stereo camera with parallel eye axes and asymmetric frusta that converge
/// on a plane at distance `convergence`.
///
/// Each eye is displaced sideways by half the eye separation and its frustum
/// is sheared back toward the center, so points at the convergence distance
/// project to the same place in both eyes (zero parallax). Nearer points get
/// negative parallax, farther ones positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereoCamera {
    pub convergence: f64,
    pub eye_separation: f64,
    pub aspect_ratio: f64,
    /// Vertical field of view in radians
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl StereoCamera {
    pub fn new(
        convergence: f64,
        eye_separation: f64,
        aspect_ratio: f64,
        fov: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            convergence,
            eye_separation,
            aspect_ratio,
            fov,
            near,
            far,
        }
    }

    /// Same as [`StereoCamera::new`] with the field of view given in degrees.
    pub fn from_degrees(
        convergence: f64,
        eye_separation: f64,
        aspect_ratio: f64,
        fov_degrees: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self::new(
            convergence,
            eye_separation,
            aspect_ratio,
            fov_degrees.to_radians(),
            near,
            far,
        )
    }

    /// Near-plane bounds of `eye`'s frustum.
    ///
    /// Out-of-range parameters are clamped here (convergence, separation, near,
    /// field of view, aspect, depth range) so a bad control value degrades the
    /// picture instead of producing NaNs.
    pub fn bounds(&self, eye: Eye) -> FrustumBounds {
        let convergence = self.convergence.max(MIN_CONVERGENCE);
        let fov = self.fov.max(MIN_FOV).min(PI - MIN_FOV);
        let near = self.near.max(MIN_NEAR);
        let far = self.far.max(near + MIN_DEPTH_RANGE);
        let aspect = self.aspect_ratio.max(MIN_ASPECT);
        let half_separation = self.half_separation();

        let tan_half_fov = (fov / 2.0).tan();
        let top = near * tan_half_fov;
        let a = (aspect * tan_half_fov * convergence).max(MIN_HALF_WIDTH);
        let b = a - half_separation;
        let c = a + half_separation;

        let (left, right) = match eye {
            Eye::Left => (-b * near / convergence, c * near / convergence),
            Eye::Right => (-c * near / convergence, b * near / convergence),
        };

        FrustumBounds {
            left,
            right,
            bottom: -top,
            top,
            near,
            far,
        }
    }

    /// World translation applied for `eye`: the left eye moves the world
    /// right by half the separation, the right eye moves it left.
    pub fn eye_offset(&self, eye: Eye) -> f64 {
        let half_separation = self.half_separation();
        match eye {
            Eye::Left => half_separation,
            Eye::Right => -half_separation,
        }
    }

    /// Half the eye separation, held inside [`EYE_SEPARATION_RANGE`].
    fn half_separation(&self) -> f64 {
        let separation = self
            .eye_separation
            .max(*EYE_SEPARATION_RANGE.start())
            .min(*EYE_SEPARATION_RANGE.end());
        separation / 2.0
    }

    pub fn frustum(&self, eye: Eye) -> FrameMatrices {
        let b = self.bounds(eye);
        FrameMatrices {
            projection: frustum(b.left, b.right, b.bottom, b.top, b.near, b.far),
            view: translation(self.eye_offset(eye), 0.0, 0.0),
        }
    }

    pub fn left_frustum(&self) -> FrameMatrices {
        self.frustum(Eye::Left)
    }

    pub fn right_frustum(&self) -> FrameMatrices {
        self.frustum(Eye::Right)
    }

    /// Symmetric frustum of a single eye midway between the two.
    pub fn center_frustum(&self) -> FrameMatrices {
        Self {
            eye_separation: 0.0,
            ..*self
        }
        .frustum(Eye::Left)
    }

    pub fn set_convergence(&mut self, value: f64) {
        self.convergence = clamp_control("convergence", value, &CONVERGENCE_RANGE);
    }

    pub fn set_eye_separation(&mut self, value: f64) {
        self.eye_separation = clamp_control("eye separation", value, &EYE_SEPARATION_RANGE);
    }

    pub fn set_fov(&mut self, value: f64) {
        self.fov = clamp_control("field of view", value, &FOV_RANGE);
    }

    pub fn set_near(&mut self, value: f64) {
        self.near = clamp_control("near clip", value, &NEAR_RANGE);
    }

    /// Match the aspect ratio to a viewport; zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect_ratio = width as f64 / height as f64;
    }
}

impl Default for StereoCamera {
    /// Convergence 10, separation 0.1, square aspect, 90 degree field of view,
    /// depth range 0.1 to 100.
    fn default() -> Self {
        Self::from_degrees(10.0, 0.1, 1.0, 90.0, 0.1, 100.0)
    }
}

fn clamp_control(name: &str, value: f64, range: &RangeInclusive<f64>) -> f64 {
    let clamped = value.max(*range.start()).min(*range.end());
    if clamped != value {
        warn!(
            "{name} {value} outside [{}, {}], using {clamped}",
            range.start(),
            range.end()
        );
    }
    clamped
}
