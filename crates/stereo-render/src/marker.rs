//! Texture marker moved over the surface by keyboard steps.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use stereo_geometry::{ParabolicTop, Surface};
use stereo_math::{remap, Point2, Point3};

pub const DEFAULT_MARKER_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerStep {
    /// `w`: toward `+h`
    AxialUp,
    /// `s`: toward `-h`
    AxialDown,
    /// `d`: toward `2*PI`
    AngularUp,
    /// `a`: toward `0`
    AngularDown,
}

impl MarkerStep {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::AxialUp),
            's' => Some(Self::AxialDown),
            'd' => Some(Self::AngularUp),
            'a' => Some(Self::AngularDown),
            _ => None,
        }
    }
}

/// Position `(u, v)` in surface parameter space, kept inside
/// `[-height, height] x [0, 2*PI]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub u: f64,
    pub v: f64,
    pub step: f64,
    pub height: f64,
}

impl Marker {
    pub fn new(u: f64, v: f64, step: f64, height: f64) -> Self {
        let mut marker = Self { u, v, step, height };
        marker.clamp();
        marker
    }

    pub fn apply(&mut self, step: MarkerStep) {
        match step {
            MarkerStep::AxialUp => self.u += self.step,
            MarkerStep::AxialDown => self.u -= self.step,
            MarkerStep::AngularUp => self.v += self.step,
            MarkerStep::AngularDown => self.v -= self.step,
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.u = self.u.max(-self.height).min(self.height);
        self.v = self.v.max(0.0).min(TAU);
    }

    /// Marker position in texture space, `[0, 1]` on both axes.
    pub fn texture_relative(&self) -> Point2 {
        Point2::new(
            remap(self.u, -self.height, self.height, 0.0, 1.0),
            remap(self.v, 0.0, TAU, 0.0, 1.0),
        )
    }

    pub fn position(&self, surface: &ParabolicTop) -> Point3 {
        surface.point_at(self.u, self.v)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(0.5, 0.5, DEFAULT_MARKER_STEP, ParabolicTop::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(MarkerStep::from_key('w'), Some(MarkerStep::AxialUp));
        assert_eq!(MarkerStep::from_key('S'), Some(MarkerStep::AxialDown));
        assert_eq!(MarkerStep::from_key('d'), Some(MarkerStep::AngularUp));
        assert_eq!(MarkerStep::from_key('a'), Some(MarkerStep::AngularDown));
        assert_eq!(MarkerStep::from_key('x'), None);
    }

    #[test]
    fn test_angular_step_clamps_at_full_turn() {
        let mut marker = Marker::new(0.9, 6.2, 0.1, 1.0);
        marker.apply(MarkerStep::AngularUp);
        assert_eq!(marker.v, TAU);
        marker.apply(MarkerStep::AngularUp);
        assert_eq!(marker.v, TAU);
        assert_eq!(marker.u, 0.9);
    }

    #[test]
    fn test_axial_step_clamps_at_height() {
        let mut marker = Marker::new(0.9, 6.2, 0.1, 1.0);
        marker.apply(MarkerStep::AxialUp);
        marker.apply(MarkerStep::AxialUp);
        assert_eq!(marker.u, 1.0);

        let mut marker = Marker::new(-0.95, 0.05, 0.1, 1.0);
        marker.apply(MarkerStep::AxialDown);
        marker.apply(MarkerStep::AngularDown);
        assert_eq!(marker.u, -1.0);
        assert_eq!(marker.v, 0.0);
    }

    #[test]
    fn test_new_clamps() {
        let marker = Marker::new(3.0, -1.0, 0.1, 2.0);
        assert_eq!((marker.u, marker.v), (2.0, 0.0));
    }

    #[test]
    fn test_texture_relative() {
        let marker = Marker::new(0.0, std::f64::consts::PI, 0.1, 1.0);
        let t = marker.texture_relative();
        assert!((t.x - 0.5).abs() < 1e-12);
        assert!((t.y - 0.5).abs() < 1e-12);

        let corner = Marker::new(1.0, TAU, 0.1, 1.0).texture_relative();
        assert!((corner.x - 1.0).abs() < 1e-12);
        assert!((corner.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_on_surface() {
        let surface = ParabolicTop::default();
        let marker = Marker::default();
        let p = marker.position(&surface);
        assert_eq!(p.z, 0.5);
        assert!((p.x.hypot(p.y) - surface.radius(0.5)).abs() < 1e-12);
    }
}
