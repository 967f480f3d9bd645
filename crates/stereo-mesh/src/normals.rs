//! Per-vertex normal estimation strategies.

use log::trace;
use stereo_core::Tolerance;
use stereo_geometry::Surface;
use stereo_math::Vector3;

/// Returned when every sampled face around a vertex collapses.
pub const FALLBACK_NORMAL: Vector3 = Vector3::Z;

/// Neighbour offsets, in steps, walked cyclically around the center sample.
pub const HEX_OFFSETS: [(f64, f64); 6] = [
    (1.0, 0.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
];

/// Strategy for computing a unit normal at a parameter pair.
pub trait NormalEstimator: Send + Sync {
    fn normal_at(&self, surface: &dyn Surface, u: f64, v: f64) -> Vector3;
}

/// Smooth normal from the six triangles of a hexagonal neighbourhood, using
/// only point samples of the surface.
///
/// Each consecutive pair of edge vectors from the center gives one face normal.
/// Face normals are normalised individually, averaged, and the average
/// normalised again. Faces whose edges are parallel (zero cross product) are
/// left out of the average.
#[derive(Debug, Clone, Copy)]
pub struct HexNeighborhood {
    pub step: f64,
    pub tolerance: Tolerance,
}

impl HexNeighborhood {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            tolerance: Tolerance::default(),
        }
    }
}

impl NormalEstimator for HexNeighborhood {
    fn normal_at(&self, surface: &dyn Surface, u: f64, v: f64) -> Vector3 {
        let center = surface.point_at(u, v);
        let edges = HEX_OFFSETS
            .map(|(du, dv)| surface.point_at(u + du * self.step, v + dv * self.step) - center);

        let mut sum = Vector3::ZERO;
        let mut used = 0u32;
        for k in 0..edges.len() {
            let face = edges[k].cross(edges[(k + 1) % edges.len()]);
            let len = face.length();
            if !len.is_finite() || self.tolerance.is_zero(len) {
                continue;
            }
            sum += face / len;
            used += 1;
        }

        if used == 0 {
            trace!("no usable faces around ({u}, {v}), using fallback normal");
            return FALLBACK_NORMAL;
        }

        let average = sum / used as f64;
        let len = average.length();
        if self.tolerance.is_zero(len) {
            trace!("face normals cancel around ({u}, {v}), using fallback normal");
            return FALLBACK_NORMAL;
        }
        average / len
    }
}

/// Normal from the surface's closed-form partial derivatives, `dP/du x dP/dv`.
///
/// Falls back to a hexagonal estimate where the surface has no derivative or
/// the tangents are parallel (for example at a pole).
#[derive(Debug, Clone, Copy)]
pub struct AnalyticNormal {
    pub fallback: HexNeighborhood,
}

impl AnalyticNormal {
    pub fn new(step: f64) -> Self {
        Self {
            fallback: HexNeighborhood::new(step),
        }
    }
}

impl NormalEstimator for AnalyticNormal {
    fn normal_at(&self, surface: &dyn Surface, u: f64, v: f64) -> Vector3 {
        if let Some((du, dv)) = surface.partials(u, v) {
            let n = du.cross(dv);
            let len = n.length();
            if len.is_finite() && !self.fallback.tolerance.is_zero(len) {
                return n / len;
            }
        }
        self.fallback.normal_at(surface, u, v)
    }
}
