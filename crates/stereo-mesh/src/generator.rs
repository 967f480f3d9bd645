//! Uniform grid tessellation of a parametric surface into a non-indexed mesh.

use log::debug;
use rayon::prelude::*;
use stereo_core::Result;
use stereo_geometry::Surface;

use crate::grid::ParamGrid;
use crate::normals::{HexNeighborhood, NormalEstimator};
use crate::TriangleMesh;

/// Default parameter step for both grid directions.
pub const DEFAULT_STEP: f64 = 0.1;

/// Walks a surface's parameter domain at a fixed step and emits two triangles
/// per grid cell, with normals from a pluggable [`NormalEstimator`].
pub struct MeshGenerator {
    step: f64,
    estimator: Box<dyn NormalEstimator>,
}

impl MeshGenerator {
    /// Generator using the six-neighbour finite-difference estimator at the grid step.
    pub fn new(step: f64) -> Self {
        Self {
            step,
            estimator: Box::new(HexNeighborhood::new(step)),
        }
    }

    pub fn with_estimator(step: f64, estimator: Box<dyn NormalEstimator>) -> Self {
        Self { step, estimator }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Tessellate `surface`.
    ///
    /// Corners are evaluated from grid indices, so neighbouring cells share
    /// bit-identical vertices. Samples are computed in parallel and collected
    /// in grid order; the output depends only on the surface, step and
    /// estimator.
    pub fn generate(&self, surface: &dyn Surface) -> Result<TriangleMesh> {
        let grid = ParamGrid::new(surface, self.step)?;
        let corners = grid.corners();

        let positions = corners
            .par_iter()
            .map(|&(u, v)| surface.point_at(u, v))
            .collect();
        let normals = corners
            .par_iter()
            .map(|&(u, v)| self.estimator.normal_at(surface, u, v))
            .collect();
        let uvs = corners
            .iter()
            .map(|&(u, v)| grid.texture_coord(u, v))
            .collect();

        let mesh = TriangleMesh {
            positions,
            normals,
            uvs,
        };
        debug!(
            "tessellated {}x{} cells at step {}: {} triangles",
            grid.u_count(),
            grid.v_count(),
            self.step,
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

impl Default for MeshGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

/// Tessellate `surface` at `step` with hexagonal finite-difference normals.
pub fn generate_mesh(surface: &dyn Surface, step: f64) -> Result<TriangleMesh> {
    MeshGenerator::new(step).generate(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereo_core::Validate;
    use stereo_geometry::ParabolicTop;
    use stereo_math::{Point2, Point3};

    #[test]
    fn test_first_cell_layout() {
        let top = ParabolicTop::default();
        let mesh = generate_mesh(&top, 0.5).unwrap();

        let expected = [
            top.point_at(-1.0, 0.0),
            top.point_at(-0.5, 0.0),
            top.point_at(-1.0, 0.5),
            top.point_at(-1.0, 0.5),
            top.point_at(-0.5, 0.0),
            top.point_at(-0.5, 0.5),
        ];
        assert_eq!(&mesh.positions[..6], &expected);

        assert_eq!(mesh.uvs[0], Point2::new(0.0, 0.0));
        assert_eq!(mesh.uvs[1], Point2::new(0.25, 0.0));
        assert_eq!(mesh.uvs[5].x, 0.25);
    }

    #[test]
    fn test_second_cell_advances_v() {
        let top = ParabolicTop::default();
        let mesh = generate_mesh(&top, 0.5).unwrap();
        assert_eq!(mesh.positions[6], top.point_at(-1.0, 0.5));
        assert_eq!(mesh.positions[11], top.point_at(-0.5, 1.0));
    }

    #[test]
    fn test_default_mesh_is_valid() {
        let mesh = MeshGenerator::default().generate(&ParabolicTop::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 20 * 63);
        mesh.validate().unwrap();
        assert!(mesh.positions.iter().all(|p| p.z >= -1.0 && p.z <= 1.0 + 1e-12));
        assert!(mesh.positions.iter().any(|p| *p == Point3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_invalid_step_is_error() {
        assert!(generate_mesh(&ParabolicTop::default(), 0.0).is_err());
    }
}
