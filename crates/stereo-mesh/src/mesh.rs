use stereo_core::{Result, StereoError, Validate};
use stereo_math::{Aabb3, Point2, Point3, Vector3};

/// Non-indexed triangle mesh: every consecutive run of three vertices is one
/// triangle, and vertices shared between triangles are stored once per corner.
///
/// `positions`, `normals` and `uvs` are parallel: entry `i` of each describes
/// the same corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
        }
    }

    /// Number of vertices (triangle corners) in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> Option<[Point3; 3]> {
        let base = index.checked_mul(3)?;
        let corners = self.positions.get(base..base + 3)?;
        Some([corners[0], corners[1], corners[2]])
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }
}

impl Validate for TriangleMesh {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(StereoError::Geometry(format!(
                "attribute length mismatch: {} positions, {} normals, {} uvs",
                n,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if n % 3 != 0 {
            return Err(StereoError::Geometry(format!(
                "{n} vertices do not form whole triangles"
            )));
        }
        if let Some(i) = self.normals.iter().position(|n| !n.is_finite()) {
            return Err(StereoError::Geometry(format!("non-finite normal at vertex {i}")));
        }
        Ok(())
    }
}
