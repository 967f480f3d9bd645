pub mod generator;
pub mod grid;
pub mod mesh;
pub mod normals;

pub use generator::{generate_mesh, MeshGenerator};
pub use grid::ParamGrid;
pub use mesh::TriangleMesh;
pub use normals::{AnalyticNormal, HexNeighborhood, NormalEstimator};
