pub mod aabb;
pub mod projection;

pub use aabb::Aabb3;
pub use glam::{DMat4, DQuat, DVec3, DVec4};
pub use projection::{axis_rotation, frustum, normal_matrix, orthographic, remap, translation};

pub type Point2 = glam::DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
