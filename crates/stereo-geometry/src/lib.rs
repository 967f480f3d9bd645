//! stereotop geometry: parametric surfaces sampled by the tessellator.

pub mod surface;

pub use surface::{MarkerSphere, ParabolicTop, Surface};
