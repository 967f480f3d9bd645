//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Root configuration: everything needed to build a scene at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub surface: SurfaceConfig,
    pub mesh: MeshConfig,
    pub camera: CameraConfig,
    pub material: MaterialConfig,
    pub marker: MarkerConfig,
    pub render: RenderConfig,
}

/// Shape constants of the parabolic top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Half-height `h`: the axial parameter spans `[-h, h]`
    pub height: f64,
    /// Parabola parameter `p`
    pub focal: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            height: 1.0,
            focal: 1.0,
        }
    }
}

/// How per-vertex normals are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalMode {
    /// Six-neighbour finite differences of surface samples
    #[default]
    Hex,
    /// Closed-form partial derivatives, falling back to `Hex` where undefined
    Analytic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub step: f64,
    pub normals: NormalMode,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            normals: NormalMode::Hex,
        }
    }
}

/// Startup values of the stereo camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub convergence: f64,
    pub eye_separation: f64,
    pub aspect_ratio: f64,
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            convergence: 10.0,
            eye_separation: 0.1,
            aspect_ratio: 1.0,
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Lighting colours handed to the shader, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub ambient: String,
    pub diffuse: String,
    pub specular: String,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ambient: "#1a1a1a".into(),
            diffuse: "#c8a064".into(),
            specular: "#ffffff".into(),
        }
    }
}

/// Initial position and keyboard step of the texture marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub u: f64,
    pub v: f64,
    pub step: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            u: 0.5,
            v: 0.5,
            step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Texture rotation angle passed through to the shader, in radians
    pub texture_angle: f64,
    /// Draw small spheres at the light and marker positions
    pub show_gizmos: bool,
}
