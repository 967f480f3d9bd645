use log::{debug, info};
use stereo_config::{parse_hex_color, MaterialConfig, NormalMode, SceneConfig};
use stereo_core::Result;
use stereo_geometry::{MarkerSphere, ParabolicTop};
use stereo_math::{DMat4, DQuat, Point3, Vector3};
use stereo_mesh::{AnalyticNormal, MeshGenerator, TriangleMesh};

use crate::camera::StereoCamera;
use crate::marker::{Marker, MarkerStep};

/// Parameter step of the gizmo sphere mesh.
pub const GIZMO_STEP: f64 = 0.1;

/// Lighting colours, linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Material {
    pub fn from_config(config: &MaterialConfig) -> Result<Self> {
        Ok(Self {
            ambient: parse_hex_color(&config.ambient)?,
            diffuse: parse_hex_color(&config.diffuse)?,
            specular: parse_hex_color(&config.specular)?,
        })
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.78, 0.63, 0.39],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// User-controlled view: free rotation plus the texture marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub rotation: DQuat,
    pub marker: Marker,
}

impl ViewState {
    pub fn new(marker: Marker) -> Self {
        Self {
            rotation: DQuat::IDENTITY,
            marker,
        }
    }

    /// Rotation matrix handed to the model transform each frame.
    pub fn rotator_view(&self) -> DMat4 {
        DMat4::from_quat(self.rotation)
    }

    /// Rotate by `angle` radians about `axis`, applied after the current rotation.
    /// A zero axis is ignored.
    pub fn rotate(&mut self, axis: Vector3, angle: f64) {
        if let Some(axis) = axis.try_normalize() {
            self.rotation = (DQuat::from_axis_angle(axis, angle) * self.rotation).normalize();
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Marker::default())
    }
}

/// One of the four live camera controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraControl {
    Convergence(f64),
    EyeSeparation(f64),
    /// Radians
    FieldOfView(f64),
    NearClip(f64),
}

/// Input applied to a scene between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    Marker(MarkerStep),
    Camera(CameraControl),
    Rotate { axis: Vector3, angle: f64 },
    SetTextureAngle(f64),
}

impl InputCommand {
    /// Marker keys `w`, `s`, `a`, `d`.
    pub fn from_key(key: char) -> Option<Self> {
        MarkerStep::from_key(key).map(Self::Marker)
    }
}

/// Everything a frame needs, owned in one place and lent to each tick.
#[derive(Debug, Clone)]
pub struct Scene {
    pub surface: ParabolicTop,
    pub mesh: TriangleMesh,
    /// Small sphere drawn at the light and marker positions
    pub gizmo: Option<TriangleMesh>,
    pub camera: StereoCamera,
    pub view: ViewState,
    pub material: Material,
    pub texture_angle: f64,
}

impl Scene {
    /// Scene with default camera, view and material.
    pub fn new(surface: ParabolicTop, mesh: TriangleMesh) -> Self {
        let marker = Marker {
            height: surface.height,
            ..Marker::default()
        };
        Self {
            surface,
            mesh,
            gizmo: None,
            camera: StereoCamera::default(),
            view: ViewState::new(marker),
            material: Material::default(),
            texture_angle: 0.0,
        }
    }

    /// Validate `config` and build the scene it describes, tessellating the
    /// surface (and the gizmo sphere, if enabled).
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        stereo_config::validate(config)?;

        let surface = ParabolicTop::new(config.surface.height, config.surface.focal);
        let step = config.mesh.step;
        let generator = match config.mesh.normals {
            NormalMode::Hex => MeshGenerator::new(step),
            NormalMode::Analytic => {
                MeshGenerator::with_estimator(step, Box::new(AnalyticNormal::new(step)))
            }
        };
        let mesh = generator.generate(&surface)?;

        let gizmo = if config.render.show_gizmos {
            let estimator = Box::new(AnalyticNormal::new(GIZMO_STEP));
            let generator = MeshGenerator::with_estimator(GIZMO_STEP, estimator);
            Some(generator.generate(&MarkerSphere::default())?)
        } else {
            None
        };

        let cam = &config.camera;
        let camera = StereoCamera::from_degrees(
            cam.convergence,
            cam.eye_separation,
            cam.aspect_ratio,
            cam.fov_degrees,
            cam.near,
            cam.far,
        );

        let marker = Marker::new(
            config.marker.u,
            config.marker.v,
            config.marker.step,
            surface.height,
        );

        info!(
            "scene ready: {} triangles, {:?} normals, gizmos {}",
            mesh.triangle_count(),
            config.mesh.normals,
            if gizmo.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            surface,
            mesh,
            gizmo,
            camera,
            view: ViewState::new(marker),
            material: Material::from_config(&config.material)?,
            texture_angle: config.render.texture_angle,
        })
    }

    /// Surface point under the texture marker.
    pub fn marker_position(&self) -> Point3 {
        self.view.marker.position(&self.surface)
    }

    /// Apply one input. Never touches the mesh.
    pub fn apply(&mut self, command: InputCommand) {
        debug!("input {command:?}");
        match command {
            InputCommand::Marker(step) => self.view.marker.apply(step),
            InputCommand::Camera(control) => match control {
                CameraControl::Convergence(v) => self.camera.set_convergence(v),
                CameraControl::EyeSeparation(v) => self.camera.set_eye_separation(v),
                CameraControl::FieldOfView(v) => self.camera.set_fov(v),
                CameraControl::NearClip(v) => self.camera.set_near(v),
            },
            InputCommand::Rotate { axis, angle } => self.view.rotate(axis, angle),
            InputCommand::SetTextureAngle(angle) => {
                if angle.is_finite() {
                    self.texture_angle = angle;
                }
            }
        }
    }
}
