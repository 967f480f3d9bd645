//! Per-frame anaglyph compositing and the cooperative frame loop.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, trace};
use stereo_core::Result;
use stereo_math::{
    axis_rotation, normal_matrix, orthographic, translation, DMat4, Point3, Vector3,
};

use crate::backend::{ColorMask, GeometryHandle, RenderBackend};
use crate::camera::Eye;
use crate::pipeline::{
    mat4_to_f32, rgb_padded, vec2_to_f32, vec3_padded, FrameUniforms, GeometryBuffers,
};
use crate::scene::{InputCommand, Scene};

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const SURFACE_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
/// The model sits this far in front of the eyes.
pub const MODEL_OFFSET: Vector3 = Vector3::new(0.0, 0.0, -3.0);
/// Fixed tilt applied before the user's rotation.
pub const MODEL_TILT_AXIS: Vector3 = Vector3::new(0.707, 0.707, 0.0);
pub const MODEL_TILT_ANGLE: f64 = 0.7;

impl Eye {
    pub fn color_mask(self) -> ColorMask {
        match self {
            Eye::Left => ColorMask::RED,
            Eye::Right => ColorMask::CYAN,
        }
    }
}

/// Animated light position at `elapsed` seconds.
pub fn light_position(elapsed: Duration) -> Point3 {
    let t = elapsed.as_secs_f64();
    Point3::new(0.75 * t.sin(), 0.25 * t.cos(), 0.5)
}

/// `translate(MODEL_OFFSET) * tilt * rotator_view`.
pub fn model_matrix(rotator_view: DMat4) -> DMat4 {
    translation(MODEL_OFFSET.x, MODEL_OFFSET.y, MODEL_OFFSET.z)
        * axis_rotation(MODEL_TILT_AXIS, MODEL_TILT_ANGLE)
        * rotator_view
}

/// Frame-invariant pieces shared by every draw in one tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameBasis {
    pub model: DMat4,
    pub light_position: Point3,
    /// Uniforms with the orthographic base transform
    pub uniforms: FrameUniforms,
}

impl FrameBasis {
    pub fn new(scene: &Scene, elapsed: Duration) -> Self {
        let rotator_view = scene.view.rotator_view();
        let model = model_matrix(rotator_view);
        let base = orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0) * model;
        let light = light_position(elapsed);

        let uniforms = FrameUniforms {
            model_view_projection: mat4_to_f32(base),
            normal_matrix: mat4_to_f32(normal_matrix(rotator_view)),
            color: SURFACE_COLOR,
            ambient: rgb_padded(scene.material.ambient),
            diffuse: rgb_padded(scene.material.diffuse),
            specular: rgb_padded(scene.material.specular),
            light_position: vec3_padded(light),
            relative_position: vec3_padded(scene.marker_position()),
            texture_relative: vec2_to_f32(scene.view.marker.texture_relative()),
            angle_of_rotation: scene.texture_angle as f32,
            _padding: 0.0,
        };

        Self {
            model,
            light_position: light,
            uniforms,
        }
    }
}

/// Draws a [`Scene`] as a red/cyan anaglyph through a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPipeline {
    surface: GeometryHandle,
    gizmo: Option<GeometryHandle>,
}

impl RenderPipeline {
    /// Upload the scene's static geometry. Called once, before the first frame.
    pub fn initialize(backend: &mut dyn RenderBackend, scene: &Scene) -> Result<Self> {
        let buffers = GeometryBuffers::from_mesh(&scene.mesh);
        let surface = backend.upload_geometry(&buffers)?;
        debug!(
            "uploaded surface: {} vertices, {} bytes",
            buffers.vertex_count(),
            buffers.byte_len()
        );

        let gizmo = match &scene.gizmo {
            Some(mesh) => Some(backend.upload_geometry(&GeometryBuffers::from_mesh(mesh))?),
            None => None,
        };

        Ok(Self { surface, gizmo })
    }

    pub fn surface(&self) -> GeometryHandle {
        self.surface
    }

    pub fn gizmo(&self) -> Option<GeometryHandle> {
        self.gizmo
    }

    /// Draw one frame: left eye into red, right eye into green and blue.
    ///
    /// The depth buffer is cleared before each eye so the second pass is not
    /// occluded by the first. The colour mask is left writing all channels.
    pub fn render_frame(&self, backend: &mut dyn RenderBackend, scene: &Scene, elapsed: Duration) {
        let basis = FrameBasis::new(scene, elapsed);
        trace!("frame at {:.3}s", elapsed.as_secs_f64());

        backend.begin_frame(CLEAR_COLOR);
        backend.set_uniforms(&basis.uniforms);

        for eye in Eye::BOTH {
            let matrices = scene.camera.frustum(eye);
            backend.set_uniforms(&basis.uniforms.with_transform(matrices.combine(basis.model)));
            backend.clear_depth();
            backend.set_color_mask(eye.color_mask());
            backend.draw(self.surface);
        }

        backend.set_color_mask(ColorMask::ALL);

        if let Some(gizmo) = self.gizmo {
            let center = scene.camera.center_frustum();
            for position in [basis.light_position, scene.marker_position()] {
                let model = basis.model * translation(position.x, position.y, position.z);
                backend.set_uniforms(&basis.uniforms.with_transform(center.combine(model)));
                backend.draw(gizmo);
            }
        }
    }
}

/// Host side of the frame loop.
pub trait FrameScheduler {
    /// Wait for the next frame, applying any pending input to `scene`.
    /// Returns the time since the loop started, or `None` to stop.
    fn request_frame(&mut self, scene: &mut Scene) -> Option<Duration>;
}

/// Tick until the scheduler stops. Returns the number of frames drawn.
pub fn run_frame_loop(
    pipeline: &RenderPipeline,
    backend: &mut dyn RenderBackend,
    scene: &mut Scene,
    scheduler: &mut dyn FrameScheduler,
) -> usize {
    let mut frames = 0;
    while let Some(elapsed) = scheduler.request_frame(scene) {
        pipeline.render_frame(backend, scene, elapsed);
        frames += 1;
    }
    debug!("frame loop stopped after {frames} frames");
    frames
}

/// Fixed number of frames at a fixed interval, with inputs queued per frame.
#[derive(Debug, Clone)]
pub struct ScriptedScheduler {
    frames: usize,
    interval: Duration,
    next: usize,
    inputs: VecDeque<(usize, InputCommand)>,
}

impl ScriptedScheduler {
    pub fn new(frames: usize, interval: Duration) -> Self {
        Self {
            frames,
            interval,
            next: 0,
            inputs: VecDeque::new(),
        }
    }

    /// Queue `command` to be applied just before frame `frame` (zero-based).
    pub fn push_input(&mut self, frame: usize, command: InputCommand) {
        let at = self.inputs.partition_point(|(f, _)| *f <= frame);
        self.inputs.insert(at, (frame, command));
    }

    pub fn with_inputs(
        mut self,
        frame: usize,
        commands: impl IntoIterator<Item = InputCommand>,
    ) -> Self {
        for command in commands {
            self.push_input(frame, command);
        }
        self
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl FrameScheduler for ScriptedScheduler {
    fn request_frame(&mut self, scene: &mut Scene) -> Option<Duration> {
        if self.next >= self.frames {
            return None;
        }
        let frame = self.next;
        while self.inputs.front().is_some_and(|(f, _)| *f <= frame) {
            if let Some((_, command)) = self.inputs.pop_front() {
                scene.apply(command);
            }
        }
        self.next += 1;
        Some(self.interval * frame as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCommand, RecordingBackend};
    use crate::marker::MarkerStep;
    use stereo_geometry::ParabolicTop;
    use stereo_math::DVec4;
    use stereo_mesh::generate_mesh;

    fn test_scene() -> Scene {
        let surface = ParabolicTop::default();
        let mesh = generate_mesh(&surface, 0.5).unwrap();
        Scene::new(surface, mesh)
    }

    fn uniforms_of(cmd: &DrawCommand) -> &FrameUniforms {
        match cmd {
            DrawCommand::SetUniforms(u) => u.as_ref(),
            other => panic!("expected uniforms, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_uploads_once() {
        let scene = test_scene();
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        assert_eq!(
            backend.commands(),
            &[DrawCommand::Upload {
                handle: pipeline.surface(),
                vertex_count: 104 * 3
            }]
        );
        assert_eq!(pipeline.gizmo(), None);
    }

    #[test]
    fn test_initialize_propagates_backend_error() {
        let scene = test_scene();
        let mut backend = RecordingBackend::failing("context lost");
        assert!(RenderPipeline::initialize(&mut backend, &scene).is_err());
    }

    #[test]
    fn test_frame_command_order() {
        let scene = test_scene();
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        backend.take_commands();

        pipeline.render_frame(&mut backend, &scene, Duration::ZERO);
        let cmds = backend.take_commands();
        assert_eq!(cmds.len(), 11);
        assert_eq!(cmds[0], DrawCommand::BeginFrame { clear_color: CLEAR_COLOR });
        assert!(matches!(cmds[1], DrawCommand::SetUniforms(_)));

        let draw = DrawCommand::Draw {
            geometry: pipeline.surface(),
            vertex_count: 312,
        };
        assert!(matches!(cmds[2], DrawCommand::SetUniforms(_)));
        assert_eq!(cmds[3], DrawCommand::ClearDepth);
        assert_eq!(cmds[4], DrawCommand::SetColorMask(ColorMask::RED));
        assert_eq!(cmds[5], draw);
        assert!(matches!(cmds[6], DrawCommand::SetUniforms(_)));
        assert_eq!(cmds[7], DrawCommand::ClearDepth);
        assert_eq!(cmds[8], DrawCommand::SetColorMask(ColorMask::CYAN));
        assert_eq!(cmds[9], draw);
        assert_eq!(cmds[10], DrawCommand::SetColorMask(ColorMask::ALL));
        assert_eq!(backend.color_mask(), Some(ColorMask::ALL));
    }

    #[test]
    fn test_eye_transforms() {
        let scene = test_scene();
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        backend.take_commands();
        pipeline.render_frame(&mut backend, &scene, Duration::from_secs(1));
        let cmds = backend.take_commands();

        let model = model_matrix(scene.view.rotator_view());
        let left = uniforms_of(&cmds[2]);
        let right = uniforms_of(&cmds[6]);
        let expected_left = mat4_to_f32(scene.camera.left_frustum().combine(model));
        let expected_right = mat4_to_f32(scene.camera.right_frustum().combine(model));
        assert_eq!(left.model_view_projection, expected_left);
        assert_eq!(right.model_view_projection, expected_right);
        assert_ne!(left.model_view_projection, right.model_view_projection);

        // Everything but the transform is shared.
        assert_eq!(left.with_transform(DMat4::IDENTITY), right.with_transform(DMat4::IDENTITY));
        assert_eq!(left.color, SURFACE_COLOR);
        assert!((left.light_position[0] - (0.75 * 1f64.sin()) as f32).abs() < 1e-6);
        assert!((left.texture_relative[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_frame_does_not_mutate_scene() {
        let scene = test_scene();
        let before = scene.clone();
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        pipeline.render_frame(&mut backend, &scene, Duration::from_millis(16));
        assert_eq!(scene.mesh, before.mesh);
        assert_eq!(scene.camera, before.camera);
        assert_eq!(scene.view, before.view);
    }

    #[test]
    fn test_model_matrix_places_origin_in_front() {
        let m = model_matrix(DMat4::IDENTITY);
        let origin = m * DVec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.truncate(), MODEL_OFFSET);
    }

    #[test]
    fn test_light_orbit() {
        let p = light_position(Duration::ZERO);
        assert_eq!(p, Point3::new(0.0, 0.25, 0.5));
    }

    #[test]
    fn test_gizmos_drawn_after_mask_reset() {
        let mut scene = test_scene();
        scene.gizmo = Some(generate_mesh(&stereo_geometry::MarkerSphere::default(), 0.5).unwrap());
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        let gizmo = pipeline.gizmo().unwrap();
        backend.take_commands();

        pipeline.render_frame(&mut backend, &scene, Duration::ZERO);
        let cmds = backend.take_commands();
        let reset = cmds
            .iter()
            .position(|c| *c == DrawCommand::SetColorMask(ColorMask::ALL))
            .unwrap();
        let gizmo_draws: Vec<usize> = cmds
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, DrawCommand::Draw { geometry, .. } if *geometry == gizmo))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(gizmo_draws.len(), 2);
        assert!(gizmo_draws.iter().all(|i| *i > reset));
    }

    #[test]
    fn test_scripted_scheduler_drives_loop() {
        let mut scene = test_scene();
        let mut backend = RecordingBackend::new();
        let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
        let mut scheduler = ScriptedScheduler::new(3, Duration::from_millis(100))
            .with_inputs(1, [InputCommand::Marker(MarkerStep::AxialUp)])
            .with_inputs(2, [InputCommand::Marker(MarkerStep::AxialUp)]);

        let frames = run_frame_loop(&pipeline, &mut backend, &mut scene, &mut scheduler);
        assert_eq!(frames, 3);
        assert_eq!(backend.frame_count(), 3);
        assert_eq!(backend.draw_count(), 6);
        assert_eq!(scheduler.pending_inputs(), 0);
        assert!((scene.view.marker.u - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_scripted_scheduler_timing() {
        let mut scene = test_scene();
        let mut scheduler = ScriptedScheduler::new(2, Duration::from_millis(250));
        assert_eq!(scheduler.request_frame(&mut scene), Some(Duration::ZERO));
        assert_eq!(scheduler.request_frame(&mut scene), Some(Duration::from_millis(250)));
        assert_eq!(scheduler.request_frame(&mut scene), None);
    }

    #[test]
    fn test_inputs_keep_frame_order() {
        let mut scene = test_scene();
        let mut scheduler = ScriptedScheduler::new(1, Duration::ZERO);
        scheduler.push_input(0, InputCommand::SetTextureAngle(1.0));
        scheduler.push_input(0, InputCommand::SetTextureAngle(2.0));
        scheduler.request_frame(&mut scene);
        assert_eq!(scene.texture_angle, 2.0);
    }
}
