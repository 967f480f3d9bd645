use std::time::Duration;

use stereo_config::SceneConfig;
use stereo_render::{
    run_frame_loop, CameraControl, ColorMask, DrawCommand, InputCommand, MarkerStep,
    RecordingBackend, RenderPipeline, Scene, ScriptedScheduler, StereoCamera,
};

fn scene_from(step: f64, gizmos: bool) -> Scene {
    let mut config = SceneConfig::default();
    config.mesh.step = step;
    config.render.show_gizmos = gizmos;
    Scene::from_config(&config).unwrap()
}

/// Depth clears, colour-mask changes and draws, in order.
fn mask_and_draw_sequence(cmds: &[DrawCommand]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            DrawCommand::SetColorMask(m) if *m == ColorMask::RED => Some("red".to_string()),
            DrawCommand::SetColorMask(m) if *m == ColorMask::CYAN => Some("cyan".to_string()),
            DrawCommand::SetColorMask(m) if *m == ColorMask::ALL => Some("all".to_string()),
            DrawCommand::ClearDepth => Some("depth".to_string()),
            DrawCommand::Draw { geometry, .. } => Some(format!("draw{}", geometry.0)),
            _ => None,
        })
        .collect()
}

#[test]
fn default_scene_renders_left_then_right() {
    let scene = scene_from(0.1, false);
    let mut backend = RecordingBackend::new();
    let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
    assert_eq!(
        backend.commands(),
        &[DrawCommand::Upload {
            handle: pipeline.surface(),
            vertex_count: 2520 * 3
        }]
    );
    backend.take_commands();

    pipeline.render_frame(&mut backend, &scene, Duration::from_millis(500));
    let cmds = backend.take_commands();
    assert!(matches!(cmds[0], DrawCommand::BeginFrame { .. }));
    assert_eq!(
        mask_and_draw_sequence(&cmds),
        ["depth", "red", "draw0", "depth", "cyan", "draw0", "all"]
    );
}

#[test]
fn gizmos_follow_the_stereo_pair() {
    let scene = scene_from(0.5, true);
    let mut backend = RecordingBackend::new();
    let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();
    assert_eq!(pipeline.gizmo().map(|g| g.0), Some(1));
    backend.take_commands();

    pipeline.render_frame(&mut backend, &scene, Duration::ZERO);
    assert_eq!(
        mask_and_draw_sequence(&backend.take_commands()),
        ["depth", "red", "draw0", "depth", "cyan", "draw0", "all", "draw1", "draw1"]
    );
}

#[test]
fn upload_failure_aborts_initialization() {
    let scene = scene_from(0.5, false);
    let mut backend = RecordingBackend::failing("no WebGL");
    let err = RenderPipeline::initialize(&mut backend, &scene).unwrap_err();
    assert!(err.to_string().contains("no WebGL"), "{err}");
}

#[test]
fn scripted_session_applies_inputs_between_frames() {
    let mut scene = scene_from(0.5, false);
    let mesh = scene.mesh.clone();
    let mut backend = RecordingBackend::new();
    let pipeline = RenderPipeline::initialize(&mut backend, &scene).unwrap();

    let mut scheduler = ScriptedScheduler::new(4, Duration::from_millis(16))
        .with_inputs(0, "dddd".chars().filter_map(InputCommand::from_key))
        .with_inputs(
            2,
            [
                InputCommand::Marker(MarkerStep::AxialDown),
                InputCommand::Camera(CameraControl::EyeSeparation(0.0)),
            ],
        );

    let frames = run_frame_loop(&pipeline, &mut backend, &mut scene, &mut scheduler);
    assert_eq!(frames, 4);
    assert_eq!(backend.frame_count(), 4);
    assert_eq!(backend.draw_count(), 8);

    assert!((scene.view.marker.v - 0.9).abs() < 1e-12);
    assert!((scene.view.marker.u - 0.4).abs() < 1e-12);
    assert_eq!(scene.camera.left_frustum(), scene.camera.right_frustum());
    assert_eq!(scene.mesh, mesh);
}

#[test]
fn camera_serializes_with_field_names() {
    let camera = StereoCamera::default();
    let json = serde_json::to_value(camera).unwrap();
    assert_eq!(json["convergence"], 10.0);
    assert_eq!(json["eye_separation"], 0.1);
    let back: StereoCamera = serde_json::from_value(json).unwrap();
    assert_eq!(back, camera);
}
