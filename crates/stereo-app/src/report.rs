//! Text output of a headless run.

use std::fmt::{self, Write};

use stereo_config::SceneConfig;
use stereo_render::{ColorMask, DrawCommand, Eye, RecordingBackend, Scene};

pub fn summary(
    config: &SceneConfig,
    scene: &Scene,
    backend: &RecordingBackend,
    frames: usize,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_summary(&mut out, config, scene, backend, frames)
        .map(|()| out)
        .unwrap_or_default()
}

/// One line per recorded backend command.
pub fn trace(commands: &[DrawCommand]) -> String {
    let mut out = String::new();
    write_trace(&mut out, commands).map(|()| out).unwrap_or_default()
}

fn write_summary(
    out: &mut impl Write,
    config: &SceneConfig,
    scene: &Scene,
    backend: &RecordingBackend,
    frames: usize,
) -> fmt::Result {
    let camera = &scene.camera;
    let marker = &scene.view.marker;
    let texture = marker.texture_relative();

    writeln!(
        out,
        "surface: {} triangles ({} vertices), step {}, {:?} normals",
        scene.mesh.triangle_count(),
        scene.mesh.vertex_count(),
        config.mesh.step,
        config.mesh.normals
    )?;
    if let Some(bounds) = scene.mesh.bounds() {
        let extent = bounds.extents();
        let (min, max) = (bounds.min, bounds.max);
        write!(
            out,
            "bounds: x [{:.3}, {:.3}] y [{:.3}, {:.3}] z [{:.3}, {:.3}]",
            min.x, max.x, min.y, max.y, min.z, max.z
        )?;
        writeln!(out, ", extent {:.3} x {:.3} x {:.3}", extent.x, extent.y, extent.z)?;
    }
    writeln!(
        out,
        "camera: convergence {:.2}, eye separation {:.3}, fov {:.1} deg",
        camera.convergence,
        camera.eye_separation,
        camera.fov.to_degrees()
    )?;
    for (label, eye) in [("left", Eye::Left), ("right", Eye::Right)] {
        let b = camera.bounds(eye);
        writeln!(
            out,
            "{label} eye frustum: l={:.4} r={:.4} b={:.4} t={:.4} offset={:+.3}",
            b.left,
            b.right,
            b.bottom,
            b.top,
            camera.eye_offset(eye)
        )?;
    }
    writeln!(
        out,
        "marker: u={:.2} v={:.2} texture=({:.3}, {:.3})",
        marker.u, marker.v, texture.x, texture.y
    )?;
    writeln!(out, "rendered {frames} frames, {} draws", backend.draw_count())
}

fn write_trace(out: &mut impl Write, commands: &[DrawCommand]) -> fmt::Result {
    for command in commands {
        match command {
            DrawCommand::Upload {
                handle,
                vertex_count,
            } => writeln!(out, "upload #{} ({vertex_count} vertices)", handle.0)?,
            DrawCommand::BeginFrame { clear_color } => {
                writeln!(out, "begin frame clear={clear_color:?}")?
            }
            DrawCommand::SetUniforms(u) => writeln!(
                out,
                "uniforms light=({:.3}, {:.3}, {:.3})",
                u.light_position[0], u.light_position[1], u.light_position[2]
            )?,
            DrawCommand::ClearDepth => writeln!(out, "clear depth")?,
            DrawCommand::SetColorMask(mask) => writeln!(out, "color mask {}", mask_name(*mask))?,
            DrawCommand::Draw {
                geometry,
                vertex_count,
            } => writeln!(out, "draw #{} ({vertex_count} vertices)", geometry.0)?,
        }
    }
    Ok(())
}

fn mask_name(mask: ColorMask) -> String {
    [(mask.red, 'r'), (mask.green, 'g'), (mask.blue, 'b'), (mask.alpha, 'a')]
        .iter()
        .map(|(on, c)| if *on { *c } else { '-' })
        .collect()
}
