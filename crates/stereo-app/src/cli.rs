use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use stereo_config::{NormalMode, SceneConfig};
use stereo_math::Vector3;
use stereo_render::InputCommand;

#[derive(Parser, Debug)]
#[command(
    name = "stereotop",
    version,
    about = "Render the parabolic humming top as a red/cyan anaglyph"
)]
pub struct Args {
    /// Scene config file (TOML). Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(short, long, default_value_t = 1)]
    pub frames: usize,

    /// Simulated time between frames, in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub interval_ms: u64,

    /// Tessellation step in parameter space.
    #[arg(long)]
    pub step: Option<f64>,

    /// Use closed-form surface normals instead of finite differences.
    #[arg(long)]
    pub analytic_normals: bool,

    #[arg(long)]
    pub eye_separation: Option<f64>,

    #[arg(long)]
    pub convergence: Option<f64>,

    /// Rotate the model about the vertical axis before the first frame, in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub yaw: f64,

    /// Rotate the model about the horizontal axis before the first frame, in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pitch: f64,

    /// Marker keys (w/s/a/d) applied before the first frame.
    #[arg(long, default_value = "")]
    pub keys: String,

    /// Draw gizmo spheres at the light and marker positions.
    #[arg(long)]
    pub gizmos: bool,

    /// Print every recorded backend command.
    #[arg(long)]
    pub trace: bool,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut SceneConfig) {
        if let Some(step) = self.step {
            config.mesh.step = step;
        }
        if self.analytic_normals {
            config.mesh.normals = NormalMode::Analytic;
        }
        if let Some(eye_separation) = self.eye_separation {
            config.camera.eye_separation = eye_separation;
        }
        if let Some(convergence) = self.convergence {
            config.camera.convergence = convergence;
        }
        if self.gizmos {
            config.render.show_gizmos = true;
        }
    }

    /// Inputs queued before the first frame: rotation, then marker keys.
    pub fn initial_inputs(&self) -> Result<Vec<InputCommand>> {
        let mut inputs = Vec::new();
        if self.yaw != 0.0 {
            inputs.push(InputCommand::Rotate {
                axis: Vector3::Y,
                angle: self.yaw.to_radians(),
            });
        }
        if self.pitch != 0.0 {
            inputs.push(InputCommand::Rotate {
                axis: Vector3::X,
                angle: self.pitch.to_radians(),
            });
        }
        for key in self.keys.chars().filter(|c| !c.is_whitespace()) {
            match InputCommand::from_key(key) {
                Some(command) => inputs.push(command),
                None => bail!("unknown marker key '{key}', expected one of w, s, a, d"),
            }
        }
        Ok(inputs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
