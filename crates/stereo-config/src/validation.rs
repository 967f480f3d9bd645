//! Configuration validation.
//!
//! Checks the preconditions the camera, tessellator and marker rely on, and
//! reports every violation at once.

use std::f64::consts::TAU;

use crate::colors::parse_hex_color;
use crate::schema::SceneConfig;
use crate::ConfigError;

/// Upper end of the eye separation control.
pub const MAX_EYE_SEPARATION: f64 = 10.0;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SceneConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_positive(&mut errors, "surface.height", config.surface.height);
    validate_positive(&mut errors, "surface.focal", config.surface.focal);

    validate_positive(&mut errors, "mesh.step", config.mesh.step);

    let camera = &config.camera;
    validate_positive(&mut errors, "camera.convergence", camera.convergence);
    validate_range_f64(
        &mut errors,
        "camera.eye_separation",
        camera.eye_separation,
        0.0,
        MAX_EYE_SEPARATION,
    );
    validate_positive(&mut errors, "camera.aspect_ratio", camera.aspect_ratio);
    validate_open_range(&mut errors, "camera.fov_degrees", camera.fov_degrees, 0.0, 180.0);
    validate_positive(&mut errors, "camera.near", camera.near);
    if !(camera.far > camera.near) {
        errors.push(format!(
            "camera.far = {} must be greater than camera.near = {}",
            camera.far, camera.near
        ));
    }

    for (name, value) in [
        ("material.ambient", &config.material.ambient),
        ("material.diffuse", &config.material.diffuse),
        ("material.specular", &config.material.specular),
    ] {
        if let Err(e) = parse_hex_color(value) {
            errors.push(format!("{name}: {e}"));
        }
    }

    let h = config.surface.height;
    validate_range_f64(&mut errors, "marker.u", config.marker.u, -h, h);
    validate_range_f64(&mut errors, "marker.v", config.marker.v, 0.0, TAU);
    validate_positive(&mut errors, "marker.step", config.marker.step);

    if !config.render.texture_angle.is_finite() {
        errors.push(format!(
            "render.texture_angle = {} must be finite",
            config.render.texture_angle
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_positive(errors: &mut Vec<String>, name: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(format!("{name} = {value} must be positive"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(value >= min && value <= max) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_open_range(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(value > min && value < max) {
        errors.push(format!("{name} = {value} is out of range ({min}, {max})"));
    }
}
