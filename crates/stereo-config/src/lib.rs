//! Scene configuration for stereotop.
//!
//! Every section uses `serde(default)`, so a partial TOML file only needs the
//! values it changes.

pub mod colors;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use colors::parse_hex_color;
pub use error::ConfigError;
pub use loader::{
    config_to_toml, default_config_toml, from_toml_str, load_from_path, load_or_default,
};
pub use schema::{
    CameraConfig, MarkerConfig, MaterialConfig, MeshConfig, NormalMode, RenderConfig, SceneConfig,
    SurfaceConfig,
};
pub use validation::{validate, MAX_EYE_SEPARATION};
