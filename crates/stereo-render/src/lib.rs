pub mod backend;
pub mod camera;
pub mod frame;
pub mod marker;
pub mod pipeline;
pub mod scene;

// Re-export main types
pub use backend::{ColorMask, DrawCommand, GeometryHandle, RecordingBackend, RenderBackend};
pub use camera::{Eye, FrameMatrices, FrustumBounds, StereoCamera};
pub use frame::{run_frame_loop, FrameBasis, FrameScheduler, RenderPipeline, ScriptedScheduler};
pub use marker::{Marker, MarkerStep};
pub use pipeline::{prepare_mesh, FrameUniforms, GeometryBuffers};
pub use scene::{CameraControl, InputCommand, Material, Scene, ViewState};
