//! The seam between the pipeline and a graphics API.

use log::debug;
use stereo_core::{Result, StereoError};

use crate::pipeline::{FrameUniforms, GeometryBuffers};

/// Which colour channels a draw may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMask {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub alpha: bool,
}

impl ColorMask {
    pub const ALL: Self = Self::new(true, true, true, true);
    /// Left eye of a red/cyan anaglyph.
    pub const RED: Self = Self::new(true, false, false, false);
    /// Right eye of a red/cyan anaglyph.
    pub const CYAN: Self = Self::new(false, true, true, false);

    pub const fn new(red: bool, green: bool, blue: bool, alpha: bool) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// True if no channel is shared with `other`.
    pub fn is_disjoint(self, other: Self) -> bool {
        !((self.red && other.red)
            || (self.green && other.green)
            || (self.blue && other.blue)
            || (self.alpha && other.alpha))
    }
}

/// Opaque id of geometry uploaded to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Draw-call surface the pipeline needs from a graphics API.
///
/// Uploads happen at startup and may fail. Everything called per frame is
/// infallible: a backend that loses its context reports it out of band.
pub trait RenderBackend {
    fn upload_geometry(&mut self, buffers: &GeometryBuffers) -> Result<GeometryHandle>;

    /// Clear colour to `clear_color` and depth to the far plane.
    fn begin_frame(&mut self, clear_color: [f32; 4]);

    fn set_uniforms(&mut self, uniforms: &FrameUniforms);

    fn clear_depth(&mut self);

    fn set_color_mask(&mut self, mask: ColorMask);

    /// Draw all vertices of `geometry` as a triangle list.
    fn draw(&mut self, geometry: GeometryHandle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Upload {
        handle: GeometryHandle,
        vertex_count: usize,
    },
    BeginFrame {
        clear_color: [f32; 4],
    },
    SetUniforms(Box<FrameUniforms>),
    ClearDepth,
    SetColorMask(ColorMask),
    Draw {
        geometry: GeometryHandle,
        vertex_count: usize,
    },
}

/// Backend that records every call instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    vertex_counts: Vec<usize>,
    color_mask: Option<ColorMask>,
    upload_failure: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose uploads fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            upload_failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Mask left in effect by the last `set_color_mask`, if any.
    pub fn color_mask(&self) -> Option<ColorMask> {
        self.color_mask
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Draw { .. }))
            .count()
    }

    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::BeginFrame { .. }))
            .count()
    }

    fn vertex_count(&self, handle: GeometryHandle) -> usize {
        self.vertex_counts
            .get(handle.0 as usize)
            .copied()
            .unwrap_or(0)
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_geometry(&mut self, buffers: &GeometryBuffers) -> Result<GeometryHandle> {
        if let Some(message) = &self.upload_failure {
            return Err(StereoError::Backend(message.clone()));
        }
        let id = u32::try_from(self.vertex_counts.len())
            .map_err(|_| StereoError::Backend("too many geometry buffers".into()))?;
        let handle = GeometryHandle(id);
        let vertex_count = buffers.vertex_count();
        debug!(
            "recorded upload {id}: {vertex_count} vertices, {} bytes",
            buffers.byte_len()
        );
        self.vertex_counts.push(vertex_count);
        self.commands.push(DrawCommand::Upload {
            handle,
            vertex_count,
        });
        Ok(handle)
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.commands.push(DrawCommand::BeginFrame { clear_color });
    }

    fn set_uniforms(&mut self, uniforms: &FrameUniforms) {
        self.commands.push(DrawCommand::SetUniforms(Box::new(*uniforms)));
    }

    fn clear_depth(&mut self) {
        self.commands.push(DrawCommand::ClearDepth);
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        self.color_mask = Some(mask);
        self.commands.push(DrawCommand::SetColorMask(mask));
    }

    fn draw(&mut self, geometry: GeometryHandle) {
        let vertex_count = self.vertex_count(geometry);
        self.commands.push(DrawCommand::Draw {
            geometry,
            vertex_count,
        });
    }
}
