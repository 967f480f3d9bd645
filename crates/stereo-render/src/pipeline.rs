use bytemuck::{Pod, Zeroable};
use stereo_math::{DMat4, Point2, Point3};
use stereo_mesh::TriangleMesh;

/// Mesh attributes as three parallel flat `f32` arrays ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffers {
    /// `x, y, z` per vertex
    pub positions: Vec<f32>,
    /// `x, y, z` per vertex
    pub normals: Vec<f32>,
    /// `s, t` per vertex
    pub uvs: Vec<f32>,
}

impl GeometryBuffers {
    /// Flatten a mesh, narrowing every component to `f32`.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let n = mesh.vertex_count();
        let mut buffers = Self {
            positions: Vec::with_capacity(n * 3),
            normals: Vec::with_capacity(n * 3),
            uvs: Vec::with_capacity(n * 2),
        };

        for p in &mesh.positions {
            buffers.positions.extend_from_slice(&vec3_to_f32(*p));
        }
        for v in &mesh.normals {
            buffers.normals.extend_from_slice(&vec3_to_f32(*v));
        }
        for uv in &mesh.uvs {
            buffers.uvs.extend_from_slice(&vec2_to_f32(*uv));
        }
        buffers
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Total bytes across the three arrays.
    pub fn byte_len(&self) -> usize {
        std::mem::size_of::<f32>() * (self.positions.len() + self.normals.len() + self.uvs.len())
    }
}

/// Convert a TriangleMesh to upload-ready buffers.
pub fn prepare_mesh(mesh: &TriangleMesh) -> GeometryBuffers {
    GeometryBuffers::from_mesh(mesh)
}

/// Shader uniforms for one draw, laid out std140-compatible.
///
/// Three-component values are padded to four floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// `ModelViewProjectionMatrix`
    pub model_view_projection: [[f32; 4]; 4],
    /// `NormalMatrix`
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// `ambientComponent`
    pub ambient: [f32; 4],
    /// `diffuseComponent`
    pub diffuse: [f32; 4],
    /// `specularComponent`
    pub specular: [f32; 4],
    /// `lightPosition`
    pub light_position: [f32; 4],
    /// `relativePosition`: surface point under the texture marker
    pub relative_position: [f32; 4],
    /// `textureRelative`: marker in texture space
    pub texture_relative: [f32; 2],
    /// `angleOfRotation`
    pub angle_of_rotation: f32,
    pub _padding: f32,
}

impl FrameUniforms {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Copy with a different combined transform.
    pub fn with_transform(&self, model_view_projection: DMat4) -> Self {
        Self {
            model_view_projection: mat4_to_f32(model_view_projection),
            ..*self
        }
    }
}

pub(crate) fn mat4_to_f32(m: DMat4) -> [[f32; 4]; 4] {
    m.as_mat4().to_cols_array_2d()
}

pub(crate) fn vec3_to_f32(v: Point3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

pub(crate) fn vec3_padded(v: Point3) -> [f32; 4] {
    [v.x as f32, v.y as f32, v.z as f32, 0.0]
}

pub(crate) fn rgb_padded(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

pub(crate) fn vec2_to_f32(v: Point2) -> [f32; 2] {
    [v.x as f32, v.y as f32]
}
