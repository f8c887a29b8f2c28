/// Fixed uniform layout shared by all built-in shaders.
///
/// Built-in shaders do not come from a material, so their constant buffers
/// are not generated. The rendering loop writes them with this layout:
///
/// - Vertex stage: an array of four model-transform matrices
/// - Pixel stage: a block of sixteen scalar parameters (color, fade, etc.)

use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Number of 4x4 matrices in the built-in vertex uniforms
pub const BUILTIN_MODEL_MATRIX_COUNT: usize = 4;

/// Number of f32 scalars in the built-in pixel uniforms
pub const BUILTIN_PIXEL_PARAM_COUNT: usize = 16;

/// Vertex uniform bytes for every built-in shader (4 × 64 = 256)
pub const BUILTIN_VERTEX_UNIFORM_SIZE: usize = size_of::<Mat4>() * BUILTIN_MODEL_MATRIX_COUNT;

/// Pixel uniform bytes for every built-in shader (16 × 4 = 64)
pub const BUILTIN_PIXEL_UNIFORM_SIZE: usize = size_of::<f32>() * BUILTIN_PIXEL_PARAM_COUNT;

/// Vertex stage uniforms of a built-in shader
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BuiltinVertexUniforms {
    pub model_matrices: [Mat4; BUILTIN_MODEL_MATRIX_COUNT],
}

/// Pixel stage uniforms of a built-in shader
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BuiltinPixelUniforms {
    pub params: [f32; BUILTIN_PIXEL_PARAM_COUNT],
}

const _: () = assert!(size_of::<BuiltinVertexUniforms>() == BUILTIN_VERTEX_UNIFORM_SIZE);
const _: () = assert!(size_of::<BuiltinPixelUniforms>() == BUILTIN_PIXEL_UNIFORM_SIZE);

impl Default for BuiltinVertexUniforms {
    fn default() -> Self {
        Self { model_matrices: [Mat4::IDENTITY; BUILTIN_MODEL_MATRIX_COUNT] }
    }
}

impl Default for BuiltinPixelUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}
