/// Boundary to the material parameter generator.
///
/// A parameter generator computes how many bytes of vertex-stage and
/// pixel-stage uniforms a material shader needs. Shader descriptors call it
/// through the `ParameterGenerator` trait and never look inside; the values
/// passed in `GeneratorInput` are protocol values of that collaborator and
/// are named here instead of written inline.

use std::mem::size_of;
use glam::{Mat4, Vec4};
use crate::error::{Error, Result};
use crate::material::MaterialGeometry;

// ===== PROTOCOL CONSTANTS =====

/// Refraction mode selector: no refraction pass
pub const REFRACTION_MODE_DISABLED: i32 = 0;

/// Refraction mode selector: shader takes part in the refraction pass
pub const REFRACTION_MODE_ENABLED: i32 = 1;

/// Stage count used by every descriptor (one rendering stage)
pub const SINGLE_STAGE: u32 = 1;

/// Translate the refraction flag into the generator's mode selector
pub fn refraction_mode(is_refraction: bool) -> i32 {
    if is_refraction {
        REFRACTION_MODE_ENABLED
    } else {
        REFRACTION_MODE_DISABLED
    }
}

// ===== GENERATOR TYPES =====

/// Arguments handed to a parameter generator
#[derive(Debug, Clone, Copy)]
pub struct GeneratorInput<'a> {
    pub geometry: &'a MaterialGeometry,
    /// 3D model draw path (false = sprite/quad path)
    pub is_model: bool,
    pub refraction_mode: i32,
    pub stage_count: u32,
}

/// Uniform buffer sizes reported by a generator, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UniformLayoutSizes {
    pub vertex: usize,
    pub pixel: usize,
}

/// Computes uniform buffer sizes for a material shader
///
/// Implementations may fail; errors are propagated to whoever is building
/// the descriptor, unchanged.
pub trait ParameterGenerator {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes>;
}

impl<G: ParameterGenerator + ?Sized> ParameterGenerator for &G {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes> {
        (**self).generate(input)
    }
}

impl<G: ParameterGenerator + ?Sized> ParameterGenerator for Box<G> {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes> {
        (**self).generate(input)
    }
}

// ===== STANDARD GENERATOR =====

const MATRIX_SIZE: usize = size_of::<Mat4>();
const VECTOR_SIZE: usize = size_of::<Vec4>();

/// Particle material layout used by the bundled shaders
///
/// Vertex stage (in order):
/// - model path only, per stage: model matrix, model UV, model color
/// - camera matrix, projection matrix
/// - UV-inversed flag, predefined params, camera position
/// - custom data 1 and 2 when the material reads them (per stage on the model path)
/// - user uniforms
///
/// Pixel stage (in order):
/// - UV-inversed flag, predefined params, camera position
/// - reconstruction params 1 and 2
/// - light direction, light color, light ambient
/// - camera matrix when the material refracts and refraction mode is enabled
/// - user uniforms
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardParameterGenerator;

impl StandardParameterGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ParameterGenerator for StandardParameterGenerator {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes> {
        let refraction_enabled = match input.refraction_mode {
            REFRACTION_MODE_DISABLED => false,
            REFRACTION_MODE_ENABLED => true,
            other => {
                return Err(Error::GeneratorFailed(format!(
                    "Unknown refraction mode {}", other
                )));
            }
        };

        let geometry = input.geometry;
        let stages = input.stage_count as usize;
        let user_uniforms = geometry.uniform_slot_count()
            .and_then(|slots| VECTOR_SIZE.checked_mul(slots as usize))
            .ok_or_else(layout_overflow)?;

        // Per-draw model data is replicated for each stage
        let per_draw = if input.is_model { stages } else { 1 };
        let custom_data = VECTOR_SIZE.checked_mul(per_draw).ok_or_else(layout_overflow)?;

        let mut vertex = MATRIX_SIZE * 2 + VECTOR_SIZE * 3;
        if input.is_model {
            let model = (MATRIX_SIZE + VECTOR_SIZE * 2)
                .checked_mul(stages)
                .ok_or_else(layout_overflow)?;
            vertex = grow(vertex, model)?;
        }
        if geometry.custom_data_1_count() > 0 {
            vertex = grow(vertex, custom_data)?;
        }
        if geometry.custom_data_2_count() > 0 {
            vertex = grow(vertex, custom_data)?;
        }
        vertex = grow(vertex, user_uniforms)?;

        let mut pixel = VECTOR_SIZE * 8;
        if geometry.has_refraction() && refraction_enabled {
            pixel += MATRIX_SIZE;
        }
        pixel = grow(pixel, user_uniforms)?;

        Ok(UniformLayoutSizes { vertex, pixel })
    }
}

fn layout_overflow() -> Error {
    Error::GeneratorFailed("Uniform layout size overflows usize".to_string())
}

fn grow(size: usize, extra: usize) -> Result<usize> {
    size.checked_add(extra).ok_or_else(layout_overflow)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "parameter_generator_tests.rs"]
mod tests;
