/// Shader resource descriptor.
///
/// A ShaderDescriptor is the calling contract of one GPU shader program as
/// seen by the particle rendering loop: what kind of shader it is, which
/// host material it belongs to (if any) and how many bytes of vertex-stage
/// and pixel-stage uniforms it expects.
///
/// Two factories build it:
/// - `from_material`: sizes come from a parameter generator run on the
///   material's geometry
/// - `builtin`: sizes come from the fixed built-in layout
///
/// Category and region sizes never change after construction. The
/// rendering loop rewrites the region bytes once per frame and uploads them.

use crate::error::Result;
use crate::material::{MaterialGeometry, MaterialHandle};
use super::builtin_layout::{BUILTIN_VERTEX_UNIFORM_SIZE, BUILTIN_PIXEL_UNIFORM_SIZE};
use super::parameter_generator::{
    ParameterGenerator, GeneratorInput, UniformLayoutSizes,
    REFRACTION_MODE_DISABLED, SINGLE_STAGE, refraction_mode,
};
use super::uniform_region::UniformRegion;

// ===== CATEGORY =====

/// Built-in fallback shader kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinShaderKind {
    /// Unlit sprite/ribbon/track shading
    Unlit,
    /// Normal-mapped lit shading
    Lighting,
    /// Screen-space distortion
    BackDistortion,
}

/// Shader category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderCategory {
    /// Driven by a user-authored material file
    FileMaterial,
    /// Built-in fallback shader with the fixed layout
    Builtin(BuiltinShaderKind),
}

// ===== SHADER DESCRIPTOR =====

/// Resource contract of one shader
#[derive(Debug)]
pub struct ShaderDescriptor {
    category: ShaderCategory,
    /// Not owned. Recorded for lookup only.
    material: Option<MaterialHandle>,
    vertex_uniforms: UniformRegion,
    pixel_uniforms: UniformRegion,
}

impl ShaderDescriptor {
    /// Create a material-backed shader
    ///
    /// # Arguments
    ///
    /// * `material` - Host material handle (recorded, never dereferenced)
    /// * `geometry` - Material parameter geometry given to the generator
    /// * `is_model` - 3D model draw path instead of the sprite path
    /// * `is_refraction` - Shader takes part in the refraction pass
    /// * `generator` - Parameter generator reporting the uniform sizes
    ///
    /// # Errors
    ///
    /// Generator errors are returned unchanged. Region allocation failure
    /// returns `Error::OutOfMemory`.
    pub fn from_material(
        material: MaterialHandle,
        geometry: &MaterialGeometry,
        is_model: bool,
        is_refraction: bool,
        generator: &dyn ParameterGenerator,
    ) -> Result<Self> {
        let sizes = Self::run_generator(generator, &GeneratorInput {
            geometry,
            is_model,
            refraction_mode: refraction_mode(is_refraction),
            stage_count: SINGLE_STAGE,
        })?;

        let descriptor = Self::with_sizes(ShaderCategory::FileMaterial, Some(material), sizes)?;

        crate::engine_debug!("pfx::ShaderDescriptor",
            "Material shader created (model: {}, refraction: {}, vs: {} bytes, ps: {} bytes)",
            is_model, is_refraction, sizes.vertex, sizes.pixel);

        Ok(descriptor)
    }

    /// Create a built-in shader
    ///
    /// The generator still runs on the degenerate material with refraction
    /// disabled, but its sizes are ignored: built-in regions always use the
    /// fixed layout (256 vertex bytes, 64 pixel bytes). A generator error is
    /// still returned unchanged.
    pub fn builtin(kind: BuiltinShaderKind, generator: &dyn ParameterGenerator) -> Result<Self> {
        let degenerate = MaterialGeometry::default();
        Self::run_generator(generator, &GeneratorInput {
            geometry: &degenerate,
            is_model: false,
            refraction_mode: REFRACTION_MODE_DISABLED,
            stage_count: SINGLE_STAGE,
        })?;

        let sizes = UniformLayoutSizes {
            vertex: BUILTIN_VERTEX_UNIFORM_SIZE,
            pixel: BUILTIN_PIXEL_UNIFORM_SIZE,
        };
        let descriptor = Self::with_sizes(ShaderCategory::Builtin(kind), None, sizes)?;

        crate::engine_debug!("pfx::ShaderDescriptor", "Built-in shader {:?} created", kind);

        Ok(descriptor)
    }

    fn run_generator(
        generator: &dyn ParameterGenerator,
        input: &GeneratorInput<'_>,
    ) -> Result<UniformLayoutSizes> {
        generator.generate(input).map_err(|error| {
            crate::engine_error!("pfx::ShaderDescriptor",
                "Parameter generator failed: {}", error);
            error
        })
    }

    fn with_sizes(
        category: ShaderCategory,
        material: Option<MaterialHandle>,
        sizes: UniformLayoutSizes,
    ) -> Result<Self> {
        Ok(Self {
            category,
            material,
            vertex_uniforms: UniformRegion::zeroed(sizes.vertex)?,
            pixel_uniforms: UniformRegion::zeroed(sizes.pixel)?,
        })
    }

    // ===== ACCESSORS =====

    /// Get the shader category
    pub fn category(&self) -> ShaderCategory {
        self.category
    }

    /// Get the host material handle (None for built-in shaders)
    pub fn material_handle(&self) -> Option<MaterialHandle> {
        self.material
    }

    /// Check if this is a built-in fallback shader
    pub fn is_builtin(&self) -> bool {
        matches!(self.category, ShaderCategory::Builtin(_))
    }

    /// Vertex stage uniform bytes
    pub fn vertex_uniforms(&self) -> &UniformRegion {
        &self.vertex_uniforms
    }

    /// Pixel stage uniform bytes
    pub fn pixel_uniforms(&self) -> &UniformRegion {
        &self.pixel_uniforms
    }

    /// Vertex stage uniform bytes for the per-frame rewrite
    pub fn vertex_uniforms_mut(&mut self) -> &mut UniformRegion {
        &mut self.vertex_uniforms
    }

    /// Pixel stage uniform bytes for the per-frame rewrite
    pub fn pixel_uniforms_mut(&mut self) -> &mut UniformRegion {
        &mut self.pixel_uniforms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_descriptor_tests.rs"]
mod tests;
