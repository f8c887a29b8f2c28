/// Material parameter geometry.
///
/// A MaterialGeometry is the compiled, data-driven description of a
/// particle material's shader inputs: which user uniforms it declares
/// (and how many float4 slots each takes), which textures it samples,
/// whether it writes a refraction output and how many per-particle
/// custom data components it reads.
///
/// Parameter generators turn a geometry into uniform buffer sizes.
/// The geometry itself holds no GPU state.

use std::collections::HashSet;
use crate::error::Result;
use crate::engine_bail;

/// Maximum number of components in one custom data channel (float4)
pub const MAX_CUSTOM_DATA_COMPONENTS: u32 = 4;

// ===== PROPERTIES =====

/// A user uniform declared by the material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformProperty {
    pub name: String,
    /// Number of float4 slots occupied
    pub count: u32,
}

/// A texture sampled by the material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureProperty {
    pub name: String,
}

// ===== DESCRIPTOR =====

/// Material geometry creation descriptor
#[derive(Debug, Clone, Default)]
pub struct MaterialGeometryDesc {
    pub uniforms: Vec<UniformProperty>,
    pub textures: Vec<TextureProperty>,
    pub has_refraction: bool,
    pub custom_data_1_count: u32,
    pub custom_data_2_count: u32,
}

// ===== MATERIAL GEOMETRY =====

/// Validated material parameter geometry
///
/// `MaterialGeometry::default()` is the degenerate material: no uniforms,
/// no textures, no refraction, no custom data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialGeometry {
    uniforms: Vec<UniformProperty>,
    textures: Vec<TextureProperty>,
    has_refraction: bool,
    custom_data_1_count: u32,
    custom_data_2_count: u32,
}

impl MaterialGeometry {
    /// Create a geometry from a descriptor
    ///
    /// Rejects duplicate uniform or texture names and custom data
    /// channels wider than a float4.
    pub fn from_desc(desc: MaterialGeometryDesc) -> Result<Self> {
        let mut seen_uniforms = HashSet::new();
        for uniform in &desc.uniforms {
            if !seen_uniforms.insert(uniform.name.as_str()) {
                engine_bail!("pfx::MaterialGeometry",
                    "Duplicate uniform name '{}'", uniform.name);
            }
        }

        let mut seen_textures = HashSet::new();
        for texture in &desc.textures {
            if !seen_textures.insert(texture.name.as_str()) {
                engine_bail!("pfx::MaterialGeometry",
                    "Duplicate texture name '{}'", texture.name);
            }
        }

        for (channel, count) in [(1, desc.custom_data_1_count), (2, desc.custom_data_2_count)] {
            if count > MAX_CUSTOM_DATA_COMPONENTS {
                engine_bail!("pfx::MaterialGeometry",
                    "Custom data {} has {} components (max {})",
                    channel, count, MAX_CUSTOM_DATA_COMPONENTS);
            }
        }

        Ok(Self {
            uniforms: desc.uniforms,
            textures: desc.textures,
            has_refraction: desc.has_refraction,
            custom_data_1_count: desc.custom_data_1_count,
            custom_data_2_count: desc.custom_data_2_count,
        })
    }

    // ===== UNIFORM ACCESS =====

    pub fn uniforms(&self) -> &[UniformProperty] {
        &self.uniforms
    }

    /// Get uniform by name
    pub fn uniform(&self, name: &str) -> Option<&UniformProperty> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// Total float4 slots taken by all user uniforms
    ///
    /// `None` when the total does not fit in a `u32`.
    pub fn uniform_slot_count(&self) -> Option<u32> {
        self.uniforms.iter().try_fold(0u32, |total, u| total.checked_add(u.count))
    }

    // ===== TEXTURE ACCESS =====

    pub fn textures(&self) -> &[TextureProperty] {
        &self.textures
    }

    /// Get texture slot index by name
    pub fn texture_index(&self, name: &str) -> Option<usize> {
        self.textures.iter().position(|t| t.name == name)
    }

    // ===== FLAGS =====

    pub fn has_refraction(&self) -> bool {
        self.has_refraction
    }

    pub fn custom_data_1_count(&self) -> u32 {
        self.custom_data_1_count
    }

    pub fn custom_data_2_count(&self) -> u32 {
        self.custom_data_2_count
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_geometry_tests.rs"]
mod tests;
