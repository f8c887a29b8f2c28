/// Owner of the shader descriptors used by the particle renderer.
///
/// The registry creates one descriptor per distinct material shader variant
/// and one per built-in kind, on first use, and keeps it until released.
/// Material descriptors remember the geometry they were sized from; a lookup
/// with a different geometry rebuilds the descriptor in place. Host material
/// handles can still go stale at any time; the host runs `retain_materials`
/// (or `release_material`) to drop descriptors of deleted materials.

use std::collections::hash_map::Entry;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::material::{MaterialGeometry, MaterialHandle};
use super::parameter_generator::ParameterGenerator;
use super::shader_descriptor::{ShaderDescriptor, BuiltinShaderKind};

/// Identity of a descriptor inside the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKey {
    /// Material shader variant (model/refraction change the uniform sizes)
    Material {
        handle: MaterialHandle,
        is_model: bool,
        is_refraction: bool,
    },
    Builtin(BuiltinShaderKind),
}

impl ShaderKey {
    /// Material handle of a material key
    pub fn material_handle(&self) -> Option<MaterialHandle> {
        match self {
            ShaderKey::Material { handle, .. } => Some(*handle),
            ShaderKey::Builtin(_) => None,
        }
    }
}

/// Cached descriptor plus the material geometry it was sized from
struct CachedShader {
    descriptor: ShaderDescriptor,
    geometry: Option<MaterialGeometry>,
}

/// Shader descriptor cache
pub struct ShaderRegistry {
    generator: Box<dyn ParameterGenerator + Send>,
    shaders: FxHashMap<ShaderKey, CachedShader>,
}

impl ShaderRegistry {
    /// Create an empty registry using `generator` for material shaders
    pub fn new<G: ParameterGenerator + Send + 'static>(generator: G) -> Self {
        Self {
            generator: Box::new(generator),
            shaders: FxHashMap::default(),
        }
    }

    // ===== GET OR CREATE =====

    /// Get the descriptor for a material shader variant, creating it on first use
    ///
    /// A cached descriptor built from a different geometry is rebuilt, so the
    /// region sizes always match `geometry`.
    ///
    /// # Errors
    ///
    /// Generator and allocation errors are returned unchanged. Nothing is
    /// cached when creation fails, and a failed rebuild drops the old entry.
    pub fn material_shader(
        &mut self,
        handle: MaterialHandle,
        geometry: &MaterialGeometry,
        is_model: bool,
        is_refraction: bool,
    ) -> Result<&mut ShaderDescriptor> {
        let key = ShaderKey::Material { handle, is_model, is_refraction };
        self.get_or_create(key, Some(geometry), |generator| {
            ShaderDescriptor::from_material(handle, geometry, is_model, is_refraction, generator)
        })
    }

    /// Get the descriptor for a built-in kind, creating it on first use
    pub fn builtin_shader(&mut self, kind: BuiltinShaderKind) -> Result<&mut ShaderDescriptor> {
        self.get_or_create(ShaderKey::Builtin(kind), None, |generator| {
            ShaderDescriptor::builtin(kind, generator)
        })
    }

    fn get_or_create<F>(
        &mut self,
        key: ShaderKey,
        geometry: Option<&MaterialGeometry>,
        create: F,
    ) -> Result<&mut ShaderDescriptor>
    where
        F: FnOnce(&dyn ParameterGenerator) -> Result<ShaderDescriptor>,
    {
        match self.shaders.entry(key) {
            Entry::Occupied(mut entry) => {
                if entry.get().geometry.as_ref() == geometry {
                    crate::engine_trace!("pfx::ShaderRegistry", "Reusing shader {:?}", key);
                    return Ok(&mut entry.into_mut().descriptor);
                }
                match create(&*self.generator) {
                    Ok(descriptor) => {
                        crate::engine_debug!("pfx::ShaderRegistry",
                            "Rebuilt shader {:?} for changed material geometry", key);
                        entry.insert(CachedShader { descriptor, geometry: geometry.cloned() });
                        Ok(&mut entry.into_mut().descriptor)
                    }
                    Err(err) => {
                        entry.remove();
                        Err(err)
                    }
                }
            }
            Entry::Vacant(entry) => {
                let descriptor = create(&*self.generator)?;
                crate::engine_debug!("pfx::ShaderRegistry", "Registered shader {:?}", key);
                let cached = entry.insert(CachedShader { descriptor, geometry: geometry.cloned() });
                Ok(&mut cached.descriptor)
            }
        }
    }

    // ===== LOOKUP =====

    /// Get a cached descriptor without creating it
    pub fn get(&self, key: &ShaderKey) -> Option<&ShaderDescriptor> {
        self.shaders.get(key).map(|cached| &cached.descriptor)
    }

    /// Get a cached descriptor for the per-frame uniform rewrite
    pub fn get_mut(&mut self, key: &ShaderKey) -> Option<&mut ShaderDescriptor> {
        self.shaders.get_mut(key).map(|cached| &mut cached.descriptor)
    }

    /// Check if a descriptor is cached for `key`
    pub fn contains(&self, key: &ShaderKey) -> bool {
        self.shaders.contains_key(key)
    }

    /// Number of live descriptors
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Check if no descriptor is cached
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    /// Iterate over all descriptors
    pub fn iter(&self) -> impl Iterator<Item = (&ShaderKey, &ShaderDescriptor)> {
        self.shaders.iter().map(|(key, cached)| (key, &cached.descriptor))
    }

    // ===== RELEASE =====

    /// Release one descriptor. Returns true if it existed.
    pub fn release(&mut self, key: &ShaderKey) -> bool {
        let removed = self.shaders.remove(key).is_some();
        if removed {
            crate::engine_debug!("pfx::ShaderRegistry", "Released shader {:?}", key);
        }
        removed
    }

    /// Release every variant bound to a material. Returns the number released.
    pub fn release_material(&mut self, handle: MaterialHandle) -> usize {
        self.retain_materials(|h| h != handle)
    }

    /// Keep only material shaders whose handle satisfies `is_valid`
    ///
    /// Built-in shaders are always kept. Returns the number released.
    pub fn retain_materials<P>(&mut self, mut is_valid: P) -> usize
    where
        P: FnMut(MaterialHandle) -> bool,
    {
        let before = self.shaders.len();
        self.shaders.retain(|key, _| match key.material_handle() {
            Some(handle) => is_valid(handle),
            None => true,
        });
        let released = before - self.shaders.len();
        if released > 0 {
            crate::engine_debug!("pfx::ShaderRegistry", "Released {} material shader(s)", released);
        }
        released
    }

    /// Release all descriptors
    pub fn clear(&mut self) {
        self.shaders.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_registry_tests.rs"]
mod tests;
