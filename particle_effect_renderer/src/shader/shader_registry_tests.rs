use super::*;
use crate::error::Error;
use crate::material::{MaterialGeometryDesc, UniformProperty};
use crate::shader::parameter_generator::{GeneratorInput, StandardParameterGenerator, UniformLayoutSizes};
use crate::shader::shader_descriptor::ShaderCategory;
use slotmap::SlotMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Helpers
// ============================================================================

/// Counts calls, reports 128/64
struct CountingGenerator {
    calls: Arc<AtomicUsize>,
}

impl ParameterGenerator for CountingGenerator {
    fn generate(&self, _input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UniformLayoutSizes { vertex: 128, pixel: 64 })
    }
}

/// Fails on refraction requests only
struct NoRefractionGenerator;

impl ParameterGenerator for NoRefractionGenerator {
    fn generate(&self, input: &GeneratorInput<'_>) -> Result<UniformLayoutSizes> {
        if input.refraction_mode != 0 {
            return Err(Error::GeneratorFailed("refraction unsupported".to_string()));
        }
        Ok(UniformLayoutSizes { vertex: 32, pixel: 32 })
    }
}

fn counting_registry() -> (ShaderRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (ShaderRegistry::new(CountingGenerator { calls: calls.clone() }), calls)
}

fn handles(count: usize) -> (SlotMap<MaterialHandle, ()>, Vec<MaterialHandle>) {
    let mut host = SlotMap::with_key();
    let keys = (0..count).map(|_| host.insert(())).collect();
    (host, keys)
}

// ============================================================================
// Get or create
// ============================================================================

#[test]
fn test_new_registry_is_empty() {
    let (registry, calls) = counting_registry();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_material_shader_created_once() {
    let (mut registry, calls) = counting_registry();
    let (_host, keys) = handles(1);
    let geometry = MaterialGeometry::default();

    let first = registry.material_shader(keys[0], &geometry, false, false).unwrap();
    assert_eq!(first.vertex_uniforms().len(), 128);
    first.vertex_uniforms_mut().write(0, &[5]).unwrap();

    let second = registry.material_shader(keys[0], &geometry, false, false).unwrap();
    assert_eq!(second.vertex_uniforms().as_bytes()[0], 5);

    assert_eq!(registry.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_variants_are_distinct_entries() {
    let (mut registry, _calls) = counting_registry();
    let (_host, keys) = handles(1);
    let geometry = MaterialGeometry::default();

    for (is_model, is_refraction) in [(false, false), (true, false), (false, true), (true, true)] {
        registry.material_shader(keys[0], &geometry, is_model, is_refraction).unwrap();
    }
    assert_eq!(registry.len(), 4);
    assert!(registry.contains(&ShaderKey::Material {
        handle: keys[0], is_model: true, is_refraction: false,
    }));
}

#[test]
fn test_changed_geometry_rebuilds_descriptor() {
    let mut registry = ShaderRegistry::new(StandardParameterGenerator::new());
    let (_host, keys) = handles(1);
    let plain = MaterialGeometry::default();
    let wide = MaterialGeometry::from_desc(MaterialGeometryDesc {
        uniforms: vec![UniformProperty { name: "ramp".to_string(), count: 8 }],
        ..Default::default()
    }).unwrap();

    let first = registry.material_shader(keys[0], &plain, false, false).unwrap();
    assert_eq!(first.vertex_uniforms().len(), 176);

    let second = registry.material_shader(keys[0], &wide, false, false).unwrap();
    assert_eq!(second.vertex_uniforms().len(), 176 + 8 * 16);
    assert_eq!(second.pixel_uniforms().len(), 128 + 8 * 16);
    assert_eq!(registry.len(), 1);

    // Switching back rebuilds again
    let third = registry.material_shader(keys[0], &plain, false, false).unwrap();
    assert_eq!(third.vertex_uniforms().len(), 176);
}

#[test]
fn test_same_geometry_keeps_cached_bytes() {
    let (mut registry, calls) = counting_registry();
    let (_host, keys) = handles(1);
    let geometry = MaterialGeometry::from_desc(MaterialGeometryDesc {
        uniforms: vec![UniformProperty { name: "tint".to_string(), count: 1 }],
        ..Default::default()
    }).unwrap();

    registry.material_shader(keys[0], &geometry, false, false).unwrap()
        .pixel_uniforms_mut().write(0, &[9]).unwrap();

    // An equal geometry built separately still hits the cache
    let copy = geometry.clone();
    let shader = registry.material_shader(keys[0], &copy, false, false).unwrap();
    assert_eq!(shader.pixel_uniforms().as_bytes()[0], 9);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_rebuild_drops_stale_entry() {
    let mut registry = ShaderRegistry::new(StandardParameterGenerator::new());
    let (_host, keys) = handles(1);
    let overflowing = MaterialGeometry::from_desc(MaterialGeometryDesc {
        uniforms: vec![
            UniformProperty { name: "huge".to_string(), count: u32::MAX },
            UniformProperty { name: "one_more".to_string(), count: 1 },
        ],
        ..Default::default()
    }).unwrap();

    registry.material_shader(keys[0], &MaterialGeometry::default(), false, false).unwrap();

    let result = registry.material_shader(keys[0], &overflowing, false, false);
    assert!(matches!(result, Err(Error::GeneratorFailed(_))));
    assert!(registry.is_empty());
}

#[test]
fn test_builtin_shader_created_once_per_kind() {
    let (mut registry, calls) = counting_registry();

    let unlit = registry.builtin_shader(BuiltinShaderKind::Unlit).unwrap();
    assert_eq!(unlit.category(), ShaderCategory::Builtin(BuiltinShaderKind::Unlit));
    assert_eq!(unlit.vertex_uniforms().len(), 256);
    assert_eq!(unlit.pixel_uniforms().len(), 64);

    registry.builtin_shader(BuiltinShaderKind::Unlit).unwrap();
    registry.builtin_shader(BuiltinShaderKind::Lighting).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(registry.get(&ShaderKey::Builtin(BuiltinShaderKind::BackDistortion)).is_none());
}

#[test]
fn test_failed_creation_caches_nothing() {
    let mut registry = ShaderRegistry::new(NoRefractionGenerator);
    let (_host, keys) = handles(1);
    let geometry = MaterialGeometry::default();

    let result = registry.material_shader(keys[0], &geometry, false, true);
    assert!(matches!(result, Err(Error::GeneratorFailed(_))));
    assert!(registry.is_empty());

    registry.material_shader(keys[0], &geometry, false, false).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_standard_generator_end_to_end() {
    let mut registry = ShaderRegistry::new(StandardParameterGenerator::new());
    let (_host, keys) = handles(1);
    let geometry = MaterialGeometry::from_desc(MaterialGeometryDesc {
        uniforms: vec![UniformProperty { name: "tint".to_string(), count: 1 }],
        has_refraction: true,
        ..Default::default()
    }).unwrap();

    let shader = registry.material_shader(keys[0], &geometry, false, true).unwrap();
    assert_eq!(shader.vertex_uniforms().len(), 176 + 16);
    assert_eq!(shader.pixel_uniforms().len(), 128 + 64 + 16);
    assert_eq!(shader.material_handle(), Some(keys[0]));
}

// ============================================================================
// Lookup and release
// ============================================================================

#[test]
fn test_get_mut_and_iter() {
    let (mut registry, _calls) = counting_registry();
    registry.builtin_shader(BuiltinShaderKind::Unlit).unwrap();

    let key = ShaderKey::Builtin(BuiltinShaderKind::Unlit);
    registry.get_mut(&key).unwrap().pixel_uniforms_mut().write_pod(0, &1.0f32).unwrap();
    assert_eq!(&registry.get(&key).unwrap().pixel_uniforms().as_bytes()[..4], &1.0f32.to_ne_bytes());

    let keys: Vec<ShaderKey> = registry.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![key]);
}

#[test]
fn test_release_single_shader() {
    let (mut registry, calls) = counting_registry();
    registry.builtin_shader(BuiltinShaderKind::Lighting).unwrap();

    let key = ShaderKey::Builtin(BuiltinShaderKind::Lighting);
    assert!(registry.release(&key));
    assert!(!registry.release(&key));
    assert!(registry.is_empty());

    // Recreated on next use
    registry.builtin_shader(BuiltinShaderKind::Lighting).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_release_material_drops_all_variants() {
    let (mut registry, _calls) = counting_registry();
    let (_host, keys) = handles(2);
    let geometry = MaterialGeometry::default();

    registry.material_shader(keys[0], &geometry, false, false).unwrap();
    registry.material_shader(keys[0], &geometry, true, true).unwrap();
    registry.material_shader(keys[1], &geometry, false, false).unwrap();
    registry.builtin_shader(BuiltinShaderKind::Unlit).unwrap();

    assert_eq!(registry.release_material(keys[0]), 2);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.release_material(keys[0]), 0);
}

#[test]
fn test_retain_materials_drops_stale_handles() {
    let (mut registry, _calls) = counting_registry();
    let (mut host, keys) = handles(3);
    let geometry = MaterialGeometry::default();

    for key in &keys {
        registry.material_shader(*key, &geometry, false, false).unwrap();
    }
    registry.builtin_shader(BuiltinShaderKind::BackDistortion).unwrap();

    host.remove(keys[1]);
    let released = registry.retain_materials(|handle| host.contains_key(handle));

    assert_eq!(released, 1);
    assert_eq!(registry.len(), 3);
    assert!(registry.iter().all(|(key, _)| key.material_handle() != Some(keys[1])));
    assert!(registry.contains(&ShaderKey::Builtin(BuiltinShaderKind::BackDistortion)));
}

#[test]
fn test_clear() {
    let (mut registry, _calls) = counting_registry();
    registry.builtin_shader(BuiltinShaderKind::Unlit).unwrap();
    registry.builtin_shader(BuiltinShaderKind::Lighting).unwrap();
    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn test_shader_key_material_handle() {
    let (_host, keys) = handles(1);
    let key = ShaderKey::Material { handle: keys[0], is_model: false, is_refraction: false };
    assert_eq!(key.material_handle(), Some(keys[0]));
    assert_eq!(ShaderKey::Builtin(BuiltinShaderKind::Unlit).material_handle(), None);
}
