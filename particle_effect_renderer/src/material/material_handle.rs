/// Opaque reference to a host-engine material object.
///
/// The host material system owns the material; this crate only records
/// the handle to associate shaders with it. A handle never grants access
/// to the material and nothing here dereferences or frees it.

use slotmap::new_key_type;

new_key_type! {
    /// Non-owning handle to a material held by the host engine.
    ///
    /// Hosts that store their materials in a `SlotMap<MaterialHandle, _>`
    /// get stale-handle detection for free: a handle whose material was
    /// removed no longer resolves. Descriptors created from such a handle
    /// must be released by the consumer (see `ShaderRegistry::release_material`).
    pub struct MaterialHandle;
}
