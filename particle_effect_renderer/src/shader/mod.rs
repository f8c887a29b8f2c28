//! Shader module
//!
//! Shader resource descriptors, their uniform regions, the boundary to
//! parameter generators and the registry that owns descriptors.

pub mod uniform_region;
pub mod builtin_layout;
pub mod parameter_generator;
pub mod shader_descriptor;
pub mod shader_registry;

pub use uniform_region::UniformRegion;
pub use builtin_layout::{
    BuiltinVertexUniforms, BuiltinPixelUniforms,
    BUILTIN_VERTEX_UNIFORM_SIZE, BUILTIN_PIXEL_UNIFORM_SIZE,
    BUILTIN_MODEL_MATRIX_COUNT, BUILTIN_PIXEL_PARAM_COUNT,
};
pub use parameter_generator::{
    ParameterGenerator, StandardParameterGenerator,
    GeneratorInput, UniformLayoutSizes,
    REFRACTION_MODE_DISABLED, REFRACTION_MODE_ENABLED, SINGLE_STAGE,
    refraction_mode,
};
pub use shader_descriptor::{ShaderDescriptor, ShaderCategory, BuiltinShaderKind};
pub use shader_registry::{ShaderRegistry, ShaderKey};
