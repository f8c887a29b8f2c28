//! Material module
//!
//! Host material handles and the material-parameter descriptions
//! consumed by parameter generators.

pub mod material_handle;
pub mod material_geometry;

pub use material_handle::MaterialHandle;
pub use material_geometry::{
    MaterialGeometry, MaterialGeometryDesc,
    UniformProperty, TextureProperty,
    MAX_CUSTOM_DATA_COMPONENTS,
};
