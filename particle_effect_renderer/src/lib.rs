/*!
# Particle Effect Renderer

Shader resource descriptors for a particle effect renderer running inside a
host 3D engine.

A shader descriptor is the calling contract of one GPU shader as seen by the
particle rendering loop: its category (material file or built-in fallback),
the host material it belongs to, and two fixed-size uniform regions (vertex
and pixel stage) the loop rewrites and uploads every frame.

## Architecture

- **ShaderDescriptor**: one shader's contract, built from a material or a built-in kind
- **ParameterGenerator**: sizes material shader uniforms (trait + standard implementation)
- **UniformRegion**: fixed-size, zero-initialized uniform bytes
- **ShaderRegistry**: creates descriptors on demand and releases them
- **MaterialGeometry / MaterialHandle**: material description and opaque host handle

The host engine owns materials, GPU buffers and draw submission.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod material;
pub mod shader;

// Main pfx namespace module
pub mod pfx {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Material sub-module
    pub mod material {
        pub use crate::material::*;
    }

    // Shader sub-module
    pub mod shader {
        pub use crate::shader::*;
    }
}

// Re-export math library at crate root
pub use glam;
