//! Error types for the particle effect renderer bridge
//!
//! This module defines the error types used throughout the crate,
//! including parameter generation, uniform region allocation and
//! engine singleton management.

use std::fmt;

/// Result type for particle effect renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Particle effect renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Host-side failure (lock poisoning, host engine error, etc.)
    BackendError(String),

    /// Uniform region allocation failed
    OutOfMemory,

    /// Invalid resource (material description, region access, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, registry, subsystems)
    InitializationFailed(String),

    /// The parameter generator could not produce a uniform layout
    GeneratorFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of memory for uniform region"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::GeneratorFailed(msg) => write!(f, "Parameter generator failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::InvalidResource` from it
///
/// # Example
///
/// ```no_run
/// # use particle_effect_renderer::engine_err;
/// let name = "albedo";
/// let err = engine_err!("pfx::Material", "Texture '{}' not found", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::pfx::Error::InvalidResource(message)
    }};
}

/// Log an ERROR message and return early with an `Error::InvalidResource`
///
/// # Example
///
/// ```no_run
/// # use particle_effect_renderer::engine_bail;
/// # fn check(count: u32) -> particle_effect_renderer::pfx::Result<()> {
/// if count > 4 {
///     engine_bail!("pfx::Material", "Too many components: {}", count);
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
