/// Engine - Singleton manager for the bridge subsystems
///
/// Holds the process-wide shader registry and logger. The host engine
/// initializes it once, installs its logger and creates the registry with
/// the parameter generator it wants shaders sized by.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::shader::{ParameterGenerator, ShaderRegistry};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    shader_registry: RwLock<Option<Arc<Mutex<ShaderRegistry>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            shader_registry: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```no_run
/// use particle_effect_renderer::pfx::{Engine, shader::{StandardParameterGenerator, BuiltinShaderKind}};
///
/// Engine::initialize()?;
/// Engine::create_shader_registry(StandardParameterGenerator::new())?;
///
/// let registry = Engine::shader_registry()?;
/// let mut registry = registry.lock().unwrap();
/// let shader = registry.builtin_shader(BuiltinShaderKind::Unlit)?;
/// assert_eq!(shader.vertex_uniforms().len(), 256);
/// # drop(registry);
///
/// Engine::shutdown();
/// # Ok::<(), particle_effect_renderer::pfx::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Log an engine error before handing it back to the caller
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("pfx::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    /// Initialize the engine (idempotent)
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Destroy all singletons
    ///
    /// Dropping the registry releases every descriptor it owns. Host
    /// material handles are untouched.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut registry) = state.shader_registry.write() {
                *registry = None;
            }
        }
    }

    // ===== SHADER REGISTRY API =====

    /// Create and register the shader registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A registry already exists
    /// - The registry lock is poisoned
    pub fn create_shader_registry<G: ParameterGenerator + Send + 'static>(generator: G) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.shader_registry.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ShaderRegistry lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("ShaderRegistry already exists. Call Engine::destroy_shader_registry() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(ShaderRegistry::new(generator))));

        crate::engine_info!("pfx::Engine", "ShaderRegistry singleton created successfully");

        Ok(())
    }

    /// Get the shader registry singleton
    pub fn shader_registry() -> Result<Arc<Mutex<ShaderRegistry>>> {
        let state = Self::state()?;

        let lock = state.shader_registry.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ShaderRegistry lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("ShaderRegistry not created. Call Engine::create_shader_registry() first.".to_string())
            ))
    }

    /// Destroy the shader registry singleton
    ///
    /// Existing `Arc` clones stay valid until dropped.
    pub fn destroy_shader_registry() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.shader_registry.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ShaderRegistry lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("pfx::Engine", "ShaderRegistry singleton destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        Self::shutdown();
    }

    // ===== LOGGING API =====

    /// Replace the logger (e.g. forward to the host engine console)
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to `DefaultLogger::default()`
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method, used by engine_trace! .. engine_warn!
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line, used by engine_error!
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
