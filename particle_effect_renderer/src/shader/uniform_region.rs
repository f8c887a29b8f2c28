/// Fixed-size CPU-side uniform data region.
///
/// Holds the bytes of one shader stage's constant buffer. The size is set
/// once at allocation and is the binding contract the rendering loop uses
/// to size GPU uploads; only the contents change, once per frame.

use crate::error::{Error, Result};
use crate::engine_bail;

/// Zero-initialized byte region whose length never changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformRegion {
    bytes: Box<[u8]>,
}

impl UniformRegion {
    /// Allocate `size` zero bytes
    ///
    /// Allocation failure is reported as `Error::OutOfMemory`. A size of
    /// zero is valid and describes a stage with no uniforms.
    pub fn zeroed(size: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;
        bytes.resize(size, 0u8);
        Ok(Self { bytes: bytes.into_boxed_slice() })
    }

    // ===== ACCESSORS =====

    /// Size in bytes
    pub fn len(&self) -> usize { self.bytes.len() }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Bytes to upload
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Direct write access (length stays fixed)
    pub fn as_bytes_mut(&mut self) -> &mut [u8] { &mut self.bytes }

    // ===== WRITES =====

    /// Copy raw bytes at `offset`
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let end = match offset.checked_add(data.len()) {
            Some(end) if end <= self.bytes.len() => end,
            _ => engine_bail!("pfx::UniformRegion",
                "Write at offset {} with size {} exceeds region size {}",
                offset, data.len(), self.bytes.len()),
        };
        self.bytes[offset..end].copy_from_slice(data);
        Ok(())
    }

    /// Copy a plain-old-data value at `offset`
    pub fn write_pod<T: bytemuck::Pod>(&mut self, offset: usize, value: &T) -> Result<()> {
        self.write(offset, bytemuck::bytes_of(value))
    }

    /// Reset every byte to zero
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "uniform_region_tests.rs"]
mod tests;
