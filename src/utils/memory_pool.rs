//! Reusable buffers for scanning many frames of the same size
//!
//! Provides pre-allocated storage for:
//! - The luminosity row
//! - The binarized scanline

use crate::models::Scanline;

/// Buffers reused across scan attempts. One pool per scanning thread.
pub struct BufferPool {
    luminosity_buffer: Vec<u8>,
    scanline_buffer: Scanline,
}

impl BufferPool {
    /// Create a pool sized for rows up to 1920 pixels wide
    pub fn new() -> Self {
        Self::with_capacity(1920)
    }

    /// Create a pool with a custom row capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let mut scanline_buffer = Scanline::new(capacity);
        scanline_buffer.reset(0);
        Self {
            luminosity_buffer: Vec::with_capacity(capacity),
            scanline_buffer,
        }
    }

    /// Borrow both buffers at once
    pub fn buffers(&mut self) -> (&mut Vec<u8>, &mut Scanline) {
        (&mut self.luminosity_buffer, &mut self.scanline_buffer)
    }

    /// Current luminosity buffer capacity
    pub fn capacity(&self) -> usize {
        self.luminosity_buffer.capacity()
    }

    /// Clear all buffers (resets lengths but keeps capacity)
    pub fn clear(&mut self) {
        self.luminosity_buffer.clear();
        self.scanline_buffer.reset(0);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
