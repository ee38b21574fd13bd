//! Growable GPU buffers for per-frame instance uploads.
//!
//! Buffers grow 2x when data exceeds capacity and never shrink (GPU buffers
//! cannot be resized in place).

use std::marker::PhantomData;

/// Smallest buffer ever allocated, in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity after writing `needed` bytes into a buffer of `current` bytes,
/// or `None` when the data already fits.
#[must_use]
pub fn grown_capacity(needed: usize, current: usize) -> Option<usize> {
    // 2x growth, minimum 1KB step
    (needed > current).then(|| (needed * 2).max(current + 1024))
}

/// A GPU buffer that can grow dynamically.
#[derive(Debug)]
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes
    len: usize,      // Current data length in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups need
    /// recreation).
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let reallocated = if let Some(capacity) = grown_capacity(bytes.len(), self.capacity) {
            log::debug!("growing {} to {capacity} bytes", self.label);
            self.buffer = Self::allocate(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
            true
        } else {
            false
        };

        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = bytes.len();
        reallocated
    }

    /// Underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Typed wrapper for [`DynamicBuffer`] that tracks item count rather than
/// byte length.
#[derive(Debug)]
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer sized for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new(device, label, size_of::<T>() * capacity, usage),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Write items, growing if necessary. Returns `true` on reallocation.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// Underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Items written by the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Capacity in items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity() / size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_without_growth() {
        assert_eq!(grown_capacity(64, 64), None);
        assert_eq!(grown_capacity(0, 64), None);
    }

    #[test]
    fn grows_to_double_or_one_kilobyte_step() {
        assert_eq!(grown_capacity(65, 64), Some(64 + 1024));
        assert_eq!(grown_capacity(4096, 2048), Some(8192));
    }
}
