//! One mapping lifecycle per operation: align, map, transfer, release.

use crate::align::{align, AlignedWindow};
use crate::error::PhysMapResult;
use crate::mapping::{Mapper, MappingRequest};
use crate::transfer;
use tracing::debug;

/// High-level access to a memory device through a [`Mapper`].
///
/// Every operation maps exactly the window it needs and releases it before
/// returning, on success and on error alike.
pub struct MemoryDevice<M: Mapper> {
    mapper: M,
}

impl<M: Mapper> MemoryDevice<M> {
    pub fn new(mapper: M) -> Self {
        MemoryDevice { mapper }
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Align `target` to the configured page size.
    pub fn window(&self, target: u64) -> AlignedWindow {
        align(target, self.mapper.config().page_size)
    }

    /// Read `length` bytes starting at `target`.
    pub fn read(&self, target: u64, length: usize) -> PhysMapResult<Vec<u8>> {
        self.with_mapping(target, length, false, |mapping, offset| {
            transfer::drain(&*mapping, offset, length)
        })
    }

    /// Write all of `data` starting at `target`.
    pub fn write(&self, target: u64, data: &[u8]) -> PhysMapResult<()> {
        self.with_mapping(target, data.len(), true, |mapping, offset| {
            transfer::fill(mapping, offset, data, data.len())
        })
    }

    /// Compare memory at `target` against `reference`. `true` means equal.
    pub fn compare(&self, target: u64, reference: &[u8]) -> PhysMapResult<bool> {
        self.with_mapping(target, reference.len(), false, |mapping, offset| {
            transfer::compare(&*mapping, offset, reference.len(), reference)
        })
    }

    fn with_mapping<T>(
        &self,
        target: u64,
        length: usize,
        writable: bool,
        op: impl FnOnce(&mut M::Mapping, usize) -> PhysMapResult<T>,
    ) -> PhysMapResult<T> {
        let window = self.window(target);
        let size = window.window_len(length)?;

        debug!("Page size: {:#x}", window.page_size);
        debug!("Page offset: {:#x}", window.intra_offset);
        debug!("Target: {:#x}", window.base_address);

        let request = MappingRequest {
            device_path: self.mapper.config().device_path.clone(),
            base_address: window.base_address,
            size,
            writable,
        };

        let mut mapping = self.mapper.open_mapping(&request)?;
        let result = op(&mut mapping, window.intra_offset);
        self.mapper.close_mapping(mapping);
        result
    }
}
