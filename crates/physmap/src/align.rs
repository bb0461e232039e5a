//! Page alignment of target addresses.
//!
//! `mmap` only accepts file offsets that are a multiple of the page size, so
//! an arbitrary target address is split into a page-aligned base (what gets
//! mapped) and an intra-page offset (where the requested bytes start inside
//! the mapping).

use crate::error::{PhysMapError, PhysMapResult};

/// Fallback used when the OS does not report a usable page size.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// A target address split into page-aligned base and intra-page offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedWindow {
    /// Page-aligned address passed to the mapping call.
    pub base_address: u64,
    /// Distance from `base_address` to the requested address.
    pub intra_offset: usize,
    /// Page size the window was aligned to.
    pub page_size: usize,
}

impl AlignedWindow {
    /// The address originally requested.
    pub fn target_address(&self) -> u64 {
        self.base_address + self.intra_offset as u64
    }

    /// Number of bytes to map so that `length` bytes starting at the target
    /// address fall inside the window.
    pub fn window_len(&self, length: usize) -> PhysMapResult<usize> {
        if length == 0 {
            return Err(PhysMapError::argument("transfer length must be non-zero"));
        }
        self.intra_offset.checked_add(length).ok_or_else(|| {
            PhysMapError::argument(format!(
                "length {:#x} at offset {:#x} overflows the address space",
                length, self.intra_offset
            ))
        })
    }
}

/// Split `target_address` into an aligned base and intra-page offset.
///
/// `page_size` must be a non-zero power of two.
pub fn align(target_address: u64, page_size: usize) -> AlignedWindow {
    debug_assert!(page_size.is_power_of_two());
    let intra_offset = target_address % page_size as u64;
    AlignedWindow {
        base_address: target_address - intra_offset,
        intra_offset: intra_offset as usize,
        page_size,
    }
}

/// The system page size.
pub fn system_page_size() -> usize {
    // SAFETY: sysconf has no memory-safety preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 && (size as usize).is_power_of_two() {
        size as usize
    } else {
        DEFAULT_PAGE_SIZE
    }
}
