//! Bounds-checked byte transfer between a mapping and owned buffers.

use crate::error::{PhysMapError, PhysMapResult};
use crate::mapping::MappedRegion;

/// Check that `[offset, offset + length)` lies inside a window of `window` bytes.
fn check_bounds(offset: usize, length: usize, window: usize) -> PhysMapResult<()> {
    match offset.checked_add(length) {
        Some(end) if end <= window => Ok(()),
        _ => Err(PhysMapError::WindowOverrun {
            offset,
            length,
            window,
        }),
    }
}

/// Copy `length` bytes starting at `offset` out of the mapping.
pub fn drain<R: MappedRegion + ?Sized>(
    mapping: &R,
    offset: usize,
    length: usize,
) -> PhysMapResult<Vec<u8>> {
    check_bounds(offset, length, mapping.len())?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(length)
        .map_err(|_| PhysMapError::Allocation(length))?;
    buffer.extend_from_slice(&mapping.as_slice()[offset..offset + length]);
    Ok(buffer)
}

/// Copy the first `length` bytes of `source` into the mapping at `offset`.
pub fn fill<R: MappedRegion + ?Sized>(
    mapping: &mut R,
    offset: usize,
    source: &[u8],
    length: usize,
) -> PhysMapResult<()> {
    if source.len() < length {
        return Err(PhysMapError::BufferTooShort {
            needed: length,
            available: source.len(),
        });
    }
    check_bounds(offset, length, mapping.len())?;

    let base = mapping.base_address();
    let window = mapping
        .as_mut_slice()
        .ok_or(PhysMapError::ReadOnlyMapping(base))?;
    window[offset..offset + length].copy_from_slice(&source[..length]);
    Ok(())
}

/// Compare `length` bytes at `offset` against `reference`.
///
/// Only the first `min(length, reference.len())` bytes take part. Returns
/// `true` when they are equal.
pub fn compare<R: MappedRegion + ?Sized>(
    mapping: &R,
    offset: usize,
    length: usize,
    reference: &[u8],
) -> PhysMapResult<bool> {
    let snapshot = drain(mapping, offset, length)?;
    let n = length.min(reference.len());
    Ok(snapshot[..n] == reference[..n])
}
