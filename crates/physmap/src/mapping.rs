//! Device mapping lifecycle.
//!
//! Opens a memory device, maps a page-aligned window of it with the
//! protection the caller asked for, and releases the window again.

use crate::align::system_page_size;
use crate::error::{PhysMapError, PhysMapResult};
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Physical memory device used when none is configured.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/mem";

/// Configuration handed to a [`Mapper`] at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Device (or file) whose bytes are mapped.
    pub device_path: PathBuf,
    /// Page size used to align target addresses.
    pub page_size: usize,
}

impl DeviceConfig {
    pub fn new(device_path: impl Into<PathBuf>) -> Self {
        DeviceConfig {
            device_path: device_path.into(),
            page_size: system_page_size(),
        }
    }

    /// Override the page size (must be a power of two).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig::new(DEFAULT_DEVICE_PATH)
    }
}

/// One request to map `size` bytes of a device starting at `base_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRequest {
    pub device_path: PathBuf,
    /// Page-aligned device offset.
    pub base_address: u64,
    pub size: usize,
    pub writable: bool,
}

/// Byte view over a live mapping.
pub trait MappedRegion {
    /// Length of the mapped window in bytes.
    fn len(&self) -> usize;

    /// Device offset the window starts at.
    fn base_address(&self) -> u64;

    fn as_slice(&self) -> &[u8];

    /// Mutable view, or `None` when the mapping is read-only.
    fn as_mut_slice(&mut self) -> Option<&mut [u8]>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Establishes and releases mappings.
pub trait Mapper {
    type Mapping: MappedRegion;

    fn config(&self) -> &DeviceConfig;

    /// Map the requested window. The device descriptor does not outlive
    /// this call.
    fn open_mapping(&self, request: &MappingRequest) -> PhysMapResult<Self::Mapping>;

    /// Release a mapping. Never fails; release problems are logged.
    fn close_mapping(&self, mapping: Self::Mapping);
}

enum MapKind {
    ReadOnly(Mmap),
    ReadWrite(MmapMut),
}

/// A live shared mapping of a device window.
pub struct ActiveMapping {
    base_address: u64,
    map: MapKind,
}

impl ActiveMapping {
    pub fn is_writable(&self) -> bool {
        matches!(self.map, MapKind::ReadWrite(_))
    }
}

impl MappedRegion for ActiveMapping {
    fn len(&self) -> usize {
        match &self.map {
            MapKind::ReadOnly(m) => m.len(),
            MapKind::ReadWrite(m) => m.len(),
        }
    }

    fn base_address(&self) -> u64 {
        self.base_address
    }

    fn as_slice(&self) -> &[u8] {
        match &self.map {
            MapKind::ReadOnly(m) => m.as_ref(),
            MapKind::ReadWrite(m) => m.as_ref(),
        }
    }

    fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match &mut self.map {
            MapKind::ReadOnly(_) => None,
            MapKind::ReadWrite(m) => Some(m.as_mut()),
        }
    }
}

/// [`Mapper`] backed by `mmap(2)` on a device node.
#[derive(Debug, Clone, Default)]
pub struct DeviceMapper {
    config: DeviceConfig,
}

impl DeviceMapper {
    pub fn new(config: DeviceConfig) -> Self {
        DeviceMapper { config }
    }

    fn validate(&self, request: &MappingRequest) -> PhysMapResult<()> {
        if request.size == 0 {
            return Err(PhysMapError::mapping(
                request.base_address,
                0,
                "refusing to map zero bytes",
            ));
        }
        if request.base_address % self.config.page_size as u64 != 0 {
            return Err(PhysMapError::mapping(
                request.base_address,
                request.size,
                format!("base address is not aligned to {:#x}", self.config.page_size),
            ));
        }
        Ok(())
    }
}

impl Mapper for DeviceMapper {
    type Mapping = ActiveMapping;

    fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn open_mapping(&self, request: &MappingRequest) -> PhysMapResult<ActiveMapping> {
        self.validate(request)?;

        let file = open_device(&request.device_path, request.writable)?;

        let mut options = MmapOptions::new();
        options.offset(request.base_address).len(request.size);

        // SAFETY: the mapping is exclusively owned by the caller for the
        // duration of one transfer; concurrent modification of the device
        // contents by other agents is inherent to memory devices.
        let mapped = if request.writable {
            unsafe { options.map_mut(&file) }.map(MapKind::ReadWrite)
        } else {
            unsafe { options.map(&file) }.map(MapKind::ReadOnly)
        };

        // The descriptor is closed here regardless of the mapping outcome.
        drop(file);

        let map = mapped.map_err(|e| {
            PhysMapError::mapping(request.base_address, request.size, e.to_string())
        })?;

        debug!(
            "Mapped {:#x} bytes at {:#x} from {} ({})",
            request.size,
            request.base_address,
            request.device_path.display(),
            if request.writable { "rw" } else { "ro" }
        );

        Ok(ActiveMapping {
            base_address: request.base_address,
            map,
        })
    }

    fn close_mapping(&self, mapping: ActiveMapping) {
        let base = mapping.base_address;
        let len = mapping.len();
        // memmap2 unmaps on drop and ignores munmap failures.
        drop(mapping);
        debug!("Released mapping of {:#x} bytes at {:#x}", len, base);
    }
}

fn open_device(path: &Path, writable: bool) -> PhysMapResult<std::fs::File> {
    OpenOptions::new()
        .read(true)
        .write(writable)
        .open(path)
        .map_err(|e| PhysMapError::device_open(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn device_with(contents: &[u8]) -> NamedTempFile {
        let mut tmpfile = NamedTempFile::new().unwrap();
        tmpfile.write_all(contents).unwrap();
        tmpfile.flush().unwrap();
        tmpfile
    }

    fn request(path: &Path, base_address: u64, size: usize, writable: bool) -> MappingRequest {
        MappingRequest {
            device_path: path.to_path_buf(),
            base_address,
            size,
            writable,
        }
    }

    fn mapper() -> DeviceMapper {
        DeviceMapper::new(DeviceConfig::default())
    }

    #[test]
    fn test_open_read_only_mapping() {
        let page = system_page_size();
        let mut contents = vec![0u8; page * 2];
        contents[page..page + 5].copy_from_slice(b"Hello");
        let dev = device_with(&contents);

        let m = mapper();
        let mapping = m
            .open_mapping(&request(dev.path(), page as u64, 5, false))
            .unwrap();
        assert_eq!(mapping.len(), 5);
        assert_eq!(mapping.base_address(), page as u64);
        assert!(!mapping.is_writable());
        assert_eq!(mapping.as_slice(), b"Hello");
        m.close_mapping(mapping);
    }

    #[test]
    fn test_read_only_mapping_has_no_mut_view() {
        let dev = device_with(&[0u8; 64]);
        let m = mapper();
        let mut mapping = m.open_mapping(&request(dev.path(), 0, 64, false)).unwrap();
        assert!(mapping.as_mut_slice().is_none());
        m.close_mapping(mapping);
    }

    #[test]
    fn test_writable_mapping_persists_to_device() {
        let dev = device_with(&[0u8; 16]);
        let m = mapper();
        let mut mapping = m.open_mapping(&request(dev.path(), 0, 16, true)).unwrap();
        mapping.as_mut_slice().unwrap()[..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        m.close_mapping(mapping);

        let on_disk = std::fs::read(dev.path()).unwrap();
        assert_eq!(&on_disk[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_zero_size_rejected() {
        let dev = device_with(&[0u8; 16]);
        let err = mapper()
            .open_mapping(&request(dev.path(), 0, 0, false))
            .err()
            .unwrap();
        assert!(matches!(err, PhysMapError::Mapping { size: 0, .. }));
    }

    #[test]
    fn test_misaligned_base_rejected() {
        let dev = device_with(&[0u8; 16]);
        let err = mapper()
            .open_mapping(&request(dev.path(), 3, 8, false))
            .err()
            .unwrap();
        assert!(matches!(err, PhysMapError::Mapping { base_address: 3, .. }));
    }

    #[test]
    fn test_missing_device() {
        let err = mapper()
            .open_mapping(&request(Path::new("/nonexistent/mem"), 0, 8, false))
            .err()
            .unwrap();
        assert!(matches!(err, PhysMapError::DeviceOpen { .. }));
    }

    #[test]
    fn test_default_config() {
        let config = DeviceConfig::default();
        assert_eq!(config.device_path, PathBuf::from(DEFAULT_DEVICE_PATH));
        assert!(config.page_size.is_power_of_two());
        assert_eq!(config.with_page_size(0x4000).page_size, 0x4000);
    }
}
