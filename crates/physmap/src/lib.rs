//! Page-aligned mapping of memory devices such as `/dev/mem`.
//!
//! This crate maps a byte range of a device into the process address space
//! and moves bytes through it. It provides:
//!
//! - [`align`]: splitting a target address into a page-aligned base and an
//!   intra-page offset
//! - [`DeviceMapper`]: opening a device and establishing a read-only or
//!   read-write shared mapping over a window of it
//! - [`transfer`]: bounds-checked drain, fill and compare over a mapping
//! - [`MemoryDevice`]: one full map/transfer/unmap lifecycle per call
//!
//! # Example
//!
//! ```rust,ignore
//! use physmap::{DeviceConfig, DeviceMapper, MemoryDevice};
//!
//! let device = MemoryDevice::new(DeviceMapper::new(DeviceConfig::default()));
//! device.write(0x1000, &[0xDE, 0xAD, 0xBE, 0xEF])?;
//! let bytes = device.read(0x1000, 4)?;
//! ```

pub mod align;
pub mod device;
pub mod error;
pub mod mapping;
pub mod transfer;

// Re-export key types at crate root.
pub use align::{align, system_page_size, AlignedWindow};
pub use device::MemoryDevice;
pub use error::{PhysMapError, PhysMapResult};
pub use mapping::{
    ActiveMapping, DeviceConfig, DeviceMapper, MappedRegion, Mapper, MappingRequest,
    DEFAULT_DEVICE_PATH,
};
