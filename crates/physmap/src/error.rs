//! Error types for mapping and transfer operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while mapping a device or moving bytes through it.
///
/// None of these are transient: a failed `open` or `mmap` against a memory
/// device fails the same way on a second attempt, so callers report them
/// and stop.
#[derive(Error, Debug)]
pub enum PhysMapError {
    /// The device could not be opened (missing node, permissions, ...).
    #[error("Failed to open device '{}'", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping call was refused or the request could not be mapped.
    #[error("Failed to map {size:#x} bytes at {base_address:#x}: {message}")]
    Mapping {
        base_address: u64,
        size: usize,
        message: String,
    },

    /// A source or destination file could not be read or written.
    #[error("Failed to access file '{}'", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transfer buffer could not be allocated.
    #[error("Failed to allocate {0:#x} bytes")]
    Allocation(usize),

    /// Invalid argument (zero length, unparsable hex, overflow, ...).
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The source buffer holds fewer bytes than the transfer needs.
    #[error("Source buffer too short: need {needed:#x} bytes, have {available:#x}")]
    BufferTooShort { needed: usize, available: usize },

    /// The transfer would run past the end of the mapped window.
    #[error("Transfer of {length:#x} bytes at offset {offset:#x} overruns window of {window:#x} bytes")]
    WindowOverrun {
        offset: usize,
        length: usize,
        window: usize,
    },

    /// Attempted to write through a mapping established read-only.
    #[error("Mapping at {0:#x} is read-only")]
    ReadOnlyMapping(u64),
}

impl PhysMapError {
    /// Create a DeviceOpen error.
    pub fn device_open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        PhysMapError::DeviceOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a Mapping error.
    pub fn mapping(base_address: u64, size: usize, msg: impl Into<String>) -> Self {
        PhysMapError::Mapping {
            base_address,
            size,
            message: msg.into(),
        }
    }

    /// Create a FileAccess error.
    pub fn file_access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        PhysMapError::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an Argument error.
    pub fn argument(msg: impl Into<String>) -> Self {
        PhysMapError::Argument(msg.into())
    }
}

/// Result type for mapping operations.
pub type PhysMapResult<T> = Result<T, PhysMapError>;
