//! Whole-buffer file and stream I/O.

use physmap::{PhysMapError, PhysMapResult};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Read an entire file.
pub fn read_file(path: &Path) -> PhysMapResult<Vec<u8>> {
    let data = std::fs::read(path).map_err(|e| PhysMapError::file_access(path, e))?;
    debug!("Read {:#x} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Create or truncate `path` and write `data` to it.
pub fn write_file(path: &Path, data: &[u8]) -> PhysMapResult<()> {
    std::fs::write(path, data).map_err(|e| PhysMapError::file_access(path, e))?;
    debug!("Wrote {:#x} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Read a stream to its end.
pub fn read_stream(input: &mut impl Read) -> PhysMapResult<Vec<u8>> {
    let mut data = Vec::new();
    input
        .read_to_end(&mut data)
        .map_err(|e| PhysMapError::file_access("<stdin>", e))?;
    Ok(data)
}

/// Write all of `data` to a stream and flush it.
pub fn write_stream(output: &mut impl Write, data: &[u8]) -> PhysMapResult<()> {
    output
        .write_all(data)
        .and_then(|_| output.flush())
        .map_err(|e| PhysMapError::file_access("<stdout>", e))
}
