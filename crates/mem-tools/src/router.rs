//! Dispatches a parsed command to the memory device.

use crate::cli::{Command, USAGE};
use crate::files;
use crate::hexfmt::Payload;
use anyhow::Context;
use physmap::{Mapper, MemoryDevice};
use std::io::{Read, Write};
use tracing::debug;

/// What a successful command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A transfer completed.
    Done,
    /// A comparison ran; `true` means memory and reference are equal.
    Compared(bool),
    /// Help or version text was printed.
    Info,
}

/// Run one command against `device`.
///
/// `input` backs `write -`; `output` receives dumps, verdicts and help text.
pub fn run<M: Mapper>(
    device: &MemoryDevice<M>,
    command: Command,
    input: &mut impl Read,
    output: &mut impl Write,
) -> anyhow::Result<Outcome> {
    match command {
        Command::Read { address, size } => {
            let data = device
                .read(address, size)
                .with_context(|| format!("reading {:#x} bytes at {:#x}", size, address))?;
            files::write_stream(output, &data)?;
            Ok(Outcome::Done)
        }
        Command::Write { address, data } => {
            let bytes = match data {
                Payload::Bytes(bytes) => bytes,
                Payload::Stdin => files::read_stream(input)?,
            };
            device
                .write(address, &bytes)
                .with_context(|| format!("writing {:#x} bytes at {:#x}", bytes.len(), address))?;
            Ok(Outcome::Done)
        }
        Command::FileToMem { address, file } => {
            let bytes = files::read_file(&file)?;
            device.write(address, &bytes).with_context(|| {
                format!("writing {} to {:#x}", file.display(), address)
            })?;
            Ok(Outcome::Done)
        }
        Command::MemToFile {
            address,
            size,
            file,
        } => {
            let data = device
                .read(address, size)
                .with_context(|| format!("reading {:#x} bytes at {:#x}", size, address))?;
            files::write_file(&file, &data)?;
            Ok(Outcome::Done)
        }
        Command::Compare { address, file } => {
            let reference = files::read_file(&file)?;
            debug!("Checking memory at {:#x} against {}", address, file.display());
            let equal = device.compare(address, &reference).with_context(|| {
                format!("comparing {:#x} with {}", address, file.display())
            })?;
            let verdict = if equal {
                "The memory and the file are the same\n"
            } else {
                "The memory and the file are different\n"
            };
            files::write_stream(output, verdict.as_bytes())?;
            Ok(Outcome::Compared(equal))
        }
        Command::Help => {
            files::write_stream(output, USAGE.as_bytes())?;
            Ok(Outcome::Info)
        }
        Command::Version => {
            let line = format!("mem-tools version {}\n", env!("CARGO_PKG_VERSION"));
            files::write_stream(output, line.as_bytes())?;
            Ok(Outcome::Info)
        }
    }
}
