//! Command-line surface.

use crate::hexfmt::{parse_hex_size, parse_hex_u64, parse_payload, Payload};
use clap::{Parser, Subcommand};
use physmap::DEFAULT_DEVICE_PATH;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: mem-tools <command> <arguments>
Commands:
  read <address> <size> - read memory from address to size
  write <address> <data> - write data to address
  file2mem <address> <file> - write file to address
  mem2file <address> <size> <file> - read memory from address to size and write it to file
  compare <address> <file> - compare memory from address to file
  help - print this help message
  version - print the version of mem-tools
";

#[derive(Debug, Parser)]
#[command(
    name = "mem-tools",
    version,
    about = "Read, write and compare physical memory through a memory device",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Memory device to map
    #[arg(long, global = true, default_value = DEFAULT_DEVICE_PATH)]
    pub device: PathBuf,

    /// Log mapping details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Dump memory to stdout
    Read {
        #[arg(help = "Memory address (hex)", value_parser = parse_hex_u64)]
        address: u64,
        #[arg(help = "Number of bytes (hex)", value_parser = parse_hex_size)]
        size: usize,
    },
    /// Write hex-encoded bytes to memory ("-" reads raw bytes from stdin)
    Write {
        #[arg(help = "Memory address (hex)", value_parser = parse_hex_u64)]
        address: u64,
        #[arg(help = "Hex data, e.g. deadbeef", value_parser = parse_payload)]
        data: Payload,
    },
    /// Write a file's contents to memory
    #[command(name = "file2mem")]
    FileToMem {
        #[arg(help = "Memory address (hex)", value_parser = parse_hex_u64)]
        address: u64,
        #[arg(help = "Source file")]
        file: PathBuf,
    },
    /// Dump memory to a file
    #[command(name = "mem2file")]
    MemToFile {
        #[arg(help = "Memory address (hex)", value_parser = parse_hex_u64)]
        address: u64,
        #[arg(help = "Number of bytes (hex)", value_parser = parse_hex_size)]
        size: usize,
        #[arg(help = "Destination file")]
        file: PathBuf,
    },
    /// Compare memory against a file's contents
    Compare {
        #[arg(help = "Memory address (hex)", value_parser = parse_hex_u64)]
        address: u64,
        #[arg(help = "Reference file")]
        file: PathBuf,
    },
    /// Print usage
    Help,
    /// Print the version
    Version,
}
