//! mem-tools: inspect and modify physical memory through a memory device.
//!
//! Maps the requested range of the device (`/dev/mem` by default), then
//! reads, writes or compares it against files and standard streams.

mod cli;
mod exit;
mod files;
mod hexfmt;
mod router;

use clap::Parser;
use cli::Cli;
use physmap::{DeviceConfig, DeviceMapper, MemoryDevice};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = exit::parse_error_code(e.kind());
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // Logs go to stderr so stdout stays clean for memory dumps
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DeviceConfig::new(&cli.device);
    tracing::debug!(
        "Using device {} (page size {:#x})",
        config.device_path.display(),
        config.page_size
    );
    let device = MemoryDevice::new(DeviceMapper::new(config));

    let result = router::run(
        &device,
        cli.command,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )
    .inspect_err(|e| tracing::error!("{:#}", e));

    ExitCode::from(exit::command_code(&result))
}
