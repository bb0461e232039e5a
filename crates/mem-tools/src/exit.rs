//! Process exit codes.
//!
//! mem-tools keeps its historical exit codes, which are inverted from the
//! usual convention: transfer commands exit with 1 on success and 0 on
//! failure, and `compare` exits with 1 when memory and file are equal.
//! Nothing outside this module knows about that.

use crate::router::Outcome;
use clap::error::ErrorKind;

/// Exit code for the result of a dispatched command.
pub fn command_code(result: &anyhow::Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Done) => 1,
        Ok(Outcome::Compared(equal)) => u8::from(*equal),
        Ok(Outcome::Info) => 0,
        Err(_) => 0,
    }
}

/// Exit code when the command line could not be parsed.
///
/// An unknown or missing command exits with 1; bad arguments to a known
/// command exit with 0.
pub fn parse_error_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 1,
        _ => 0,
    }
}
