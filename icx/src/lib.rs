//! Shared plumbing for the `dfx-wasm` and `get-account-id` binaries.

use clap::error::ErrorKind;
use clap::Parser;
use slog::Logger;

/// Logger setup.
pub mod logging;

/// Exit status for command lines that cannot be used.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Whether a parse failure should print the short usage line rather than being handled by clap.
///
/// `--help` and `--version` are left to clap; everything else is a usage error.
pub fn is_usage_error(err: &clap::Error) -> bool {
    !matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Parses the process arguments. On a usage error, prints `usage` to STDOUT and exits with
/// [`USAGE_EXIT_CODE`].
pub fn parse_or_usage<P: Parser>(usage: &str) -> P {
    match P::try_parse() {
        Ok(opts) => opts,
        Err(err) if is_usage_error(&err) => {
            println!("{}", usage);
            std::process::exit(USAGE_EXIT_CODE)
        }
        Err(err) => err.exit(),
    }
}

/// Flushes the logger, then exits with `code`.
pub fn exit(logger: Logger, code: i32) -> ! {
    drop(logger);
    std::process::exit(code)
}
