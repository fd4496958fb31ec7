use anyhow::{Context, Result};
use clap::{crate_authors, crate_version, Parser};
use ic_account_id::{AccountIdentifier, Principal, Subaccount};
use icx::logging::{setup_logging, LogOpts};
use std::io::Write;

const USAGE: &str = "Usage: get-account-id [--text] <principal>";

/// Prints the ledger account identifier of a principal's default subaccount.
#[derive(Parser, Debug)]
#[command(
    version = crate_version!(),
    author = crate_authors!(),
)]
struct Opts {
    /// Print contiguous lowercase hex and a newline instead of `\XX` escaped bytes.
    #[arg(long)]
    text: bool,

    /// The owner principal, in textual form (e.g. `2vxsx-fae`).
    principal: String,

    #[command(flatten)]
    log: LogOpts,
}

fn main() -> Result<()> {
    let opts: Opts = icx::parse_or_usage(USAGE);
    let logger = setup_logging(&opts.log);

    // Decode and checksum errors propagate out of main unhandled.
    let owner = Principal::from_text(&opts.principal)
        .with_context(|| format!("failed to decode principal {}", opts.principal))?;
    slog::debug!(logger, "Decoded principal";
        "bytes" => owner.as_slice().len(),
        "class" => ?owner.class()
    );

    let account = AccountIdentifier::new(&owner, &Subaccount::default());
    slog::info!(logger, "Derived account identifier";
        "owner" => %owner,
        "account" => %account
    );

    let mut stdout = std::io::stdout().lock();
    if opts.text {
        writeln!(stdout, "{}", account.to_hex())?;
    } else {
        write!(stdout, "{}", account.to_escaped())?;
    }
    stdout.flush()?;
    Ok(())
}
