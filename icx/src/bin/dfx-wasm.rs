use anyhow::{Context, Result};
use clap::{crate_authors, crate_version, Parser};
use ic_wasm::{WasmModule, WasmPath};
use icx::logging::{setup_logging, LogOpts};
use std::io::Write;
use std::path::PathBuf;

const USAGE: &str = "Usage: dfx-wasm <path_to_wasm_file>";

/// Prints a canister Wasm module as lowercase hex bytes separated by backslashes.
#[derive(Parser, Debug)]
#[command(
    version = crate_version!(),
    author = crate_authors!(),
)]
struct Opts {
    /// Input Wasm file, ending in .wasm or .wasm.gz. Compressed files are dumped as is.
    /// A path starting with `-` must follow `--`.
    input: PathBuf,

    #[command(flatten)]
    log: LogOpts,
}

fn main() -> Result<()> {
    let opts: Opts = icx::parse_or_usage(USAGE);
    let logger = setup_logging(&opts.log);

    let path = match WasmPath::new(&opts.input) {
        Ok(path) => path,
        Err(err) => {
            slog::debug!(logger, "Rejected input"; "path" => %opts.input.display());
            println!("Error: {}", err);
            icx::exit(logger, icx::USAGE_EXIT_CODE);
        }
    };

    let module = WasmModule::read(&path)
        .with_context(|| format!("failed to read {}", opts.input.display()))?;
    slog::debug!(logger, "Read module";
        "path" => %opts.input.display(),
        "bytes" => module.bytes().len(),
        "encoding" => ?module.encoding()
    );
    if !module.has_expected_magic() {
        slog::warn!(
            logger,
            "{} does not start with the magic bytes of a {:?} module",
            opts.input.display(),
            module.encoding()
        );
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", module.hex_dump())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_one_path() {
        let opts = Opts::try_parse_from(["dfx-wasm", "module.wasm"]).unwrap();
        assert_eq!(opts.input, PathBuf::from("module.wasm"));
        assert_eq!(opts.log.verbose, 0);
    }

    #[test]
    fn verbosity_flags() {
        let opts = Opts::try_parse_from(["dfx-wasm", "-vv", "module.wasm"]).unwrap();
        assert_eq!(opts.log.verbose, 2);
        let opts = Opts::try_parse_from(["dfx-wasm", "-q", "module.wasm"]).unwrap();
        assert_eq!(opts.log.quiet, 1);
    }

    #[test]
    fn dashed_path_needs_separator() {
        assert!(Opts::try_parse_from(["dfx-wasm", "-x.wasm"]).is_err());
        let opts = Opts::try_parse_from(["dfx-wasm", "--", "-x.wasm"]).unwrap();
        assert_eq!(opts.input, PathBuf::from("-x.wasm"));
    }

    #[test]
    fn wrong_argument_count() {
        assert!(Opts::try_parse_from(["dfx-wasm"]).is_err());
        assert!(Opts::try_parse_from(["dfx-wasm", "a.wasm", "b.wasm"]).is_err());
    }
}
