use slog::{Drain, Level, LevelFilter, Logger};

/// Verbosity flags shared by every binary. Logs always go to STDERR so that STDOUT only ever
/// carries the result.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct LogOpts {
    /// Log more to STDERR. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log less to STDERR. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

/// Maps `verbose - quiet` to a level. `None` means silent.
pub fn log_level(verbose_level: i64) -> Option<Level> {
    match verbose_level {
        -2 => Some(Level::Critical),
        -1 => Some(Level::Error),
        0 => Some(Level::Warning),
        1 => Some(Level::Info),
        2 => Some(Level::Debug),
        x if x > 0 => Some(Level::Trace),
        _ => None,
    }
}

fn create_drain() -> impl Drain<Ok = (), Err = slog::Never> {
    let decorator = slog_term::PlainDecorator::new(std::io::stderr());
    slog_term::CompactFormat::new(decorator).build().fuse()
}

/// Creates the root logger from the command line flags.
///
/// The drain is asynchronous; drop the returned logger before calling
/// [`std::process::exit`] so pending records are written.
pub fn setup_logging(opts: &LogOpts) -> Logger {
    let verbose_level = opts.verbose as i64 - opts.quiet as i64;
    let log_level = match log_level(verbose_level) {
        Some(level) => level,
        // Silent.
        None => return Logger::root(slog::Discard, slog::o!()),
    };

    let drain = LevelFilter::new(create_drain(), log_level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    let root = Logger::root(drain, slog::o!("version" => clap::crate_version!()));
    slog::debug!(root, "Log Level: {}", log_level);
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warning() {
        assert_eq!(log_level(0), Some(Level::Warning));
    }

    #[test]
    fn verbose_raises_level() {
        assert_eq!(log_level(1), Some(Level::Info));
        assert_eq!(log_level(2), Some(Level::Debug));
        assert_eq!(log_level(3), Some(Level::Trace));
        assert_eq!(log_level(12), Some(Level::Trace));
    }

    #[test]
    fn quiet_lowers_level() {
        assert_eq!(log_level(-1), Some(Level::Error));
        assert_eq!(log_level(-2), Some(Level::Critical));
        assert_eq!(log_level(-3), None);
    }
}
