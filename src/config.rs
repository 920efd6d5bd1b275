use crate::cli::Cli;

/// Output switches. Fixed once the command line is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Zero-compress IPv6 addresses with `::`.
    pub compress: bool,
    /// Add binary renderings and per-subnet details.
    pub verbose: bool,
}

impl From<&Cli> for Options {
    fn from(cli: &Cli) -> Self {
        Options {
            compress: cli.compress,
            verbose: cli.verbose,
        }
    }
}
