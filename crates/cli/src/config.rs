//! Run settings, resolved once from arguments and environment

use crate::args::Cli;
use std::path::PathBuf;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "TREESUM_LOG";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "debug";

/// Everything a run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root path, used exactly as given
    pub root: PathBuf,
    /// Nonzero exit status when any diagnostic was reported
    pub strict: bool,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Settings {
    /// Resolve settings from parsed arguments and the process environment
    pub fn from_cli(cli: Cli) -> Self {
        let env_filter = std::env::var(LOG_ENV).ok();
        Self::resolve(cli, env_filter)
    }

    /// `TREESUM_LOG` wins over `--verbose`, which wins over the default
    pub fn resolve(cli: Cli, env_filter: Option<String>) -> Self {
        let log_filter = env_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| {
                if cli.verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }.to_string()
            });

        Self {
            root: cli.path,
            strict: cli.strict,
            log_filter,
        }
    }

    /// Settings for `root` with every option at its default
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict: false,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
