//! Configuration management for `doctester`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. Per-context builder overrides (`with_output_dir`, `with_server_url`, ...)
//! 2. Environment variables (`DOCTESTER_*`)
//! 3. Defaults

use std::env;
use std::path::{Path, PathBuf};

/// Default report directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "target/site/doctester";
/// Default directory searched for a custom stylesheet, relative to the crate root.
pub const DEFAULT_STYLESHEET_DIR: &str = "doctester";

/// Environment variable overriding the report directory.
pub const ENV_OUTPUT_DIR: &str = "DOCTESTER_OUTPUT_DIR";
/// Environment variable overriding the stylesheet source directory.
pub const ENV_STYLESHEET_DIR: &str = "DOCTESTER_STYLESHEET_DIR";
/// Environment variable supplying the test server base URL.
pub const ENV_SERVER_URL: &str = "DOCTESTER_SERVER_URL";

/// Per-context overrides collected by the `DocTest` builder methods.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub stylesheet_dir: Option<PathBuf>,
    pub server_url: Option<String>,
}

/// Fully resolved configuration for one finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTestConfig {
    pub output_dir: PathBuf,
    pub stylesheet_dir: PathBuf,
    pub server_url: Option<String>,
}

impl DocTestConfig {
    /// Resolve configuration from overrides, environment, and defaults.
    #[must_use]
    pub fn resolve(overrides: &Overrides) -> Self {
        let output_dir = overrides
            .output_dir
            .clone()
            .or_else(|| env_path(ENV_OUTPUT_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let stylesheet_dir = overrides
            .stylesheet_dir
            .clone()
            .or_else(|| env_path(ENV_STYLESHEET_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STYLESHEET_DIR));

        let server_url = overrides
            .server_url
            .clone()
            .or_else(|| env_nonempty(ENV_SERVER_URL));

        Self {
            output_dir,
            stylesheet_dir,
            server_url,
        }
    }
}

/// Resolve the report directory for the CLI (`--dir` > env > default).
#[must_use]
pub fn resolve_report_dir(cli_dir: Option<&Path>) -> PathBuf {
    cli_dir.map_or_else(
        || {
            env_path(ENV_OUTPUT_DIR).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
        },
        Path::to_path_buf,
    )
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
