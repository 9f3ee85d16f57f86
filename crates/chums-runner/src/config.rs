//! CLI configuration

use crate::commands::RunArgs;
use crate::error::CliResult;
use chums_harness::HarnessConfig;
use serde::{Deserialize, Serialize};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - failures and the summary only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - harness info logs
    Verbose,
    /// Debug - everything, including locator misses
    Debug,
}

impl Verbosity {
    /// Level for `-q` / `-v` counts
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Filter that overrides `RUST_LOG`; only `-q` and `-v` set one
    #[must_use]
    pub const fn explicit_filter(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            _ => Some(self.log_filter()),
        }
    }

    /// `tracing` filter for this level
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "chums_harness=error,chums_runner=error",
            Self::Normal => "chums_harness=warn,chums_runner=warn",
            Self::Verbose => "chums_harness=info,chums_runner=info",
            Self::Debug => "chums_harness=debug,chums_runner=debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Harness configuration for a run: file, then environment, then flags
pub fn harness_config(args: &RunArgs) -> CliResult<HarnessConfig> {
    let config = HarnessConfig::load(args.config.as_deref())?;
    apply_run_args(config, args)
}

/// Overlay the run flags onto `config`
pub fn apply_run_args(mut config: HarnessConfig, args: &RunArgs) -> CliResult<HarnessConfig> {
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.clone());
    }
    if args.headed {
        config = config.with_headless(false);
    }
    if let Some(dir) = &args.output {
        config = config.with_artifacts_dir(dir);
    }
    Ok(config.validated()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["chums-runner", "run"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            _ => unreachable!(),
        }
    }

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_flags_set_an_explicit_filter() {
            assert_eq!(Verbosity::Normal.explicit_filter(), None);
            assert_eq!(
                Verbosity::Quiet.explicit_filter(),
                Some("chums_harness=error,chums_runner=error")
            );
            let quiet = chums_harness::select_filter(
                Verbosity::Quiet.explicit_filter(),
                Some("debug".to_string()),
                Verbosity::Normal.log_filter(),
            );
            assert_eq!(quiet, Verbosity::Quiet.log_filter());
        }

        #[test]
        fn test_log_filter_names_harness() {
            assert!(Verbosity::Debug.log_filter().contains("chums_harness=debug"));
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_should_color() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod overlay_tests {
        use super::*;

        #[test]
        fn test_flags_override_config() {
            let args = run_args(&["--base-url", "https://chums.example/", "--headed", "--output", "out"]);
            let config = apply_run_args(HarnessConfig::default(), &args).unwrap();
            assert_eq!(config.base_url, "https://chums.example");
            assert!(!config.browser.headless);
            assert_eq!(config.artifacts_dir, PathBuf::from("out"));
        }

        #[test]
        fn test_invalid_base_url_rejected() {
            let args = run_args(&["--base-url", "chums.example"]);
            assert!(apply_run_args(HarnessConfig::default(), &args).is_err());
        }

        #[test]
        fn test_yaml_file_is_read() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("chums.yaml");
            std::fs::write(&path, "church: First Baptist Church\n").unwrap();
            let args = run_args(&["--config", path.to_str().unwrap(), "--base-url", "http://localhost:4000"]);

            let config = harness_config(&args).unwrap();
            assert_eq!(config.church, "First Baptist Church");
            assert_eq!(config.base_url, "http://localhost:4000");
        }
    }
}
