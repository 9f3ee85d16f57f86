//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// chums-runner: end-to-end specs for the ChuMS admin app
#[derive(Parser, Debug)]
#[command(name = "chums-runner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only failures and the summary)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the spec catalogue
    List(ListArgs),

    /// Run specs against the admin app
    Run(RunArgs),

    /// Show the effective configuration as YAML
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only specs of this suite (`smoke` selects the smoke set)
    #[arg(short, long)]
    pub suite: Option<String>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Only specs of this suite (`smoke` selects the smoke set)
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Only specs whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Number of specs run concurrently
    #[arg(short = 'j', long, default_value = "1")]
    pub jobs: usize,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Origin of the admin app
    #[arg(long, env = "CHUMS_BASE_URL")]
    pub base_url: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the report and failure screenshots
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop starting specs after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Run against the built-in simulated app instead of Chromium
    #[arg(long)]
    pub simulated: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_list() {
            let cli = Cli::try_parse_from(["chums-runner", "list", "--suite", "people"]).unwrap();
            match cli.command {
                Commands::List(args) => assert_eq!(args.suite.as_deref(), Some("people")),
                other => panic!("expected list, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_run_flags() {
            let cli = Cli::try_parse_from([
                "chums-runner",
                "-vv",
                "run",
                "--suite",
                "smoke",
                "--filter",
                "fund",
                "-j",
                "4",
                "--headed",
                "--fail-fast",
                "--base-url",
                "http://staging.example:3000",
                "--output",
                "out",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.suite.as_deref(), Some("smoke"));
            assert_eq!(args.filter.as_deref(), Some("fund"));
            assert_eq!(args.jobs, 4);
            assert!(args.headed);
            assert!(args.fail_fast);
            assert!(!args.simulated);
            assert_eq!(args.base_url.as_deref(), Some("http://staging.example:3000"));
            assert_eq!(args.output, Some(PathBuf::from("out")));
        }

        #[test]
        fn test_run_defaults_to_one_job() {
            let cli = Cli::try_parse_from(["chums-runner", "run", "--simulated"]).unwrap();
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.jobs, 1);
            assert!(args.simulated);
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["chums-runner"]).is_err());
        }

        #[test]
        fn test_color_never() {
            let cli = Cli::try_parse_from(["chums-runner", "--color", "never", "list"]).unwrap();
            let choice: crate::config::ColorChoice = cli.color.into();
            assert_eq!(choice, crate::config::ColorChoice::Never);
        }
    }
}
