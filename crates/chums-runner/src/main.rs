//! chums-runner: run the ChuMS admin E2E specs
//!
//! ## Usage
//!
//! ```bash
//! chums-runner list --suite smoke              # What would run
//! chums-runner run --suite people -j 2         # Run a suite in Chromium
//! chums-runner run --simulated                 # Run against the built-in app
//! chums-runner config --config chums.yaml      # Effective configuration
//! ```

use chums_runner::{
    list_specs, run_specs, show_config, Cli, CliConfig, CliError, CliResult, ColorChoice,
    Commands, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::SpecsFailed { .. }) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    chums_harness::init_tracing(
        config.verbosity.explicit_filter(),
        Verbosity::Normal.log_filter(),
    );

    match cli.command {
        Commands::List(args) => {
            for line in list_specs(&args)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Run(args) => run_specs(&config, &args).map(|_| ()),
        Commands::Config(args) => {
            print!("{}", show_config(&args)?);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
