//! CLI entry point: run one estimation task from a configuration file.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use rust_ergm::config::Config;
use rust_ergm::estimation::run_estimation;

#[derive(Parser, Debug)]
#[command(
    name = "rust_ergm",
    about = "Equilibrium-expectation ERGM estimation for directed networks"
)]
struct Cli {
    /// Path to the key = value configuration file.
    config: PathBuf,

    /// Task id: tags the output files and offsets the PRNG seed, so
    /// independent tasks launched in parallel produce independent draws.
    #[arg(long, default_value_t = 0)]
    task: u32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match Config::parse_file(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!(config = %cli.config.display(), "{err}");
            return ExitCode::FAILURE;
        }
    };

    match run_estimation(&config, cli.task) {
        Ok(()) => {
            info!(task = cli.task, "estimation finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(task = cli.task, "{err}");
            ExitCode::FAILURE
        }
    }
}
