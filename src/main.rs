use anyhow::Result;
use clap::Parser;

use lacq::cli::{self, Cli, Command};

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Swatch(args) => cli::run_swatch(args),
        Command::Batch(args) => cli::run_batch(args),
    }
}
