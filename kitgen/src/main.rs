mod cli;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use eyre::Result;

use crate::cli::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    cli.init_tracing();
    cli.run()
}
