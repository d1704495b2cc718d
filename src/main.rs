use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use emi_calculator::cli::{self, Cli};

fn main() -> Result<ExitCode> {
    cli::run(Cli::parse())
}
