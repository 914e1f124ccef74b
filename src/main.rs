#![warn(clippy::perf, clippy::style, warnings)]

mod cli;

use clap::Parser;
use moji::prelude::*;

use cli::{Arguments, Command};

fn main() -> Result<()> {
    cli::install_logging()?;

    let args = Arguments::parse();
    let config = cli::load_config(args.config.as_deref())?;

    match &args.command {
        Command::Expand { paths, scale } => cli::expand(&config, paths, *scale),
        Command::Lookup { name } => cli::lookup(&config, name),
    }
}
