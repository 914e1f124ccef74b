use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Path to a configuration file. Defaults to the nearest `moji.toml`, if any.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand the shortcodes in the given files, printing the results.
    Expand {
        /// Files or directories to expand. Directories are searched for `.md` and `.txt` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Scale applied to every emoji, overriding the configured value.
        #[arg(short, long)]
        scale: Option<f64>,
    },
    /// Show what a single shortcode resolves to.
    Lookup {
        /// The shortcode, with or without its colons (e.g. `crab` or `:crab:`).
        name: String,
    },
}
