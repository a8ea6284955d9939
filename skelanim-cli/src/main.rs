//! Main entry point for the skelanim CLI

// Command output goes to stdout
#![allow(clippy::print_stdout)]

mod cli;
mod commands;
mod demo;
mod utils;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger, RUST_LOG still takes precedence
    let default_filter = if cli.verbose > 0 {
        match cli.verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Execute command
    match cli.command {
        Commands::Clip { command } => commands::clip::execute(command),
        Commands::Skin { command } => commands::skin::execute(command),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
