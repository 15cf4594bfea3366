// this_file: crates/sfpf-cli/src/main.rs

//! sfpf CLI - command-line front end for SFPF proof fonts

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Measure(args) => commands::measure::run(&args),
        Commands::Render(args) => commands::render::run(&args),
        Commands::Pack(args) => commands::pack::run(&args),
    }
}
