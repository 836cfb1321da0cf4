//! jarloader CLI - make the Scala runtime available on a JVM classpath

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jarloader::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jarloader=debug")
    } else {
        EnvFilter::new("jarloader=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_color(!cli.no_color && std::io::stderr().is_terminal());

    // Execute command
    match cli.command {
        Commands::Load(args) => commands::load::execute(args, ctx),
        Commands::Status(args) => commands::status::execute(args, ctx),
        Commands::Clean(args) => commands::clean::execute(args, ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
