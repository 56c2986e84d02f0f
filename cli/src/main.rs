//! # NetAddr Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `netaddr` CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers in `netaddr::commands`
//!
//! ## Examples
//!
//! ```bash
//! # List the host's global unicast addresses
//! netaddr discover
//!
//! # Print an endpoint on port 9000, with debug logging
//! netaddr -vv endpoint --port 9000
//! ```
//!
use clap::Parser;
use netaddr::commands;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "netaddr",
    about = "Discover local network addresses and build endpoint descriptors",
    long_about = "Lists the global unicast addresses bound to this host and renders\n\
                  HOST:PORT endpoints from them, with a switchable main address.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "d")]
    Discover(commands::discover::DiscoverArgs),
    #[command(alias = "e")]
    Endpoint(commands::endpoint::EndpointArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Discover(args) => commands::discover::handle_discover(args),
        Commands::Endpoint(args) => commands::endpoint::handle_endpoint(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
