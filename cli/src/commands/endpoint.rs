//! # Endpoint Command (`netaddr endpoint`)
//!
//! File: cli/src/commands/endpoint.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Builds an [`Endpoint`] from the host's discovered addresses and prints the
//! rendered `host:port` form (or the `:port` listener form with `--listen`).
//!
//! ```bash
//! # First discovered address on the configured port
//! netaddr endpoint
//!
//! # Add a manual address and make it the main one
//! netaddr endpoint --port 8080 --add 127.0.0.1 --select 1
//!
//! # Never fail: fall back to "::" when nothing is found
//! netaddr endpoint --fallback
//! ```
//!
//! Without `--fallback` the command fails if discovery fails or finds no
//! address. `--select` is applied after all `--add` addresses were appended;
//! an index past the end of the list is an error.
//!
use crate::common::network::discovery::{AddressDiscoverer, InterfaceSource};
use crate::common::network::endpoint::Endpoint;
use crate::core::config;
use crate::core::error::Result;
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `netaddr endpoint`.
#[derive(Parser, Debug, Default)]
pub struct EndpointArgs {
    /// Port of the endpoint. Defaults to `endpoint.port` from the config file.
    #[arg(long, short, env = "NETADDR_PORT")]
    pub port: Option<u16>,

    /// Appends an address (IPv6 must be bracketed). Can be repeated.
    #[arg(long = "add", value_name = "ADDR")]
    pub add: Vec<String>,

    /// Zero-based index of the address to use as the main address.
    #[arg(long, short)]
    pub select: Option<usize>,

    /// Print the listener form `:PORT` instead of `HOST:PORT`.
    #[arg(long)]
    pub listen: bool,

    /// Use the unspecified address `::` instead of failing when discovery
    /// fails or finds nothing.
    #[arg(long)]
    pub fallback: bool,

    /// Also print every candidate address with its index.
    #[arg(long)]
    pub list: bool,
}

pub fn handle_endpoint(args: EndpointArgs) -> Result<()> {
    info!("Handling endpoint command with args: {:?}", args);
    let cfg = config::load_config()?;

    let port = args.port.unwrap_or(cfg.endpoint.port);
    let discoverer =
        AddressDiscoverer::system().with_families(cfg.discovery.ipv4, cfg.discovery.ipv6);
    let (endpoint, main_index) = build_endpoint(&args, port, &discoverer)?;

    if args.list {
        for line in listing(&endpoint, main_index) {
            println!("{}", line);
        }
    }
    if args.listen {
        println!("{}", endpoint.listener_any());
    } else {
        println!("{}", endpoint);
    }
    Ok(())
}

/// Builds the endpoint described by `args` on top of `discoverer`.
///
/// Also returns the index the main address was selected from, or `None`
/// when it is the unspecified fallback and not taken from the list.
pub(crate) fn build_endpoint<S: InterfaceSource>(
    args: &EndpointArgs,
    port: u16,
    discoverer: &AddressDiscoverer<S>,
) -> Result<(Endpoint, Option<usize>)> {
    let mut endpoint = if args.fallback {
        Endpoint::from_discoverer_or_unspecified(discoverer, port)
    } else {
        Endpoint::from_discoverer(discoverer, port)
            .context("Failed to build an endpoint from local addresses")?
    };
    // A discovered endpoint starts on its first address.
    let mut main_index = (!endpoint.addrs().is_empty()).then_some(0);

    for addr in &args.add {
        let index = endpoint.add_addr(addr.as_str());
        debug!("Added address {} at index {}", addr, index);
    }

    if let Some(index) = args.select {
        if endpoint.switch_main(index).is_empty() {
            bail!(
                "Address index {} is out of range ({} address(es) known)",
                index,
                endpoint.addrs().len()
            );
        }
        main_index = Some(index);
    }

    debug!("{} endpoint: {}", endpoint.protocol(), endpoint);
    Ok((endpoint, main_index))
}

/// One `<marker> <index> <address>` line per candidate. Only the entry at
/// `main_index` is starred, even when other entries hold the same address.
pub(crate) fn listing(endpoint: &Endpoint, main_index: Option<usize>) -> Vec<String> {
    endpoint
        .addrs()
        .iter()
        .enumerate()
        .map(|(index, addr)| {
            let marker = if Some(index) == main_index { "*" } else { " " };
            format!("{} {} {}", marker, index, addr)
        })
        .collect()
}
