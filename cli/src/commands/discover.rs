//! # Discover Command (`netaddr discover`)
//!
//! File: cli/src/commands/discover.rs
//! Author: Christi Mahu
//!
//! Prints each global unicast address bound to the host, one per line, in
//! interface order. IPv6 addresses are bracketed. Prints nothing (and still
//! succeeds) when the host has no such address.
//!
use crate::common::network::discovery::AddressDiscoverer;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for `netaddr discover`.
#[derive(Parser, Debug)]
pub struct DiscoverArgs {
    /// Only report IPv4 addresses.
    #[arg(long, short = '4', conflicts_with = "ipv6_only")]
    pub ipv4_only: bool,

    /// Only report IPv6 addresses.
    #[arg(long, short = '6')]
    pub ipv6_only: bool,
}

/// Resolves the address families to keep: CLI flags win over the config file.
pub(crate) fn families(ipv4_only: bool, ipv6_only: bool, cfg: &config::Config) -> (bool, bool) {
    match (ipv4_only, ipv6_only) {
        (true, _) => (true, false),
        (_, true) => (false, true),
        _ => (cfg.discovery.ipv4, cfg.discovery.ipv6),
    }
}

pub fn handle_discover(args: DiscoverArgs) -> Result<()> {
    info!("Handling discover command with args: {:?}", args);
    let cfg = config::load_config()?;

    let (ipv4, ipv6) = families(args.ipv4_only, args.ipv6_only, &cfg);
    let addrs = AddressDiscoverer::system()
        .with_families(ipv4, ipv6)
        .discover()
        .context("Failed to discover local addresses")?;

    if addrs.is_empty() {
        info!("No global unicast address found on this host.");
    }
    for addr in addrs {
        println!("{}", addr);
    }
    Ok(())
}
