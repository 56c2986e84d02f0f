//! # NetAddr Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module centralizes local network address handling:
//!
//! - **`discovery`**: Enumerates the host's interfaces and returns the global
//!   unicast addresses bound to them, IPv6 bracketed for `host:port` use.
//! - **`endpoint`**: The `Endpoint` record built from those addresses: a
//!   fixed port, a list of candidate addresses and a switchable main address.
//!
//! ## Usage
//!
//! ```rust
//! use netaddr::common::network::{discovery, endpoint::Endpoint};
//!
//! # fn run_example() -> netaddr::core::error::Result<()> {
//! // Every address the host can be reached on.
//! for addr in discovery::discover()? {
//!     println!("{}", addr);
//! }
//!
//! // An endpoint on port 2466, falling back to "::" on isolated hosts.
//! let endpoint = Endpoint::new_or_unspecified(2466);
//! println!("listen on {}, advertise {}", endpoint.listener_any(), endpoint);
//! # Ok(())
//! # }
//! ```

/// Interface enumeration and global unicast filtering.
pub mod discovery;
/// Switchable `main address + alternates` endpoint record.
pub mod endpoint;
