//! # Switchable Endpoint Record (`common::network::endpoint`)
//!
//! File: cli/src/common/network/endpoint.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! An [`Endpoint`] holds every address known for the local host plus a port,
//! and designates one of the addresses as the "main" one. Rendering the
//! endpoint gives `main:port`, ready to hand to a connect or bind call.
//!
//! The list is seeded once from [`discovery`](super::discovery) and then
//! mutated in place: addresses can be appended and the main address switched
//! by index. Discovery is never re-run afterwards.
//!
//! ## Construction
//!
//! - [`Endpoint::new`] fails with `NetAddrError::Discovery` when the OS query
//!   fails and with `NetAddrError::NoAddress` when nothing usable was found.
//! - [`Endpoint::new_or_unspecified`] never fails. On any error it returns a
//!   record whose main address is `"::"` and whose address list is empty.
//!
//! ## Examples
//!
//! ```rust
//! use netaddr::common::network::endpoint::Endpoint;
//!
//! let mut endpoint = Endpoint::new_or_unspecified(2466);
//! assert_eq!(endpoint.listener_any(), ":2466");
//!
//! endpoint.add_addr_and_switch("127.0.0.1");
//! assert_eq!(endpoint.render(), "127.0.0.1:2466");
//! ```
//!
use super::discovery::{AddressDiscoverer, InterfaceSource};
use crate::core::error::NetAddrError;
use std::fmt;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Main address used when nothing could be discovered.
pub const UNSPECIFIED_HOST: &str = "::";

/// Transport protocol every endpoint is meant for.
pub const PROTOCOL: &str = "tcp";

/// Something that can be turned into a `host:port` string for a given transport.
pub trait NetworkEndpoint {
    /// The `host:port` form.
    fn render(&self) -> String;
    /// Transport protocol name, e.g. `"tcp"`.
    fn protocol(&self) -> &'static str;
}

/// # Endpoint (`Endpoint`)
///
/// Candidate local addresses, a fixed port and the currently selected address.
///
/// The main address is either [`UNSPECIFIED_HOST`] or a value that was in the
/// address list when it was selected. Duplicates in the list are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    main_addr: String,
    port: u16,
    addrs: Vec<String>,
}

impl Endpoint {
    /// # New Endpoint (`new`)
    ///
    /// Discovers the host's global unicast addresses and selects the first one.
    ///
    /// ## Returns
    ///
    /// * `Err(NetAddrError::Discovery)` - Interface enumeration failed.
    /// * `Err(NetAddrError::NoAddress)` - Enumeration succeeded but found nothing.
    pub fn new(port: u16) -> Result<Self, NetAddrError> {
        Self::from_discoverer(&AddressDiscoverer::system(), port)
    }

    /// Same as [`Endpoint::new`], but falls back to [`Endpoint::unspecified`]
    /// instead of failing.
    pub fn new_or_unspecified(port: u16) -> Self {
        Self::from_discoverer_or_unspecified(&AddressDiscoverer::system(), port)
    }

    /// Builds an endpoint from the output of `discoverer`.
    pub fn from_discoverer<S: InterfaceSource>(
        discoverer: &AddressDiscoverer<S>,
        port: u16,
    ) -> Result<Self, NetAddrError> {
        let addrs = discoverer.discover()?;
        Self::from_addresses(port, addrs)
    }

    pub fn from_discoverer_or_unspecified<S: InterfaceSource>(
        discoverer: &AddressDiscoverer<S>,
        port: u16,
    ) -> Self {
        Self::from_discoverer(discoverer, port).unwrap_or_else(|e| {
            warn!(
                "Address discovery failed ({}), using unspecified address {}",
                e, UNSPECIFIED_HOST
            );
            Self::unspecified(port)
        })
    }

    /// Builds an endpoint from an already known address list, selecting the
    /// first entry. An empty list is `NetAddrError::NoAddress`.
    pub fn from_addresses(port: u16, addrs: Vec<String>) -> Result<Self, NetAddrError> {
        let main_addr = addrs.first().cloned().ok_or(NetAddrError::NoAddress)?;
        debug!("Endpoint main address {} (of {})", main_addr, addrs.len());
        Ok(Self {
            main_addr,
            port,
            addrs,
        })
    }

    /// The fallback record: `"::"` with no candidate addresses.
    pub fn unspecified(port: u16) -> Self {
        Self {
            main_addr: UNSPECIFIED_HOST.to_string(),
            port,
            addrs: Vec::new(),
        }
    }

    pub fn main_addr(&self) -> &str {
        &self.main_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn addrs(&self) -> &[String] {
        &self.addrs
    }

    /// Appends `addr` and returns its index. The main address is untouched.
    pub fn add_addr(&mut self, addr: impl Into<String>) -> usize {
        let index = self.addrs.len();
        self.addrs.push(addr.into());
        index
    }

    /// Appends `addr` and makes it the main address.
    pub fn add_addr_and_switch(&mut self, addr: impl Into<String>) {
        let index = self.add_addr(addr);
        self.switch_main(index);
    }

    /// # Switch Main Address (`switch_main`)
    ///
    /// Selects `addrs[index]` as the main address.
    ///
    /// ## Returns
    ///
    /// * The rendered endpoint after the switch, or an empty string when
    ///   `index` is out of range. In that case nothing changes.
    pub fn switch_main(&mut self, index: usize) -> String {
        let Some(addr) = self.addrs.get(index) else {
            debug!(
                "Ignoring switch to address #{}: only {} known",
                index,
                self.addrs.len()
            );
            return String::new();
        };
        self.main_addr = addr.clone();
        self.render()
    }

    /// `main:port`. IPv6 hosts are expected to be stored bracketed already.
    pub fn render(&self) -> String {
        format!("{}:{}", self.main_addr, self.port)
    }

    /// `:port`, for binding a listener on every interface.
    pub fn listener_any(&self) -> String {
        format!(":{}", self.port)
    }

    /// The main address parsed as an IP literal. `None` for anything else,
    /// including bracketed IPv6 hosts.
    pub fn ip(&self) -> Option<IpAddr> {
        self.main_addr.parse().ok()
    }

    pub fn protocol(&self) -> &'static str {
        PROTOCOL
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl NetworkEndpoint for Endpoint {
    fn render(&self) -> String {
        Endpoint::render(self)
    }

    fn protocol(&self) -> &'static str {
        Endpoint::protocol(self)
    }
}
