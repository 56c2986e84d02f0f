//! # Local Address Discovery (`common::network::discovery`)
//!
//! File: cli/src/common/network/discovery.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Enumerates the host's network interfaces and returns the addresses bound
//! to them that are usable from outside the machine, formatted so they can be
//! glued to a port (`host:port`):
//!
//! - IPv4 addresses are rendered in plain dotted-decimal form (`192.0.2.10`).
//! - IPv6 addresses are wrapped in brackets (`[2001:db8::10]`).
//!
//! Only global unicast addresses are kept: unspecified, loopback, multicast,
//! link-local and the IPv4 limited broadcast address are dropped. Private
//! ranges (`10/8`, `192.168/16`, `fc00::/7`, ...) are unicast and stay in.
//!
//! ## Architecture
//!
//! The operating system is reached through the [`InterfaceSource`] trait so
//! the filtering logic can run against a fixed interface table in tests.
//! [`SystemInterfaces`] is the real implementation, backed by `if-addrs`.
//! Each bound address is an address/netmask pair which is parsed as a CIDR
//! network with `ipnet`; pairs that do not form a valid CIDR are skipped.
//!
//! Output order follows the interface order, then the per-interface address
//! order. Nothing is sorted or deduplicated.
//!
use crate::core::error::NetAddrError;
use if_addrs::IfAddr;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::io;
use std::net::IpAddr;
use tracing::{debug, trace};

/// A single address bound to an interface, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundAddr {
    pub ip: IpAddr,
    pub netmask: IpAddr,
}

impl BoundAddr {
    pub fn new(ip: IpAddr, netmask: IpAddr) -> Self {
        Self { ip, netmask }
    }

    /// Parses the pair as a CIDR network. `None` when the netmask is not a
    /// contiguous prefix or the two halves are of different families.
    pub fn to_cidr(&self) -> Option<IpNet> {
        // ipnet only checks the prefix length, so a family mismatch has to
        // be caught here.
        match (self.ip, self.netmask) {
            (IpAddr::V4(ip), IpAddr::V4(mask)) => {
                Ipv4Net::with_netmask(ip, mask).ok().map(IpNet::V4)
            }
            (IpAddr::V6(ip), IpAddr::V6(mask)) => {
                Ipv6Net::with_netmask(ip, mask).ok().map(IpNet::V6)
            }
            _ => None,
        }
    }
}

/// A network interface and the addresses the OS reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetInterface {
    pub name: String,
    pub addrs: Vec<BoundAddr>,
}

/// Where interface information comes from.
pub trait InterfaceSource {
    /// Lists the interfaces in the order the host reports them.
    fn interfaces(&self) -> io::Result<Vec<NetInterface>>;

    /// Lists the addresses bound to `iface`.
    fn addresses(&self, iface: &NetInterface) -> io::Result<Vec<BoundAddr>> {
        Ok(iface.addrs.clone())
    }
}

/// Interface enumeration backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> io::Result<Vec<NetInterface>> {
        let mut interfaces: Vec<NetInterface> = Vec::new();

        // if-addrs yields one entry per (interface, address); regroup them
        // while keeping the first-seen interface order.
        for entry in if_addrs::get_if_addrs()? {
            let bound = match &entry.addr {
                IfAddr::V4(v4) => BoundAddr::new(IpAddr::V4(v4.ip), IpAddr::V4(v4.netmask)),
                IfAddr::V6(v6) => BoundAddr::new(IpAddr::V6(v6.ip), IpAddr::V6(v6.netmask)),
            };
            match interfaces.iter_mut().find(|iface| iface.name == entry.name) {
                Some(iface) => iface.addrs.push(bound),
                None => interfaces.push(NetInterface {
                    name: entry.name,
                    addrs: vec![bound],
                }),
            }
        }

        Ok(interfaces)
    }
}

/// # Address Discoverer (`AddressDiscoverer`)
///
/// Walks an [`InterfaceSource`] and collects the global unicast addresses,
/// formatted for `host:port` use.
///
/// Both address families are kept by default. [`AddressDiscoverer::with_families`]
/// narrows the result to one family.
#[derive(Debug, Clone)]
pub struct AddressDiscoverer<S = SystemInterfaces> {
    source: S,
    ipv4: bool,
    ipv6: bool,
}

impl AddressDiscoverer<SystemInterfaces> {
    /// Discoverer reading the host's real interfaces.
    pub fn system() -> Self {
        Self::with_source(SystemInterfaces)
    }
}

impl Default for AddressDiscoverer<SystemInterfaces> {
    fn default() -> Self {
        Self::system()
    }
}

impl<S: InterfaceSource> AddressDiscoverer<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            ipv4: true,
            ipv6: true,
        }
    }

    /// Restricts which address families end up in the result.
    pub fn with_families(mut self, ipv4: bool, ipv6: bool) -> Self {
        self.ipv4 = ipv4;
        self.ipv6 = ipv6;
        self
    }

    /// # Discover (`discover`)
    ///
    /// Returns every global unicast address bound to the source's interfaces.
    ///
    /// ## Returns
    ///
    /// * `Ok(addrs)` - Formatted addresses in interface order. May be empty.
    /// * `Err(NetAddrError::Discovery)` - Listing the interfaces, or the
    ///   addresses of any one interface, failed. No partial result is returned.
    pub fn discover(&self) -> Result<Vec<String>, NetAddrError> {
        let interfaces = self.source.interfaces()?;
        let mut found = Vec::new();

        for iface in &interfaces {
            let bound = self.source.addresses(iface)?;

            for addr in bound {
                let Some(net) = addr.to_cidr() else {
                    trace!("Skipping {:?} on {}: not a valid CIDR", addr, iface.name);
                    continue;
                };
                let ip = canonical(net.addr());

                if !is_global_unicast(&ip) {
                    trace!("Skipping non-global address {} on {}", ip, iface.name);
                    continue;
                }
                if (ip.is_ipv4() && !self.ipv4) || (ip.is_ipv6() && !self.ipv6) {
                    trace!("Skipping {} on {}: address family disabled", ip, iface.name);
                    continue;
                }

                found.push(format_host(&ip));
            }
        }

        debug!(
            "Discovered {} address(es) across {} interface(s): {:?}",
            found.len(),
            interfaces.len(),
            found
        );
        Ok(found)
    }
}

/// Discovers the global unicast addresses of the host's interfaces.
pub fn discover() -> Result<Vec<String>, NetAddrError> {
    AddressDiscoverer::system().discover()
}

/// Reports whether `ip` is a global unicast address: anything that is not
/// unspecified, loopback, multicast, link-local unicast or the IPv4 limited
/// broadcast address.
pub fn is_global_unicast(ip: &IpAddr) -> bool {
    match canonical(*ip) {
        IpAddr::V4(v4) => {
            !(v4.is_unspecified()
                || v4.is_loopback()
                || v4.is_multicast()
                || v4.is_link_local()
                || v4.is_broadcast())
        }
        IpAddr::V6(v6) => {
            !(v6.is_unspecified()
                || v6.is_loopback()
                || v6.is_multicast()
                || (v6.segments()[0] & 0xffc0) == 0xfe80)
        }
    }
}

/// Formats `ip` as the host part of a `host:port` string. IPv6 gets brackets.
pub fn format_host(ip: &IpAddr) -> String {
    match canonical(*ip) {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => format!("[{}]", v6),
    }
}

// IPv4-mapped IPv6 (`::ffff:a.b.c.d`) is treated as the IPv4 address it carries.
fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    /// Fixed interface table. `broken` names an interface whose address
    /// listing fails; `fail_listing` makes the interface listing itself fail.
    #[derive(Default)]
    struct FakeInterfaces {
        table: Vec<NetInterface>,
        broken: Option<&'static str>,
        fail_listing: bool,
    }

    impl InterfaceSource for FakeInterfaces {
        fn interfaces(&self) -> io::Result<Vec<NetInterface>> {
            if self.fail_listing {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            Ok(self.table.clone())
        }

        fn addresses(&self, iface: &NetInterface) -> io::Result<Vec<BoundAddr>> {
            if self.broken == Some(iface.name.as_str()) {
                return Err(io::Error::new(io::ErrorKind::Other, "addr query failed"));
            }
            Ok(iface.addrs.clone())
        }
    }

    fn v4(ip: &str, mask: &str) -> BoundAddr {
        BoundAddr::new(ip.parse().unwrap(), mask.parse().unwrap())
    }

    fn v6(ip: &str, prefix: u8) -> BoundAddr {
        let mask = Ipv6Addr::from(u128::MAX.checked_shl(128 - prefix as u32).unwrap_or(0));
        BoundAddr::new(ip.parse().unwrap(), IpAddr::V6(mask))
    }

    fn iface(name: &str, addrs: Vec<BoundAddr>) -> NetInterface {
        NetInterface {
            name: name.to_string(),
            addrs,
        }
    }

    fn typical_host() -> FakeInterfaces {
        FakeInterfaces {
            table: vec![
                iface("lo", vec![v4("127.0.0.1", "255.0.0.0"), v6("::1", 128)]),
                iface(
                    "eth0",
                    vec![
                        v4("192.168.1.20", "255.255.255.0"),
                        v6("fe80::1c2d:3eff:fe4f:5a6b", 64),
                        v6("2001:db8::20", 64),
                    ],
                ),
                iface("wlan0", vec![v4("169.254.10.3", "255.255.0.0")]),
                iface("tun0", vec![v4("10.8.0.2", "255.255.255.0")]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_discover_keeps_global_unicast_in_os_order() {
        let discoverer = AddressDiscoverer::with_source(typical_host());
        let addrs = discoverer.discover().unwrap();
        assert_eq!(addrs, vec!["192.168.1.20", "[2001:db8::20]", "10.8.0.2"]);
    }

    #[test]
    fn test_discover_empty_when_only_loopback() {
        let source = FakeInterfaces {
            table: vec![iface("lo", vec![v4("127.0.0.1", "255.0.0.0")])],
            ..Default::default()
        };
        let addrs = AddressDiscoverer::with_source(source).discover().unwrap();
        assert!(addrs.is_empty());
    }

    #[test]
    fn test_discover_skips_malformed_cidr() {
        let source = FakeInterfaces {
            table: vec![iface(
                "eth0",
                vec![
                    // Non-contiguous netmask.
                    v4("203.0.113.5", "255.0.255.0"),
                    // Mixed families.
                    BoundAddr::new(
                        "203.0.113.6".parse().unwrap(),
                        IpAddr::V6(Ipv6Addr::UNSPECIFIED),
                    ),
                    v4("203.0.113.7", "255.255.255.0"),
                ],
            )],
            ..Default::default()
        };
        let addrs = AddressDiscoverer::with_source(source).discover().unwrap();
        assert_eq!(addrs, vec!["203.0.113.7"]);
    }

    #[test]
    fn test_discover_preserves_duplicates() {
        let source = FakeInterfaces {
            table: vec![
                iface("eth0", vec![v4("198.51.100.1", "255.255.255.0")]),
                iface("eth0:1", vec![v4("198.51.100.1", "255.255.255.0")]),
            ],
            ..Default::default()
        };
        let addrs = AddressDiscoverer::with_source(source).discover().unwrap();
        assert_eq!(addrs, vec!["198.51.100.1", "198.51.100.1"]);
    }

    #[test]
    fn test_discover_fails_when_listing_fails() {
        let source = FakeInterfaces {
            fail_listing: true,
            ..typical_host()
        };
        let err = AddressDiscoverer::with_source(source).discover().unwrap_err();
        assert!(matches!(err, NetAddrError::Discovery { .. }));
    }

    #[test]
    fn test_discover_fails_fast_on_one_interface() {
        // eth0 has good addresses, but wlan0 fails afterwards: no partial result.
        let source = FakeInterfaces {
            broken: Some("wlan0"),
            ..typical_host()
        };
        let err = AddressDiscoverer::with_source(source).discover().unwrap_err();
        assert!(matches!(err, NetAddrError::Discovery { .. }));
    }

    #[test]
    fn test_discover_family_filter() {
        let only_v4 = AddressDiscoverer::with_source(typical_host()).with_families(true, false);
        assert_eq!(only_v4.discover().unwrap(), vec!["192.168.1.20", "10.8.0.2"]);

        let only_v6 = AddressDiscoverer::with_source(typical_host()).with_families(false, true);
        assert_eq!(only_v6.discover().unwrap(), vec!["[2001:db8::20]"]);
    }

    #[test]
    fn test_is_global_unicast() {
        let rejected = [
            "0.0.0.0",
            "127.0.0.1",
            "127.8.9.10",
            "224.0.0.251",
            "239.255.255.250",
            "169.254.1.1",
            "255.255.255.255",
            "::",
            "::1",
            "ff02::1",
            "fe80::1",
            "febf::1",
            "::ffff:127.0.0.1",
        ];
        for ip in rejected {
            let ip: IpAddr = ip.parse().unwrap();
            assert!(!is_global_unicast(&ip), "{} should be rejected", ip);
        }

        let accepted = [
            "8.8.8.8",
            "10.0.0.1",
            "172.16.5.4",
            "192.168.0.1",
            "2001:db8::1",
            "fd00::1",
            "fec0::1",
            "::ffff:192.0.2.1",
        ];
        for ip in accepted {
            let ip: IpAddr = ip.parse().unwrap();
            assert!(is_global_unicast(&ip), "{} should be accepted", ip);
        }
    }

    #[test]
    fn test_format_host() {
        assert_eq!(
            format_host(&IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))),
            "192.0.2.1"
        );
        assert_eq!(
            format_host(&"2001:db8::1".parse().unwrap()),
            "[2001:db8::1]"
        );
        assert_eq!(format_host(&"::ffff:192.0.2.1".parse().unwrap()), "192.0.2.1");
    }

    #[test]
    fn test_bound_addr_to_cidr() {
        let net = v4("192.168.1.20", "255.255.255.0").to_cidr().unwrap();
        assert_eq!(net.addr(), "192.168.1.20".parse::<IpAddr>().unwrap());
        assert_eq!(net.prefix_len(), 24);

        assert!(v4("192.168.1.20", "255.0.255.0").to_cidr().is_none());

        let net = v6("2001:db8::20", 64).to_cidr().unwrap();
        assert_eq!(net.prefix_len(), 64);
    }

    #[test]
    fn test_bound_addr_to_cidr_rejects_mixed_families() {
        let v4_with_v6_mask = BoundAddr::new(
            "203.0.113.6".parse().unwrap(),
            IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        );
        assert!(v4_with_v6_mask.to_cidr().is_none());

        let v6_with_v4_mask = BoundAddr::new(
            "2001:db8::6".parse().unwrap(),
            IpAddr::V4(Ipv4Addr::new(255, 255, 255, 0)),
        );
        assert!(v6_with_v4_mask.to_cidr().is_none());
    }

    #[test]
    fn test_system_discovery_only_returns_global_addresses() {
        // Whatever the host has, nothing filtered should come back.
        let Ok(addrs) = discover() else { return };
        for addr in addrs {
            let literal = addr.trim_start_matches('[').trim_end_matches(']');
            let ip: IpAddr = literal.parse().unwrap();
            assert!(is_global_unicast(&ip), "{} is not global unicast", addr);
            assert_eq!(addr.starts_with('['), ip.is_ipv6());
        }
    }
}
