//! Local network address resolution.
//!
//! Picks the IPv4 address other devices on the LAN can use to reach this
//! host. Loopback addresses and the adapters that virtualization software
//! installs are skipped.
//!
//! Which address wins when several qualify depends on the order the OS
//! enumerates interfaces in, and that order differs between platforms.

use std::io;
use std::net::{IpAddr, Ipv4Addr};

use tracing::{debug, warn};

/// Name prefixes of virtual adapters, matched case-insensitively.
pub const VIRTUAL_ADAPTER_PREFIXES: [&str; 5] =
    ["vmnet", "vboxnet", "vethernet", "virtualbox", "vmware"];

/// Returned when no interface qualifies.
pub const FALLBACK_ADDRESS: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// One address bound to one host interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// Interface name as reported by the OS.
    pub name: String,
    /// The bound address.
    pub ip: IpAddr,
    /// `true` for loopback interfaces.
    pub internal: bool,
}

impl InterfaceAddress {
    /// Creates an interface table entry.
    #[must_use]
    pub fn new(name: impl Into<String>, ip: impl Into<IpAddr>, internal: bool) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            internal,
        }
    }
}

/// Returns `true` if `name` looks like a virtualization adapter.
///
/// # Examples
///
/// ```
/// use cc_probe::is_virtual_adapter;
///
/// assert!(is_virtual_adapter("VMnet8"));
/// assert!(is_virtual_adapter("vEthernet (WSL)"));
/// assert!(!is_virtual_adapter("eth0"));
/// ```
#[must_use]
pub fn is_virtual_adapter(name: &str) -> bool {
    let name = name.to_lowercase();
    VIRTUAL_ADAPTER_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Picks the first external IPv4 address on a non-virtual interface.
///
/// Falls back to [`FALLBACK_ADDRESS`] when nothing qualifies.
#[must_use]
pub fn select_address<'a, I>(table: I) -> Ipv4Addr
where
    I: IntoIterator<Item = &'a InterfaceAddress>,
{
    table
        .into_iter()
        .find_map(|entry| match entry.ip {
            IpAddr::V4(ip) if !entry.internal && !is_virtual_adapter(&entry.name) => Some(ip),
            _ => None,
        })
        .unwrap_or(FALLBACK_ADDRESS)
}

/// Reads the host's interface table.
///
/// # Errors
///
/// Returns the OS error if the interface table cannot be queried.
pub fn interface_table() -> io::Result<Vec<InterfaceAddress>> {
    let interfaces = if_addrs::get_if_addrs()?;
    Ok(interfaces
        .into_iter()
        .map(|iface| InterfaceAddress {
            internal: iface.is_loopback(),
            ip: iface.ip(),
            name: iface.name,
        })
        .collect())
}

/// Resolves the local network address of this host.
///
/// A failed interface query is logged and yields [`FALLBACK_ADDRESS`].
pub fn resolve() -> Ipv4Addr {
    match interface_table() {
        Ok(table) => {
            let address = select_address(&table);
            debug!(%address, interfaces = table.len(), "Resolved local address");
            address
        }
        Err(err) => {
            warn!(error = %err, "Failed to list network interfaces, using loopback");
            FALLBACK_ADDRESS
        }
    }
}
