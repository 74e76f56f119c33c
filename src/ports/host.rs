//! Host resolver port for local name lookups.

use std::net::Ipv4Addr;

use super::PortError;

/// Resolves the local hostname and host names to IPv4 addresses.
pub trait HostResolver: Send + Sync {
    /// Returns the local machine's hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname cannot be read.
    fn hostname(&self) -> Result<String, PortError>;

    /// Resolves `name` to its first IPv4 address.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or has no IPv4 address.
    fn resolve_ipv4(&self, name: &str) -> Result<Ipv4Addr, PortError>;
}
