//! Host byte resolution.

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use crate::ports::HostResolver;

/// Name resolved when the local hostname cannot be.
pub const LOOPBACK_NAME: &str = "localhost";

/// Resolves the last octet of this host's IPv4 address.
///
/// Lookup failures never reach the caller: a failing hostname or name lookup
/// falls back to resolving [`LOOPBACK_NAME`], and if even that fails the
/// loopback address itself is used.
pub fn resolve_host_byte(resolver: &dyn HostResolver) -> u8 {
    let addr = match resolver.hostname().and_then(|name| {
        let addr = resolver.resolve_ipv4(&name)?;
        debug!(hostname = %name, %addr, "resolved local host");
        Ok(addr)
    }) {
        Ok(addr) => addr,
        Err(err) => {
            warn!(error = %err, "local host lookup failed, using loopback");
            resolver.resolve_ipv4(LOOPBACK_NAME).unwrap_or_else(|err| {
                warn!(error = %err, "loopback lookup failed, using 127.0.0.1");
                Ipv4Addr::LOCALHOST
            })
        }
    };
    addr.octets()[3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;

    /// Resolver answering from a fixed table.
    struct TableResolver {
        hostname: Option<&'static str>,
        table: Vec<(&'static str, Ipv4Addr)>,
    }

    impl HostResolver for TableResolver {
        fn hostname(&self) -> Result<String, PortError> {
            self.hostname.map(str::to_string).ok_or_else(|| "no hostname".into())
        }

        fn resolve_ipv4(&self, name: &str) -> Result<Ipv4Addr, PortError> {
            self.table
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, addr)| *addr)
                .ok_or_else(|| format!("unknown host {name}").into())
        }
    }

    #[test]
    fn uses_last_octet_of_host_address() {
        let resolver = TableResolver {
            hostname: Some("e03u08"),
            table: vec![("e03u08", Ipv4Addr::new(10, 40, 2, 197))],
        };
        assert_eq!(resolve_host_byte(&resolver), 197);
    }

    #[test]
    fn unresolvable_hostname_falls_back_to_loopback_name() {
        let resolver = TableResolver {
            hostname: Some("offline-laptop"),
            table: vec![(LOOPBACK_NAME, Ipv4Addr::new(127, 0, 1, 1))],
        };
        assert_eq!(resolve_host_byte(&resolver), 1);
    }

    #[test]
    fn missing_hostname_falls_back_to_loopback_name() {
        let resolver = TableResolver {
            hostname: None,
            table: vec![(LOOPBACK_NAME, Ipv4Addr::new(127, 0, 0, 9))],
        };
        assert_eq!(resolve_host_byte(&resolver), 9);
    }

    #[test]
    fn total_failure_uses_loopback_address() {
        let resolver = TableResolver { hostname: None, table: Vec::new() };
        assert_eq!(resolve_host_byte(&resolver), 1);
    }
}
