//! Live host resolver backed by the system resolver.

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

use crate::ports::{HostResolver, PortError};

/// Resolves names through the operating system (`getaddrinfo`).
pub struct LiveHostResolver;

impl HostResolver for LiveHostResolver {
    fn hostname(&self) -> Result<String, PortError> {
        local_hostname()
    }

    fn resolve_ipv4(&self, name: &str) -> Result<Ipv4Addr, PortError> {
        (name, 0u16)
            .to_socket_addrs()?
            .find_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| PortError::from(format!("{name} has no IPv4 address")))
    }
}

#[cfg(unix)]
fn local_hostname() -> Result<String, PortError> {
    let name = nix::unistd::gethostname()?;
    name.into_string().map_err(|raw| PortError::from(format!("hostname is not UTF-8: {raw:?}")))
}

#[cfg(not(unix))]
fn local_hostname() -> Result<String, PortError> {
    Ok(std::env::var("COMPUTERNAME")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_literal_addresses_without_dns() {
        let addr = LiveHostResolver.resolve_ipv4("10.1.2.77").unwrap();
        assert_eq!(addr, Ipv4Addr::new(10, 1, 2, 77));
    }

    #[test]
    fn ipv6_only_literal_is_an_error() {
        assert!(LiveHostResolver.resolve_ipv4("::1").is_err());
    }

    #[test]
    fn hostname_is_not_empty() {
        let name = LiveHostResolver.hostname().unwrap();
        assert!(!name.is_empty());
    }
}
