//! Bind address resolution for `-bindAddress`.
//!
//! Resolution only decides whether the address is the wildcard. The text the
//! user typed is what gets stored; the resolved address is dropped.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};

use tracing::debug;

use crate::args::error::ArgError;

/// Name and address lookups used while parsing.
pub trait AddressResolver {
    /// Resolve a hostname or literal address.
    fn resolve(&self, host: &str) -> io::Result<IpAddr>;

    /// This machine's own hostname.
    fn local_hostname(&self) -> io::Result<String>;
}

/// Resolver backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolve(&self, host: &str) -> io::Result<IpAddr> {
        // `[::1]` style literals are accepted as well as bare ones.
        let literal = host
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(host);
        if let Ok(ip) = literal.parse::<IpAddr>() {
            return Ok(ip);
        }

        (host, 0)
            .to_socket_addrs()?
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no addresses for {}", host))
            })
    }

    fn local_hostname(&self) -> io::Result<String> {
        Ok(gethostname::gethostname().to_string_lossy().into_owned())
    }
}

/// Result of resolving a bind address: the pair that is always stored together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindTarget {
    pub bind_address: String,
    pub preferred_host: String,
}

/// Resolve `value` and derive the host name to advertise.
///
/// The wildcard address advertises this machine's hostname; anything else
/// advertises `value` as typed.
pub fn resolve_bind_address(
    value: &str,
    resolver: &dyn AddressResolver,
) -> Result<BindTarget, ArgError> {
    let unresolvable = |source: io::Error| ArgError::UnresolvableAddress {
        value: value.to_string(),
        source,
    };

    let address = resolver.resolve(value).map_err(unresolvable)?;
    let preferred_host = if address.is_unspecified() {
        resolver.local_hostname().map_err(unresolvable)?
    } else {
        value.to_string()
    };
    debug!(bind_address = value, preferred_host = %preferred_host, "resolved bind address");

    Ok(BindTarget {
        bind_address: value.to_string(),
        preferred_host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    struct FakeResolver;

    impl AddressResolver for FakeResolver {
        fn resolve(&self, host: &str) -> io::Result<IpAddr> {
            match host {
                "devbox" => Ok(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))),
                "anyhost" => Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
                _ => host
                    .parse::<IpAddr>()
                    .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "unknown host")),
            }
        }

        fn local_hostname(&self) -> io::Result<String> {
            Ok("buildhost.example.com".to_string())
        }
    }

    #[test]
    fn specific_address_keeps_literal_text() {
        let target = resolve_bind_address("10.0.0.5", &FakeResolver).unwrap();
        assert_eq!(target.bind_address, "10.0.0.5");
        assert_eq!(target.preferred_host, "10.0.0.5");
    }

    #[test]
    fn hostname_is_advertised_as_typed_not_resolved() {
        let target = resolve_bind_address("devbox", &FakeResolver).unwrap();
        assert_eq!(target.bind_address, "devbox");
        assert_eq!(target.preferred_host, "devbox");
    }

    #[test]
    fn wildcard_advertises_local_hostname() {
        let target = resolve_bind_address("0.0.0.0", &FakeResolver).unwrap();
        assert_eq!(target.bind_address, "0.0.0.0");
        assert_eq!(target.preferred_host, "buildhost.example.com");

        let target = resolve_bind_address("::", &FakeResolver).unwrap();
        assert_eq!(target.bind_address, "::");
        assert_eq!(target.preferred_host, "buildhost.example.com");
    }

    #[test]
    fn wildcard_by_name_advertises_local_hostname() {
        let target = resolve_bind_address("anyhost", &FakeResolver).unwrap();
        assert_eq!(target.bind_address, "anyhost");
        assert_eq!(target.preferred_host, "buildhost.example.com");
    }

    #[test]
    fn unresolvable_address_names_the_value() {
        let err = resolve_bind_address("no-such-host.invalid", &FakeResolver).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Can't resolve bind address: no-such-host.invalid"
        );
    }

    #[test]
    fn system_resolver_parses_literals_without_lookup() {
        assert_eq!(
            SystemResolver.resolve("127.0.0.1").unwrap(),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
        assert!(SystemResolver.resolve("0.0.0.0").unwrap().is_unspecified());
    }

    #[test]
    fn system_resolver_accepts_bracketed_ipv6() {
        assert_eq!(
            SystemResolver.resolve("[::1]").unwrap(),
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        );
        assert!(SystemResolver.resolve("[::]").unwrap().is_unspecified());
    }

    #[test]
    fn bracketed_wildcard_advertises_system_hostname() {
        let target = resolve_bind_address("[::]", &SystemResolver).unwrap();
        assert_eq!(target.bind_address, "[::]");
        assert_eq!(
            target.preferred_host,
            SystemResolver.local_hostname().unwrap()
        );
        assert!(!target.preferred_host.is_empty());
    }
}
