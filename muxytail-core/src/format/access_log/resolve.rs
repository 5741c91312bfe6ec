use dashmap::DashMap;
use std::net::IpAddr;

/// Maps a client address to a host name.
pub trait HostResolver: Send + Sync {
    /// `None` when the address has no name or the lookup fails.
    fn resolve(&self, ip: &str) -> Option<String>;
}

/// Reverse DNS through the system resolver.
pub struct DnsResolver;

impl HostResolver for DnsResolver {
    fn resolve(&self, ip: &str) -> Option<String> {
        let addr: IpAddr = ip.parse().ok()?;

        let name = match dns_lookup::lookup_addr(&addr) {
            Ok(name) => name,
            Err(e) => {
                tracing::trace!(ip, error = %e, "reverse lookup failed");
                return None;
            }
        };

        // getnameinfo hands back the numeric form when there is no PTR record.
        let name = name.trim_end_matches('.');
        if name.is_empty() || name == ip {
            return None;
        }
        Some(name.to_string())
    }
}

/// Never resolves; addresses are shown as logged.
pub struct NoResolver;

impl HostResolver for NoResolver {
    fn resolve(&self, _ip: &str) -> Option<String> {
        None
    }
}

/// Remembers every answer, including failures, for the process lifetime.
pub struct CachingResolver<R> {
    inner: R,
    cache: DashMap<String, Option<String>>,
}

impl<R: HostResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }
}

impl<R: HostResolver> HostResolver for CachingResolver<R> {
    fn resolve(&self, ip: &str) -> Option<String> {
        if let Some(hit) = self.cache.get(ip) {
            return hit.value().clone();
        }

        let resolved = self.inner.resolve(ip);
        self.cache.insert(ip.to_string(), resolved.clone());
        resolved
    }
}
