//! Hostname resolution for the staleness check.
//!
//! When an update request carries a `hostname` query parameter, the relay
//! looks up the name's current `A` records before bothering the provider.
//! The lookup is behind the [`HostResolver`] trait so request handling can be
//! exercised without network access.

use crate::error::Error;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// `DynHostResolver` is a type alias for a [`HostResolver`] shared across
/// request handlers through an [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynHostResolver = Arc<dyn HostResolver + Send + Sync>;

/// An async trait describing the IPv4 lookup used to decide whether a DNS
/// record is stale.
#[async_trait::async_trait]
pub trait HostResolver {
    /// Resolve the current IPv4 addresses for the given hostname.
    async fn lookup_v4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, Error>;
}

/// [`HostResolver`] backed by the default trust-dns recursive resolver.
#[allow(clippy::module_name_repetitions)]
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    pub fn new() -> Result<Self, Error> {
        let inner = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())?;
        Ok(SystemResolver { inner })
    }
}

#[async_trait::async_trait]
impl HostResolver for SystemResolver {
    async fn lookup_v4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, Error> {
        let lookup = self.inner.lookup_ip(hostname).await?;
        Ok(lookup
            .iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect())
    }
}
