//! Core DNS resolution types and traits.
//!
//! This module defines the two resolution seams of the crate:
//! - [`Resolve`]: raw name-to-socket-address resolution (system, hickory)
//! - [`Lookup`]: the family-aware lookup contract that overrides are served
//!   through and that native resolution is adapted to

use super::options::{IpVersion, LookupOptions};
use crate::base::neterror::NetError;
use std::{fmt, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over `SocketAddr`.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Resolution is assumed to always be ready (no backpressure).
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses.
    ///
    /// The returned addresses will have port 0; callers should set the
    /// appropriate port based on the target service.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// A single address produced by a lookup.
///
/// Addresses are kept as strings because configured overrides are passed
/// through without syntax validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    pub address: String,
    pub family: IpVersion,
}

impl ResolvedAddress {
    pub fn new(address: impl Into<String>, family: IpVersion) -> Self {
        Self {
            address: address.into(),
            family,
        }
    }

    pub fn v4(address: impl Into<String>) -> Self {
        Self::new(address, IpVersion::V4)
    }

    pub fn v6(address: impl Into<String>) -> Self {
        Self::new(address, IpVersion::V6)
    }
}

impl From<SocketAddr> for ResolvedAddress {
    fn from(addr: SocketAddr) -> Self {
        let family = if addr.is_ipv4() {
            IpVersion::V4
        } else {
            IpVersion::V6
        };
        Self::new(addr.ip().to_string(), family)
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (IPv{})", self.address, self.family.as_u8())
    }
}

/// Outcome of a [`Lookup`].
///
/// `Single` answers a lookup with `all = false`, `All` answers `all = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Single(ResolvedAddress),
    All(Vec<ResolvedAddress>),
}

impl LookupResult {
    /// The first address of the result, if any.
    pub fn first(&self) -> Option<&ResolvedAddress> {
        match self {
            LookupResult::Single(addr) => Some(addr),
            LookupResult::All(addrs) => addrs.first(),
        }
    }

    /// All addresses of the result in order.
    pub fn addresses(&self) -> &[ResolvedAddress] {
        match self {
            LookupResult::Single(addr) => std::slice::from_ref(addr),
            LookupResult::All(addrs) => addrs,
        }
    }

    pub fn into_addresses(self) -> Vec<ResolvedAddress> {
        match self {
            LookupResult::Single(addr) => vec![addr],
            LookupResult::All(addrs) => addrs,
        }
    }
}

/// Alias for the `Future` type returned by a [`Lookup`].
pub type Looking = Pin<Box<dyn Future<Output = Result<LookupResult, NetError>> + Send>>;

/// Family-aware hostname lookup.
///
/// `Ok` carries the single address or the full list depending on
/// [`LookupOptions::all`]; `Err` carries the resolver's failure.
pub trait Lookup: Send + Sync {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking;
}

impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking {
        (**self).lookup(name, options)
    }
}
