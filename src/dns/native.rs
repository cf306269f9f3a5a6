//! Adapts a raw [`Resolve`] implementation to the [`Lookup`] contract.

use super::{
    Family, GaiResolver, IpVersion, Lookup, LookupOptions, LookupResult, Looking, Name, Resolve,
    ResolvedAddress,
};
use crate::base::neterror::NetError;
use std::net::{IpAddr, SocketAddr};

/// Native lookup backed by a [`Resolve`] implementation.
///
/// - IP literals are answered without resolving.
/// - Addresses not matching the requested family are dropped.
/// - With `verbatim = false`, IPv4 addresses are ordered before IPv6.
#[derive(Debug, Clone, Default)]
pub struct ResolveLookup<R = GaiResolver> {
    resolver: R,
}

impl<R: Resolve> ResolveLookup<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R: Resolve> Lookup for ResolveLookup<R> {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking {
        if let Ok(ip) = name.as_str().parse::<IpAddr>() {
            let addr = ResolvedAddress::from(SocketAddr::new(ip, 0));
            return Box::pin(std::future::ready(select(&name, vec![addr], options)));
        }

        let resolving = self.resolver.resolve(name.clone());
        Box::pin(async move {
            let addrs: Vec<ResolvedAddress> =
                resolving.await?.map(ResolvedAddress::from).collect();
            select(&name, addrs, options)
        })
    }
}

/// Apply family filtering, ordering and the single/all shape.
pub(super) fn select(
    name: &Name,
    mut addrs: Vec<ResolvedAddress>,
    options: LookupOptions,
) -> Result<LookupResult, NetError> {
    addrs.retain(|addr| options.family.accepts(addr.family));

    if !options.verbatim {
        // Stable, so the resolver's order is kept within each family.
        addrs.sort_by_key(|addr| addr.family != IpVersion::V4);
    }

    if addrs.is_empty() {
        let reason = match options.family {
            Family::Any => "No addresses returned",
            Family::V4 => "No IPv4 addresses returned",
            Family::V6 => "No IPv6 addresses returned",
        };
        return Err(NetError::not_found(name.as_str(), reason));
    }

    if options.all {
        Ok(LookupResult::All(addrs))
    } else {
        Ok(LookupResult::Single(addrs.swap_remove(0)))
    }
}
