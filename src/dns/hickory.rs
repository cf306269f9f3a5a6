//! Family-aware lookup over hickory-dns.
//!
//! Each requested family maps to its own record query: [`Family::V4`] asks
//! for A records only, [`Family::V6`] for AAAA only and [`Family::Any`] for
//! A then AAAA. Nothing is fetched for a family that was not asked for.

use super::native::select;
use super::{Family, IpVersion, Lookup, LookupOptions, Looking, Name, ResolvedAddress};
use crate::base::neterror::NetError;
use hickory_resolver::{config::ResolverConfig, name_server::TokioConnectionProvider, TokioResolver};
use std::{
    net::{IpAddr, SocketAddr},
    sync::LazyLock,
};

/// Async fallback lookup backed by hickory-dns.
///
/// Shares one lazily built resolver across clones. System DNS settings are
/// used when readable, hickory's defaults otherwise.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryResolver {
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            match TokioResolver::builder_tokio() {
                Ok(builder) => builder.build(),
                Err(e) => {
                    tracing::warn!(error = %e, "no system DNS configuration, using hickory defaults");
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                    .build()
                }
            }
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Record queries issued for `family`, in answer order.
fn queries(family: Family) -> &'static [IpVersion] {
    match family {
        Family::Any => &[IpVersion::V4, IpVersion::V6],
        Family::V4 => &[IpVersion::V4],
        Family::V6 => &[IpVersion::V6],
    }
}

async fn query(
    resolver: &TokioResolver,
    host: &str,
    version: IpVersion,
) -> Result<Vec<ResolvedAddress>, NetError> {
    tracing::debug!(host = %host, family = version.as_u8(), "querying via hickory-dns");

    let found: Result<Vec<ResolvedAddress>, _> = match version {
        IpVersion::V4 => resolver
            .ipv4_lookup(host)
            .await
            .map(|records| records.iter().map(|a| ResolvedAddress::v4(a.0.to_string())).collect()),
        IpVersion::V6 => resolver
            .ipv6_lookup(host)
            .await
            .map(|records| records.iter().map(|aaaa| ResolvedAddress::v6(aaaa.0.to_string())).collect()),
    };

    found.map_err(|e| {
        tracing::debug!(host = %host, family = version.as_u8(), error = %e, "hickory-dns query failed");
        NetError::not_found(host, &e.to_string())
    })
}

/// Concatenate answers in query order. Fails only when no query answered,
/// with the first failure.
fn merge(
    results: impl IntoIterator<Item = Result<Vec<ResolvedAddress>, NetError>>,
) -> Result<Vec<ResolvedAddress>, NetError> {
    let mut addrs = Vec::new();
    let mut first_error = None;

    for result in results {
        match result {
            Ok(found) => addrs.extend(found),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if addrs.is_empty() => Err(e),
        _ => Ok(addrs),
    }
}

impl Lookup for HickoryResolver {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking {
        if let Ok(ip) = name.as_str().parse::<IpAddr>() {
            let addr = ResolvedAddress::from(SocketAddr::new(ip, 0));
            return Box::pin(std::future::ready(select(&name, vec![addr], options)));
        }

        let resolver: &'static TokioResolver = self.resolver;
        Box::pin(async move {
            let mut results = Vec::new();
            for &version in queries(options.family) {
                results.push(query(resolver, name.as_str(), version).await);
            }

            let addrs = merge(results)?;
            tracing::debug!(host = %name, count = addrs.len(), "hickory-dns lookup complete");
            select(&name, addrs, options)
        })
    }
}
