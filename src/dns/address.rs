//! Address selection over an [`AddressBook`].

use super::{Family, IpVersion, ResolvedAddress};
use crate::config::AddressBook;

/// Prefix turning an IPv4 literal into its IPv4-mapped IPv6 form.
const IPV4_MAPPED_PREFIX: &str = "::ffff:";

impl AddressBook {
    /// Pick the address `host` should resolve to for `family`.
    ///
    /// Returns `None` when the host is not overridden or no configured
    /// address can satisfy the family. IPv6 requests against IPv4-only hosts
    /// are answered with an IPv4-mapped address.
    pub fn get_address(&self, host: &str, family: Family) -> Option<ResolvedAddress> {
        let record = self.get(host).filter(|record| record.has_addresses())?;

        let v4 = record.ipv4.first();
        let v6 = record.ipv6.first();

        match (family, v4, v6) {
            (Family::Any | Family::V4, Some(v4), _) => Some(ResolvedAddress::v4(v4.as_str())),
            (Family::Any | Family::V6, _, Some(v6)) => Some(ResolvedAddress::v6(v6.as_str())),
            (Family::V6, Some(v4), None) => Some(ResolvedAddress::v6(format!(
                "{IPV4_MAPPED_PREFIX}{v4}"
            ))),
            _ => None,
        }
    }

    /// Every configured address of `host`: IPv4 entries first, then IPv6.
    ///
    /// Returns `None` when the host is not overridden.
    pub fn get_all_addresses(&self, host: &str) -> Option<Vec<ResolvedAddress>> {
        let record = self.get(host).filter(|record| record.has_addresses())?;

        let v4 = record
            .ipv4
            .iter()
            .map(|ip| ResolvedAddress::new(ip.as_str(), IpVersion::V4));
        let v6 = record
            .ipv6
            .iter()
            .map(|ip| ResolvedAddress::new(ip.as_str(), IpVersion::V6));

        Some(v4.chain(v6).collect())
    }
}
