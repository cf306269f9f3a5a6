//! Canonical host association table.

use super::hostspec::{HostSpec, IpSpec, OneOrMany};
use crate::base::neterror::NetError;
use crate::dns::IpVersion;
use std::collections::HashMap;

/// Addresses and pins configured for a single host.
///
/// Order is configuration order; the first address of each family is the
/// primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecord {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub pins: Vec<String>,
}

impl HostRecord {
    /// Whether this record overrides resolution at all.
    pub fn has_addresses(&self) -> bool {
        !self.ipv4.is_empty() || !self.ipv6.is_empty()
    }

    /// Whether certificate pinning is enforced.
    pub fn is_pinned(&self) -> bool {
        !self.pins.is_empty()
    }

    fn push_detected(&mut self, host: &str, address: String) {
        match IpVersion::classify(&address) {
            Some(IpVersion::V4) => self.ipv4.push(address),
            Some(IpVersion::V6) => self.ipv6.push(address),
            None => {
                tracing::warn!(host = %host, address = %address, "cannot detect address family, ignoring");
            }
        }
    }

    fn from_spec(host: &str, spec: HostSpec) -> Self {
        let mut record = HostRecord::default();

        match spec {
            HostSpec::Address(address) => record.push_detected(host, address),
            HostSpec::Pair { address, pin } => {
                record.push_detected(host, address);
                record.pins.extend(pin.filter(|p| !p.is_empty()));
            }
            HostSpec::Object { ip, pin, .. } => {
                match ip {
                    Some(IpSpec::One(address)) => record.push_detected(host, address),
                    Some(IpSpec::Many(addresses)) => {
                        for address in addresses {
                            record.push_detected(host, address);
                        }
                    }
                    Some(IpSpec::ByFamily { v4, v6 }) => {
                        record.ipv4 = explicit_bucket(v4);
                        record.ipv6 = explicit_bucket(v6);
                    }
                    Some(IpSpec::Unrecognized) | None => {}
                }
                record.pins = pin.map(OneOrMany::into_vec).unwrap_or_default();
            }
            HostSpec::Unrecognized => {}
        }

        record
    }
}

/// An explicit `v4`/`v6` bucket. An empty single string adds nothing.
fn explicit_bucket(value: Option<OneOrMany>) -> Vec<String> {
    match value {
        Some(OneOrMany::One(address)) if address.is_empty() => Vec::new(),
        Some(value) => value.into_vec(),
        None => Vec::new(),
    }
}

/// Immutable mapping from hostname to [`HostRecord`].
///
/// Keys match exactly: no case folding, no wildcards. There is no way to
/// modify a book once built; build a new one instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    hosts: HashMap<String, HostRecord>,
}

impl AddressBook {
    /// Create an empty book. Every lookup falls through to native resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw associations, keeping unrecognized shapes as empty
    /// records.
    pub fn from_specs(raw: HashMap<String, HostSpec>) -> Self {
        let hosts = raw
            .into_iter()
            .map(|(host, spec)| {
                if !spec.is_recognized() {
                    tracing::warn!(host = %host, "unrecognized association shape, host will not be overridden");
                }
                for field in spec.ignored_fields() {
                    tracing::warn!(host = %host, field = %field, "ignoring unusable association field");
                }
                let record = HostRecord::from_spec(&host, spec);
                (host, record)
            })
            .collect();

        Self { hosts }
    }

    /// Normalize raw associations, failing on the first unrecognized shape
    /// or unusable object field.
    pub fn from_specs_strict(raw: HashMap<String, HostSpec>) -> Result<Self, NetError> {
        for (host, spec) in &raw {
            if !spec.is_recognized() {
                return Err(NetError::UnrecognizedHostSpec { host: host.clone() });
            }
            if let Some(field) = spec.ignored_fields().first() {
                return Err(NetError::InvalidHostSpecField {
                    host: host.clone(),
                    field: field.clone(),
                });
            }
        }

        Ok(Self::from_specs(raw))
    }

    /// Build a book from already-normalized records.
    pub fn from_records(records: impl IntoIterator<Item = (String, HostRecord)>) -> Self {
        Self {
            hosts: records.into_iter().collect(),
        }
    }

    /// Parse a JSON association object with the permissive policy.
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        let raw: HashMap<String, HostSpec> = serde_json::from_str(json)?;
        Ok(Self::from_specs(raw))
    }

    pub fn get(&self, host: &str) -> Option<&HostRecord> {
        self.hosts.get(host)
    }

    /// Configured pins for `host`, empty when unknown.
    pub fn pins(&self, host: &str) -> &[String] {
        self.hosts
            .get(host)
            .map(|record| record.pins.as_slice())
            .unwrap_or_default()
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
