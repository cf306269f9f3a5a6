//! Peer certificate as seen by the identity check.

use crate::base::neterror::NetError;
use boring::{
    asn1::Asn1TimeRef,
    hash::MessageDigest,
    nid::Nid,
    x509::{GeneralNameRef, X509},
};
use bytes::Bytes;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use time::{format_description, OffsetDateTime, PrimitiveDateTime};

/// The parts of a peer certificate needed for identity and pin checks.
///
/// Fingerprints are upper-case hex with `:` separators, e.g. `AB:CD:EF`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerCertificate {
    /// SHA-1 fingerprint. Pins are compared against this value.
    pub fingerprint: String,
    /// SHA-256 fingerprint.
    pub fingerprint256: String,
    /// Subject common name.
    pub subject_cn: Option<String>,
    /// DNS names and IP addresses from the subjectAltName extension.
    pub subject_alt_names: Vec<String>,
    pub not_before: Option<OffsetDateTime>,
    pub not_after: Option<OffsetDateTime>,
    /// DER encoding, empty when the certificate was not built from DER.
    pub raw: Bytes,
}

impl PeerCertificate {
    /// Create a certificate description with only a fingerprint.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            ..Self::default()
        }
    }

    pub fn subject_cn(mut self, cn: impl Into<String>) -> Self {
        self.subject_cn = Some(cn.into());
        self
    }

    pub fn subject_alt_name(mut self, name: impl Into<String>) -> Self {
        self.subject_alt_names.push(name.into());
        self
    }

    pub fn valid_between(mut self, not_before: OffsetDateTime, not_after: OffsetDateTime) -> Self {
        self.not_before = Some(not_before);
        self.not_after = Some(not_after);
        self
    }

    /// Parse a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, NetError> {
        let cert = X509::from_der(der).map_err(|_| NetError::SslServerCertBadFormat)?;

        let sha1 = cert
            .digest(MessageDigest::sha1())
            .map_err(|_| NetError::SslServerCertBadFormat)?;
        let sha256 = cert
            .digest(MessageDigest::sha256())
            .map_err(|_| NetError::SslServerCertBadFormat)?;

        let subject_cn = cert
            .subject_name()
            .entries_by_nid(Nid::COMMONNAME)
            .next()
            .and_then(|entry| entry.data().as_utf8().ok())
            .map(|cn| cn.to_string());

        let subject_alt_names = cert
            .subject_alt_names()
            .map(|names| names.iter().filter_map(general_name).collect())
            .unwrap_or_default();

        Ok(Self {
            fingerprint: format_fingerprint(&sha1),
            fingerprint256: format_fingerprint(&sha256),
            subject_cn,
            subject_alt_names,
            not_before: asn1_time(cert.not_before()),
            not_after: asn1_time(cert.not_after()),
            raw: Bytes::copy_from_slice(der),
        })
    }

    /// Fingerprint with separators removed, as compared against pins.
    pub fn normalized_fingerprint(&self) -> String {
        normalize_fingerprint(&self.fingerprint)
    }
}

/// Strip `:` separators from a fingerprint. Case is left untouched.
pub fn normalize_fingerprint(fingerprint: &str) -> String {
    fingerprint.replace(':', "")
}

/// Format digest bytes as upper-case hex pairs joined by `:`.
pub fn format_fingerprint(digest: &[u8]) -> String {
    digest
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn general_name(name: &GeneralNameRef) -> Option<String> {
    if let Some(dns) = name.dnsname() {
        return Some(dns.to_string());
    }

    let ip = match name.ipaddress()? {
        [a, b, c, d] => IpAddr::V4(Ipv4Addr::new(*a, *b, *c, *d)),
        bytes => {
            let octets: [u8; 16] = bytes.try_into().ok()?;
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    };
    Some(ip.to_string())
}

/// Convert an ASN.1 time as printed by BoringSSL (`Jan  2 03:04:05 2030 GMT`).
fn asn1_time(time: &Asn1TimeRef) -> Option<OffsetDateTime> {
    let printed = time.to_string();
    let format = format_description::parse(
        "[month repr:short] [day padding:space] [hour]:[minute]:[second] [year] GMT",
    )
    .ok()?;

    match PrimitiveDateTime::parse(&printed, &format) {
        Ok(parsed) => Some(parsed.assume_utc()),
        Err(e) => {
            tracing::debug!(time = %printed, error = %e, "unparseable certificate time");
            None
        }
    }
}
