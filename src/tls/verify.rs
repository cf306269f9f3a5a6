//! Standard server identity checks.
//!
//! A [`TrustVerifier`] decides whether a certificate is acceptable for a
//! host before any pin is looked at. Its error is final.

use super::certificate::PeerCertificate;
use crate::base::neterror::NetError;
use std::{future::Future, net::IpAddr, pin::Pin, sync::Arc};
use time::OffsetDateTime;

/// Alias for the `Future` type returned by a [`TrustVerifier`].
pub type Verifying<'a> = Pin<Box<dyn Future<Output = Result<(), NetError>> + Send + 'a>>;

/// Trust-chain validation delegate.
///
/// May suspend, e.g. when the check is driven by a TLS handshake callback.
pub trait TrustVerifier: Send + Sync {
    fn verify<'a>(&'a self, host: &'a str, cert: &'a PeerCertificate) -> Verifying<'a>;
}

impl<T: TrustVerifier + ?Sized> TrustVerifier for Arc<T> {
    fn verify<'a>(&'a self, host: &'a str, cert: &'a PeerCertificate) -> Verifying<'a> {
        (**self).verify(host, cert)
    }
}

/// Accepts every certificate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrustVerifier;

impl TrustVerifier for NoopTrustVerifier {
    fn verify<'a>(&'a self, _host: &'a str, _cert: &'a PeerCertificate) -> Verifying<'a> {
        Box::pin(std::future::ready(Ok(())))
    }
}

/// Checks the validity period and that the certificate names the host.
///
/// Names come from subjectAltName; the subject CN is only used when the
/// certificate has no subjectAltName entries. A leading `*.` matches exactly
/// one label. Comparison is case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameVerifier {
    now: Option<OffsetDateTime>,
}

impl HostnameVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate validity periods at a fixed instant instead of now.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn check(&self, host: &str, cert: &PeerCertificate) -> Result<(), NetError> {
        let now = self.now.unwrap_or_else(OffsetDateTime::now_utc);

        let not_yet_valid = cert.not_before.is_some_and(|nb| now < nb);
        let expired = cert.not_after.is_some_and(|na| now > na);
        if not_yet_valid || expired {
            return Err(NetError::CertDateInvalid);
        }

        let names: Vec<&str> = if cert.subject_alt_names.is_empty() {
            cert.subject_cn.as_deref().into_iter().collect()
        } else {
            cert.subject_alt_names.iter().map(String::as_str).collect()
        };

        if names.iter().any(|pattern| matches_host(pattern, host)) {
            Ok(())
        } else {
            Err(NetError::CertCommonNameInvalid {
                host: host.to_string(),
            })
        }
    }
}

impl TrustVerifier for HostnameVerifier {
    fn verify<'a>(&'a self, host: &'a str, cert: &'a PeerCertificate) -> Verifying<'a> {
        Box::pin(std::future::ready(self.check(host, cert)))
    }
}

fn matches_host(pattern: &str, host: &str) -> bool {
    let pattern = pattern.trim_end_matches('.').to_ascii_lowercase();
    let host = host.trim_end_matches('.').to_ascii_lowercase();

    // IP addresses never match wildcards.
    if host.parse::<IpAddr>().is_ok() {
        return pattern == host;
    }

    match pattern.strip_prefix("*.") {
        Some(suffix) => host
            .split_once('.')
            .is_some_and(|(label, rest)| !label.is_empty() && rest == suffix),
        None => pattern == host,
    }
}
