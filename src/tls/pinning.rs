//! Certificate pinning for MITM prevention.
//!
//! Validates server certificates against fingerprints configured per host in
//! an [`AddressBook`]. Pins are checked only after the standard trust check
//! passes, unless the caller asks for pinning alone.

use super::certificate::{normalize_fingerprint, PeerCertificate};
use super::verify::TrustVerifier;
use crate::base::neterror::NetError;
use crate::config::AddressBook;
use std::{fmt, sync::Arc};

/// A certificate whose fingerprint matches none of the host's pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMismatch {
    pub host: String,
    /// Presented fingerprint, separators removed.
    pub fingerprint: String,
    pub certificate: PeerCertificate,
}

impl PinMismatch {
    pub const KIND: &'static str = "certificate-pin-mismatch";
    pub const CODE: &'static str = "UNTRUSTED_CERT_IN_CHAIN";

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    pub fn code(&self) -> &'static str {
        Self::CODE
    }
}

impl fmt::Display for PinMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate checks failed for {}: fingerprint {} is not pinned ({})",
            self.host, self.fingerprint, self.code()
        )
    }
}

/// Options for [`PinValidator::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Skip the trust verifier and check pins only.
    pub check_pinning_only: bool,
}

impl ValidateOptions {
    pub fn pinning_only() -> Self {
        Self {
            check_pinning_only: true,
        }
    }
}

/// Certificate pin checker over an [`AddressBook`].
#[derive(Clone)]
pub struct PinValidator {
    book: Arc<AddressBook>,
    trust: Arc<dyn TrustVerifier>,
}

impl PinValidator {
    pub fn new(book: Arc<AddressBook>, trust: Arc<dyn TrustVerifier>) -> Self {
        Self { book, trust }
    }

    /// Check `cert` for `host`.
    ///
    /// A trust verifier failure is returned as is and pins are not looked
    /// at. Hosts without pins pass. Pinned hosts pass only if the
    /// fingerprint, separators removed, equals one of the pins exactly.
    pub async fn validate(
        &self,
        host: &str,
        cert: &PeerCertificate,
        options: ValidateOptions,
    ) -> Result<(), NetError> {
        if !options.check_pinning_only {
            tracing::debug!(host = %host, "running standard certificate checks");

            if let Err(e) = self.trust.verify(host, cert).await {
                tracing::warn!(host = %host, error = %e, code = e.as_i32(), "certificate checks failed");
                return Err(e);
            }
        }

        self.check_pins(host, cert)
    }

    /// The pin half of [`validate`](Self::validate), without the trust check.
    pub fn check_pins(&self, host: &str, cert: &PeerCertificate) -> Result<(), NetError> {
        let pins = self.book.pins(host);
        if pins.is_empty() {
            tracing::debug!(host = %host, "no pins configured, skipping pin check");
            return Ok(());
        }

        let fingerprint = normalize_fingerprint(&cert.fingerprint);
        tracing::debug!(host = %host, fingerprint = %fingerprint, pins = pins.len(), "checking pins");

        if pins.iter().any(|pin| *pin == fingerprint) {
            return Ok(());
        }

        tracing::warn!(host = %host, fingerprint = %fingerprint, "certificate pin mismatch");
        Err(NetError::CertPinMismatch(Box::new(PinMismatch {
            host: host.to_string(),
            fingerprint,
            certificate: cert.clone(),
        })))
    }

    pub fn address_book(&self) -> &Arc<AddressBook> {
        &self.book
    }
}

impl fmt::Debug for PinValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinValidator")
            .field("host_count", &self.book.len())
            .finish_non_exhaustive()
    }
}
