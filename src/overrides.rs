//! The owner of an address book and the two entry points served from it.

use crate::base::neterror::NetError;
use crate::config::{AddressBook, OverrideConfig};
use crate::dns::{
    GaiResolver, Lookup, LookupOptions, LookupResult, Looking, Name, OverrideLookup, ResolveLookup,
};
use crate::tls::{HostnameVerifier, PeerCertificate, PinValidator, TrustVerifier, ValidateOptions};
use std::{fmt, sync::Arc};

/// Hostname overrides and certificate pins built from one configuration.
///
/// Exposes [`lookup`](Self::lookup) and
/// [`check_server_identity`](Self::check_server_identity) for whatever
/// component hooks them into a runtime. The book cannot change while the
/// instance is live; [`rebuild`](Self::rebuild) consumes it and returns a
/// new one.
///
/// # Example
///
/// ```rust,ignore
/// use hostpin::config::OverrideConfig;
/// use hostpin::dns::{Family, LookupOptions};
/// use hostpin::HostOverrides;
///
/// let overrides = HostOverrides::from_config(OverrideConfig::load_default()?)?;
/// let result = overrides.lookup("site1.com", LookupOptions::from(Family::V4)).await?;
/// ```
#[derive(Clone)]
pub struct HostOverrides {
    lookup: OverrideLookup,
    validator: PinValidator,
    fallback: Arc<dyn Lookup>,
    trust: Arc<dyn TrustVerifier>,
}

impl HostOverrides {
    pub fn builder() -> HostOverridesBuilder {
        HostOverridesBuilder::new()
    }

    /// Build with default delegates from a parsed configuration.
    pub fn from_config(config: OverrideConfig) -> Result<Self, NetError> {
        Ok(Self::builder().address_book(config.into_address_book()?).build())
    }

    /// Resolve `host`, preferring configured addresses.
    pub async fn lookup(
        &self,
        host: impl Into<Name>,
        options: impl Into<LookupOptions>,
    ) -> Result<LookupResult, NetError> {
        self.lookup.lookup(host.into(), options.into()).await
    }

    /// Check a peer certificate for `host`.
    pub async fn check_server_identity(
        &self,
        host: &str,
        cert: &PeerCertificate,
        options: ValidateOptions,
    ) -> Result<(), NetError> {
        self.validator.validate(host, cert, options).await
    }

    pub fn address_book(&self) -> &Arc<AddressBook> {
        self.lookup.address_book()
    }

    /// The lookup half as a standalone [`Lookup`].
    pub fn resolver(&self) -> &OverrideLookup {
        &self.lookup
    }

    pub fn validator(&self) -> &PinValidator {
        &self.validator
    }

    /// Replace the book, keeping the delegates.
    pub fn rebuild(self, book: AddressBook) -> Self {
        tracing::info!(hosts = book.len(), "rebuilding host overrides");
        HostOverridesBuilder {
            book: Some(book),
            fallback: Some(self.fallback),
            trust: Some(self.trust),
        }
        .build()
    }
}

impl Lookup for HostOverrides {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking {
        self.lookup.lookup(name, options)
    }
}

impl fmt::Debug for HostOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostOverrides")
            .field("override_count", &self.address_book().len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HostOverrides`].
///
/// Defaults: empty book, system resolver fallback, [`HostnameVerifier`].
#[must_use]
#[derive(Default)]
pub struct HostOverridesBuilder {
    book: Option<AddressBook>,
    fallback: Option<Arc<dyn Lookup>>,
    trust: Option<Arc<dyn TrustVerifier>>,
}

impl HostOverridesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address_book(mut self, book: AddressBook) -> Self {
        self.book = Some(book);
        self
    }

    /// Native lookup used when a host has no usable override.
    pub fn fallback(mut self, fallback: impl Lookup + 'static) -> Self {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Standard certificate check run before pins.
    pub fn trust_verifier(mut self, trust: impl TrustVerifier + 'static) -> Self {
        self.trust = Some(Arc::new(trust));
        self
    }

    pub fn build(self) -> HostOverrides {
        let book = Arc::new(self.book.unwrap_or_default());
        let fallback = self
            .fallback
            .unwrap_or_else(|| Arc::new(ResolveLookup::new(GaiResolver::new())));
        let trust = self
            .trust
            .unwrap_or_else(|| Arc::new(HostnameVerifier::new()));

        tracing::debug!(hosts = book.len(), "host overrides ready");

        HostOverrides {
            lookup: OverrideLookup::new(book.clone(), fallback.clone()),
            validator: PinValidator::new(book, trust.clone()),
            fallback,
            trust,
        }
    }
}
