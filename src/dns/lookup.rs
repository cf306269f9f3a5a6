//! Lookup with configured address overrides.

use super::{GaiResolver, Lookup, LookupOptions, LookupResult, Looking, Name, ResolveLookup};
use crate::config::AddressBook;
use std::{fmt, sync::Arc};

/// Lookup that answers from an [`AddressBook`] before falling back to a
/// native lookup.
///
/// Hosts that are absent from the book, or have no address able to satisfy
/// the request, are handed to the fallback untouched: same name, same
/// options, and its result is returned as is.
///
/// # Example
///
/// ```rust,ignore
/// use hostpin::config::AddressBook;
/// use hostpin::dns::{Family, Lookup, LookupOptions, Name, OverrideLookup};
/// use std::sync::Arc;
///
/// let book = AddressBook::from_json(r#"{"api.local": "127.0.0.1"}"#)?;
/// let lookup = OverrideLookup::with_system_fallback(Arc::new(book));
///
/// let result = lookup
///     .lookup(Name::new("api.local"), LookupOptions::from(Family::V4))
///     .await?;
/// ```
#[derive(Clone)]
pub struct OverrideLookup {
    book: Arc<AddressBook>,
    fallback: Arc<dyn Lookup>,
}

impl OverrideLookup {
    /// Creates a lookup over `book`.
    ///
    /// # Arguments
    ///
    /// * `book` - Configured overrides.
    /// * `fallback` - Native lookup for hosts without an override.
    pub fn new(book: Arc<AddressBook>, fallback: Arc<dyn Lookup>) -> Self {
        Self { book, fallback }
    }

    /// Creates a lookup falling back to the system resolver.
    pub fn with_system_fallback(book: Arc<AddressBook>) -> Self {
        Self::new(book, Arc::new(ResolveLookup::new(GaiResolver::new())))
    }

    pub fn address_book(&self) -> &Arc<AddressBook> {
        &self.book
    }

    /// Answer from the book only, without consulting the fallback.
    pub fn lookup_override(&self, name: &str, options: LookupOptions) -> Option<LookupResult> {
        if options.all {
            self.book.get_all_addresses(name).map(LookupResult::All)
        } else {
            self.book
                .get_address(name, options.family)
                .map(LookupResult::Single)
        }
    }
}

impl Lookup for OverrideLookup {
    fn lookup(&self, name: Name, options: LookupOptions) -> Looking {
        tracing::debug!(host = %name, family = %options.family, all = options.all, "looking up");

        match self.lookup_override(name.as_str(), options) {
            Some(result) => {
                tracing::debug!(host = %name, "override found, skipping real DNS");
                Box::pin(std::future::ready(Ok(result)))
            }
            None => {
                tracing::debug!(host = %name, "no override, using real DNS");
                self.fallback.lookup(name, options)
            }
        }
    }
}

impl fmt::Debug for OverrideLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideLookup")
            .field("override_count", &self.book.len())
            .finish_non_exhaustive()
    }
}
