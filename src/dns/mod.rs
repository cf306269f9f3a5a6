//! DNS Resolution Module
//!
//! Provides hostname lookup with operator-configured overrides:
//! - [`OverrideLookup`]: answers from an [`AddressBook`](crate::config::AddressBook),
//!   falls back to native resolution otherwise
//! - [`ResolveLookup`]: family-aware native lookup over any [`Resolve`]
//! - System resolver (getaddrinfo via thread pool)
//! - [`HickoryResolver`]: async hickory-dns lookup querying only the requested
//!   record types
//!
//! # Example
//!
//! ```rust,ignore
//! use hostpin::dns::{Family, HickoryResolver, Lookup, LookupOptions, Name, OverrideLookup};
//!
//! let fallback = Arc::new(HickoryResolver::new());
//! let lookup = OverrideLookup::new(book, fallback);
//! let result = lookup.lookup(Name::new("example.com"), LookupOptions::from(Family::V6)).await?;
//! println!("Resolved: {:?}", result.first());
//! ```

mod address;
mod gai;
mod hickory;
mod lookup;
mod native;
mod options;
mod resolve;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use lookup::OverrideLookup;
pub use native::ResolveLookup;
pub use options::{Family, IpVersion, LookupHints, LookupOptions, PartialLookupOptions};
pub use resolve::{
    Addrs, Lookup, LookupResult, Looking, Name, Resolve, ResolvedAddress, Resolving,
};
