//! # hostpin
//!
//! Hostname-to-address overrides and certificate pinning.
//!
//! `hostpin` lets a client reach known hosts through fixed addresses without
//! touching system DNS, and check the certificate those hosts present
//! against an expected fingerprint set, on top of or instead of the usual
//! trust checks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostpin::config::AddressBook;
//! use hostpin::dns::{Family, LookupOptions};
//! use hostpin::tls::{PeerCertificate, ValidateOptions};
//! use hostpin::HostOverrides;
//!
//! #[tokio::main]
//! async fn main() {
//!     let book = AddressBook::from_json(r#"{
//!         "site1.com": { "ip": "10.20.30.40", "pin": "AB12CD34" }
//!     }"#).unwrap();
//!     let overrides = HostOverrides::builder().address_book(book).build();
//!
//!     let addr = overrides.lookup("site1.com", Family::V6).await.unwrap();
//!     println!("site1.com -> {:?}", addr.first()); // ::ffff:10.20.30.40
//!
//!     let cert = PeerCertificate::new("AB:12:CD:34");
//!     overrides
//!         .check_server_identity("site1.com", &cert, ValidateOptions::pinning_only())
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`config`] - Association shapes and the canonical [`AddressBook`](config::AddressBook)
//! - [`dns`] - Override lookup and native fallbacks
//! - [`tls`] - Trust verification and certificate pinning

pub mod base;
pub mod config;
pub mod dns;
mod overrides;
pub mod tls;

pub use base::neterror::NetError;
pub use overrides::{HostOverrides, HostOverridesBuilder};
