//! Server identity checks and certificate pinning.

pub mod certificate;
pub mod pinning;
pub mod verify;

pub use certificate::{format_fingerprint, normalize_fingerprint, PeerCertificate};
pub use pinning::{PinMismatch, PinValidator, ValidateOptions};
pub use verify::{HostnameVerifier, NoopTrustVerifier, TrustVerifier, Verifying};
