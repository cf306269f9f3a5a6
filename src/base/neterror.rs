use crate::tls::pinning::PinMismatch;
use std::{io, path::PathBuf, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Argument Errors
    #[error("Invalid address family {0}, expected 0, 4 or 6")]
    InvalidFamily(u8),

    // Resolution Errors
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },

    // Certificate Errors
    #[error("SSL server cert bad format")]
    SslServerCertBadFormat,
    #[error("Certificate is not valid for {host}")]
    CertCommonNameInvalid { host: String },
    #[error("Certificate date invalid")]
    CertDateInvalid,
    #[error("Certificate authority invalid")]
    CertAuthorityInvalid,
    #[error("{0}")]
    CertPinMismatch(Box<PinMismatch>),

    // Configuration Errors (custom codes starting at -950)
    #[error("Unrecognized association for host {host}")]
    UnrecognizedHostSpec { host: String },
    #[error("Unusable field `{field}` in association for host {host}")]
    InvalidHostSpecField { host: String, field: String },
    #[error("Failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Failed to parse configuration: {source}")]
    ConfigParse {
        #[source]
        source: Arc<serde_json::Error>,
    },
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::InvalidFamily(_) => -4,
            NetError::NameNotResolved => -105,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::CertPinMismatch(_) => -150,
            NetError::SslServerCertBadFormat => -167,
            NetError::CertCommonNameInvalid { .. } => -200,
            NetError::CertDateInvalid => -201,
            NetError::CertAuthorityInvalid => -202,
            NetError::UnrecognizedHostSpec { .. } => -950,
            NetError::ConfigRead { .. } => -951,
            NetError::ConfigParse { .. } => -952,
            NetError::InvalidHostSpecField { .. } => -953,
        }
    }

    /// Resolution failure for `domain` caused by an I/O error.
    pub fn dns_failed(domain: impl Into<String>, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.into(),
            source: Arc::new(source),
        }
    }

    /// Resolution failure for `domain` with no underlying I/O error.
    pub fn not_found(domain: impl Into<String>, reason: &str) -> Self {
        Self::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, reason.to_owned()))
    }

    /// Failure to read a configuration file at `path`.
    pub fn config_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NetError::ConfigRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Returns true for errors raised while validating a peer certificate.
    pub fn is_certificate_error(&self) -> bool {
        matches!(
            self,
            NetError::SslServerCertBadFormat
                | NetError::CertCommonNameInvalid { .. }
                | NetError::CertDateInvalid
                | NetError::CertAuthorityInvalid
                | NetError::CertPinMismatch(_)
        )
    }
}

impl From<serde_json::Error> for NetError {
    fn from(source: serde_json::Error) -> Self {
        NetError::ConfigParse {
            source: Arc::new(source),
        }
    }
}
