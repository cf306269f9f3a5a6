//! Override configuration.
//!
//! Turns operator-supplied associations into an [`AddressBook`]. The usual
//! source is a `netxrc.json` file:
//!
//! ```json
//! {
//!     "associations": {
//!         "site1.com": "10.20.30.40",
//!         "site2.com": { "ip": ["10.0.0.2", "2001:db8::2"], "pin": "AB12CD34" }
//!     },
//!     "strict": false
//! }
//! ```

mod addressbook;
mod hostspec;

pub use addressbook::{AddressBook, HostRecord};
pub use hostspec::{HostSpec, IpSpec, OneOrMany};

use crate::base::{context::IoResultExt, neterror::NetError};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};

/// File name looked up by [`OverrideConfig::load_default`].
pub const DEFAULT_CONFIG_FILE: &str = "netxrc.json";

/// Deserialized override configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OverrideConfig {
    /// Host associations in any of the accepted shapes.
    #[serde(default)]
    pub associations: HashMap<String, HostSpec>,

    /// Reject unrecognized association shapes instead of ignoring them.
    #[serde(default)]
    pub strict: bool,
}

impl OverrideConfig {
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).config_context(path)?;
        tracing::debug!(path = %path.display(), "loaded override configuration");
        Self::from_json(&json)
    }

    /// Read `netxrc.json` from the current directory.
    pub fn load_default() -> Result<Self, NetError> {
        let cwd = std::env::current_dir().config_context(Path::new("."))?;
        Self::load(cwd.join(DEFAULT_CONFIG_FILE))
    }

    /// Use the strict policy regardless of the file setting.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Normalize associations with the configured policy.
    pub fn into_address_book(self) -> Result<AddressBook, NetError> {
        if self.strict {
            AddressBook::from_specs_strict(self.associations)
        } else {
            Ok(AddressBook::from_specs(self.associations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = OverrideConfig::from_json("{}").unwrap();
        assert!(config.associations.is_empty());
        assert!(!config.strict);
    }

    #[test]
    fn test_into_address_book_permissive() {
        let config = OverrideConfig::from_json(
            r#"{"associations": {"site1.com": "10.20.30.40", "bad.com": 1}}"#,
        )
        .unwrap();
        let book = config.into_address_book().unwrap();
        assert_eq!(book.len(), 2);
        assert!(!book.get("bad.com").unwrap().has_addresses());
    }

    #[test]
    fn test_into_address_book_strict() {
        let config = OverrideConfig::from_json(
            r#"{"associations": {"bad.com": null}, "strict": true}"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_address_book(),
            Err(NetError::UnrecognizedHostSpec { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = OverrideConfig::load("/nonexistent/netxrc.json").unwrap_err();
        assert!(matches!(err, NetError::ConfigRead { .. }));
    }
}
