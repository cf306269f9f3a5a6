//! Address families and lookup options.
//!
//! A lookup request may arrive as nothing at all, as a bare family number,
//! or as a partial options object. All three normalize to [`LookupOptions`].

use crate::base::neterror::NetError;
use serde::Deserialize;
use std::fmt;

/// Version of a concrete IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Numeric family as used by system resolvers (4 or 6).
    pub fn as_u8(self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }

    /// Guess the version of an address literal.
    ///
    /// A `.` means IPv4 and is checked first, so `::ffff:1.2.3.4` is IPv4.
    /// The literal itself is not validated.
    pub fn classify(address: &str) -> Option<Self> {
        if address.contains('.') {
            Some(IpVersion::V4)
        } else if address.contains(':') {
            Some(IpVersion::V6)
        } else {
            None
        }
    }
}

/// Requested address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum Family {
    /// Either family (`0`).
    #[default]
    Any,
    /// IPv4 only (`4`).
    V4,
    /// IPv6 only (`6`).
    V6,
}

impl Family {
    pub fn as_u8(self) -> u8 {
        match self {
            Family::Any => 0,
            Family::V4 => 4,
            Family::V6 => 6,
        }
    }

    /// Whether an address of `version` satisfies this preference.
    pub fn accepts(self, version: IpVersion) -> bool {
        match self {
            Family::Any => true,
            Family::V4 => version == IpVersion::V4,
            Family::V6 => version == IpVersion::V6,
        }
    }
}

impl TryFrom<u8> for Family {
    type Error = NetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Family::Any),
            4 => Ok(Family::V4),
            6 => Ok(Family::V6),
            other => Err(NetError::InvalidFamily(other)),
        }
    }
}

impl From<IpVersion> for Family {
    fn from(version: IpVersion) -> Self {
        match version {
            IpVersion::V4 => Family::V4,
            IpVersion::V6 => Family::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Normalized lookup options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Requested family.
    pub family: Family,
    /// Return every address instead of the first one.
    pub all: bool,
    /// Keep the resolver's native ordering. Only the fallback resolver
    /// looks at this.
    pub verbatim: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            family: Family::Any,
            all: false,
            verbatim: true,
        }
    }
}

impl LookupOptions {
    pub fn family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn verbatim(mut self, verbatim: bool) -> Self {
        self.verbatim = verbatim;
        self
    }

    /// Normalize an optional raw request shape.
    pub fn from_hints(hints: Option<LookupHints>) -> Result<Self, NetError> {
        match hints {
            None => Ok(Self::default()),
            Some(hints) => Self::try_from(hints),
        }
    }
}

impl From<Family> for LookupOptions {
    fn from(family: Family) -> Self {
        Self::default().family(family)
    }
}

impl TryFrom<u8> for LookupOptions {
    type Error = NetError;

    fn try_from(family: u8) -> Result<Self, Self::Error> {
        Family::try_from(family).map(Self::from)
    }
}

/// Options object where every field is optional.
///
/// Missing fields take their value from [`LookupOptions::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct PartialLookupOptions {
    pub family: Option<Family>,
    pub all: Option<bool>,
    pub verbatim: Option<bool>,
}

impl From<PartialLookupOptions> for LookupOptions {
    fn from(partial: PartialLookupOptions) -> Self {
        let defaults = LookupOptions::default();
        Self {
            family: partial.family.unwrap_or(defaults.family),
            all: partial.all.unwrap_or(defaults.all),
            verbatim: partial.verbatim.unwrap_or(defaults.verbatim),
        }
    }
}

/// Raw lookup request options: a family number or a partial object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LookupHints {
    Family(u8),
    Options(PartialLookupOptions),
}

impl TryFrom<LookupHints> for LookupOptions {
    type Error = NetError;

    fn try_from(hints: LookupHints) -> Result<Self, Self::Error> {
        match hints {
            LookupHints::Family(family) => Self::try_from(family),
            LookupHints::Options(partial) => Ok(Self::from(partial)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_dot() {
        assert_eq!(IpVersion::classify("10.20.30.40"), Some(IpVersion::V4));
        assert_eq!(IpVersion::classify("2001:0db8"), Some(IpVersion::V6));
        assert_eq!(IpVersion::classify("::ffff:1.2.3.4"), Some(IpVersion::V4));
        assert_eq!(IpVersion::classify("localhost"), None);
    }

    #[test]
    fn test_family_from_number() {
        assert_eq!(Family::try_from(0).unwrap(), Family::Any);
        assert_eq!(Family::try_from(4).unwrap(), Family::V4);
        assert_eq!(Family::try_from(6).unwrap(), Family::V6);
        assert!(matches!(
            Family::try_from(5),
            Err(NetError::InvalidFamily(5))
        ));
    }

    #[test]
    fn test_family_accepts() {
        assert!(Family::Any.accepts(IpVersion::V4));
        assert!(Family::Any.accepts(IpVersion::V6));
        assert!(Family::V4.accepts(IpVersion::V4));
        assert!(!Family::V4.accepts(IpVersion::V6));
        assert!(!Family::V6.accepts(IpVersion::V4));
    }

    #[test]
    fn test_defaults() {
        let options = LookupOptions::default();
        assert_eq!(options.family, Family::Any);
        assert!(!options.all);
        assert!(options.verbatim);
    }

    #[test]
    fn test_integer_shorthand() {
        let options = LookupOptions::try_from(6).unwrap();
        assert_eq!(options, LookupOptions::default().family(Family::V6));
    }

    #[test]
    fn test_partial_object_merges_over_defaults() {
        let hints: LookupHints = serde_json::from_str(r#"{"all": true}"#).unwrap();
        let options = LookupOptions::from_hints(Some(hints)).unwrap();
        assert_eq!(options.family, Family::Any);
        assert!(options.all);
        assert!(options.verbatim);

        let hints: LookupHints = serde_json::from_str(r#"{"family": 4, "verbatim": false}"#).unwrap();
        let options = LookupOptions::from_hints(Some(hints)).unwrap();
        assert_eq!(options.family, Family::V4);
        assert!(!options.all);
        assert!(!options.verbatim);
    }

    #[test]
    fn test_hints_number_and_absence() {
        let hints: LookupHints = serde_json::from_str("4").unwrap();
        assert_eq!(
            LookupOptions::from_hints(Some(hints)).unwrap().family,
            Family::V4
        );
        assert_eq!(
            LookupOptions::from_hints(None).unwrap(),
            LookupOptions::default()
        );
    }

    #[test]
    fn test_invalid_family_rejected() {
        assert!(matches!(
            LookupOptions::from_hints(Some(LookupHints::Family(9))),
            Err(NetError::InvalidFamily(9))
        ));
        assert!(serde_json::from_str::<PartialLookupOptions>(r#"{"family": 5}"#).is_err());
    }
}
