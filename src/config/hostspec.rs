//! Raw association shapes.
//!
//! Each configured host maps to one of four shapes:
//!
//! ```json
//! {
//!     "a.com": "10.20.30.40",
//!     "b.com": ["10.20.30.40", "AB12CD"],
//!     "c.com": { "ip": ["10.20.30.40", "2001:db8::1"], "pin": ["AB12CD", "EF34AB"] },
//!     "d.com": { "ip": { "v4": "10.20.30.40", "v6": ["2001:db8::1"] } }
//! }
//! ```
//!
//! Shapes are recognized in that order. Anything else is
//! [`HostSpec::Unrecognized`].

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One configured association, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSpec {
    /// `"10.20.30.40"`
    Address(String),
    /// `["10.20.30.40"]` or `["10.20.30.40", "PIN"]`
    ///
    /// The second element is a pin only when it is a non-empty string;
    /// `null` or any other value means no pin. Arrays longer than two
    /// elements are [`HostSpec::Unrecognized`] rather than truncated.
    Pair { address: String, pin: Option<String> },
    /// `{ "ip": ..., "pin": ... }`
    Object {
        ip: Option<IpSpec>,
        pin: Option<OneOrMany>,
        /// Keys that were present but not used: unknown names or values of
        /// the wrong type. Nested keys are dotted, e.g. `ip.v5`.
        ignored: Vec<String>,
    },
    Unrecognized,
}

/// Value of the `ip` field of the object shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpSpec {
    /// A single literal, family detected.
    One(String),
    /// A list of literals, each family detected.
    Many(Vec<String>),
    /// Explicit `v4` / `v6` buckets, copied verbatim.
    ByFamily {
        v4: Option<OneOrMany>,
        v6: Option<OneOrMany>,
    },
    /// Present but of no usable type.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl HostSpec {
    /// Classify an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(address) => HostSpec::Address(address),
            Value::Array(items) => pair_from_items(items).unwrap_or(HostSpec::Unrecognized),
            Value::Object(map) => object_from_map(map),
            _ => HostSpec::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, HostSpec::Unrecognized)
    }

    /// Keys of an object association that contributed nothing.
    pub fn ignored_fields(&self) -> &[String] {
        match self {
            HostSpec::Object { ignored, .. } => ignored,
            _ => &[],
        }
    }
}

fn pair_from_items(items: Vec<Value>) -> Option<HostSpec> {
    if items.len() > 2 {
        return None;
    }

    let mut items = items.into_iter();
    let address = match items.next()? {
        Value::String(address) => address,
        _ => return None,
    };
    let pin = match items.next() {
        Some(Value::String(pin)) if !pin.is_empty() => Some(pin),
        _ => None,
    };
    Some(HostSpec::Pair { address, pin })
}

fn object_from_map(map: Map<String, Value>) -> HostSpec {
    let mut ip = None;
    let mut pin = None;
    let mut ignored = Vec::new();

    for (key, value) in map {
        match key.as_str() {
            "ip" => ip = IpSpec::from_value(value, &mut ignored),
            "pin" if value.is_null() => {}
            "pin" => {
                pin = OneOrMany::from_value(value);
                if pin.is_none() {
                    ignored.push(key);
                }
            }
            _ => ignored.push(key),
        }
    }

    HostSpec::Object { ip, pin, ignored }
}

fn strings_from_items(items: Vec<Value>) -> Option<Vec<String>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

impl IpSpec {
    /// `null` counts as absent. Unusable parts are recorded in `ignored`.
    fn from_value(value: Value, ignored: &mut Vec<String>) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(address) => Some(IpSpec::One(address)),
            Value::Array(items) => Some(strings_from_items(items).map_or_else(
                || {
                    ignored.push("ip".to_owned());
                    IpSpec::Unrecognized
                },
                IpSpec::Many,
            )),
            Value::Object(map) => {
                let mut v4 = None;
                let mut v6 = None;
                for (key, value) in map {
                    let bucket = match key.as_str() {
                        "v4" => &mut v4,
                        "v6" => &mut v6,
                        _ => {
                            ignored.push(format!("ip.{key}"));
                            continue;
                        }
                    };
                    if value.is_null() {
                        continue;
                    }
                    *bucket = OneOrMany::from_value(value);
                    if bucket.is_none() {
                        ignored.push(format!("ip.{key}"));
                    }
                }
                Some(IpSpec::ByFamily { v4, v6 })
            }
            _ => {
                ignored.push("ip".to_owned());
                Some(IpSpec::Unrecognized)
            }
        }
    }
}

impl OneOrMany {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(OneOrMany::One(s)),
            Value::Array(items) => strings_from_items(items).map(OneOrMany::Many),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

impl<'de> Deserialize<'de> for HostSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(HostSpec::from_value)
    }
}

impl From<&str> for HostSpec {
    fn from(address: &str) -> Self {
        HostSpec::Address(address.to_owned())
    }
}
