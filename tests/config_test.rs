//! Configuration loading and normalization tests.

use hostpin::config::{AddressBook, HostRecord, OverrideConfig, DEFAULT_CONFIG_FILE};
use hostpin::dns::{Family, ResolvedAddress};
use hostpin::{HostOverrides, NetError};

use std::io::Write;

fn site1(json: &str) -> HostRecord {
    AddressBook::from_json(json)
        .unwrap()
        .get("site1.com")
        .cloned()
        .unwrap()
}

#[test]
fn test_every_shape_yields_same_record() {
    let expected = HostRecord {
        ipv4: vec!["10.20.30.40".into()],
        ipv6: vec![],
        pins: vec!["SECURITY_PIN".into()],
    };

    for json in [
        r#"{"site1.com": ["10.20.30.40", "SECURITY_PIN"]}"#,
        r#"{"site1.com": {"ip": "10.20.30.40", "pin": "SECURITY_PIN"}}"#,
        r#"{"site1.com": {"ip": ["10.20.30.40"], "pin": ["SECURITY_PIN"]}}"#,
        r#"{"site1.com": {"ip": {"v4": "10.20.30.40"}, "pin": "SECURITY_PIN"}}"#,
        r#"{"site1.com": {"ip": {"v4": ["10.20.30.40"]}, "pin": ["SECURITY_PIN"]}}"#,
    ] {
        assert_eq!(site1(json), expected, "shape {json}");
    }
}

#[test]
fn test_multi_address_configs() {
    let r = site1(r#"{"site1.com": {"ip": ["10.20.30.40", "20.30.40.50"], "pin": ["P1", "P2"]}}"#);
    assert_eq!(r.ipv4, vec!["10.20.30.40", "20.30.40.50"]);
    assert_eq!(r.pins, vec!["P1", "P2"]);

    let r = site1(r#"{"site1.com": {"ip": {"v6": ["2001:0db8", "0db8:2001"]}}}"#);
    assert!(r.ipv4.is_empty());
    assert_eq!(r.ipv6, vec!["2001:0db8", "0db8:2001"]);
}

#[test]
fn test_address_selection_across_shapes() {
    let book = AddressBook::from_json(
        r#"{
            "v4.com": {"ip": {"v4": "10.20.30.40"}},
            "v6.com": ["2001:0db8", "PIN"]
        }"#,
    )
    .unwrap();

    assert_eq!(
        book.get_address("v4.com", Family::V6),
        Some(ResolvedAddress::v6("::ffff:10.20.30.40"))
    );
    assert_eq!(book.get_address("v6.com", Family::V4), None);
    assert_eq!(
        book.get_all_addresses("v6.com"),
        Some(vec![ResolvedAddress::v6("2001:0db8")])
    );
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{"associations": {{"notexistdomain.com": {{"ip": ["140.82.114.4", "140.82.112.3"], "pin": []}}}}}}"#
    )
    .unwrap();

    let config = OverrideConfig::load(&path).unwrap();
    assert!(!config.strict);

    let overrides = HostOverrides::from_config(config).unwrap();
    let record = overrides.address_book().get("notexistdomain.com").unwrap();
    assert_eq!(record.ipv4, vec!["140.82.114.4", "140.82.112.3"]);
    assert!(!record.is_pinned());
}

#[test]
fn test_load_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    assert!(matches!(
        OverrideConfig::load(file.path()),
        Err(NetError::ConfigParse { .. })
    ));
}

#[test]
fn test_strict_policy_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"associations": {{"typo.com": {{"ip": "1.1.1.1"}}, "broken.com": 5}}, "strict": true}}"#
    )
    .unwrap();

    let config = OverrideConfig::load(file.path()).unwrap();
    match config.into_address_book() {
        Err(NetError::UnrecognizedHostSpec { host }) => assert_eq!(host, "broken.com"),
        other => panic!("Expected UnrecognizedHostSpec, got {:?}", other),
    }
}

#[test]
fn test_strict_policy_catches_field_typos() {
    let config = OverrideConfig::from_json(
        r#"{"associations": {"site1.com": {"ipp": "10.20.30.40"}}, "strict": true}"#,
    )
    .unwrap();

    match config.into_address_book() {
        Err(NetError::InvalidHostSpecField { host, field }) => {
            assert_eq!(host, "site1.com");
            assert_eq!(field, "ipp");
        }
        other => panic!("Expected InvalidHostSpecField, got {:?}", other),
    }

    // The same typo is only a warning under the permissive policy.
    let config = OverrideConfig::from_json(r#"{"associations": {"site1.com": {"ipp": "10.20.30.40"}}}"#)
        .unwrap();
    let book = config.into_address_book().unwrap();
    assert!(!book.get("site1.com").unwrap().has_addresses());
}

#[test]
fn test_pair_with_null_pin_from_file() {
    let book = AddressBook::from_json(r#"{"site1.com": ["10.20.30.40", null]}"#).unwrap();
    assert_eq!(
        book.get_address("site1.com", Family::V4),
        Some(ResolvedAddress::v4("10.20.30.40"))
    );
    assert!(book.pins("site1.com").is_empty());
}
