//! Certificate pinning integration tests.

use hostpin::config::AddressBook;
use hostpin::tls::{
    HostnameVerifier, NoopTrustVerifier, PeerCertificate, PinValidator, TrustVerifier,
    ValidateOptions, Verifying,
};
use hostpin::{HostOverrides, NetError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

/// Trust check that always fails and remembers being called.
#[derive(Default)]
struct FailingTrust {
    called: AtomicBool,
}

impl TrustVerifier for FailingTrust {
    fn verify<'a>(&'a self, host: &'a str, _cert: &'a PeerCertificate) -> Verifying<'a> {
        self.called.store(true, Ordering::SeqCst);
        let err = NetError::CertCommonNameInvalid {
            host: host.to_string(),
        };
        Box::pin(async move {
            tokio::task::yield_now().await;
            Err(err)
        })
    }
}

fn pinned(pins: &str) -> Arc<AddressBook> {
    let json = format!(r#"{{"site1.com": {{"ip": "10.20.30.40", "pin": {pins}}}}}"#);
    Arc::new(AddressBook::from_json(&json).unwrap())
}

#[tokio::test]
async fn test_unpinned_allows_any_fingerprint() {
    let validator = PinValidator::new(pinned("[]"), Arc::new(NoopTrustVerifier));

    for fp in ["AB:CD:EF", "11:22:33", ""] {
        assert!(validator
            .validate("site1.com", &PeerCertificate::new(fp), ValidateOptions::default())
            .await
            .is_ok());
    }
}

#[tokio::test]
async fn test_pin_match_allows_connection() {
    let validator = PinValidator::new(pinned(r#"["ABCDEF"]"#), Arc::new(NoopTrustVerifier));

    assert!(validator
        .validate("site1.com", &PeerCertificate::new("AB:CD:EF"), ValidateOptions::default())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_pin_mismatch_blocks_connection() {
    let validator = PinValidator::new(pinned(r#"["ABCDEF"]"#), Arc::new(NoopTrustVerifier));

    let err = validator
        .validate("site1.com", &PeerCertificate::new("11:22:33"), ValidateOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.as_i32(), -150);
    assert!(err.is_certificate_error());
    match err {
        NetError::CertPinMismatch(mismatch) => {
            assert_eq!(mismatch.code(), "UNTRUSTED_CERT_IN_CHAIN");
            assert_eq!(mismatch.fingerprint, "112233");
        }
        other => panic!("Expected CertPinMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_multiple_pins_any_match() {
    let validator = PinValidator::new(
        pinned(r#"["AAAA", "BBBB"]"#),
        Arc::new(NoopTrustVerifier),
    );

    assert!(validator.check_pins("site1.com", &PeerCertificate::new("AA:AA")).is_ok());
    assert!(validator.check_pins("site1.com", &PeerCertificate::new("BB:BB")).is_ok());
    assert!(validator.check_pins("site1.com", &PeerCertificate::new("CC:CC")).is_err());
}

#[tokio::test]
async fn test_trust_failure_precedes_pins() {
    let trust = Arc::new(FailingTrust::default());
    let validator = PinValidator::new(pinned(r#"["ABCDEF"]"#), trust.clone());

    let err = validator
        .validate("site1.com", &PeerCertificate::new("AB:CD:EF"), ValidateOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, NetError::CertCommonNameInvalid { .. }));
    assert!(trust.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_pinning_only_bypasses_trust() {
    let trust = Arc::new(FailingTrust::default());
    let validator = PinValidator::new(pinned(r#"["ABCDEF"]"#), trust.clone());

    assert!(validator
        .validate("site1.com", &PeerCertificate::new("AB:CD:EF"), ValidateOptions::pinning_only())
        .await
        .is_ok());
    assert!(!trust.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_hostname_verifier_with_pins() {
    let now = OffsetDateTime::now_utc();
    let overrides = HostOverrides::builder()
        .address_book(AddressBook::from_json(r#"{"site1.com": ["10.20.30.40", "ABCDEF"]}"#).unwrap())
        .trust_verifier(HostnameVerifier::new())
        .build();

    let good = PeerCertificate::new("AB:CD:EF")
        .subject_alt_name("site1.com")
        .valid_between(now - Duration::days(1), now + Duration::days(30));
    assert!(overrides
        .check_server_identity("site1.com", &good, ValidateOptions::default())
        .await
        .is_ok());

    let expired = good
        .clone()
        .valid_between(now - Duration::days(30), now - Duration::days(1));
    assert!(matches!(
        overrides
            .check_server_identity("site1.com", &expired, ValidateOptions::default())
            .await,
        Err(NetError::CertDateInvalid)
    ));

    // Pinning-only ignores the expiry but still enforces the pin.
    assert!(overrides
        .check_server_identity("site1.com", &expired, ValidateOptions::pinning_only())
        .await
        .is_ok());
    let wrong_pin = PeerCertificate::new("00:11").subject_alt_name("site1.com");
    assert!(overrides
        .check_server_identity("site1.com", &wrong_pin, ValidateOptions::pinning_only())
        .await
        .is_err());
}
