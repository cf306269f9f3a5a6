//! Certificate pinning performance benchmark.

use criterion::{criterion_group, criterion_main, Criterion};
use hostpin::config::{AddressBook, HostRecord};
use hostpin::tls::{NoopTrustVerifier, PeerCertificate, PinValidator};
use std::sync::Arc;

fn book() -> Arc<AddressBook> {
    // Add some pinned domains
    let records = (0..10).map(|i| {
        (
            format!("example{}.com", i),
            HostRecord {
                ipv4: vec![format!("10.0.0.{}", i)],
                ipv6: vec![],
                pins: vec![format!("{:02X}{:02X}{:02X}", i, i, i)],
            },
        )
    });
    Arc::new(AddressBook::from_records(records))
}

fn pinning_check(c: &mut Criterion) {
    let validator = PinValidator::new(book(), Arc::new(NoopTrustVerifier));

    let valid = PeerCertificate::new("05:05:05");
    let invalid = PeerCertificate::new("FF:FF:FF");

    c.bench_function("pinning_check_hit", |b| {
        b.iter(|| validator.check_pins("example5.com", &valid))
    });

    c.bench_function("pinning_check_mismatch", |b| {
        b.iter(|| validator.check_pins("example5.com", &invalid))
    });

    c.bench_function("pinning_check_unpinned", |b| {
        b.iter(|| validator.check_pins("unknown.com", &valid))
    });
}

criterion_group!(benches, pinning_check);
criterion_main!(benches);
