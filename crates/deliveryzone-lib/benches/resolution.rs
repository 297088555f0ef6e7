use criterion::{criterion_group, criterion_main, Criterion};
use deliveryzone_lib::{distance_km, DeliverySettings, DeliveryZoneResolver, GeoPoint};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/turin_delivery_settings.json")
}

static RESOLVER: Lazy<DeliveryZoneResolver> = Lazy::new(|| {
    let settings = DeliverySettings::from_path(&fixture_path()).expect("fixture loads");
    DeliveryZoneResolver::from_settings(&settings).expect("fixture resolver")
});
static RESTAURANT: Lazy<GeoPoint> =
    Lazy::new(|| GeoPoint::new(45.0703, 7.6869).expect("valid restaurant"));
static CUSTOMERS: Lazy<Vec<GeoPoint>> = Lazy::new(|| {
    (0..1_000)
        .map(|i| {
            let offset = i as f64 * 0.0002;
            GeoPoint::new(45.0703 + offset, 7.6869 - offset).expect("valid customer")
        })
        .collect()
});

fn benchmark_resolution(c: &mut Criterion) {
    let resolver = &*RESOLVER;
    let customers = &*CUSTOMERS;

    c.bench_function("haversine_turin_milan", |b| {
        let milan = GeoPoint::new(45.4642, 9.19).expect("valid point");
        b.iter(|| black_box(distance_km(&RESTAURANT, &milan)));
    });

    c.bench_function("resolve_single_periferia", |b| {
        let customer = GeoPoint::new(45.1360, 7.6869).expect("valid customer");
        b.iter(|| {
            let result = resolver.resolve(&customer).expect("valid input");
            black_box(result.is_matched())
        });
    });

    c.bench_function("resolve_batch_1000", |b| {
        b.iter(|| {
            let matched = resolver
                .resolve_many(customers)
                .into_iter()
                .filter(|result| result.as_ref().is_ok_and(|r| r.is_matched()))
                .count();
            black_box(matched)
        });
    });
}

criterion_group!(benches, benchmark_resolution);
criterion_main!(benches);
