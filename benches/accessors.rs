//! Benchmarks for compiled member access.
//!
//! Measures the hot paths the accessor cache exists for:
//! - cached property reads and writes against direct field access
//! - first-use compilation cost (cold cache)
//! - dynamic-object gets resolved from the bag and from the backing instance

extern crate protean;

use std::sync::{Arc, OnceLock};

use criterion::{criterion_group, criterion_main, Criterion};
use protean::impl_reflect;
use protean::prelude::*;
use std::hint::black_box;

#[derive(Debug, Default, Clone, PartialEq)]
struct Sku {
    code: String,
    price: f64,
    stock: i32,
}

impl ReflectClass for Sku {
    const NAME: &'static str = "Sku";

    fn class_of() -> &'static ClassSchema {
        static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ClassSchema::builder::<Sku>(Self::NAME)
                .with_default()
                .property_rw("Code", |s: &Sku| s.code.clone(), |s, v| s.code = v)
                .property_rw("Price", |s: &Sku| s.price, |s, v| s.price = v)
                .property_rw("Stock", |s: &Sku| s.stock, |s, v| s.stock = v)
                .build()
        })
    }
}

impl_reflect!(Sku);

fn sample() -> Sku {
    Sku {
        code: "SKU-1".into(),
        price: 19.9,
        stock: 5,
    }
}

/// Baseline: a direct field read, what the compiled accessor competes against.
fn bench_direct_field_read(c: &mut Criterion) {
    let sku = sample();
    c.bench_function("direct_field_read", |b| {
        b.iter(|| black_box(black_box(&sku).price));
    });
}

/// A property read through an already-cached accessor.
fn bench_cached_getter(c: &mut Criterion) {
    let cache = AccessorCache::new();
    let sku = sample();
    let getter = cache.getter(Sku::class_of(), "Price").unwrap();

    c.bench_function("cached_getter", |b| {
        b.iter(|| black_box(getter.get(black_box(&sku)).unwrap()));
    });
}

/// The full cache round trip: key lookup plus the accessor call.
fn bench_cache_lookup_and_get(c: &mut Criterion) {
    let cache = AccessorCache::new();
    let sku = sample();
    cache.getter(Sku::class_of(), "Price").unwrap();

    c.bench_function("cache_lookup_and_get", |b| {
        b.iter(|| {
            let getter = cache.getter(Sku::class_of(), black_box("Price")).unwrap();
            black_box(getter.get(&sku).unwrap())
        });
    });
}

/// First-use cost: a fresh cache per iteration pays the schema scan.
fn bench_cold_compilation(c: &mut Criterion) {
    c.bench_function("cold_compilation", |b| {
        b.iter(|| {
            let cache = AccessorCache::new();
            black_box(cache.getter(Sku::class_of(), "Price").unwrap())
        });
    });
}

/// A cached property write.
fn bench_cached_setter(c: &mut Criterion) {
    let cache = AccessorCache::new();
    let mut sku = sample();
    let setter = cache.setter(Sku::class_of(), "Stock").unwrap();

    c.bench_function("cached_setter", |b| {
        b.iter(|| setter.set(&mut sku, Value::I32(black_box(7))).unwrap());
    });
}

/// Dynamic-object reads: one answered by the bag, one by the instance.
fn bench_expando_get(c: &mut Criterion) {
    let cache = Arc::new(AccessorCache::new());
    let mut expando = HybridExpando::wrap(cache, Box::new(sample()));
    expando.bag_set("Discount", Value::F64(0.1));
    expando.get("Price").unwrap();

    c.bench_function("expando_get_bag", |b| {
        b.iter(|| black_box(expando.get(black_box("Discount")).unwrap()));
    });
    c.bench_function("expando_get_instance", |b| {
        b.iter(|| black_box(expando.get(black_box("Price")).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_direct_field_read,
    bench_cached_getter,
    bench_cache_lookup_and_get,
    bench_cold_compilation,
    bench_cached_setter,
    bench_expando_get,
);
criterion_main!(benches);
