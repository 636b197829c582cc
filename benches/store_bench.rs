//! Benchmarks for recfile store operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use recfile::{Identity, Store};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Product {
    id: i64,
    name: String,
    price: f64,
}

impl Identity for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

fn seeded_store(count: i64) -> (TempDir, Store<Product>) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();
    for i in 0..count {
        store
            .add(&Product {
                id: i,
                name: format!("item{}", i),
                price: i as f64,
            })
            .unwrap();
    }
    (temp_dir, store)
}

fn store_benchmarks(c: &mut Criterion) {
    c.bench_function("add_single_record", |b| {
        let (_temp, store) = seeded_store(0);
        let mut next_id = 0i64;
        b.iter(|| {
            store
                .add(&Product {
                    id: next_id,
                    name: "bench".to_string(),
                    price: 1.0,
                })
                .unwrap();
            next_id += 1;
        });
    });

    c.bench_function("get_by_id_in_1k_records", |b| {
        let (_temp, store) = seeded_store(1_000);
        b.iter(|| store.get_by_id(500).unwrap());
    });

    c.bench_function("get_all_1k_records", |b| {
        let (_temp, store) = seeded_store(1_000);
        b.iter(|| store.get_all().unwrap());
    });

    c.bench_function("update_in_1k_records", |b| {
        b.iter_batched(
            || seeded_store(1_000),
            |(_temp, store)| {
                store
                    .update(
                        500,
                        &Product {
                            id: 500,
                            name: "updated".to_string(),
                            price: 2.0,
                        },
                    )
                    .unwrap();
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
