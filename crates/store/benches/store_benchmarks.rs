use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sandalia_clients::{ClientStore, NewClient};
use sandalia_core::{ClientId, SandalId};
use sandalia_sales::{NewLineItem, NewSale, SaleStore};
use sandalia_store::MemoryStore;

fn seeded_store() -> (MemoryStore, ClientId) {
    let store = MemoryStore::new();
    let client = ClientStore::create(
        &store,
        NewClient {
            name: "Bench Client".to_string(),
            phone: "+55 11 90000-0000".to_string(),
            address: "Rua A 1".to_string(),
        },
    )
    .unwrap();
    (store, client.id)
}

fn line_items(count: u64) -> Vec<NewLineItem> {
    (0..count)
        .map(|i| NewLineItem {
            sandal_id: SandalId::new(i + 1),
            quantity: 1,
        })
        .collect()
}

fn bench_single_row_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_row_writes");
    group.sample_size(1000);

    group.bench_function("client_create", |b| {
        let store = MemoryStore::new();
        b.iter(|| {
            ClientStore::create(
                &store,
                NewClient {
                    name: black_box("Bench Client".to_string()),
                    phone: "+55 11 90000-0000".to_string(),
                    address: "Rua A 1".to_string(),
                },
            )
            .unwrap()
        });
    });

    group.bench_function("sale_create_bare", |b| {
        let (store, client_id) = seeded_store();
        b.iter(|| {
            SaleStore::create(
                &store,
                NewSale {
                    client_id,
                    total_value: black_box(5000),
                },
                Vec::new(),
            )
            .unwrap()
        });
    });

    group.finish();
}

fn bench_sale_create_with_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("sale_create_with_items");

    for item_count in [1u64, 10, 100].iter() {
        group.throughput(Throughput::Elements(*item_count));
        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            item_count,
            |b, &count| {
                let (store, client_id) = seeded_store();
                b.iter(|| {
                    SaleStore::create(
                        &store,
                        NewSale {
                            client_id,
                            total_value: 5000,
                        },
                        black_box(line_items(count)),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_line_item_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_item_reads");

    for item_count in [10u64, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("line_items", item_count),
            item_count,
            |b, &count| {
                let (store, client_id) = seeded_store();
                let (sale, _) = SaleStore::create(
                    &store,
                    NewSale {
                        client_id,
                        total_value: 5000,
                    },
                    line_items(count),
                )
                .unwrap();

                b.iter(|| black_box(store.line_items(sale.id).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_row_writes,
    bench_sale_create_with_items,
    bench_line_item_reads
);
criterion_main!(benches);
