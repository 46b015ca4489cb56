use criterion::{black_box, criterion_group, criterion_main, Criterion};
use product_bundle::e6;
use product_bundle::graded::GradedRing;
use product_bundle::repring::CharacterTable;

static TABLES: [(&str, &str); 3] = [
    ("c2", include_str!("../character_tables/c2-character-table")),
    ("s3", include_str!("../character_tables/s3-character-table")),
    ("s4", include_str!("../character_tables/s4-character-table")),
];

fn fusion_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion_table");
    for (name, text) in TABLES {
        group.bench_function(name, |b| {
            b.iter(|| black_box(text).parse::<CharacterTable>().unwrap())
        });
    }
    group.finish();
}

fn fiber_powers(c: &mut Criterion) {
    let table: CharacterTable = TABLES[2].1.parse().unwrap();
    let ring = GradedRing::new(&table);
    let fiber = e6::fiber(&table).unwrap();

    let mut group = c.benchmark_group("fiber_power_s4");
    for n in [2, 4, 8] {
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| ring.power(black_box(&fiber), n).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, fusion_tables, fiber_powers);
criterion_main!(benches);
