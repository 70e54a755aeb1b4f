use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vespene::core::{standard_catalog, EconomyState, Resources, Roster};

fn midgame_state() -> EconomyState {
    let catalog = standard_catalog();
    let mut items = vec!["TERRAN_SCV"; 30];
    items.extend([
        "TERRAN_COMMANDCENTER",
        "TERRAN_COMMANDCENTER",
        "TERRAN_SUPPLYDEPOT",
        "TERRAN_BARRACKS",
        "TERRAN_BARRACKSTECHLAB",
        "TERRAN_FACTORY",
        "TERRAN_STARPORT",
        "TERRAN_ENGINEERINGBAY",
        "TERRAN_REFINERY",
    ]);

    EconomyState::new(
        "self",
        Resources::new(800.0, 400.0, 40, 70),
        Roster::from_items(items, 0),
        1,
        catalog,
    )
}

fn catalog_benchmark(c: &mut Criterion) {
    let catalog = standard_catalog();
    let state = midgame_state();

    c.bench_function("legal actions", |b| {
        b.iter(|| catalog.legal_actions(black_box(&state)))
    });

    c.bench_function("apply action", |b| {
        b.iter(|| catalog.apply_action(black_box(&state), "TRAIN_MARINE", 1))
    });
}

criterion_group!(benches, catalog_benchmark);
criterion_main!(benches);
