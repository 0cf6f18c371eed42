use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trio_stack::core::{find_hint, Deck, Player, Session, SimpleRng};
use trio_stack::types::{Difficulty, PlayArea};

fn bench_generate(c: &mut Criterion) {
    let config = Difficulty::Hell.level_config();
    let area = PlayArea::default();

    c.bench_function("generate_hell_deck", |b| {
        b.iter(|| {
            let mut rng = SimpleRng::new(black_box(12345));
            Deck::generate(&config, area, &mut rng)
        })
    });
}

fn bench_free_patterns(c: &mut Criterion) {
    let deck = Deck::generate(
        &Difficulty::Hell.level_config(),
        PlayArea::default(),
        &mut SimpleRng::new(12345),
    )
    .unwrap();

    c.bench_function("free_patterns", |b| {
        b.iter(|| black_box(&deck).free_patterns().count())
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let deck = Deck::generate(
        &Difficulty::Hell.level_config(),
        PlayArea::default(),
        &mut SimpleRng::new(12345),
    )
    .unwrap();
    let player = Player::new(7);

    c.bench_function("find_hint_empty_store", |b| {
        b.iter(|| find_hint(black_box(&deck), black_box(&player)))
    });
}

fn bench_click(c: &mut Criterion) {
    let mut session =
        Session::new(Difficulty::Hell.level_config(), PlayArea::default(), 12345).unwrap();
    let t0 = Instant::now();
    session.start(t0);
    let id = session.deck().free_patterns().next().unwrap();
    let point = session.patterns()[id.index()].position;

    // Click then roll back, so every iteration sees the same table.
    c.bench_function("click_and_restore", |b| {
        b.iter(|| {
            let outcome = session.handle_click(black_box(point), t0);
            session.restore();
            outcome
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_free_patterns,
    bench_find_hint,
    bench_click
);
criterion_main!(benches);
