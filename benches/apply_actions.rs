use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mtg_duel::card::registry::demo_set;
use mtg_duel::card::types::{CardDefinition, PlayerId};
use mtg_duel::game::actions::Action;
use mtg_duel::game::state::Game;
use std::sync::Arc;

fn forest_deck(size: usize) -> Vec<Arc<CardDefinition>> {
    let set = demo_set();
    let forest = set.get_by_name("Forest").expect("demo set has Forest");
    (0..size).map(|_| Arc::clone(&forest)).collect()
}

/// Alternate END_TURN actions so the engine walks every step of `turns`
/// full turns, including untap, draw, combat, and cleanup handling.
fn play_turns(turns: u32) {
    let mut game = Game::new(forest_deck(60), forest_deck(60), Some(12345));
    for turn in 0..turns {
        let player = PlayerId((turn % 2) as u8);
        game.apply(&Action::EndTurn { player })
            .expect("end turn is always legal");
        if game.is_finished() {
            break;
        }
    }
}

fn benchmark_full_turns(c: &mut Criterion) {
    c.bench_function("20_full_turns", |b| {
        b.iter(|| play_turns(black_box(20)))
    });
}

fn benchmark_cast_and_resolve(c: &mut Criterion) {
    let set = demo_set();
    let jolt = set.get_by_name("Lightning Jolt").expect("demo set has jolt");

    c.bench_function("cast_and_resolve_jolt", |b| {
        b.iter(|| {
            let mut game = Game::new(forest_deck(30), forest_deck(30), Some(7));
            game.turn.step = mtg_duel::game::turns::Step::FirstMain;
            let card = game.new_instance_id();
            game.players[0].hand.add(mtg_duel::card::types::CardInstance::new(
                card,
                PlayerId(0),
                Arc::clone(&jolt),
            ));
            game.players[0]
                .mana
                .add(mtg_duel::card::types::ManaColor::Red, 1)
                .unwrap();
            game.apply(&Action::CastSpell {
                player: PlayerId(0),
                card,
                targets: vec![mtg_duel::card::effects::TargetRef::Player {
                    player: PlayerId(1),
                }],
            })
            .unwrap();
            game.apply(&Action::PassPriority { player: PlayerId(1) }).unwrap();
            game.apply(&Action::PassPriority { player: PlayerId(0) }).unwrap();
            black_box(game.players[1].life)
        })
    });
}

fn benchmark_export(c: &mut Criterion) {
    let game = Game::new(forest_deck(60), forest_deck(60), Some(99));
    c.bench_function("export_to_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&game.export())).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_full_turns,
    benchmark_cast_and_resolve,
    benchmark_export
);
criterion_main!(benches);
