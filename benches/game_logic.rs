use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blocktris::core::{Cursor, EngineConfig, GameEngine, Piece, Playfield};
use blocktris::term::{GameView, Hud, Viewport};
use blocktris::types::{Command, MoveDirection, RotationDirection, Shape};

fn started_engine() -> GameEngine {
    let config = EngineConfig {
        seed: Some(12345),
        ..EngineConfig::default()
    };
    let mut engine = GameEngine::new(config).expect("reference field");
    engine.start();
    engine
}

fn bench_gravity_tick(c: &mut Criterion) {
    c.bench_function("gravity_tick", |b| {
        let mut engine = started_engine();
        b.iter(|| {
            if engine.game_over() {
                engine.restart();
            }
            engine.apply(black_box(Command::GravityTick));
            engine.drain_events();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Playfield::new(23, 12).expect("reference field");
            for row in 18..22 {
                for col in 1..11 {
                    field.set(row, col, Shape::I.value());
                }
            }
            let rows = field.complete_rows();
            field.remove_rows(black_box(&rows));
        })
    });
}

fn bench_is_possible(c: &mut Criterion) {
    let field = Playfield::new(23, 12).expect("reference field");
    let piece = Piece::new(Shape::T);
    c.bench_function("is_possible", |b| {
        b.iter(|| field.is_possible(black_box(Cursor::new(10, 4)), &piece))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    c.bench_function("move_and_rotate", |b| {
        let mut engine = started_engine();
        b.iter(|| {
            engine.apply(Command::Move(MoveDirection::Left));
            engine.apply(Command::Rotate(RotationDirection::Clockwise));
            engine.apply(Command::Move(MoveDirection::Right));
            engine.drain_events();
        })
    });
}

fn bench_hard_drop_session(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut engine = started_engine();
            while !engine.game_over() {
                engine.apply(Command::HardDrop);
            }
            engine.drain_events().len()
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let engine = started_engine();
    let snap = engine.snapshot();
    let view = GameView::default();
    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render(black_box(&snap), &Hud::default(), Viewport::new(80, 24)))
    });
}

criterion_group!(
    benches,
    bench_gravity_tick,
    bench_line_clear,
    bench_is_possible,
    bench_move_and_rotate,
    bench_hard_drop_session,
    bench_render
);
criterion_main!(benches);
