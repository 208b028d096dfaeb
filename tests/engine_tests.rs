//! Game engine behaviour tests

use std::time::Duration;

use blocktris::core::{
    Cursor, EngineConfig, EngineError, GameEngine, GameEvent, Phase, ScriptedShapes,
};
use blocktris::types::{Command, MoveDirection, RotationDirection, Shape};

fn scripted(shapes: Vec<Shape>) -> GameEngine<ScriptedShapes> {
    GameEngine::with_source(EngineConfig::default(), ScriptedShapes::new(shapes)).unwrap()
}

fn fill_row_except(engine: &mut GameEngine<ScriptedShapes>, row: i32, holes: &[i32]) {
    let width = engine.playfield().width() as i32;
    for col in 1..width - 1 {
        if !holes.contains(&col) {
            engine.playfield_mut().set(row, col, Shape::Z.value());
        }
    }
}

#[test]
fn test_construction_rejects_tiny_field() {
    let config = EngineConfig {
        height: 4,
        ..EngineConfig::default()
    };
    assert!(matches!(
        GameEngine::new(config),
        Err(EngineError::FieldTooSmall { height: 4, .. })
    ));
}

#[test]
fn test_same_seed_same_sequence() {
    let config = EngineConfig {
        seed: Some(777),
        ..EngineConfig::default()
    };
    let mut a = GameEngine::new(config.clone()).unwrap();
    let mut b = GameEngine::new(config).unwrap();
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.current(), b.current());
        assert_eq!(a.next_piece(), b.next_piece());
        a.hard_drop();
        b.hard_drop();
    }
}

#[test]
fn test_spawn_column_follows_width() {
    let config = EngineConfig {
        width: 16,
        ..EngineConfig::default()
    };
    let mut engine =
        GameEngine::with_source(config, ScriptedShapes::repeat(Shape::T)).unwrap();
    engine.start();
    assert_eq!(engine.cursor(), Cursor::new(-1, 6));
}

#[test]
fn test_line_clear_rows_five_and_seven_at_level_two() {
    let config = EngineConfig {
        start_level: 2,
        ..EngineConfig::default()
    };
    let mut engine =
        GameEngine::with_source(config, ScriptedShapes::repeat(Shape::I)).unwrap();
    for row in 8..22 {
        fill_row_except(&mut engine, row, &[1]);
    }
    fill_row_except(&mut engine, 5, &[5]);
    fill_row_except(&mut engine, 7, &[5]);
    engine.playfield_mut().set(2, 10, Shape::S.value());

    engine.start();
    engine.apply(Command::GravityTick);
    engine.apply(Command::GravityTick);
    assert!(engine.apply(Command::Rotate(RotationDirection::Clockwise)));
    engine.drain_events();
    assert!(engine.apply(Command::HardDrop));

    assert_eq!(engine.score(), 100 * 3);
    assert_eq!(engine.lines(), 2);

    let field = engine.playfield();
    // Content above the cleared rows moved down by two
    assert_eq!(field.get(4, 10), Some(Shape::S.value()));
    assert_eq!(field.get(2, 10), Some(0));
    for col in 1..11 {
        assert_eq!(field.get(0, col), Some(0));
        assert_eq!(field.get(1, col), Some(0));
    }
    assert_eq!(field.get(5, 0), Some(-1));
    assert_eq!(field.get(22, 5), Some(-2));

    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::LinesCleared(vec![7, 5])));
    assert!(events.contains(&GameEvent::LinesUpdated(2)));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelUpdated(_))));
}

#[test]
fn test_tenth_line_raises_level_and_speeds_up() {
    let mut engine = scripted(vec![Shape::I]);
    engine.start();
    let initial = engine.gravity_interval();
    engine.drain_events();

    // Horizontal I spawns over columns 4-7
    for cleared in 1..=10u32 {
        fill_row_except(&mut engine, 21, &[4, 5, 6, 7]);
        engine.hard_drop();
        assert_eq!(engine.lines(), cleared);
        if cleared == 9 {
            assert_eq!(engine.level(), 0);
            engine.drain_events();
        }
    }

    assert_eq!(engine.level(), 1);
    assert_eq!(engine.score(), 40 * 10);
    assert!(engine.gravity_interval() < initial);

    let names: Vec<&str> = engine.drain_events().iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "pieceLocked",
            "fieldUpdated",
            "linesCleared",
            "scoreUpdated",
            "linesUpdated",
            "levelUpdated",
            "gravityIntervalChanged",
            "fieldUpdated",
            "nextPieceUpdated",
        ]
    );
}

#[test]
fn test_level_change_reports_new_interval() {
    let mut engine = scripted(vec![Shape::I]);
    engine.start();
    for _ in 0..10 {
        fill_row_except(&mut engine, 21, &[4, 5, 6, 7]);
        engine.hard_drop();
    }
    let interval = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::GravityIntervalChanged(d) => Some(d),
            _ => None,
        })
        .last();
    assert_eq!(interval, Some(engine.gravity_interval()));
    assert!(interval.unwrap() < Duration::from_millis(830));
}

#[test]
fn test_hard_drop_matches_linear_descent() {
    for seed in [1u32, 9, 42, 1000, 65_535] {
        let config = EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::new(config).unwrap();
        engine.start();
        engine.move_piece(MoveDirection::Left);
        engine.rotate(RotationDirection::Clockwise);

        let piece = engine.current().unwrap();
        let mut expected = engine.cursor();
        while engine
            .playfield()
            .is_possible(expected.offset(1, 0), &piece)
        {
            expected = expected.offset(1, 0);
        }
        assert_eq!(engine.landing_row(), Some(expected.row));

        let mut reference = engine.playfield().clone();
        reference.merge(&piece, expected);

        engine.hard_drop();
        assert_eq!(engine.playfield(), &reference, "seed {}", seed);
    }
}

#[test]
fn test_prefilled_spawn_area_is_immediate_game_over() {
    let mut engine = scripted(vec![Shape::T]);
    engine.playfield_mut().set(0, 5, Shape::O.value());
    engine.start();

    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(engine.snapshot().game_over);
    assert!(engine.snapshot().active.is_none());
}

#[test]
fn test_stacking_until_game_over() {
    let mut engine = scripted(vec![Shape::O]);
    engine.start();

    // Each O adds two rows in columns 5-6; the interior is 22 rows tall
    for _ in 0..10 {
        assert!(engine.hard_drop());
        assert!(!engine.game_over());
    }
    assert!(engine.hard_drop());
    assert!(engine.game_over());
    assert_eq!(engine.drain_events().last(), Some(&GameEvent::GameOver));

    let score = engine.score();
    for command in [
        Command::GravityTick,
        Command::HardDrop,
        Command::Move(MoveDirection::Down),
        Command::Rotate(RotationDirection::Clockwise),
        Command::TogglePause,
    ] {
        assert!(!engine.apply(command));
    }
    assert_eq!(engine.score(), score);
    assert_eq!(engine.pending_events(), 0);
}

#[test]
fn test_paused_engine_ignores_gravity_and_moves() {
    let mut engine = scripted(vec![Shape::L]);
    engine.start();
    engine.apply(Command::TogglePause);
    let before = engine.snapshot();
    engine.drain_events();

    for command in [
        Command::GravityTick,
        Command::Move(MoveDirection::Left),
        Command::Move(MoveDirection::Down),
        Command::Rotate(RotationDirection::CounterClockwise),
        Command::HardDrop,
    ] {
        assert!(!engine.apply(command));
    }
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.pending_events(), 0);

    assert!(engine.apply(Command::TogglePause));
    assert_eq!(engine.drain_events(), vec![GameEvent::PauseToggled(false)]);
}

#[test]
fn test_rotation_blocked_by_neighbour_is_rejected() {
    let mut engine = scripted(vec![Shape::T]);
    engine.start();
    engine.apply(Command::GravityTick);
    // T1 needs the cell above the centre: cursor (0, 4) -> field (0, 5)
    engine.playfield_mut().set(0, 5, Shape::J.value());

    let before = engine.current().unwrap();
    assert!(!engine.apply(Command::Rotate(RotationDirection::Clockwise)));
    assert_eq!(engine.current().unwrap(), before);
    assert_eq!(engine.current().unwrap().pattern(), before.pattern());
}

#[test]
fn test_events_reach_any_sink() {
    let mut engine = scripted(vec![Shape::S]);
    engine.start();

    let mut seen: Vec<GameEvent> = Vec::new();
    engine.flush_events(&mut seen);
    assert!(seen.contains(&GameEvent::ScoreUpdated(0)));
    assert_eq!(engine.pending_events(), 0);

    let mut locks = 0;
    engine.hard_drop();
    engine.flush_events(&mut |event: GameEvent| {
        if event == GameEvent::PieceLocked {
            locks += 1;
        }
    });
    assert_eq!(locks, 1);
}

#[test]
fn test_field_event_carries_overlaid_piece() {
    let mut engine = scripted(vec![Shape::O]);
    engine.start();
    engine.drain_events();
    engine.apply(Command::GravityTick);

    let events = engine.drain_events();
    let Some(GameEvent::FieldUpdated(field)) = events.first() else {
        panic!("expected field update, got {:?}", events);
    };
    // O at cursor (0, 4) covers rows 1-2, columns 5-6
    assert_eq!(field.get(1, 5), Some(Shape::O.value()));
    assert_eq!(field.get(2, 6), Some(Shape::O.value()));
    assert_eq!(field.filled_count(), 4);
    assert_eq!(engine.playfield().snapshot().filled_count(), 0);
}
