//! Integration tests for the host session: engine plus clocks

use std::time::{Duration, Instant};

use blocktris::core::{EngineConfig, GameEngine, GameEvent, ScriptedShapes};
use blocktris::driver::Session;
use blocktris::types::{Command, MoveDirection, Shape};

fn session_with(shapes: Vec<Shape>) -> Session<ScriptedShapes> {
    let engine =
        GameEngine::with_source(EngineConfig::default(), ScriptedShapes::new(shapes)).unwrap();
    Session::with_engine(engine)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_session_lifecycle() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::T]);
    assert!(!session.engine().started());

    let events = session.start(t0);
    assert!(session.engine().started());
    assert!(session.gravity().running());
    assert!(session.timer().running());
    assert!(events.contains(&GameEvent::LevelUpdated(0)));
}

#[test]
fn test_gravity_follows_engine_interval() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::T]);
    session.start(t0);

    let interval = session.engine().gravity_interval();
    assert_eq!(session.gravity().interval(), interval);

    let row = session.engine().cursor().row;
    session.update(t0 + interval - ms(1));
    assert_eq!(session.engine().cursor().row, row);

    session.update(t0 + interval);
    assert_eq!(session.engine().cursor().row, row + 1);
}

#[test]
fn test_clock_reprogrammed_on_level_up() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::I]);
    session.start(t0);
    let slow = session.gravity().interval();

    // Ten single clears with a horizontal I over columns 4-7
    let mut now = t0;
    for _ in 0..10 {
        now += ms(10);
        fill_bottom_row(&mut session);
        session.command(Command::HardDrop, now);
    }

    assert_eq!(session.engine().level(), 1);
    let fast = session.gravity().interval();
    assert!(fast < slow);
    assert_eq!(fast, session.engine().gravity_interval());
    assert_eq!(session.next_deadline(now), Some(fast));
}

fn fill_bottom_row(session: &mut Session<ScriptedShapes>) {
    let field = session.engine_mut().playfield_mut();
    for col in [1, 2, 3, 8, 9, 10] {
        field.set(21, col, Shape::Z.value());
    }
}

#[test]
fn test_pause_stops_clocks() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::O]);
    session.start(t0);

    let events = session.command(Command::TogglePause, t0 + ms(2_000));
    assert_eq!(events, vec![GameEvent::PauseToggled(true)]);
    assert!(!session.gravity().running());
    assert_eq!(session.next_deadline(t0 + ms(2_000)), None);

    let row = session.engine().cursor().row;
    session.update(t0 + ms(60_000));
    assert_eq!(session.engine().cursor().row, row);
    assert_eq!(session.play_time(t0 + ms(60_000)), ms(2_000));

    session.command(Command::TogglePause, t0 + ms(60_000));
    assert!(session.gravity().running());
    assert_eq!(session.play_time(t0 + ms(61_000)), ms(3_000));
}

#[test]
fn test_soft_drop_restarts_gravity_period() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::O]);
    session.start(t0);
    let interval = session.gravity().interval();

    let pressed = t0 + interval - ms(10);
    session.command(Command::Move(MoveDirection::Down), pressed);
    assert_eq!(session.next_deadline(pressed), Some(interval));
}

#[test]
fn test_game_over_stops_clocks() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::O]);
    session.start(t0);

    let mut now = t0;
    while !session.engine().game_over() {
        now += ms(100);
        session.command(Command::HardDrop, now);
    }
    assert!(!session.gravity().running());
    assert!(!session.timer().running());
    let played = session.play_time(now);
    assert_eq!(session.play_time(now + ms(5_000)), played);
}

#[test]
fn test_restart_resets_play_time() {
    let t0 = Instant::now();
    let mut session = session_with(vec![Shape::O]);
    session.start(t0);
    session.command(Command::HardDrop, t0 + ms(500));

    session.restart(t0 + ms(9_000));
    assert_eq!(session.engine().score(), 0);
    assert_eq!(session.play_time(t0 + ms(9_500)), ms(500));
    assert!(session.gravity().running());
}
