//! Driver module - the host-side clocks around an engine
//!
//! The engine has no notion of time. The host owns two clocks:
//!
//! - [`GravityClock`]: fires gravity ticks at the interval the engine last
//!   reported through `GravityIntervalChanged`
//! - [`PlayTimer`]: wall-clock play time that stops while paused
//!
//! [`Session`] wires both to a [`GameEngine`] by watching the events it
//! emits. All methods take the current [`Instant`] explicitly so the timing
//! logic is testable without sleeping.

use std::time::{Duration, Instant};

use log::debug;

use crate::core::{EngineConfig, EngineError, GameEngine, GameEvent, ShapeSource, UniformShapes};
use crate::types::{Command, MoveDirection};

/// Fixed-interval clock that can be reprogrammed and paused
#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    /// Next due instant; `None` while stopped
    due: Option<Instant>,
}

impl GravityClock {
    /// A stopped clock
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn running(&self) -> bool {
        self.due.is_some()
    }

    /// (Re)start counting a full interval from `now`
    pub fn start(&mut self, now: Instant) {
        self.due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.due = None;
    }

    /// Change the interval; a running clock restarts from `now`
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.running() {
            self.start(now);
        }
    }

    /// Whether a tick is due at `now`; advances to the next period if so.
    ///
    /// Missed periods are coalesced into one tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick; `None` while stopped
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

/// Play time that only advances while running
#[derive(Debug, Clone, Default)]
pub struct PlayTimer {
    accumulated: Duration,
    since: Option<Instant>,
}

impl PlayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.since.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.since.is_none() {
            self.since = Some(now);
        }
    }

    pub fn stop(&mut self, now: Instant) {
        if let Some(since) = self.since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.since = None;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }
}

/// An engine plus the clocks that drive it
pub struct Session<S: ShapeSource = UniformShapes> {
    engine: GameEngine<S>,
    gravity: GravityClock,
    timer: PlayTimer,
}

impl Session<UniformShapes> {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_engine(GameEngine::new(config)?))
    }
}

impl<S: ShapeSource> Session<S> {
    pub fn with_engine(engine: GameEngine<S>) -> Self {
        let interval = engine.gravity_interval();
        Self {
            engine,
            gravity: GravityClock::new(interval),
            timer: PlayTimer::new(),
        }
    }

    pub fn engine(&self) -> &GameEngine<S> {
        &self.engine
    }

    /// Direct engine access; events it queues are picked up on the next
    /// command or update
    pub fn engine_mut(&mut self) -> &mut GameEngine<S> {
        &mut self.engine
    }

    pub fn gravity(&self) -> &GravityClock {
        &self.gravity
    }

    pub fn timer(&self) -> &PlayTimer {
        &self.timer
    }

    /// Start the engine and both clocks
    pub fn start(&mut self, now: Instant) -> Vec<GameEvent> {
        self.timer.reset();
        self.engine.start();
        self.gravity.start(now);
        self.timer.start(now);
        self.sync(now)
    }

    /// Fresh session on the same engine
    pub fn restart(&mut self, now: Instant) -> Vec<GameEvent> {
        self.timer.reset();
        self.engine.restart();
        self.gravity.start(now);
        self.timer.start(now);
        self.sync(now)
    }

    /// Forward a command and react to the resulting events.
    ///
    /// Soft and hard drops restart the gravity period so the piece does not
    /// fall twice in quick succession.
    pub fn command(&mut self, command: Command, now: Instant) -> Vec<GameEvent> {
        let changed = self.engine.apply(command);
        if changed
            && matches!(
                command,
                Command::Move(MoveDirection::Down) | Command::HardDrop
            )
            && self.gravity.running()
        {
            self.gravity.start(now);
        }
        self.sync(now)
    }

    /// Apply a gravity tick if one is due
    pub fn update(&mut self, now: Instant) -> Vec<GameEvent> {
        if self.gravity.poll(now) {
            self.engine.gravity_tick();
        }
        self.sync(now)
    }

    /// Time until the host needs to call [`Session::update`] again
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.gravity.remaining(now)
    }

    pub fn play_time(&self, now: Instant) -> Duration {
        self.timer.elapsed(now)
    }

    /// Drain engine events, adjusting the clocks to match
    fn sync(&mut self, now: Instant) -> Vec<GameEvent> {
        let events = self.engine.drain_events();
        for event in &events {
            match event {
                GameEvent::GravityIntervalChanged(interval) => {
                    debug!("gravity interval now {:?}", interval);
                    self.gravity.set_interval(*interval, now);
                }
                GameEvent::PauseToggled(true) => {
                    self.gravity.stop();
                    self.timer.stop(now);
                }
                GameEvent::PauseToggled(false) => {
                    self.gravity.start(now);
                    self.timer.start(now);
                }
                GameEvent::GameOver => {
                    self.gravity.stop();
                    self.timer.stop(now);
                }
                _ => {}
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_clock_fires_after_interval() {
        let t0 = Instant::now();
        let mut clock = GravityClock::new(Duration::from_millis(100));
        assert!(!clock.poll(t0 + Duration::from_secs(1)));

        clock.start(t0);
        assert!(!clock.poll(t0 + Duration::from_millis(99)));
        assert!(clock.poll(t0 + Duration::from_millis(100)));
        assert!(!clock.poll(t0 + Duration::from_millis(150)));
        assert!(clock.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn reprogrammed_clock_restarts_period() {
        let t0 = Instant::now();
        let mut clock = GravityClock::new(Duration::from_millis(800));
        clock.start(t0);
        clock.set_interval(Duration::from_millis(100), t0 + Duration::from_millis(50));
        assert_eq!(
            clock.remaining(t0 + Duration::from_millis(50)),
            Some(Duration::from_millis(100))
        );
        assert!(clock.poll(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn play_timer_excludes_stopped_time() {
        let t0 = Instant::now();
        let mut timer = PlayTimer::new();
        timer.start(t0);
        timer.stop(t0 + Duration::from_secs(3));
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(3));
        timer.start(t0 + Duration::from_secs(10));
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(12)), Duration::from_secs(5));
    }
}
