//! Game engine module - the session state machine
//!
//! This module ties together the playfield, pieces, shape source and scoring.
//! A session moves through `Ready -> (spawn -> falling -> lock -> line clear)*`
//! and ends in `GameOver` when a freshly spawned piece cannot be placed.
//! Pausing is orthogonal: while paused every gameplay command is ignored.
//!
//! The engine is driven entirely from outside. The host feeds it commands and
//! gravity ticks, then drains the queued [`GameEvent`]s to redraw and to
//! reprogram its gravity clock.

use std::time::Duration;

use log::{debug, trace};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{EventSink, GameEvent};
use crate::pieces::Piece;
use crate::playfield::{Cursor, Playfield};
use crate::rng::{ShapeSource, UniformShapes};
use crate::scoring::{gravity_interval, level_for_lines, line_clear_award, HardDropScoring};
use crate::snapshot::{ActiveSnapshot, FieldSnapshot, GameSnapshot, PieceSnapshot};
use crate::types::{Command, MoveDirection, RotationDirection};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed, first piece not yet spawned
    Ready,
    /// A piece is falling
    Falling,
    /// Spawn was blocked; terminal
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameEngine<S: ShapeSource = UniformShapes> {
    field: Playfield,
    source: S,
    current: Option<Piece>,
    cursor: Cursor,
    next: Piece,
    phase: Phase,
    paused: bool,
    /// Set when a downward move is blocked; consumed by the lock step
    collision: bool,
    score: u32,
    level: u32,
    lines: u32,
    soft_drops: u32,
    start_level: u32,
    hard_drop_scoring: HardDropScoring,
    events: Vec<GameEvent>,
}

impl GameEngine<UniformShapes> {
    /// Create a session drawing shapes uniformly from the configured seed
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let source = UniformShapes::new(config.seed_or_default());
        Self::with_source(config, source)
    }
}

impl<S: ShapeSource> GameEngine<S> {
    /// Create a session with an explicit shape source.
    ///
    /// Only the first "next" piece is drawn; call [`GameEngine::start`] to
    /// spawn the first falling piece.
    pub fn with_source(config: EngineConfig, mut source: S) -> Result<Self, EngineError> {
        let field = Playfield::new(config.height, config.width)?;
        let next = Piece::new(source.next_shape());

        Ok(Self {
            field,
            source,
            current: None,
            cursor: Cursor::default(),
            next,
            phase: Phase::Ready,
            paused: false,
            collision: false,
            score: 0,
            level: config.start_level,
            lines: 0,
            soft_drops: 0,
            start_level: config.start_level,
            hard_drop_scoring: config.hard_drop,
            events: Vec::new(),
        })
    }

    /// Start the session and spawn the first piece.
    ///
    /// Returns false if the session was already started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        debug!(
            "session start: {}x{} field, level {}",
            self.field.height(),
            self.field.width(),
            self.level
        );
        self.events.push(GameEvent::ScoreUpdated(self.score));
        self.events.push(GameEvent::LinesUpdated(self.lines));
        self.events.push(GameEvent::LevelUpdated(self.level));
        let interval = self.gravity_interval();
        self.events.push(GameEvent::GravityIntervalChanged(interval));
        self.spawn();
        true
    }

    /// Reset the field and counters and start a fresh session.
    ///
    /// The shape source keeps its state, so the new session continues the
    /// sequence rather than replaying it.
    pub fn restart(&mut self) {
        debug!("session restart (final score {})", self.score);
        self.field.clear();
        self.current = None;
        self.cursor = Cursor::default();
        self.next = Piece::new(self.source.next_shape());
        self.phase = Phase::Ready;
        self.paused = false;
        self.collision = false;
        self.score = 0;
        self.level = self.start_level;
        self.lines = 0;
        self.soft_drops = 0;
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total lines cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Soft-drop commands accumulated for the falling piece
    pub fn soft_drops(&self) -> u32 {
        self.soft_drops
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    /// Mutable access to the grid, for setting up positions before or during
    /// a session. Sentinels stay protected by [`Playfield::set`].
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Gravity interval for the current level
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level)
    }

    fn accepts_commands(&self) -> bool {
        self.phase == Phase::Falling && !self.paused && self.current.is_some()
    }

    /// Dispatch a command.
    ///
    /// Returns whether the command changed the session. Blocked sideways
    /// moves and blocked rotations return false; a blocked downward move
    /// locks the piece and returns true.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self.move_piece(direction),
            Command::Rotate(direction) => self.rotate(direction),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
            Command::GravityTick => self.gravity_tick(),
        }
    }

    /// Translate the falling piece one cell.
    ///
    /// Every accepted downward command counts as a soft drop, whether or not
    /// the piece could descend.
    pub fn move_piece(&mut self, direction: MoveDirection) -> bool {
        if !self.accepts_commands() {
            trace!("move {:?} ignored in phase {:?}", direction, self.phase);
            return false;
        }

        if direction == MoveDirection::Down {
            self.soft_drops = self.soft_drops.saturating_add(1);
        }

        if self.try_shift(direction) {
            self.emit_field();
            return true;
        }

        if direction == MoveDirection::Down {
            self.collision = true;
            self.lock();
            return true;
        }

        trace!("move {:?} blocked at {:?}", direction, self.cursor);
        false
    }

    /// Rotate the falling piece in place; no wall kicks
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.accepts_commands() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let candidate = piece.rotated(direction);
        if !self.field.is_possible(self.cursor, &candidate) {
            trace!("rotate {:?} rejected for {:?}", direction, piece.shape());
            return false;
        }

        self.current = Some(candidate);
        self.emit_field();
        true
    }

    /// Drop the falling piece to its lowest legal row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }

        let mut rows = 0u32;
        while self.try_shift(MoveDirection::Down) {
            rows += 1;
        }

        let bonus = self.hard_drop_scoring.award(rows);
        if bonus > 0 {
            self.score = self.score.saturating_add(bonus);
            self.events.push(GameEvent::ScoreUpdated(self.score));
        }

        self.collision = true;
        self.lock();
        true
    }

    /// Toggle pause; ignored before start and after game over
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        self.events.push(GameEvent::PauseToggled(self.paused));
        true
    }

    /// One gravity step: descend by one row or lock
    pub fn gravity_tick(&mut self) -> bool {
        if !self.accepts_commands() {
            return false;
        }

        if self.try_shift(MoveDirection::Down) {
            self.emit_field();
        } else {
            self.collision = true;
            self.lock();
        }
        true
    }

    /// Lowest row the falling piece could reach from its current position
    pub fn landing_row(&self) -> Option<i32> {
        let piece = self.current?;
        let mut cursor = self.cursor;
        while self.field.is_possible(cursor.offset(1, 0), &piece) {
            cursor = cursor.offset(1, 0);
        }
        Some(cursor.row)
    }

    /// Full copy of the observable session state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            field: self.field_view(),
            active: self.current.map(|piece| ActiveSnapshot {
                piece,
                cursor: self.cursor,
            }),
            next: PieceSnapshot::from(self.next),
            score: self.score,
            level: self.level,
            lines: self.lines,
            soft_drops: self.soft_drops,
            paused: self.paused,
            game_over: self.game_over(),
            gravity_interval: self.gravity_interval(),
        }
    }

    /// Grid with the falling piece overlaid
    pub fn field_view(&self) -> FieldSnapshot {
        match self.current {
            Some(piece) => self.field.overlay(&piece, self.cursor),
            None => self.field.snapshot(),
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward queued events to `sink` in emission order
    pub fn flush_events<K: EventSink + ?Sized>(&mut self, sink: &mut K) {
        for event in self.events.drain(..) {
            sink.on_event(event);
        }
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn try_shift(&mut self, direction: MoveDirection) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let (dr, dc) = direction.offset();
        let target = self.cursor.offset(dr, dc);
        if self.field.is_possible(target, &piece) {
            self.cursor = target;
            true
        } else {
            false
        }
    }

    fn emit_field(&mut self) {
        let view = self.field_view();
        self.events.push(GameEvent::FieldUpdated(view));
    }

    fn spawn(&mut self) {
        let piece = self.next;
        self.next = Piece::new(self.source.next_shape());

        let col = (self.field.width() as i32 - 4) / 2;
        let cursor = Cursor::new(piece.shape().spawn_row(), col);

        if !self.field.is_possible(cursor, &piece) {
            debug!("spawn of {:?} blocked at {:?}: game over", piece.shape(), cursor);
            self.current = None;
            self.phase = Phase::GameOver;
            self.emit_field();
            self.events.push(GameEvent::GameOver);
            return;
        }

        trace!("spawn {:?} at {:?}", piece.shape(), cursor);
        self.current = Some(piece);
        self.cursor = cursor;
        self.phase = Phase::Falling;
        self.emit_field();
        let next = PieceSnapshot::from(self.next);
        self.events.push(GameEvent::NextPieceUpdated(next));
    }

    fn lock(&mut self) {
        if !self.collision {
            return;
        }
        self.collision = false;
        let Some(piece) = self.current.take() else {
            return;
        };

        self.field.merge(&piece, self.cursor);
        debug!(
            "locked {:?} at {:?} ({} soft drops)",
            piece.shape(),
            self.cursor,
            self.soft_drops
        );

        let soft_drop_points = std::mem::take(&mut self.soft_drops);
        self.score = self.score.saturating_add(soft_drop_points);

        self.events.push(GameEvent::PieceLocked);
        self.emit_field();

        if !self.clear_lines() && soft_drop_points > 0 {
            self.events.push(GameEvent::ScoreUpdated(self.score));
        }

        self.spawn();
    }

    /// Remove complete rows and settle score, lines and level.
    ///
    /// Returns whether any row was cleared.
    fn clear_lines(&mut self) -> bool {
        let rows = self.field.complete_rows();
        if rows.is_empty() {
            return false;
        }

        let count = rows.len();
        let award = line_clear_award(count, self.level);
        debug!("cleared rows {:?} for {} points", rows, award);

        self.events.push(GameEvent::LinesCleared(rows.clone()));
        self.field.remove_rows(&rows);

        self.score = self.score.saturating_add(award);
        self.lines = self.lines.saturating_add(count as u32);
        self.events.push(GameEvent::ScoreUpdated(self.score));
        self.events.push(GameEvent::LinesUpdated(self.lines));

        let level = level_for_lines(self.lines, self.start_level);
        if level > self.level {
            self.level = level;
            debug!("level up: {}", level);
            let interval = self.gravity_interval();
            self.events.push(GameEvent::LevelUpdated(level));
            self.events.push(GameEvent::GravityIntervalChanged(interval));
        }
        true
    }
}
