//! Terminal Blocktris runner.
//!
//! Reads keys with crossterm, drives a [`Session`] and redraws from engine
//! snapshots through the framebuffer renderer.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, LevelFilter};

use blocktris::config::{self, LOG_PATH_ENV};
use blocktris::driver::Session;
use blocktris::input::{handle_key_event, KeyAction};
use blocktris::term::{GameView, Hud, TerminalRenderer, Viewport};

/// Upper bound on input polling so the play timer keeps redrawing
const MAX_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging()?;

    let config = config::resolve().context("loading configuration")?;
    info!("starting with {:?}", config);
    let mut session = Session::new(config).context("creating game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Ok(json) = serde_json::to_string(&session.engine().snapshot()) {
        info!("final snapshot: {}", json);
    }
    result
}

/// Logs go to the file named by `BLOCKTRIS_LOG_PATH`; without it logging is off
/// since the terminal is taken over by the game.
fn init_logging() -> Result<()> {
    let Some(path) = config::non_empty_env(LOG_PATH_ENV) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path))?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    session.start(Instant::now());

    loop {
        let now = Instant::now();
        session.update(now);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            elapsed: session.play_time(now),
        };
        let fb = view.render(&session.engine().snapshot(), &hud, Viewport::new(w, h));
        term.draw(&fb)?;

        let timeout = session
            .next_deadline(now)
            .map_or(MAX_POLL, |d| d.min(MAX_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match handle_key_event(key) {
                Some(KeyAction::Quit) => return Ok(()),
                Some(KeyAction::NewGame) => {
                    info!("new game requested");
                    session.restart(Instant::now());
                }
                Some(KeyAction::Command(command)) => {
                    session.command(command, Instant::now());
                }
                None => {}
            },
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
