//! Terminal Trio Stack runner (default binary).
//!
//! Reads clicks and keys through crossterm, feeds them to the session one at a time,
//! ticks the clock every `TICK_MS`, and hands finished sessions to the leaderboard.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use trio_stack::cli::Cli;
use trio_stack::core::{Session, SimpleRng};
use trio_stack::input::{handle_key_event, handle_mouse_event};
use trio_stack::leaderboard::Leaderboard;
use trio_stack::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use trio_stack::types::{Command, PlayArea, TICK_MS};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let level = cli.level_config()?;
    let seed = cli.seed_or_clock();
    let session = Session::new(level, PlayArea::default(), seed)
        .context("invalid level configuration")?
        .with_player_name(cli.player.clone());
    let mut leaderboard = Leaderboard::load(&cli.leaderboard);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, seed, &mut leaderboard);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    for (rank, entry) in leaderboard.entries().iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:>5}  {:>7.1}s",
            rank + 1,
            entry.player,
            entry.score,
            entry.time
        );
    }
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    mut session: Session,
    seed: u32,
    leaderboard: &mut Leaderboard,
) -> Result<()> {
    let view = BoardView;
    let mut fb = FrameBuffer::new(0, 0);
    // Restarts draw their seeds from here so a fixed --seed replays the same run.
    let mut seeds = SimpleRng::new(seed);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    session.start(last_tick);
    info!(player = session.player_name(), seed, "game started");

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&session, viewport, &mut fb);
        term.draw(&fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key),
                Event::Mouse(mouse) => handle_mouse_event(mouse).and_then(|(col, row)| {
                    view.projection(&session, viewport)
                        .to_point(col, row)
                        .map(Command::Click)
                }),
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            match command {
                Some(Command::Quit) => return Ok(()),
                Some(command) => apply(&mut session, command, &mut seeds)?,
                None => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(last_tick);
        }

        if let Some(record) = session.take_record() {
            if let Err(err) = leaderboard.record(&record) {
                warn!(error = %err, "could not save leaderboard");
            }
        }
    }
}

fn apply(session: &mut Session, command: Command, seeds: &mut SimpleRng) -> Result<()> {
    let result = match command {
        Command::Click(point) => session
            .handle_click(point, Instant::now())
            .map(|outcome| debug!(?outcome, "click")),
        Command::Hint => session.use_hint().map(|_| ()),
        Command::Undo => session.use_undo(),
        Command::Restart => {
            session.restart(seeds.next_u32(), Instant::now())?;
            Ok(())
        }
        Command::Quit => Ok(()),
    };
    if let Err(err) = result {
        debug!(%err, ?command, "command rejected");
    }
    Ok(())
}
