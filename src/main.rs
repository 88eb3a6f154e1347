//! Terminal tile cascade game (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Cascades are
//! stepped one iteration at a time with short pauses so each clear is visible.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use tile_cascade::cli::{init_file_logging, EngineArgs};
use tile_cascade::core::{MoveStatus, Session, SessionSnapshot, Variant};
use tile_cascade::input::{handle_key_event, should_quit, InputHandler};
use tile_cascade::term::{FrameBuffer, GameView, PlayView, TerminalRenderer, Viewport};
use tile_cascade::types::{
    GameAction, Pos, CASCADE_PAUSE_MS, REMOVE_PAUSE_MS, ROUND_SECONDS, SHIFT_SNAP_MS, TICK_MS,
};

/// Match three or more tiles in a row before the clock runs out.
#[derive(Debug, Parser)]
#[command(
    name = "tile-cascade",
    version,
    about = "Tile-matching cascade puzzle in the terminal.",
    long_about = "Swap neighbouring tiles or rotate whole rows and columns to line up three or \
        more of a kind. Matched tiles vanish, the rest fall, and new tiles drop in from the top.\n\n\
        CONTROLS:\n  Arrows / hjkl / wasd  Move cursor (or swap with the selection)\n  \
        Space / Enter         Select tile    Esc  Drop selection\n  \
        Shift+Arrows / HJKL   Rotate the cursor's row or column\n  \
        P  Pause    R  New game    Q / Ctrl+C  Quit"
)]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    /// Round length in seconds
    #[arg(long, default_value_t = ROUND_SECONDS, value_name = "SECS")]
    seconds: u32,

    /// Log file, written only when TILE_CASCADE_LOG is set
    #[arg(long, default_value = "tile-cascade.log", value_name = "FILE")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_file_logging(&args.log_file)?;

    let seed = args.engine.seed();
    let session = Session::seeded(args.engine.config(), seed)?;
    info!(seed, variant = args.engine.variant().as_str(), "game start");
    let mut game = Game::new(session, args.engine.variant(), args.seconds);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        score = game.session.score(),
        coins = game.session.currency(),
        moves = game.session.moves(),
        "game end"
    );
    result
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.session.snapshot_into(&mut snap);
        view.render_into(&snap, &game.play_view(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply(action, Instant::now());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            game.tick(last_tick, elapsed);
        }
    }
}

/// Front-end state around one session: cursor, round clock, cascade pacing
struct Game {
    session: Session,
    input: InputHandler,
    variant: Variant,
    round: Duration,
    played: Duration,
    paused: bool,
    /// When the next cascade iteration may run
    next_step: Option<Instant>,
    /// Cells removed by the latest iteration
    cleared: Vec<Pos>,
}

impl Game {
    fn new(session: Session, variant: Variant, seconds: u32) -> Self {
        let board = session.board();
        let input = InputHandler::new(board.rows(), board.cols());
        Self {
            session,
            input,
            variant,
            round: Duration::from_secs(u64::from(seconds)),
            played: Duration::ZERO,
            paused: false,
            next_step: None,
            cleared: Vec::new(),
        }
    }

    fn time_up(&self) -> bool {
        self.played >= self.round
    }

    fn seconds_left(&self) -> u32 {
        let left = self.round.saturating_sub(self.played);
        let whole = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }

    fn play_view(&self) -> PlayView<'_> {
        PlayView {
            cursor: self.input.cursor(),
            selected: self.input.selected(),
            cleared: &self.cleared,
            seconds_left: self.seconds_left(),
            paused: self.paused,
            variant: self.variant,
        }
    }

    fn apply(&mut self, action: GameAction, now: Instant) {
        match action {
            GameAction::Pause => {
                if !self.time_up() {
                    self.paused = !self.paused;
                }
                return;
            }
            GameAction::Restart => {
                self.session.reset();
                self.input.reset();
                self.played = Duration::ZERO;
                self.paused = false;
                self.next_step = None;
                self.cleared.clear();
                return;
            }
            _ => {}
        }
        if self.paused || self.time_up() {
            return;
        }

        let Some(mv) = self.input.apply(action) else {
            return;
        };
        match self.session.begin_move(mv) {
            MoveStatus::Cascading => {
                self.cleared.clear();
                self.next_step = Some(now + millis(SHIFT_SNAP_MS));
            }
            MoveStatus::Rejected(reason) => debug!(?reason, "move refused"),
            MoveStatus::Reverted | MoveStatus::Inert => self.cleared.clear(),
        }
    }

    fn tick(&mut self, now: Instant, dt: Duration) {
        if self.paused {
            return;
        }
        if !self.time_up() {
            self.played += dt;
        }

        // A cascade started before the buzzer still plays out.
        let Some(due) = self.next_step else {
            return;
        };
        if now < due {
            return;
        }
        match self.session.step() {
            Ok(Some(event)) => {
                self.cleared = event.removed.into_iter().collect();
                self.next_step = Some(now + millis(REMOVE_PAUSE_MS + CASCADE_PAUSE_MS));
            }
            Ok(None) => self.next_step = None,
            Err(err) => {
                warn!(%err, "cascade abandoned");
                self.next_step = None;
            }
        }
    }
}

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}
