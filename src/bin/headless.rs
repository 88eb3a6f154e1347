//! Headless runner: plays pseudo-random moves and prints one JSON object per move.
//!
//! Useful for replaying a seed, profiling, and eyeballing cascade statistics:
//!
//! ```text
//! tile-cascade-headless --seed 7 --moves 50 | jq .outcome.total_score_delta
//! ```

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use tile_cascade::cli::{init_stderr_logging, EngineArgs};
use tile_cascade::core::{MoveOutcome, Session, SessionSnapshot, SimpleRng, TileRng};
use tile_cascade::types::{Axis, Move, Pos};

#[derive(Debug, Parser)]
#[command(
    name = "tile-cascade-headless",
    version,
    about = "Play pseudo-random moves without a terminal and print JSON lines."
)]
struct Args {
    #[command(flatten)]
    engine: EngineArgs,

    /// Number of moves to attempt
    #[arg(short, long, default_value_t = 100, value_name = "N")]
    moves: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Record<'a> {
    Move {
        index: u32,
        #[serde(rename = "move")]
        mv: Move,
        outcome: &'a MoveOutcome,
    },
    Fault {
        index: u32,
        #[serde(rename = "move")]
        mv: Move,
        error: String,
        partial: &'a MoveOutcome,
    },
    Summary(&'a SessionSnapshot),
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_stderr_logging()?;

    let seed = args.engine.seed();
    let mut session = Session::seeded(args.engine.config(), seed)?;
    // Separate stream so the chosen moves do not shift the tile draws.
    let mut picker = SimpleRng::new(seed.rotate_left(16) ^ 0x5bd1_e995);
    info!(seed, moves = args.moves, "headless run");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for index in 0..args.moves {
        let mv = random_move(session.board().rows(), session.board().cols(), &mut picker);
        match session.resolve_move(mv) {
            Ok(outcome) => emit(&mut out, &Record::Move { index, mv, outcome: &outcome })?,
            Err(fault) => {
                warn!(index, error = %fault.error, "move faulted");
                let error = fault.error.to_string();
                let partial = &fault.partial;
                emit(&mut out, &Record::Fault { index, mv, error, partial })?;
            }
        }
    }

    emit(&mut out, &Record::Summary(&session.snapshot()))?;
    out.flush()?;
    Ok(())
}

fn pick(rng: &mut impl TileRng, n: usize) -> usize {
    rng.next_range(u32::try_from(n).unwrap_or(u32::MAX)) as usize
}

fn emit(out: &mut impl Write, record: &Record<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Uniform choice between a neighbour swap and a line shift
fn random_move(rows: usize, cols: usize, rng: &mut impl TileRng) -> Move {
    let a = Pos::new(pick(rng, rows), pick(rng, cols));
    let delta = if rng.next_range(2) == 0 { -1 } else { 1 };

    match rng.next_range(3) {
        0 if cols > 1 => {
            let col = if a.col + 1 < cols { a.col + 1 } else { a.col - 1 };
            Move::swap(a, Pos::new(a.row, col))
        }
        1 if rows > 1 => {
            let row = if a.row + 1 < rows { a.row + 1 } else { a.row - 1 };
            Move::swap(a, Pos::new(row, a.col))
        }
        _ => {
            let axis = if rng.next_range(2) == 0 { Axis::Row } else { Axis::Col };
            let index = match axis {
                Axis::Row => a.row,
                Axis::Col => a.col,
            };
            Move::shift(axis, index, delta, a)
        }
    }
}
