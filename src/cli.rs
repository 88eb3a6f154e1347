//! Command-line flags and log setup shared by both binaries.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::core::{EngineConfig, ShiftPolicy, Variant};
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS};

/// Filter directives, e.g. `TILE_CASCADE_LOG=tile_cascade_core=debug`
pub const LOG_ENV: &str = "TILE_CASCADE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VariantArg {
    /// Cola boosters only
    #[default]
    Classic,
    /// Shake for runs of 4, Cola for runs of 5+ and L/T intersections
    Deluxe,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Deluxe => Variant::Deluxe,
        }
    }
}

/// Engine options common to the game and the headless runner
#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// Rule set
    #[arg(short, long, default_value = "classic")]
    pub variant: VariantArg,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS, value_name = "ROWS")]
    pub rows: usize,

    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_COLS, value_name = "COLS")]
    pub cols: usize,

    /// Random seed; derived from the clock when omitted
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u32>,

    /// Stop after the first cascade iteration of each move
    #[arg(long)]
    pub no_cascades: bool,

    /// Undo shifts that match nothing, like swaps
    #[arg(long)]
    pub revert_failed_shifts: bool,
}

impl EngineArgs {
    pub fn variant(&self) -> Variant {
        self.variant.into()
    }

    pub fn config(&self) -> EngineConfig {
        let policy = if self.revert_failed_shifts {
            ShiftPolicy::Revert
        } else {
            ShiftPolicy::Commit
        };
        EngineConfig::for_variant(self.variant())
            .with_size(self.rows, self.cols)
            .with_cascades(!self.no_cascades)
            .with_shift_policy(policy)
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

/// Log to stderr, `warn` and above unless `TILE_CASCADE_LOG` says otherwise
pub fn init_stderr_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Log to `path`, only when `TILE_CASCADE_LOG` is set
///
/// The terminal is in raw mode while playing, so nothing may go to stdout or
/// stderr. Returns whether logging was enabled.
pub fn init_file_logging(path: &Path) -> Result<bool> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(false);
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;
    Ok(true)
}
