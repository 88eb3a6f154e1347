//! Engine configuration
//!
//! Everything that differs between game variants lives in one explicit
//! [`EngineConfig`] value handed to [`crate::Session::new`]. Nothing is read
//! from globals.

use crate::catalog::TileCatalog;
use crate::error::{EngineError, EngineResult};
use crate::types::{
    SpecialTier, TileKind, DEFAULT_COLS, DEFAULT_MAX_CASCADE_ITERATIONS, DEFAULT_MIN_SPECIAL_RUN,
    DEFAULT_ROWS, DEFAULT_STRONG_SPECIAL_RUN, MIN_MATCH_LEN,
};

/// Shipped rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// One booster (cola), created from straight runs of 4+
    #[default]
    Classic,
    /// Two tiers: shake for runs of 4, cola for runs of 5+ and L/T shapes
    Deluxe,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Deluxe => "deluxe",
        }
    }
}

/// What happens to a shift that produces no match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftPolicy {
    /// Keep the rotated line; the move still counts
    #[default]
    Commit,
    /// Undo the rotation like a failed swap
    Revert,
}

/// Thresholds and kinds used by the special-tile creation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialRules {
    /// Kind spawned for a medium reward
    pub medium: TileKind,
    /// Kind spawned for a strong reward
    pub strong: TileKind,
    /// Shortest straight run that earns a special
    pub min_run: usize,
    /// Shortest straight run that earns the strong tier
    pub strong_run: usize,
    /// When set, L/T intersections of runs at least this long earn a strong special
    pub intersection_min_run: Option<usize>,
}

impl SpecialRules {
    pub fn classic() -> Self {
        Self {
            medium: TileKind::Cola,
            strong: TileKind::Cola,
            min_run: DEFAULT_MIN_SPECIAL_RUN,
            strong_run: DEFAULT_STRONG_SPECIAL_RUN,
            intersection_min_run: None,
        }
    }

    pub fn deluxe() -> Self {
        Self {
            medium: TileKind::Shake,
            strong: TileKind::Cola,
            min_run: DEFAULT_MIN_SPECIAL_RUN,
            strong_run: DEFAULT_STRONG_SPECIAL_RUN,
            intersection_min_run: Some(MIN_MATCH_LEN),
        }
    }

    pub fn kind_for(&self, tier: SpecialTier) -> TileKind {
        match tier {
            SpecialTier::Medium => self.medium,
            SpecialTier::Strong => self.strong,
        }
    }

    /// Tier earned by a straight run of `len` cells
    pub fn tier_for_run(&self, len: usize) -> SpecialTier {
        if len >= self.strong_run {
            SpecialTier::Strong
        } else {
            SpecialTier::Medium
        }
    }

    /// Run thresholds must satisfy `MIN_MATCH_LEN <= min_run <= strong_run`
    fn validate(&self) -> EngineResult<()> {
        if self.min_run < MIN_MATCH_LEN {
            return Err(EngineError::InvalidSetting {
                setting: "min_run",
                reason: "shorter than a match",
            });
        }
        if self.strong_run < self.min_run {
            return Err(EngineError::InvalidSetting {
                setting: "strong_run",
                reason: "shorter than min_run",
            });
        }
        if self.intersection_min_run.is_some_and(|len| len < MIN_MATCH_LEN) {
            return Err(EngineError::InvalidSetting {
                setting: "intersection_min_run",
                reason: "shorter than a match",
            });
        }
        Ok(())
    }
}

impl Default for SpecialRules {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub catalog: TileCatalog,
    pub specials: SpecialRules,
    /// When false, a move resolves at most one iteration
    pub cascades_enabled: bool,
    pub max_cascade_iterations: u32,
    pub shift_policy: ShiftPolicy,
}

impl EngineConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let (catalog, specials) = match variant {
            Variant::Classic => (TileCatalog::classic(), SpecialRules::classic()),
            Variant::Deluxe => (TileCatalog::deluxe(), SpecialRules::deluxe()),
        };
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            catalog,
            specials,
            cascades_enabled: true,
            max_cascade_iterations: DEFAULT_MAX_CASCADE_ITERATIONS,
            shift_policy: ShiftPolicy::Commit,
        }
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_cascades(mut self, enabled: bool) -> Self {
        self.cascades_enabled = enabled;
        self
    }

    pub fn with_shift_policy(mut self, policy: ShiftPolicy) -> Self {
        self.shift_policy = policy;
        self
    }

    pub fn with_max_cascade_iterations(mut self, limit: u32) -> Self {
        self.max_cascade_iterations = limit;
        self
    }

    pub fn with_catalog(mut self, catalog: TileCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_specials(mut self, specials: SpecialRules) -> Self {
        self.specials = specials;
        self
    }

    /// Reject configurations that would corrupt a board
    pub fn validate(&self) -> EngineResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_cascade_iterations == 0 {
            return Err(EngineError::InvalidSetting {
                setting: "max_cascade_iterations",
                reason: "must be at least 1",
            });
        }
        self.specials.validate()?;
        self.catalog
            .require_special(self.specials.medium, "medium special")?;
        self.catalog
            .require_special(self.specials.strong, "strong special")?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}
