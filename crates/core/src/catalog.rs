//! Tile catalog - the registry of kinds a session may place
//!
//! Ordinary kinds are the random draw pool; special kinds are the boosters the
//! creation policy is allowed to spawn. Both lists are fixed at construction.

use arrayvec::ArrayVec;

use crate::error::{EngineError, EngineResult};
use crate::rng::TileRng;
use crate::types::TileKind;

const MAX_KINDS: usize = TileKind::ALL.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCatalog {
    ordinary: ArrayVec<TileKind, MAX_KINDS>,
    specials: ArrayVec<TileKind, MAX_KINDS>,
}

impl TileCatalog {
    /// Build a catalog, dropping duplicate entries
    ///
    /// Fails if no ordinary kind is given or a kind is listed in the wrong role.
    pub fn new(ordinary: &[TileKind], specials: &[TileKind]) -> EngineResult<Self> {
        let mut catalog = Self {
            ordinary: ArrayVec::new(),
            specials: ArrayVec::new(),
        };

        for &kind in ordinary {
            if kind.is_special() {
                return Err(EngineError::UnknownTileKind {
                    kind,
                    role: "ordinary tile",
                });
            }
            if !catalog.ordinary.contains(&kind) {
                catalog.ordinary.push(kind);
            }
        }
        for &kind in specials {
            if !kind.is_special() {
                return Err(EngineError::UnknownTileKind {
                    kind,
                    role: "special tile",
                });
            }
            if !catalog.specials.contains(&kind) {
                catalog.specials.push(kind);
            }
        }

        if catalog.ordinary.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        Ok(catalog)
    }

    /// Six ordinary kinds and the cola booster
    pub fn classic() -> Self {
        let mut specials = ArrayVec::new();
        specials.push(TileKind::Cola);
        Self {
            ordinary: TileKind::ORDINARY.into_iter().collect(),
            specials,
        }
    }

    /// Six ordinary kinds with both boosters
    pub fn deluxe() -> Self {
        let mut specials = ArrayVec::new();
        specials.push(TileKind::Cola);
        specials.push(TileKind::Shake);
        Self {
            ordinary: TileKind::ORDINARY.into_iter().collect(),
            specials,
        }
    }

    pub fn ordinary(&self) -> &[TileKind] {
        &self.ordinary
    }

    pub fn specials(&self) -> &[TileKind] {
        &self.specials
    }

    pub fn contains_special(&self, kind: TileKind) -> bool {
        self.specials.contains(&kind)
    }

    /// Whether `kind` is registered in either role
    pub fn contains(&self, kind: TileKind) -> bool {
        self.ordinary.contains(&kind) || self.specials.contains(&kind)
    }

    /// Check that `kind` is a registered special, for the named config role
    pub fn require_special(&self, kind: TileKind, role: &'static str) -> EngineResult<TileKind> {
        if self.contains_special(kind) {
            Ok(kind)
        } else {
            Err(EngineError::UnknownTileKind { kind, role })
        }
    }

    /// Uniform draw from the ordinary kinds
    pub fn draw<R: TileRng + ?Sized>(&self, rng: &mut R) -> TileKind {
        let idx = rng.next_range(self.ordinary.len() as u32) as usize;
        self.ordinary[idx.min(self.ordinary.len() - 1)]
    }
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::classic()
    }
}
