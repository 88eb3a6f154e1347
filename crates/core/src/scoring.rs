//! Scoring module - points and coins per cascade iteration
//!
//! Each iteration pays `removed × SCORE_PER_TILE × chain_index` points, so later
//! links of a cascade are worth more, and `floor(removed / CURRENCY_DIVISOR)`
//! coins.

use serde::Serialize;

use crate::types::{CURRENCY_DIVISOR, SCORE_PER_TILE};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub currency: u32,
}

/// Points for one iteration
///
/// `chain_index` is 1-based; 0 pays nothing.
pub fn calculate_score(removed: usize, chain_index: u32) -> u32 {
    let removed = u32::try_from(removed).unwrap_or(u32::MAX);
    removed
        .saturating_mul(SCORE_PER_TILE)
        .saturating_mul(chain_index)
}

/// Coins for one iteration
pub fn calculate_currency(removed: usize) -> u32 {
    let removed = u32::try_from(removed).unwrap_or(u32::MAX);
    removed / CURRENCY_DIVISOR
}

pub fn score_iteration(removed: usize, chain_index: u32) -> ScoreResult {
    ScoreResult {
        score: calculate_score(removed, chain_index),
        currency: calculate_currency(removed),
    }
}
