//! Score and economy ledger
//!
//! All point movement goes through the three operations here. The ledger
//! enforces its own bounds: balances never go negative and a debit either
//! happens in full or not at all.

use super::state::{BuiltItemKind, GameState};
use crate::consts::*;

impl BuiltItemKind {
    /// Purchase price in points
    pub fn cost(self) -> u64 {
        match self {
            BuiltItemKind::House => HOUSE_COST,
            BuiltItemKind::Tree => TREE_COST,
        }
    }
}

impl GameState {
    /// Record one collected block and return the points it was worth
    ///
    /// Base award plus a combo bonus of one extra point per COMBO_STEP blocks
    /// already cleared this level, counting the block being collected.
    pub(crate) fn award_collection(&mut self) -> u64 {
        self.cleared_blocks += 1;
        let points = COLLECT_BASE_POINTS + (self.cleared_blocks / COMBO_STEP) as u64;
        self.score += points;
        points
    }

    /// Unconditional score adjustment; clamps at zero instead of underflowing
    pub fn add_score(&mut self, delta: i64) {
        self.score = self.score.saturating_add_signed(delta);
    }

    /// Spend `cost` points if the balance covers it
    ///
    /// Returns false and leaves the balance untouched otherwise. Callers do
    /// not need their own pre-check.
    pub fn try_debit(&mut self, cost: u64) -> bool {
        if self.score >= cost {
            self.score -= cost;
            true
        } else {
            false
        }
    }
}
