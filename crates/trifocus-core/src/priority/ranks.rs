//! Ordinal weights for priority and effort.
//!
//! This is the whole ranking policy: the engine only ever compares the
//! numbers looked up here.

use crate::task::{Effort, Priority};

/// Immutable enum-to-weight tables used by [`PriorityEngine`](super::PriorityEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTables {
    /// Higher weight sorts first.
    pub priority: [(Priority, u8); 3],
    /// Lower weight sorts first.
    pub effort: [(Effort, u8); 3],
}

/// High > Medium > Low; Easy < Medium < Hard.
pub const DEFAULT_RANKS: RankTables = RankTables {
    priority: [(Priority::High, 3), (Priority::Medium, 2), (Priority::Low, 1)],
    effort: [(Effort::Easy, 1), (Effort::Medium, 2), (Effort::Hard, 3)],
};

impl RankTables {
    pub fn priority_weight(&self, priority: Priority) -> u8 {
        self.priority
            .iter()
            .find(|(p, _)| *p == priority)
            .map_or(0, |(_, weight)| *weight)
    }

    pub fn effort_weight(&self, effort: Effort) -> u8 {
        self.effort
            .iter()
            .find(|(e, _)| *e == effort)
            .map_or(0, |(_, weight)| *weight)
    }
}

impl Default for RankTables {
    fn default() -> Self {
        DEFAULT_RANKS
    }
}
