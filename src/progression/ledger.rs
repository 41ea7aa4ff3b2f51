//! XP ledger - converts currency gains into queued level-ups
//!
//! One `add_xp` call may cross several thresholds; each crossing queues
//! exactly one pending level-up for the presentation layer to consume. While
//! any choice is owed, the visible bar is pinned full (`xp_current ==
//! xp_needed`); consuming a pending level-up pops the stored bar position for
//! the level that follows it.
//!
//! Bad input never stalls progression: non-positive amounts are ignored.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{XP_BASE_NEEDED, XP_NEEDED_GROWTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionLedger {
    xp_total: u64,
    level: u32,
    xp_current: u64,
    xp_needed: u64,
    /// Fractional remainder carried between grants so multipliers never
    /// lose value to rounding. Goes briefly negative when a sub-1 grant is
    /// bumped to the minimum of 1.
    xp_overflow: f64,
    pending_level_ups: u32,
    /// Bar positions to restore as pending level-ups are consumed, oldest first
    queued_progresses: VecDeque<u64>,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self {
            xp_total: 0,
            level: 1,
            xp_current: 0,
            xp_needed: XP_BASE_NEEDED,
            xp_overflow: 0.0,
            pending_level_ups: 0,
            queued_progresses: VecDeque::new(),
        }
    }
}

impl ProgressionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant currency, scaled by the current xp-gain multiplier.
    ///
    /// Returns the number of levels gained by this call. Non-positive input
    /// is a silent no-op.
    pub fn add_xp(&mut self, raw: f64, gain_mult: f64) -> u32 {
        if raw <= 0.0 || !raw.is_finite() {
            return 0;
        }

        let total = raw * gain_mult.max(0.0) + self.xp_overflow;
        let mut grant = total.floor() as i64;
        if grant < 1 {
            // Never swallow a grant outright; borrow against future overflow
            grant = 1;
            self.xp_overflow = total - 1.0;
        } else {
            self.xp_overflow = total - grant as f64;
        }

        self.xp_total += grant as u64;

        let mut available = self.xp_current + grant as u64;
        let mut gained = 0u32;
        while available >= self.xp_needed {
            available -= self.xp_needed;
            self.level += 1;
            gained += 1;
            self.xp_needed = (self.xp_needed as f64 * XP_NEEDED_GROWTH).ceil() as u64;
            self.queued_progresses.push_back(available.min(self.xp_needed));
            self.pending_level_ups += 1;
            // Full-bar display contract while a choice is owed
            self.xp_current = self.xp_needed;
        }
        if gained == 0 {
            self.xp_current = available;
        } else {
            log::info!(
                "level up x{gained} -> level {} (next at {} xp)",
                self.level,
                self.xp_needed
            );
        }
        gained
    }

    /// Acknowledge one queued level-up, restoring the bar for the next level.
    ///
    /// No-op when nothing is pending.
    pub fn consume_pending_level_up(&mut self) {
        if self.pending_level_ups == 0 {
            return;
        }
        self.pending_level_ups -= 1;
        match self.queued_progresses.pop_front() {
            Some(progress) => self.xp_current = progress.min(self.xp_needed),
            // Queue drained early: stay pinned until the rest are consumed
            None if self.pending_level_ups > 0 => self.xp_current = self.xp_needed,
            None => {}
        }
    }

    pub fn xp_total(&self) -> u64 {
        self.xp_total
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp_current(&self) -> u64 {
        self.xp_current
    }

    pub fn xp_needed(&self) -> u64 {
        self.xp_needed
    }

    pub fn xp_overflow(&self) -> f64 {
        self.xp_overflow
    }

    pub fn pending_level_ups(&self) -> u32 {
        self.pending_level_ups
    }

    pub fn queued_progresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.queued_progresses.iter().copied()
    }

    /// Rebuild from persisted fields, clamping anything malformed back into
    /// a usable state instead of rejecting the load.
    pub fn from_parts(
        xp_total: u64,
        level: u32,
        xp_current: u64,
        xp_needed: u64,
        xp_overflow: f64,
        pending_level_ups: u32,
        queued_progresses: Vec<u64>,
    ) -> Self {
        let xp_needed = xp_needed.max(1);
        Self {
            xp_total,
            level: level.max(1),
            xp_current: xp_current.min(xp_needed),
            xp_needed,
            xp_overflow: if xp_overflow.is_finite() { xp_overflow } else { 0.0 },
            pending_level_ups,
            queued_progresses: queued_progresses.into_iter().collect(),
        }
    }
}
