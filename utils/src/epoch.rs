//! Epoch boundaries derived from block numbers.

use serde::{Deserialize, Serialize};

use crate::format::{format_seconds_to_time, TIME_PLACEHOLDER};

/// A repeating boundary: epoch `k` begins at block `start_block + k * interval_blocks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochState {
    /// Block at which the first epoch begins
    pub start_block: u64,
    /// Length of an epoch in blocks
    pub interval_blocks: u64,
    /// Average block time of the chain in seconds
    pub average_block_seconds: u64,
}

/// Position of a block relative to the epoch schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochStatus {
    /// The current block precedes `start_block`
    NotStarted { blocks_until_start: u64 },
    Running {
        /// Index of the epoch containing the current block
        epoch_index: u64,
        /// First boundary block at or after the current block
        next_boundary: u64,
        remaining_blocks: u64,
    },
}

impl EpochState {
    /// Classifies `current_block` against the schedule.
    ///
    /// A block sitting exactly on a boundary has reached it, so `remaining_blocks` is 0
    /// there. A zero interval is reported as an already reached boundary.
    pub fn status(&self, current_block: u64) -> EpochStatus {
        if current_block < self.start_block {
            return EpochStatus::NotStarted {
                blocks_until_start: self.start_block - current_block,
            };
        }
        if self.interval_blocks == 0 {
            return EpochStatus::Running {
                epoch_index: 0,
                next_boundary: current_block,
                remaining_blocks: 0,
            };
        }

        let elapsed = current_block - self.start_block;
        let epoch_index = elapsed / self.interval_blocks;
        let next_boundary = if elapsed % self.interval_blocks == 0 {
            current_block
        } else {
            self.start_block
                .saturating_add((epoch_index + 1).saturating_mul(self.interval_blocks))
        };
        EpochStatus::Running {
            epoch_index,
            next_boundary,
            remaining_blocks: next_boundary.saturating_sub(current_block),
        }
    }

    /// Seconds until the next boundary, or `None` while the schedule has not started.
    ///
    /// A zero interval yields `Some(0)` regardless of the current block.
    pub fn seconds_until_next_epoch(&self, current_block: u64) -> Option<u64> {
        if self.interval_blocks == 0 {
            return Some(0);
        }
        match self.status(current_block) {
            EpochStatus::NotStarted { .. } => None,
            EpochStatus::Running {
                remaining_blocks, ..
            } => Some(remaining_blocks.saturating_mul(self.average_block_seconds)),
        }
    }

    /// Length of one epoch in seconds.
    pub fn interval_seconds(&self) -> u64 {
        self.interval_blocks
            .saturating_mul(self.average_block_seconds)
    }
}

/// Renders the length of an epoch interval.
pub fn format_epoch_interval(
    interval_blocks: Option<u64>,
    average_block_seconds: Option<u64>,
) -> String {
    let Some(interval_blocks) = interval_blocks else {
        return TIME_PLACEHOLDER.to_string();
    };
    let Some(average_block_seconds) = average_block_seconds else {
        return "(avg block time N/A)".to_string();
    };
    let seconds = interval_blocks.saturating_mul(average_block_seconds);
    format_seconds_to_time(Some(clamp_seconds(seconds)))
}

/// Local countdown ticking once per second between block updates.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: Option<u64>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the countdown from a freshly computed value; `None` clears it.
    pub fn reset(&mut self, seconds: Option<u64>) {
        self.remaining = seconds;
    }

    /// Advances one second, saturating at zero.
    pub fn tick(&mut self) -> Option<u64> {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        self.remaining
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn display(&self) -> String {
        format_seconds_to_time(self.remaining.map(clamp_seconds))
    }
}

fn clamp_seconds(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> EpochState {
        EpochState {
            start_block: 100,
            interval_blocks: 50,
            average_block_seconds: 12,
        }
    }

    #[test]
    fn remaining_time_mid_epoch() {
        let state = schedule();
        assert_eq!(
            state.status(120),
            EpochStatus::Running {
                epoch_index: 0,
                next_boundary: 150,
                remaining_blocks: 30
            }
        );
        assert_eq!(state.seconds_until_next_epoch(120), Some(360));
    }

    #[test]
    fn boundary_block_has_no_remaining_time() {
        let state = schedule();
        assert_eq!(state.seconds_until_next_epoch(150), Some(0));
        assert_eq!(state.seconds_until_next_epoch(151), Some(49 * 12));
        assert_eq!(
            state.status(151),
            EpochStatus::Running {
                epoch_index: 1,
                next_boundary: 200,
                remaining_blocks: 49
            }
        );
    }

    #[test]
    fn not_started_is_unavailable() {
        let state = schedule();
        assert_eq!(
            state.status(40),
            EpochStatus::NotStarted {
                blocks_until_start: 60
            }
        );
        assert_eq!(state.seconds_until_next_epoch(40), None);
    }

    #[test]
    fn zero_interval_is_zero() {
        let state = EpochState {
            interval_blocks: 0,
            ..schedule()
        };
        assert_eq!(state.seconds_until_next_epoch(120), Some(0));
        assert_eq!(state.seconds_until_next_epoch(10), Some(0));
    }

    #[test]
    fn interval_rendering() {
        assert_eq!(format_epoch_interval(Some(7200), Some(12)), "1d 0h 0m 0s");
        assert_eq!(format_epoch_interval(None, Some(12)), "--d --h --m --s");
        assert_eq!(format_epoch_interval(Some(7200), None), "(avg block time N/A)");
        assert_eq!(schedule().interval_seconds(), 600);
    }

    #[test]
    fn countdown_ticks_down_to_zero() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.display(), "--d --h --m --s");
        countdown.reset(Some(2));
        assert_eq!(countdown.display(), "0d 0h 0m 2s");
        assert_eq!(countdown.tick(), Some(1));
        assert_eq!(countdown.tick(), Some(0));
        assert_eq!(countdown.tick(), Some(0));
        assert_eq!(countdown.display(), "0d 0h 0m 0s");
        countdown.reset(None);
        assert_eq!(countdown.tick(), None);
    }
}
