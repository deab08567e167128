//! Frame index → simulation time.

use chrono::NaiveDateTime;
use fl_core::{Tick, TimeGrid};

/// One unit of rendering work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameTask {
    /// Position in the output sequence; also the artifact key.
    pub index:     u64,
    /// Simulation tick shown by this frame (folded into the horizon).
    pub tick:      Tick,
    /// Calendar time shown by this frame.
    pub timestamp: NaiveDateTime,
}

/// Maps a monotonically increasing frame index to a timestamp.
///
/// One frame per tick: `timestamp = start + index * tick_secs`.  Indices past
/// the horizon keep counting calendar time but show the wrapped tick.
#[derive(Clone, Debug)]
pub struct FrameClock {
    grid: TimeGrid,
}

impl FrameClock {
    pub fn new(grid: TimeGrid) -> Self {
        Self { grid }
    }

    pub fn task(&self, index: u64) -> FrameTask {
        FrameTask {
            index,
            tick:      self.grid.wrap(index),
            timestamp: self.grid.timestamp(Tick(index)),
        }
    }

    /// Frames needed to cover the horizon once.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.grid.len()
    }

    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }
}
