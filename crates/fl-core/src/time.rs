//! Simulation time model.
//!
//! # Design
//!
//! Time is a discrete `Tick` counter over a fixed, finite horizon.  The
//! mapping to calendar time is held in `TimeGrid`:
//!
//!   timestamp = start + tick * tick_secs
//!
//! The horizon wraps: a raw tick count that runs past the last tick is folded
//! back with [`TimeGrid::wrap`].  Integer ticks keep every schedule
//! comparison exact.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick, `0 ≤ tick < horizon`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeGrid ──────────────────────────────────────────────────────────────────

/// The horizon: `len` ticks of `tick_secs` each, starting at `start`.
///
/// Immutable for the whole run; cheap to clone and share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeGrid {
    start:     NaiveDateTime,
    tick_secs: u32,
    len:       u64,
}

impl TimeGrid {
    pub fn new(start: NaiveDateTime, tick_secs: u32, len: u64) -> Self {
        Self { start, tick_secs, len }
    }

    /// Number of ticks in the horizon.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` if `tick` lies inside `[0, len)`.
    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        tick.0 < self.len
    }

    /// Fold a raw tick count back into the horizon.
    ///
    /// # Panics
    /// Panics if the grid is empty.
    #[inline]
    pub fn wrap(&self, raw: u64) -> Tick {
        Tick(raw % self.len)
    }

    /// Calendar time of `tick`.  Ticks past the horizon are not folded.
    pub fn timestamp(&self, tick: Tick) -> NaiveDateTime {
        self.start + Duration::seconds(tick.0 as i64 * self.tick_secs as i64)
    }
}

impl fmt::Display for TimeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks of {} s from {}",
            self.len, self.tick_secs, self.start
        )
    }
}
