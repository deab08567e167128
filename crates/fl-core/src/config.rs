//! Top-level simulation configuration.
//!
//! One immutable `SimConfig` value is built at startup (usually from a JSON
//! file by the application crate) and passed by reference to every
//! component that needs the horizon, the tick rate, or the category layout.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{FlError, FlResult, TimeGrid};

/// Horizon, tick resolution, seed, and cargo category layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Calendar time of tick 0.
    pub start: NaiveDateTime,

    /// Ticks per simulated hour.  Must divide 3600 so a tick is a whole
    /// number of seconds.  Default: 12 (5-minute ticks).
    pub ticks_per_hour: u32,

    /// Total ticks in the horizon.  For 365 days of 5-minute ticks:
    /// 365 * 24 * 12 = 105 120.
    pub horizon_ticks: u64,

    /// Master RNG seed.  The same seed always produces the same timetable.
    pub seed: u64,

    /// Number of land cargo categories (`N`).
    pub category_count: u16,

    /// When `true`, flow records carry a second block of `N` naval
    /// sub-volumes and trips in categories `N+1..=2N` are ships.
    pub naval: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        let ticks_per_hour = 12;
        Self {
            start: NaiveDate::from_ymd_opt(1881, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            ticks_per_hour,
            horizon_ticks: 365 * 24 * ticks_per_hour as u64,
            seed: 0,
            category_count: 10,
            naval: true,
        }
    }
}

impl SimConfig {
    /// Reject configurations no component can work with.
    pub fn validate(&self) -> FlResult<()> {
        if self.horizon_ticks == 0 {
            return Err(FlError::Config("horizon_ticks must be positive".into()));
        }
        if self.ticks_per_hour == 0 || 3_600 % self.ticks_per_hour != 0 {
            return Err(FlError::Config(format!(
                "ticks_per_hour must divide 3600, got {}",
                self.ticks_per_hour
            )));
        }
        if self.category_count == 0 {
            return Err(FlError::Config("category_count must be positive".into()));
        }
        if self.category_slots() > u16::MAX as usize {
            return Err(FlError::Config(format!(
                "{} categories (naval mode doubles {}) exceed the category id range",
                self.category_slots(),
                self.category_count
            )));
        }
        Ok(())
    }

    /// Seconds per tick.
    #[inline]
    pub fn tick_secs(&self) -> u32 {
        3_600 / self.ticks_per_hour.max(1)
    }

    /// Number of sub-volume columns a flow record carries: `N`, or `2N` in
    /// naval mode.
    #[inline]
    pub fn category_slots(&self) -> usize {
        let n = self.category_count as usize;
        if self.naval { n * 2 } else { n }
    }

    /// Construct the `TimeGrid` for this run.
    pub fn make_grid(&self) -> TimeGrid {
        TimeGrid::new(self.start, self.tick_secs(), self.horizon_ticks)
    }
}
