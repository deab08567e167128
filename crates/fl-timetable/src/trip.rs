//! The trip row and its cargo category.

use std::fmt;

use fl_core::{CityId, Tick};

/// A 1-indexed cargo category.
///
/// With naval mode on and `N` land categories, `1..=N` are land and
/// `N+1..=2N` are naval.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category(pub u16);

impl Category {
    /// Category for the 0-based sub-volume slot `slot`, or `None` when the
    /// slot is past the largest category id.
    #[inline]
    pub fn from_slot(slot: usize) -> Option<Category> {
        u16::try_from(slot + 1).ok().map(Category)
    }

    /// 0-based sub-volume slot (and palette index).
    #[inline]
    pub fn slot(self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    /// `true` when the category lies in the naval half of the range.
    #[inline]
    pub fn is_naval(self, land_categories: u16) -> bool {
        self.0 > land_categories
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One simulated vehicle movement.  Immutable once built.
///
/// Both ticks lie in `[0, horizon)`.  When the arrival wrapped past the end
/// of the horizon, `arrival < departure`; such a trip is in flight from its
/// departure to the end of the horizon and again from tick 0 to its arrival.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub origin:      CityId,
    pub destination: CityId,
    pub departure:   Tick,
    pub arrival:     Tick,
    pub category:    Category,
    pub naval:       bool,
}

impl Trip {
    /// `true` if the arrival was folded back past the horizon end.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.arrival < self.departure
    }

    /// Ticks between departure and arrival on a horizon of `horizon` ticks.
    #[inline]
    pub fn duration(&self, horizon: u64) -> u64 {
        (self.arrival.0 + horizon - self.departure.0) % horizon
    }

    /// `true` if the vehicle is between its endpoints at `tick` (inclusive).
    pub fn is_active_at(&self, tick: Tick) -> bool {
        if self.wraps() {
            tick >= self.departure || tick <= self.arrival
        } else {
            self.departure <= tick && tick <= self.arrival
        }
    }

    /// Fraction of the route covered at `tick`, or `None` if not in flight.
    ///
    /// A zero-length trip reports `0.0` at its single active tick.
    pub fn progress_at(&self, tick: Tick, horizon: u64) -> Option<f64> {
        if !self.is_active_at(tick) {
            return None;
        }
        let duration = self.duration(horizon);
        if duration == 0 {
            return Some(0.0);
        }
        let elapsed = (tick.0 + horizon - self.departure.0) % horizon;
        Some(elapsed as f64 / duration as f64)
    }
}
