//! Aggregate flow records and their validation.

use fl_core::{CityId, MapPoint};
use thiserror::Error;

/// Annual transport volume between two cities, broken down by category.
///
/// `sub_volumes` holds `N` land categories followed, in naval mode, by `N`
/// naval ones.  Their sum must equal `volume` within the configured
/// tolerance; see [`FlowRecord::validate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowRecord {
    pub origin:            CityId,
    pub origin_point:      MapPoint,
    pub destination:       CityId,
    pub destination_point: MapPoint,
    /// Total annual volume in map units.
    pub volume:            f64,
    pub sub_volumes:       Vec<f64>,
}

/// Why a flow record cannot be sampled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlowDefect {
    #[error("expected {expected} category sub-volumes, found {got}")]
    SlotCount { expected: usize, got: usize },

    #[error("total volume {0} is negative or not finite")]
    BadVolume(f64),

    #[error("sub-volume {value} in category slot {slot} is negative or not finite")]
    BadSubVolume { slot: usize, value: f64 },

    #[error("sub-volumes sum to zero but total volume is {0}")]
    EmptyBreakdown(f64),

    #[error("sub-volumes sum to {sum}, total volume is {total}")]
    SumMismatch { sum: f64, total: f64 },

    #[error("endpoint coordinates are not finite")]
    BadCoordinates,
}

impl FlowRecord {
    /// Check the record against `slots` expected sub-volume columns.
    ///
    /// `tolerance` is relative to the total volume.  Zero-volume records only
    /// have their shape checked: they produce no trips, so their breakdown
    /// is never turned into probabilities.
    pub fn validate(&self, slots: usize, tolerance: f64) -> Result<(), FlowDefect> {
        if self.sub_volumes.len() != slots {
            return Err(FlowDefect::SlotCount { expected: slots, got: self.sub_volumes.len() });
        }
        if !self.origin_point.is_finite() || !self.destination_point.is_finite() {
            return Err(FlowDefect::BadCoordinates);
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(FlowDefect::BadVolume(self.volume));
        }
        if let Some((slot, &value)) = self
            .sub_volumes
            .iter()
            .enumerate()
            .find(|&(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(FlowDefect::BadSubVolume { slot, value });
        }
        if self.is_empty() {
            return Ok(());
        }

        let sum = self.sub_volume_sum();
        if sum == 0.0 {
            return Err(FlowDefect::EmptyBreakdown(self.volume));
        }
        if (sum - self.volume).abs() > tolerance * self.volume {
            return Err(FlowDefect::SumMismatch { sum, total: self.volume });
        }
        Ok(())
    }

    /// `true` when the record carries no volume and yields no trips.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volume == 0.0
    }

    #[inline]
    pub fn sub_volume_sum(&self) -> f64 {
        self.sub_volumes.iter().sum()
    }

    /// Per-category probabilities, `sub_volume / volume`.
    ///
    /// Returns an all-zero vector for an empty record.
    pub fn category_shares(&self) -> Vec<f64> {
        if self.is_empty() {
            return vec![0.0; self.sub_volumes.len()];
        }
        self.sub_volumes.iter().map(|v| v / self.volume).collect()
    }
}
