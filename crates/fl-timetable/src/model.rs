//! Travel-time and departure-count models.
//!
//! Both models round half-to-even, so a volume that lands exactly on `.5`
//! vehicles rounds to the even neighbour.

use fl_core::{MapPoint, SimConfig};

use crate::{TimetableError, TimetableResult};

// ── WrapPolicy ────────────────────────────────────────────────────────────────

/// What to do with a trip whose arrival falls past the end of the horizon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WrapPolicy {
    /// Fold the arrival back to the start (`arrival mod horizon`).  The
    /// trip then spans the wrap point and is in flight both at the end and
    /// at the start of the horizon.
    #[default]
    Wrap,
    /// Pin the arrival to the last tick of the horizon.
    Clip,
    /// Discard the trip.
    Drop,
}

// ── ModelConfig ───────────────────────────────────────────────────────────────

/// Physical constants of the timetable models.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Map degrees → kilometres.  Default: 68.671.
    pub km_per_degree: f64,
    /// Effective speed over the straight-line distance.  Default: 60 km/h.
    pub speed_kmph: f64,
    /// Mass carried per map volume unit (e.g. kilotons).  Default: 0.5.
    pub mass_per_unit: f64,
    /// Mass one train or ship carries.  Default: 0.33.
    pub capacity_per_vehicle: f64,
    /// Allowed relative gap between the sub-volume sum and the total.
    pub sum_tolerance: f64,
    pub wrap_policy: WrapPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            km_per_degree:        68.671,
            speed_kmph:           60.0,
            mass_per_unit:        0.5,
            capacity_per_vehicle: 0.33,
            sum_tolerance:        1e-3,
            wrap_policy:          WrapPolicy::Wrap,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> TimetableResult<()> {
        let positive = [
            ("km_per_degree", self.km_per_degree),
            ("speed_kmph", self.speed_kmph),
            ("mass_per_unit", self.mass_per_unit),
            ("capacity_per_vehicle", self.capacity_per_vehicle),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimetableError::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.sum_tolerance.is_finite() || self.sum_tolerance < 0.0 {
            return Err(TimetableError::Config(format!(
                "sum_tolerance must be non-negative, got {}",
                self.sum_tolerance
            )));
        }
        Ok(())
    }
}

// ── TravelTimeModel ───────────────────────────────────────────────────────────

/// Straight-line distance → whole ticks of travel.
#[derive(Copy, Clone, Debug)]
pub struct TravelTimeModel {
    km_per_degree: f64,
    km_per_tick:   f64,
}

impl TravelTimeModel {
    pub fn new(model: &ModelConfig, sim: &SimConfig) -> Self {
        Self {
            km_per_degree: model.km_per_degree,
            km_per_tick:   model.speed_kmph / sim.ticks_per_hour as f64,
        }
    }

    /// Ticks needed to cover `origin → destination`.  Zero for identical
    /// points.
    pub fn ticks(&self, origin: MapPoint, destination: MapPoint) -> u64 {
        let km = origin.planar_distance(destination) * self.km_per_degree;
        (km / self.km_per_tick).round_ties_even().max(0.0) as u64
    }
}

// ── DepartureCountModel ───────────────────────────────────────────────────────

/// Annual volume → number of vehicle departures over the horizon.
#[derive(Copy, Clone, Debug)]
pub struct DepartureCountModel {
    vehicles_per_unit: f64,
}

impl DepartureCountModel {
    pub fn new(model: &ModelConfig) -> Self {
        Self {
            vehicles_per_unit: model.mass_per_unit / model.capacity_per_vehicle,
        }
    }

    /// Zero for zero (or negative) volume; non-decreasing in `volume`.
    pub fn departures(&self, volume: f64) -> u64 {
        (volume * self.vehicles_per_unit).round_ties_even().max(0.0) as u64
    }
}
