//! One flow record → concrete trips.

use fl_core::{FlowRng, SimConfig, Tick};
use rand::distributions::{Distribution, WeightedIndex};

use crate::{Category, FlowDefect, FlowRecord, ModelConfig, Trip, WrapPolicy};

/// Draws departure ticks and cargo categories for a single flow record.
///
/// Departures are uniform over the whole horizon: only the number of trips
/// depends on the volume, never their timing.  Categories are drawn
/// independently, with replacement, from the record's sub-volume shares.
#[derive(Copy, Clone, Debug)]
pub struct TripSampler {
    horizon:         u64,
    slots:           usize,
    land_categories: u16,
    naval:           bool,
    tolerance:       f64,
    wrap:            WrapPolicy,
}

impl TripSampler {
    pub fn new(sim: &SimConfig, model: &ModelConfig) -> Self {
        Self {
            horizon:         sim.horizon_ticks,
            slots:           sim.category_slots(),
            land_categories: sim.category_count,
            naval:           sim.naval,
            tolerance:       model.sum_tolerance,
            wrap:            model.wrap_policy,
        }
    }

    /// Produce up to `departures` trips for `flow`.
    ///
    /// Exactly `departures` trips come back under [`WrapPolicy::Wrap`] and
    /// [`WrapPolicy::Clip`]; [`WrapPolicy::Drop`] discards the ones that would
    /// arrive past the horizon.  An empty record yields no trips and never
    /// touches its probability vector.
    pub fn sample(
        &self,
        flow:         &FlowRecord,
        travel_ticks: u64,
        departures:   u64,
        rng:          &mut FlowRng,
    ) -> Result<Vec<Trip>, FlowDefect> {
        flow.validate(self.slots, self.tolerance)?;
        if flow.is_empty() || departures == 0 {
            return Ok(Vec::new());
        }

        let shares = flow.category_shares();
        let categories = WeightedIndex::new(&shares)
            .map_err(|_| FlowDefect::EmptyBreakdown(flow.volume))?;

        let mut trips = Vec::with_capacity(departures as usize);
        for _ in 0..departures {
            let departure = rng.gen_range(0..self.horizon);
            let slot = categories.sample(rng.inner());
            let category = Category::from_slot(slot)
                .ok_or(FlowDefect::SlotCount { expected: self.slots, got: flow.sub_volumes.len() })?;

            let Some(arrival) = self.arrival(departure, travel_ticks) else {
                continue;
            };

            trips.push(Trip {
                origin: flow.origin,
                destination: flow.destination,
                departure: Tick(departure),
                arrival,
                category,
                naval: self.naval && category.is_naval(self.land_categories),
            });
        }
        Ok(trips)
    }

    /// Resolve the arrival tick under the wrap policy.
    ///
    /// `departure` is below the horizon; `travel_ticks` may be anything.
    fn arrival(&self, departure: u64, travel_ticks: u64) -> Option<Tick> {
        if travel_ticks < self.horizon - departure {
            return Some(Tick(departure + travel_ticks));
        }
        match self.wrap {
            WrapPolicy::Wrap => Some(Tick((departure + travel_ticks % self.horizon) % self.horizon)),
            WrapPolicy::Clip => Some(Tick(self.horizon - 1)),
            WrapPolicy::Drop => None,
        }
    }
}
