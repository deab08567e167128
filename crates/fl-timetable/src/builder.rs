//! Whole-table assembly.

use fl_core::{FlowRng, SimConfig};
use log::{debug, info};

use crate::{
    DepartureCountModel, FlowRecord, ModelConfig, TimetableError, TimetableResult,
    TravelTimeModel, Trip, TripSampler,
};

/// Counters reported after a build.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Flow records read.
    pub records: usize,
    /// Records skipped because they carry no volume.
    pub skipped: usize,
    /// Departures requested by the departure-count model.
    pub departures: u64,
    /// Trips kept in the table.
    pub trips: usize,
    /// Trips whose arrival was folded past the horizon end.
    pub wrapped: usize,
}

/// The full trip table for one horizon.
#[derive(Clone, Debug, Default)]
pub struct Timetable {
    pub trips:   Vec<Trip>,
    pub summary: BuildSummary,
}

impl Timetable {
    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Builds a [`Timetable`] from a flow table.
///
/// Every record is validated before any is sampled, so a bad record aborts
/// the build without partial output.  Trips appear in record order; within
/// a record, in draw order.
pub struct TimetableBuilder<'a> {
    sim:        &'a SimConfig,
    travel:     TravelTimeModel,
    departures: DepartureCountModel,
    sampler:    TripSampler,
    tolerance:  f64,
}

impl<'a> TimetableBuilder<'a> {
    /// Validate both configurations and prepare the models.
    pub fn new(sim: &'a SimConfig, model: &ModelConfig) -> TimetableResult<Self> {
        sim.validate()?;
        model.validate()?;
        Ok(Self {
            sim,
            travel:     TravelTimeModel::new(model, sim),
            departures: DepartureCountModel::new(model),
            sampler:    TripSampler::new(sim, model),
            tolerance:  model.sum_tolerance,
        })
    }

    pub fn build(&self, flows: &[FlowRecord]) -> TimetableResult<Timetable> {
        let slots = self.sim.category_slots();
        for (record, flow) in flows.iter().enumerate() {
            flow.validate(slots, self.tolerance)
                .map_err(|defect| TimetableError::InvalidFlow { record, defect })?;
        }

        let per_record = self.sample_all(flows)?;

        let mut summary = BuildSummary { records: flows.len(), ..BuildSummary::default() };
        let mut trips = Vec::with_capacity(per_record.iter().map(|(_, t)| t.len()).sum());
        for (flow, (requested, record_trips)) in flows.iter().zip(per_record) {
            if flow.is_empty() {
                summary.skipped += 1;
            }
            summary.departures += requested;
            summary.wrapped += record_trips.iter().filter(|t| t.wraps()).count();
            trips.extend(record_trips);
        }
        summary.trips = trips.len();

        info!(
            "timetable: {} trips from {} flow records ({} empty, {} wrapped, {} dropped)",
            summary.trips,
            summary.records,
            summary.skipped,
            summary.wrapped,
            summary.departures - summary.trips as u64,
        );
        Ok(Timetable { trips, summary })
    }

    /// Sample one record with its own RNG stream.
    fn sample_record(&self, record: usize, flow: &FlowRecord) -> TimetableResult<(u64, Vec<Trip>)> {
        let travel = self.travel.ticks(flow.origin_point, flow.destination_point);
        let departures = self.departures.departures(flow.volume);
        let mut rng = FlowRng::new(self.sim.seed, record);
        let trips = self
            .sampler
            .sample(flow, travel, departures, &mut rng)
            .map_err(|defect| TimetableError::InvalidFlow { record, defect })?;
        debug!(
            "flow {record} ({} -> {}): travel {travel} ticks, {departures} departures",
            flow.origin, flow.destination
        );
        Ok((departures, trips))
    }

    #[cfg(not(feature = "parallel"))]
    fn sample_all(&self, flows: &[FlowRecord]) -> TimetableResult<Vec<(u64, Vec<Trip>)>> {
        flows
            .iter()
            .enumerate()
            .map(|(record, flow)| self.sample_record(record, flow))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn sample_all(&self, flows: &[FlowRecord]) -> TimetableResult<Vec<(u64, Vec<Trip>)>> {
        use rayon::prelude::*;

        flows
            .par_iter()
            .enumerate()
            .map(|(record, flow)| self.sample_record(record, flow))
            .collect()
    }
}
