//! Which trips are on the map at a given tick, and where.
//!
//! Vehicles move along the straight line between their endpoints at
//! constant speed.  A trip whose arrival wrapped past the horizon end is in
//! flight across the wrap point; see [`Trip::is_active_at`].

use std::collections::HashMap;

use fl_core::{CityId, MapPoint, Tick};
use fl_timetable::{Category, FlowRecord, Trip};

/// City id → map position, collected from a flow table.
#[derive(Clone, Debug, Default)]
pub struct CityAtlas {
    points: HashMap<CityId, MapPoint>,
}

impl CityAtlas {
    pub fn from_flows(flows: &[FlowRecord]) -> Self {
        let mut points = HashMap::with_capacity(flows.len() * 2);
        for flow in flows {
            points.entry(flow.origin).or_insert(flow.origin_point);
            points.entry(flow.destination).or_insert(flow.destination_point);
        }
        Self { points }
    }

    #[inline]
    pub fn point(&self, city: CityId) -> Option<MapPoint> {
        self.points.get(&city).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = MapPoint> + '_ {
        self.points.values().copied()
    }

    /// Bounding box `(min, max)` of all cities, or `None` when empty.
    pub fn bounds(&self) -> Option<(MapPoint, MapPoint)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                MapPoint::new(lo.x.min(p.x), lo.y.min(p.y)),
                MapPoint::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

/// A vehicle in flight at the queried tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveTrip {
    pub position: MapPoint,
    pub category: Category,
    pub naval:    bool,
    /// Fraction of the route covered, `0.0..=1.0`.
    pub progress: f64,
}

/// Trips in flight at `tick` on a horizon of `horizon` ticks.
///
/// Trips whose endpoints are missing from `atlas` are skipped.
pub fn active_trips(trips: &[Trip], tick: Tick, horizon: u64, atlas: &CityAtlas) -> Vec<ActiveTrip> {
    trips
        .iter()
        .filter_map(|trip| {
            let progress = trip.progress_at(tick, horizon)?;
            let from = atlas.point(trip.origin)?;
            let to = atlas.point(trip.destination)?;
            Some(ActiveTrip {
                position: from.lerp(to, progress),
                category: trip.category,
                naval:    trip.naval,
                progress,
            })
        })
        .collect()
}
